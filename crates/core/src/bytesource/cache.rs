//! Bounded memoization in front of the lookup chain.

use super::ByteSource;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

/// Capacity of the class-byte cache.
pub const CACHE_SIZE: usize = 200;

/// Caching decorator over a byte-source chain.
///
/// Results are memoized per class name, misses included: a class absent
/// now stays absent for the rest of the run, and the repeated classpath
/// scan for it is the expensive case.
pub struct CachedByteSource {
    inner: Box<dyn ByteSource>,
    cache: Mutex<LruCache<String, Option<Arc<[u8]>>>>,
}

impl CachedByteSource {
    pub fn new(inner: Box<dyn ByteSource>, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner,
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Number of class names currently memoized.
    pub fn cached_entries(&self) -> usize {
        self.cache.lock().unwrap().len()
    }

    /// Whether `class_name` is memoized, without touching recency or the
    /// underlying chain.
    pub fn is_cached(&self, class_name: &str) -> bool {
        self.cache.lock().unwrap().contains(class_name)
    }
}

impl ByteSource for CachedByteSource {
    fn fetch(&self, class_name: &str) -> Option<Arc<[u8]>> {
        if let Some(hit) = self.cache.lock().unwrap().get(class_name) {
            return hit.clone();
        }
        // The lock is not held across the chain lookup: two threads racing
        // on the same uncached name may both compute, but they arrive at
        // the same bytes and the second write is a no-op overwrite.
        let computed = self.inner.fetch(class_name);
        self.cache
            .lock()
            .unwrap()
            .put(class_name.to_string(), computed.clone());
        computed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts underlying lookups so tests can observe cache behavior.
    struct CountingSource {
        lookups: Arc<AtomicUsize>,
        known: &'static str,
        bytes: &'static [u8],
    }

    impl ByteSource for CountingSource {
        fn fetch(&self, class_name: &str) -> Option<Arc<[u8]>> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            (class_name == self.known).then(|| Arc::from(self.bytes))
        }
    }

    fn counting(known: &'static str, bytes: &'static [u8]) -> (CachedByteSource, Arc<AtomicUsize>) {
        let lookups = Arc::new(AtomicUsize::new(0));
        let source = CachedByteSource::new(
            Box::new(CountingSource {
                lookups: lookups.clone(),
                known,
                bytes,
            }),
            CACHE_SIZE,
        );
        (source, lookups)
    }

    #[test]
    fn repeated_fetch_hits_the_cache_with_identical_bytes() {
        let (source, lookups) = counting("com.example.Foo", b"bytecode");

        let first = source.fetch("com.example.Foo").unwrap();
        let second = source.fetch("com.example.Foo").unwrap();

        assert_eq!(first, second);
        assert_eq!(lookups.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn misses_are_cached_too() {
        let (source, lookups) = counting("com.example.Foo", b"bytecode");

        assert!(source.fetch("com.example.Absent").is_none());
        assert!(source.fetch("com.example.Absent").is_none());

        assert_eq!(lookups.load(Ordering::SeqCst), 1);
        assert!(source.is_cached("com.example.Absent"));
    }

    #[test]
    fn least_recently_used_entry_is_evicted_at_capacity() {
        let (source, _) = counting("com.example.Foo", b"bytecode");

        for i in 0..=CACHE_SIZE {
            source.fetch(&format!("com.example.C{i}"));
        }

        // 201 distinct names through a 200-entry cache: the first, never
        // touched again, is gone; the rest are still memoized.
        assert_eq!(source.cached_entries(), CACHE_SIZE);
        assert!(!source.is_cached("com.example.C0"));
        assert!(source.is_cached(&format!("com.example.C{CACHE_SIZE}")));
    }

    #[test]
    fn evicted_entries_are_recomputed_from_the_chain() {
        let (source, lookups) = counting("com.example.Foo", b"bytecode");

        source.fetch("com.example.Foo");
        for i in 0..CACHE_SIZE {
            source.fetch(&format!("com.example.C{i}"));
        }
        assert!(!source.is_cached("com.example.Foo"));

        let bytes = source.fetch("com.example.Foo").unwrap();

        assert_eq!(&bytes[..], b"bytecode");
        // One initial lookup, 200 fillers, one recomputation.
        assert_eq!(lookups.load(Ordering::SeqCst), CACHE_SIZE + 2);
    }

    #[test]
    fn concurrent_readers_see_consistent_bytes() {
        let (source, _) = counting("com.example.Foo", b"bytecode");
        let source = Arc::new(source);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let source = source.clone();
                std::thread::spawn(move || source.fetch("com.example.Foo").unwrap())
            })
            .collect();

        for handle in handles {
            assert_eq!(&handle.join().unwrap()[..], b"bytecode");
        }
    }
}
