//! Live-process byte source.
//!
//! Some classes are observable only inside the running process: generated
//! on the fly, or loaded from sources no classpath root represents. The
//! host publishes their bytes into a process-wide registry; the runtime
//! layer reads them back.

use super::ByteSource;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use std::sync::Arc;

static GLOBAL: Lazy<Arc<RuntimeClassRegistry>> =
    Lazy::new(|| Arc::new(RuntimeClassRegistry::new()));

/// Process-wide map of class name → live bytes.
pub struct RuntimeClassRegistry {
    classes: DashMap<String, Arc<[u8]>>,
}

impl RuntimeClassRegistry {
    pub fn new() -> Self {
        Self {
            classes: DashMap::new(),
        }
    }

    /// The registry shared by the whole process.
    pub fn global() -> Arc<RuntimeClassRegistry> {
        GLOBAL.clone()
    }

    /// Publish the live bytes of `class_name`. Re-publishing replaces the
    /// previous bytes: a redefined class supersedes its old shape.
    pub fn publish(&self, class_name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) {
        self.classes.insert(class_name.into(), bytes.into());
    }

    pub fn get(&self, class_name: &str) -> Option<Arc<[u8]>> {
        self.classes.get(class_name).map(|entry| entry.value().clone())
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl Default for RuntimeClassRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Byte source over a runtime class registry.
pub struct RuntimeByteSource {
    registry: Arc<RuntimeClassRegistry>,
}

impl RuntimeByteSource {
    pub fn new(registry: Arc<RuntimeClassRegistry>) -> Self {
        Self { registry }
    }

    /// Source backed by the process-wide registry.
    pub fn from_global() -> Self {
        Self::new(RuntimeClassRegistry::global())
    }
}

impl ByteSource for RuntimeByteSource {
    fn fetch(&self, class_name: &str) -> Option<Arc<[u8]>> {
        self.registry.get(class_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn published_bytes_are_fetchable() {
        let registry = Arc::new(RuntimeClassRegistry::new());
        registry.publish("com.example.Generated", &b"live-bytes"[..]);

        let source = RuntimeByteSource::new(registry);

        assert_eq!(
            &source.fetch("com.example.Generated").unwrap()[..],
            b"live-bytes"
        );
        assert!(source.fetch("com.example.Unpublished").is_none());
    }

    #[test]
    fn republishing_replaces_previous_bytes() {
        let registry = Arc::new(RuntimeClassRegistry::new());
        registry.publish("com.example.Redefined", &b"v1"[..]);
        registry.publish("com.example.Redefined", &b"v2"[..]);

        assert_eq!(&registry.get("com.example.Redefined").unwrap()[..], b"v2");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn global_registry_is_shared() {
        RuntimeClassRegistry::global().publish("patchgate.test.GlobalProbe", &b"probe"[..]);

        let source = RuntimeByteSource::from_global();

        assert!(source.fetch("patchgate.test.GlobalProbe").is_some());
    }
}
