//! Layered byte-source resolution.
//!
//! Fetching class bytes is I/O-bound and repeated across many validation
//! runs against the same classes, so the lookup chain sits behind a bounded
//! cache: classpath scan first, then the live runtime registry for classes
//! that exist only inside the running process.

mod cache;
mod classpath;
mod runtime;

pub use cache::{CACHE_SIZE, CachedByteSource};
pub use classpath::ClasspathByteSource;
pub use runtime::{RuntimeByteSource, RuntimeClassRegistry};

use crate::classpath::ClasspathSet;
use std::sync::Arc;

/// Capability: fetch the bytecode of a class by fully-qualified name.
///
/// Absent classes yield `None`; implementations never fail, they miss.
pub trait ByteSource: Send + Sync {
    fn fetch(&self, class_name: &str) -> Option<Arc<[u8]>>;
}

/// Ordered chain of byte sources; the first hit wins.
pub struct LayeredByteSource {
    layers: Vec<Box<dyn ByteSource>>,
}

impl LayeredByteSource {
    pub fn new(layers: Vec<Box<dyn ByteSource>>) -> Self {
        Self { layers }
    }
}

impl ByteSource for LayeredByteSource {
    fn fetch(&self, class_name: &str) -> Option<Arc<[u8]>> {
        self.layers.iter().find_map(|layer| layer.fetch(class_name))
    }
}

/// Compose the standard chain: classpath scan, runtime-registry fallback,
/// bounded cache in front.
pub fn build_byte_source(classpath: ClasspathSet) -> CachedByteSource {
    let chain = LayeredByteSource::new(vec![
        Box::new(ClasspathByteSource::new(classpath)),
        Box::new(RuntimeByteSource::from_global()),
    ]);
    CachedByteSource::new(Box::new(chain), CACHE_SIZE)
}
