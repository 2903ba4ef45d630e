//! Patch-generation plugin capability and registry.
//!
//! A patch-generation plugin fills the patches pool with candidate patches
//! for the validation engine to judge. Implementations register a factory
//! under their plugin name at process start; the launcher selects one by
//! matching descriptors against the user's request.

pub mod descriptor;
pub mod error;
pub mod registry;

pub use descriptor::{MatchCriteria, PluginDescriptor};
pub use error::PluginError;
pub use registry::{PluginFactory, PluginRegistry};

use std::path::Path;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The capability every patch-generation strategy implements.
pub trait PatchPlugin: Send + Sync + std::fmt::Debug {
    /// Descriptor used for name/parameter matching against a user request.
    fn descriptor(&self) -> &PluginDescriptor;

    /// Generate candidate patches into the patches pool, one folder per
    /// patch.
    fn generate(&self, patches_pool: &Path) -> Result<(), BoxError>;
}
