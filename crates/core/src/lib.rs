//! Launch core for patch-validation runs.
//!
//! Validates run parameters, assembles the classpath of the project under
//! test together with the tool's own plugin artifact, builds a cached
//! layered byte source for class bytes, selects the requested
//! patch-generation plugin, and hands the resulting execution context to
//! the external validation engine.

pub mod bytesource;
pub mod classpath;
pub mod config;
pub mod error;
pub mod launcher;
pub mod naming;

pub use error::{PatchgateError, Result};
pub use launcher::{
    ClasspathSources, ExecutionContext, ValidationEngine, launch, launch_with_registry,
};
