//! Explicit plugin registry.
//!
//! Plugins are registered under their normalized name at process start;
//! lookup constructs candidates in registration order and returns the first
//! whose descriptor matches the request.

use crate::{BoxError, MatchCriteria, PatchPlugin, PluginError};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use std::sync::RwLock;
use tracing::info;

pub type PluginFactory = Box<dyn Fn() -> Result<Box<dyn PatchPlugin>, BoxError> + Send + Sync>;

static GLOBAL: Lazy<PluginRegistry> = Lazy::new(PluginRegistry::new);

/// Thread-safe name → factory registry with stable registration order.
pub struct PluginRegistry {
    factories: RwLock<IndexMap<String, PluginFactory>>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self {
            factories: RwLock::new(IndexMap::new()),
        }
    }

    /// Process-wide registry, populated by static registration at startup.
    pub fn global() -> &'static PluginRegistry {
        &GLOBAL
    }

    /// Register a factory under `name`. Names are case-insensitive and must
    /// be unique.
    pub fn register(
        &self,
        name: &str,
        factory: impl Fn() -> Result<Box<dyn PatchPlugin>, BoxError> + Send + Sync + 'static,
    ) -> Result<(), PluginError> {
        let key = name.to_ascii_lowercase();
        let mut factories = self.factories.write().unwrap();
        if factories.contains_key(&key) {
            return Err(PluginError::Duplicate(key));
        }
        factories.insert(key, Box::new(factory));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.factories.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.read().unwrap().is_empty()
    }

    /// Construct candidates in registration order and return the first whose
    /// descriptor satisfies `criteria`.
    ///
    /// The first factory that fails to construct aborts the whole search: an
    /// unconstructible plugin indicates a packaging defect, not a candidate
    /// to skip.
    pub fn locate(&self, criteria: &MatchCriteria) -> Result<Box<dyn PatchPlugin>, PluginError> {
        let factories = self.factories.read().unwrap();
        for (name, factory) in factories.iter() {
            let plugin = factory().map_err(|source| PluginError::Construction {
                name: name.clone(),
                source,
            })?;
            let descriptor = plugin.descriptor();
            if criteria.matches(descriptor) {
                info!(
                    "found patch generation plugin: {} ({})",
                    descriptor.name, descriptor.description
                );
                return Ok(plugin);
            }
        }
        Err(PluginError::NotFound {
            criteria: criteria.to_string(),
        })
    }
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::new()
    }
}
