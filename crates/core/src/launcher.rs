//! Launch orchestration: validate, assemble, resolve, select, hand off.
//!
//! The steps are strictly ordered; no step begins before its predecessor
//! completes, and no partial context is ever handed to the engine once a
//! validation step fails.

use crate::bytesource::{CachedByteSource, build_byte_source};
use crate::classpath::{ArtifactRef, ClasspathRoot, ClasspathSet, plugin_artifact_roots};
use crate::config::{RawParams, ValidatedConfig, validate};
use crate::error::{PatchgateError, Result};
use patchgate_plugin::{BoxError, PatchPlugin, PluginRegistry};
use tracing::{debug, error, info};

/// Everything the external validation engine needs for a run.
pub struct ExecutionContext {
    pub classpath: ClasspathSet,
    /// `-cp`-ready rendering of the classpath.
    pub classpath_string: String,
    pub byte_source: CachedByteSource,
    pub config: ValidatedConfig,
    pub plugin: Option<Box<dyn PatchPlugin>>,
}

/// The external validation engine boundary. The engine forks JVMs, reruns
/// tests, and judges patches; none of that happens in this crate.
pub trait ValidationEngine {
    fn run(&self, ctx: ExecutionContext) -> std::result::Result<(), BoxError>;
}

/// Classpath inputs for a run.
#[derive(Debug, Clone, Default)]
pub struct ClasspathSources {
    /// Test-scope classpath roots of the subject project.
    pub project_roots: Vec<ClasspathRoot>,
    /// Plugin-managed artifacts; only the tool's own survives filtering.
    pub plugin_artifacts: Vec<ArtifactRef>,
}

/// Validate parameters, assemble the run context, and hand it to `engine`.
///
/// Plugin selection goes through the process-global [`PluginRegistry`];
/// `launch_with_registry` exists for callers bringing their own.
pub fn launch(
    params: RawParams,
    sources: ClasspathSources,
    engine: &dyn ValidationEngine,
) -> Result<()> {
    launch_with_registry(params, sources, PluginRegistry::global(), engine)
}

pub fn launch_with_registry(
    params: RawParams,
    sources: ClasspathSources,
    registry: &PluginRegistry,
    engine: &dyn ValidationEngine,
) -> Result<()> {
    let config = validate(params)?;

    let plugin = match &config.plugin {
        Some(criteria) => Some(registry.locate(criteria)?),
        None => {
            debug!("no patch generation plugin requested");
            None
        }
    };

    let classpath = ClasspathSet::assemble(
        sources.project_roots,
        plugin_artifact_roots(&sources.plugin_artifacts),
    );
    info!("assembled classpath with {} roots", classpath.len());
    let classpath_string = classpath.join();
    let byte_source = build_byte_source(classpath.clone());

    let ctx = ExecutionContext {
        classpath,
        classpath_string,
        byte_source,
        config,
        plugin,
    };

    if let Err(e) = engine.run(ctx) {
        error!("validation engine failed: {e}");
        return Err(PatchgateError::Engine(e));
    }
    Ok(())
}
