//! Default engine for the CLI: report what a run would see, execute
//! nothing.

use patchgate_core::bytesource::ByteSource;
use patchgate_core::launcher::{ExecutionContext, ValidationEngine};
use patchgate_plugin::BoxError;
use tracing::info;

/// Logs the assembled context and probes the byte source, leaving actual
/// patch validation to a real engine.
pub struct PreflightEngine;

impl ValidationEngine for PreflightEngine {
    fn run(&self, ctx: ExecutionContext) -> Result<(), BoxError> {
        info!(
            "classpath ({} roots): {}",
            ctx.classpath.len(),
            ctx.classpath_string
        );
        info!("JRE home: {}", ctx.config.jre_home.display());
        info!("whitelist prefix: {}", ctx.config.whitelist_prefix);
        if ctx.config.infer_failing_tests {
            info!("failing tests will be inferred");
        } else {
            info!("failing tests: {}", ctx.config.failing_tests.join(", "));
        }
        info!(
            "timeout bias {} ms, coefficient {}",
            ctx.config.timeout_bias, ctx.config.timeout_coefficient
        );
        info!("patches pool: {}", ctx.config.patches_pool.display());
        info!(
            "reset JVM: {}, restart JVM: {}, reset interfaces: {}",
            ctx.config.reset_jvm, ctx.config.restart_jvm, ctx.config.reset_interface
        );
        if ctx.config.profiler_only {
            info!("profiler-only run: no patches will be validated");
        }
        if !ctx.config.extra_jvm_args.is_empty() {
            info!("extra JVM args: {}", ctx.config.extra_jvm_args.join(" "));
        }
        match &ctx.plugin {
            Some(plugin) => {
                let descriptor = plugin.descriptor();
                info!(
                    "selected plugin: {} ({})",
                    descriptor.name, descriptor.description
                );
            }
            None => info!("no patch generation plugin requested"),
        }

        // Probe one class under the whitelist prefix through the full chain
        // to show whether the byte source is wired to the right roots.
        let probe = format!("{}.Probe", ctx.config.whitelist_prefix);
        match ctx.byte_source.fetch(&probe) {
            Some(bytes) => info!("byte source probe {probe}: {} bytes", bytes.len()),
            None => info!("byte source probe {probe}: not found"),
        }

        Ok(())
    }
}
