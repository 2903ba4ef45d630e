mod logging;
mod preflight;

use clap::Parser;
use patchgate_core::classpath::{artifacts_from_manifest, project_roots_from_file};
use patchgate_core::config::RawParams;
use patchgate_core::launcher::{ClasspathSources, launch};
use patchgate_plugin::MatchCriteria;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::warn;

/// Prepare a patch-validation run: assemble the classpath, wire the byte
/// source, and select the patch-generation plugin.
#[derive(Parser)]
#[command(name = "patchgate", version, about)]
struct Cli {
    /// Group identifier of the subject project
    #[arg(long, value_name = "GROUP")]
    project_group: String,

    /// File holding the project's test-scope classpath
    /// (entries joined by the platform path separator)
    #[arg(long, value_name = "FILE")]
    classpath_file: Option<PathBuf>,

    /// JSON manifest of plugin-managed artifacts
    #[arg(long, value_name = "FILE")]
    artifact_manifest: Option<PathBuf>,

    /// Prefix distinguishing application classes from libraries;
    /// defaults to the project group
    #[arg(long, default_value = "")]
    whitelist_prefix: String,

    /// Minimum wait in ms before a test may be declared timed out
    #[arg(long, default_value_t = 2000)]
    timeout_bias: i64,

    /// Slack factor on top of a test's original running time
    #[arg(long, default_value_t = 0.5)]
    timeout_coefficient: f64,

    /// Failing test case; repeat for several. Omit to infer them.
    #[arg(long = "failing-test", value_name = "NAME")]
    failing_tests: Vec<String>,

    /// One folder per patch; all class files inside count as the patch
    #[arg(long, default_value = "patches-pool")]
    patches_pool: PathBuf,

    /// Reset the JVM between patches instead of restarting it
    #[arg(long)]
    reset_jvm: bool,

    /// Start a fresh JVM for each patch
    #[arg(long)]
    restart_jvm: bool,

    /// Monitor and reset interface initializers
    #[arg(long)]
    reset_interface: bool,

    /// Print detailed test failure messages
    #[arg(long)]
    debug: bool,

    /// Run the profiler only, without validating patches
    #[arg(long)]
    profiler_only: bool,

    /// Patch-generation plugin name (case does not matter)
    #[arg(long, value_name = "NAME")]
    plugin: Option<String>,

    /// Required plugin parameter as key=value; repeat for several
    #[arg(long = "plugin-param", value_name = "KEY=VALUE")]
    plugin_params: Vec<String>,

    /// "all tests" manifest forcing the same test set as the build tool
    #[arg(long, value_name = "FILE")]
    all_tests_file: Option<PathBuf>,

    /// Extra JVM arguments for the forked process, semicolon delimited
    #[arg(long, value_name = "ARGS")]
    arg_line: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let _guard = logging::init_logging("cli");

    let plugin = match &cli.plugin {
        Some(name) => match build_criteria(name, &cli.plugin_params) {
            Ok(criteria) => Some(criteria),
            Err(message) => {
                eprintln!("patchgate: {message}");
                return ExitCode::FAILURE;
            }
        },
        None => None,
    };

    let mut params = RawParams::from_env(&cli.project_group);
    params.whitelist_prefix = cli.whitelist_prefix;
    params.timeout_bias = cli.timeout_bias;
    params.timeout_coefficient = cli.timeout_coefficient;
    params.failing_tests = cli.failing_tests;
    params.patches_pool = cli.patches_pool;
    params.reset_jvm = cli.reset_jvm;
    params.restart_jvm = cli.restart_jvm;
    params.reset_interface = cli.reset_interface;
    params.debug = cli.debug;
    params.profiler_only = cli.profiler_only;
    params.plugin = plugin;
    params.all_tests_file = cli.all_tests_file;
    params.arg_line = cli.arg_line;

    let project_roots = match &cli.classpath_file {
        Some(file) => project_roots_from_file(file),
        None => {
            warn!("no project classpath file given");
            Vec::new()
        }
    };
    let plugin_artifacts = cli
        .artifact_manifest
        .as_deref()
        .map(artifacts_from_manifest)
        .unwrap_or_default();

    let sources = ClasspathSources {
        project_roots,
        plugin_artifacts,
    };

    match launch(params, sources, &preflight::PreflightEngine) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("patchgate: {e}");
            ExitCode::FAILURE
        }
    }
}

fn build_criteria(name: &str, params: &[String]) -> Result<MatchCriteria, String> {
    let mut criteria = MatchCriteria::new(name);
    for param in params {
        let (key, value) = param
            .split_once('=')
            .ok_or_else(|| format!("invalid plugin parameter (expected key=value): {param}"))?;
        criteria = criteria.with_param(key, value);
    }
    Ok(criteria)
}
