//! Run configuration: raw parameters and their validated form.

use crate::error::{PatchgateError, Result};
use crate::naming::sanitize_test_name;
use patchgate_plugin::MatchCriteria;
use std::env;
use std::path::PathBuf;
use tracing::{info, warn};

/// A smaller bias leaves too little headroom to tell a slow test from a
/// hung one.
const MIN_USABLE_TIMEOUT_BIAS: i64 = 1000;

/// Raw, unchecked run parameters as collected from the command line and the
/// process environment.
#[derive(Debug, Clone)]
pub struct RawParams {
    /// JRE to fork test JVMs with; `None` when `JAVA_HOME` is unset.
    pub jre_home: Option<PathBuf>,
    /// Group identifier of the subject project; the whitelist prefix falls
    /// back to it when left empty.
    pub project_group: String,
    pub whitelist_prefix: String,
    pub timeout_bias: i64,
    pub timeout_coefficient: f64,
    pub failing_tests: Vec<String>,
    pub patches_pool: PathBuf,
    pub reset_jvm: bool,
    pub restart_jvm: bool,
    pub reset_interface: bool,
    pub debug: bool,
    pub profiler_only: bool,
    pub plugin: Option<MatchCriteria>,
    pub all_tests_file: Option<PathBuf>,
    /// Extra JVM arguments for the forked process, delimited by semicolons.
    pub arg_line: Option<String>,
}

impl RawParams {
    /// Defaults, with the JRE home taken from `JAVA_HOME`.
    pub fn from_env(project_group: impl Into<String>) -> Self {
        Self {
            jre_home: env::var_os("JAVA_HOME").map(PathBuf::from),
            ..Self::bare(project_group)
        }
    }

    /// Defaults with no JRE home; callers inject one explicitly.
    pub fn bare(project_group: impl Into<String>) -> Self {
        Self {
            jre_home: None,
            project_group: project_group.into(),
            whitelist_prefix: String::new(),
            timeout_bias: 2000,
            timeout_coefficient: 0.5,
            failing_tests: Vec::new(),
            patches_pool: PathBuf::from("patches-pool"),
            reset_jvm: false,
            restart_jvm: false,
            reset_interface: false,
            debug: false,
            profiler_only: false,
            plugin: None,
            all_tests_file: None,
            arg_line: None,
        }
    }
}

/// Immutable snapshot of sanitized parameters.
#[derive(Debug, Clone)]
pub struct ValidatedConfig {
    pub jre_home: PathBuf,
    pub whitelist_prefix: String,
    /// Sanitized failing-test names; empty when inference is on.
    pub failing_tests: Vec<String>,
    pub infer_failing_tests: bool,
    pub timeout_bias: u64,
    pub timeout_coefficient: f64,
    pub patches_pool: PathBuf,
    /// Effective flag: resetting is pointless when every patch gets a fresh
    /// JVM anyway.
    pub reset_jvm: bool,
    pub restart_jvm: bool,
    pub reset_interface: bool,
    pub debug: bool,
    pub profiler_only: bool,
    pub plugin: Option<MatchCriteria>,
    pub all_tests_file: Option<PathBuf>,
    pub extra_jvm_args: Vec<String>,
}

/// Check and normalize raw parameters.
///
/// Fails fast on the first invalid value; warning-level conditions are
/// logged and do not fail the run.
pub fn validate(params: RawParams) -> Result<ValidatedConfig> {
    let jre_home = params
        .jre_home
        .ok_or_else(|| PatchgateError::Configuration("JAVA_HOME is not set".into()))?;
    if !jre_home.is_dir() {
        return Err(PatchgateError::Configuration(format!(
            "invalid JAVA_HOME: {}",
            jre_home.display()
        )));
    }

    let whitelist_prefix = if params.whitelist_prefix.is_empty() {
        warn!("missing whitelist prefix");
        info!("using {} as whitelist prefix", params.project_group);
        params.project_group
    } else {
        params.whitelist_prefix
    };

    if params.timeout_bias < 0 {
        return Err(PatchgateError::Configuration(format!(
            "invalid timeout bias: {}",
            params.timeout_bias
        )));
    }
    if params.timeout_bias < MIN_USABLE_TIMEOUT_BIAS {
        warn!("too small timeout bias: {}", params.timeout_bias);
    }

    if params.timeout_coefficient < 0.0 {
        return Err(PatchgateError::Configuration(format!(
            "invalid timeout coefficient: {}",
            params.timeout_coefficient
        )));
    }

    let infer_failing_tests = params.failing_tests.is_empty();
    let failing_tests = params
        .failing_tests
        .iter()
        .map(|name| sanitize_test_name(name))
        .collect();

    let extra_jvm_args = params
        .arg_line
        .as_deref()
        .map(split_arg_line)
        .unwrap_or_default();

    Ok(ValidatedConfig {
        jre_home,
        whitelist_prefix,
        failing_tests,
        infer_failing_tests,
        timeout_bias: params.timeout_bias as u64,
        timeout_coefficient: params.timeout_coefficient,
        patches_pool: params.patches_pool,
        reset_jvm: params.reset_jvm && !params.restart_jvm,
        restart_jvm: params.restart_jvm,
        reset_interface: params.reset_interface,
        debug: params.debug,
        profiler_only: params.profiler_only,
        plugin: params.plugin,
        all_tests_file: params.all_tests_file,
        extra_jvm_args,
    })
}

fn split_arg_line(line: &str) -> Vec<String> {
    line.split(';')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}
