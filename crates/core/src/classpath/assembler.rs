//! Sources feeding the classpath set.

use super::ClasspathRoot;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Group identity of the tool's own plugin artifact.
pub const PLUGIN_GROUP_ID: &str = "org.patchgate";
/// Artifact identity of the tool's own plugin artifact.
pub const PLUGIN_ARTIFACT_ID: &str = "patchgate-plugin";

/// One plugin-managed artifact, as listed in the artifact manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactRef {
    pub group: String,
    pub artifact: String,
    pub path: PathBuf,
}

impl ArtifactRef {
    /// Only the tool's own plugin artifact belongs on the classpath; its
    /// other dependencies would pollute the subject project's loading.
    pub fn is_relevant(&self) -> bool {
        self.group == PLUGIN_GROUP_ID && self.artifact == PLUGIN_ARTIFACT_ID
    }
}

/// Read the subject project's test-scope classpath from `file`.
///
/// Entries are separated by the platform path separator; newlines around
/// entries are tolerated. An unreadable file is a non-fatal condition: the
/// run proceeds with whatever subset is available.
pub fn project_roots_from_file(file: &Path) -> Vec<ClasspathRoot> {
    match std::fs::read_to_string(file) {
        Ok(text) => project_roots_from_str(&text),
        Err(e) => {
            warn!("project classpath unavailable ({}): {e}", file.display());
            Vec::new()
        }
    }
}

/// Parse classpath entries from their joined-string form.
pub fn project_roots_from_str(text: &str) -> Vec<ClasspathRoot> {
    text.lines()
        .flat_map(|line| std::env::split_paths(line.trim()))
        .filter(|path| !path.as_os_str().is_empty())
        .map(ClasspathRoot::new)
        .collect()
}

/// Read the plugin artifact manifest (JSON list of artifacts).
///
/// Like the project classpath, a missing or malformed manifest is
/// non-fatal.
pub fn artifacts_from_manifest(file: &Path) -> Vec<ArtifactRef> {
    let text = match std::fs::read_to_string(file) {
        Ok(text) => text,
        Err(e) => {
            warn!("artifact manifest unavailable ({}): {e}", file.display());
            return Vec::new();
        }
    };
    match serde_json::from_str(&text) {
        Ok(artifacts) => artifacts,
        Err(e) => {
            warn!("artifact manifest unreadable ({}): {e}", file.display());
            Vec::new()
        }
    }
}

/// Keep only the tool's own artifact out of the plugin-managed set.
pub fn plugin_artifact_roots(artifacts: &[ArtifactRef]) -> Vec<ClasspathRoot> {
    let mut roots = Vec::new();
    for artifact in artifacts {
        if artifact.is_relevant() {
            roots.push(ClasspathRoot::new(&artifact.path));
        } else {
            debug!(
                "skipping irrelevant plugin dependency {}:{}",
                artifact.group, artifact.artifact
            );
        }
    }
    roots
}
