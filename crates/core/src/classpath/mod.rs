//! Classpath assembly for the project under test and the tool's own plugin
//! machinery.

mod assembler;
pub use assembler::{
    ArtifactRef, PLUGIN_ARTIFACT_ID, PLUGIN_GROUP_ID, artifacts_from_manifest,
    plugin_artifact_roots, project_roots_from_file, project_roots_from_str,
};

use std::fmt;
use std::path::{Path, PathBuf};

/// A filesystem location contributing class bytes: a class directory or a
/// packaged archive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClasspathRoot(PathBuf);

impl ClasspathRoot {
    /// Identity is the absolute path; relative entries are anchored to the
    /// working directory without resolving symlinks.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let path = std::path::absolute(&path).unwrap_or(path);
        Self(path)
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for ClasspathRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Ordered, duplicate-free sequence of classpath roots.
///
/// Project roots always precede plugin roots; insertion order is preserved
/// within each group. Lookup is first-match-wins, so a later duplicate
/// could never contribute bytes; duplicates are dropped at construction.
#[derive(Debug, Clone, Default)]
pub struct ClasspathSet {
    roots: Vec<ClasspathRoot>,
}

impl ClasspathSet {
    /// Merge project and plugin roots, project first.
    pub fn assemble(project: Vec<ClasspathRoot>, plugin: Vec<ClasspathRoot>) -> Self {
        let mut set = ClasspathSet::default();
        for root in project.into_iter().chain(plugin) {
            set.push(root);
        }
        set
    }

    fn push(&mut self, root: ClasspathRoot) {
        if !self.roots.contains(&root) {
            self.roots.push(root);
        }
    }

    pub fn roots(&self) -> &[ClasspathRoot] {
        &self.roots
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClasspathRoot> {
        self.roots.iter()
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Render the set as a single `-cp`-ready string for a forked JVM.
    pub fn join(&self) -> String {
        let separator = if cfg!(windows) { ";" } else { ":" };
        self.roots
            .iter()
            .map(ClasspathRoot::to_string)
            .collect::<Vec<_>>()
            .join(separator)
    }
}
