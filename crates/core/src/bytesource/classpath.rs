//! Classpath-scanning byte source.

use super::ByteSource;
use crate::classpath::{ClasspathRoot, ClasspathSet};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;
use zip::ZipArchive;

/// Scans classpath roots in order; the first root containing the class
/// wins. Directory roots are probed directly, archive roots by entry name.
pub struct ClasspathByteSource {
    classpath: ClasspathSet,
}

impl ClasspathByteSource {
    pub fn new(classpath: ClasspathSet) -> Self {
        Self { classpath }
    }

    fn read_from_root(root: &ClasspathRoot, entry_name: &str) -> Option<Arc<[u8]>> {
        let path = root.path();
        if path.is_dir() {
            read_class_file(&path.join(entry_name))
        } else if path.is_file() {
            read_archive_entry(path, entry_name)
        } else {
            None
        }
    }
}

impl ByteSource for ClasspathByteSource {
    fn fetch(&self, class_name: &str) -> Option<Arc<[u8]>> {
        let entry_name = class_entry_name(class_name);
        self.classpath
            .iter()
            .find_map(|root| Self::read_from_root(root, &entry_name))
    }
}

/// `com.example.Foo$Inner` → `com/example/Foo$Inner.class`.
fn class_entry_name(class_name: &str) -> String {
    format!("{}.class", class_name.replace('.', "/"))
}

fn read_class_file(path: &Path) -> Option<Arc<[u8]>> {
    std::fs::read(path).ok().map(Arc::from)
}

fn read_archive_entry(archive_path: &Path, entry_name: &str) -> Option<Arc<[u8]>> {
    let file = File::open(archive_path).ok()?;
    let mut archive = match ZipArchive::new(file) {
        Ok(archive) => archive,
        Err(e) => {
            debug!("unreadable archive {}: {e}", archive_path.display());
            return None;
        }
    };
    let mut entry = archive.by_name(entry_name).ok()?;
    let mut bytes = Vec::with_capacity(entry.size() as usize);
    entry.read_to_end(&mut bytes).ok()?;
    Some(Arc::from(bytes))
}
