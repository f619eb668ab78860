//! One-shot cache of the corpus root's visible entry names.
//!
//! The first caller scans the root; every later caller, on any thread, sees
//! the same published state. A failed scan is cached just like a successful
//! one and is never retried for the life of the index.

use std::path::{Path, PathBuf};

use once_cell::sync::OnceCell;

use crate::constants::HIDDEN_ENTRY_PREFIX;
use crate::error::{DatasourceError, Result};

/// Outcome of the single directory scan.
#[derive(Debug)]
pub enum IndexState {
    Loaded(Vec<String>),
    Failed(DatasourceError),
}

#[derive(Debug)]
pub struct DirectoryIndex {
    root: PathBuf,
    state: OnceCell<IndexState>,
}

impl DirectoryIndex {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            state: OnceCell::new(),
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Scan the root on first call; afterwards return the cached state.
    #[must_use]
    pub fn ensure_loaded(&self) -> &IndexState {
        self.state.get_or_init(|| match scan(&self.root) {
            Ok(entries) => {
                tracing::debug!(
                    index.root = %self.root.display(),
                    index.entries = entries.len(),
                    "directory index loaded"
                );
                IndexState::Loaded(entries)
            }
            Err(err) => {
                tracing::warn!(
                    index.root = %self.root.display(),
                    error = %err,
                    "directory index unavailable"
                );
                IndexState::Failed(err)
            }
        })
    }

    /// Visible entry names, loading them if needed, or the cached fault.
    pub fn entries(&self) -> std::result::Result<&[String], &DatasourceError> {
        match self.ensure_loaded() {
            IndexState::Loaded(entries) => Ok(entries),
            IndexState::Failed(err) => Err(err),
        }
    }

    /// The cached state without triggering a scan.
    #[must_use]
    pub fn state(&self) -> Option<&IndexState> {
        self.state.get()
    }
}

fn scan(root: &Path) -> Result<Vec<String>> {
    if !root.exists() {
        return Err(DatasourceError::DirectoryNotFound);
    }
    let mut entries = Vec::new();
    for entry in fs_err::read_dir(root)? {
        let name = match entry?.file_name().into_string() {
            Ok(name) => name,
            Err(raw) => {
                tracing::warn!(index.entry = ?raw, "skipping entry with non UTF-8 name");
                continue;
            }
        };
        if !name.starts_with(HIDDEN_ENTRY_PREFIX) {
            entries.push(name);
        }
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use tempfile::tempdir;

    fn touch(dir: &Path, name: &str) {
        std::fs::write(dir.join(name), name).expect("write fixture");
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn non_utf8_entries_are_skipped() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempdir().expect("tmp");
        touch(dir.path(), "plain.txt");
        std::fs::write(dir.path().join(OsStr::from_bytes(b"bad\xff.txt")), "x")
            .expect("write fixture");

        let index = DirectoryIndex::new(dir.path());
        assert_eq!(index.entries().expect("loaded"), ["plain.txt".to_string()]);
    }

    #[test]
    fn hidden_entries_are_skipped() {
        let dir = tempdir().expect("tmp");
        for name in ["a.txt", "b.txt", ".hidden", "c.txt"] {
            touch(dir.path(), name);
        }
        std::fs::create_dir(dir.path().join("sub")).expect("mkdir");

        let index = DirectoryIndex::new(dir.path());
        let names: BTreeSet<_> = index.entries().expect("entries").iter().cloned().collect();
        let expected: BTreeSet<_> = ["a.txt", "b.txt", "c.txt", "sub"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn scan_happens_once() {
        let dir = tempdir().expect("tmp");
        touch(dir.path(), "first");

        let index = DirectoryIndex::new(dir.path());
        assert!(index.state().is_none());
        assert_eq!(index.entries().expect("entries").len(), 1);

        touch(dir.path(), "second");
        assert_eq!(index.entries().expect("entries").len(), 1);
    }

    #[test]
    fn missing_root_is_cached() {
        let dir = tempdir().expect("tmp");
        let root = dir.path().join("corpus");

        let index = DirectoryIndex::new(&root);
        let err = index.entries().expect_err("missing root");
        assert!(matches!(err, DatasourceError::DirectoryNotFound));

        std::fs::create_dir(&root).expect("mkdir");
        assert!(matches!(
            index.entries(),
            Err(DatasourceError::DirectoryNotFound)
        ));
    }

    #[test]
    fn root_that_is_a_file_fails_with_io_error() {
        let dir = tempdir().expect("tmp");
        touch(dir.path(), "plain");

        let index = DirectoryIndex::new(dir.path().join("plain"));
        assert!(matches!(index.entries(), Err(DatasourceError::Io(_))));
        assert!(matches!(index.state(), Some(IndexState::Failed(_))));
    }
}
