use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::models::{EntryKind, FsEntry, FsMetadata};

use super::FileSystem;

/// In-memory filesystem. Listings come back in reverse name order so that
/// callers cannot rely on the backing order.
#[derive(Clone, Default)]
pub struct MockFileSystem {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    nodes: BTreeMap<PathBuf, FsMetadata>,
    list_errors: HashMap<PathBuf, String>,
    calls: Vec<PathBuf>,
}

impl MockFileSystem {
    pub fn add_dir(&self, path: impl Into<PathBuf>) {
        self.insert(path.into(), EntryKind::Directory, 0, 0o755);
    }

    pub fn add_file(&self, path: impl Into<PathBuf>, size: u64, mode: u32) {
        self.insert(path.into(), EntryKind::File, size, mode);
    }

    pub fn add_symlink(&self, path: impl Into<PathBuf>) {
        self.insert(path.into(), EntryKind::Symlink, 0, 0o777);
    }

    pub fn set_modified(&self, path: impl AsRef<Path>, modified: DateTime<Utc>) {
        let mut inner = self.inner.lock().expect("mock fs lock");
        if let Some(node) = inner.nodes.get_mut(path.as_ref()) {
            node.modified = Some(modified);
        }
    }

    pub fn set_error(&self, dir: impl Into<PathBuf>, message: impl Into<String>) {
        let mut inner = self.inner.lock().expect("mock fs lock");
        inner.list_errors.insert(dir.into(), message.into());
    }

    /// Directories passed to `read_dir`, in call order.
    pub fn calls(&self) -> Vec<PathBuf> {
        let inner = self.inner.lock().expect("mock fs lock");
        inner.calls.clone()
    }

    fn insert(&self, path: PathBuf, kind: EntryKind, size: u64, mode: u32) {
        let mut inner = self.inner.lock().expect("mock fs lock");
        inner.nodes.insert(
            path,
            FsMetadata {
                kind,
                size,
                mode,
                modified: None,
            },
        );
    }
}

#[async_trait]
impl FileSystem for MockFileSystem {
    async fn stat(&self, path: &Path) -> Result<FsMetadata> {
        let inner = self.inner.lock().expect("mock fs lock");
        match inner.nodes.get(path) {
            Some(metadata) => Ok(metadata.clone()),
            None => Err(io::Error::from(io::ErrorKind::NotFound).into()),
        }
    }

    async fn read_dir(&self, dir: &Path) -> Result<Vec<FsEntry>> {
        let mut inner = self.inner.lock().expect("mock fs lock");
        inner.calls.push(dir.to_path_buf());

        if let Some(message) = inner.list_errors.get(dir) {
            return Err(anyhow!("{message}"));
        }
        match inner.nodes.get(dir) {
            Some(metadata) if metadata.kind == EntryKind::Directory => {}
            Some(_) => return Err(anyhow!("Not a directory")),
            None => return Err(io::Error::from(io::ErrorKind::NotFound).into()),
        }

        let mut entries: Vec<FsEntry> = inner
            .nodes
            .iter()
            .filter(|(path, _)| path.parent() == Some(dir))
            .map(|(path, metadata)| FsEntry {
                path: path.clone(),
                name: path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default(),
                kind: metadata.kind,
            })
            .collect();
        entries.reverse();
        Ok(entries)
    }
}
