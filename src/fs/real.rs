use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::fs::{FileType, Metadata};
use std::io;
use std::path::{Path, PathBuf};
use tokio::task;

use crate::models::{EntryKind, FsEntry, FsMetadata};

use super::FileSystem;

pub struct RealFileSystem;

#[async_trait]
impl FileSystem for RealFileSystem {
    async fn stat(&self, path: &Path) -> Result<FsMetadata> {
        let path = path.to_path_buf();
        task::spawn_blocking(move || {
            let metadata = std::fs::symlink_metadata(&path)?;
            Ok(to_fs_metadata(&metadata))
        })
        .await?
    }

    async fn read_dir(&self, dir: &Path) -> Result<Vec<FsEntry>> {
        let dir = dir.to_path_buf();
        task::spawn_blocking(move || {
            // The handle is dropped at the end of this closure on every path,
            // including the early return from `?`.
            let listing = std::fs::read_dir(&dir)?.map(|entry| {
                entry.map(|entry| Listed {
                    path: entry.path(),
                    name: entry.file_name().to_string_lossy().into_owned(),
                    kind: entry.file_type().map(kind_of),
                })
            });
            Ok(collect_listing(listing)?)
        })
        .await?
    }
}

/// One raw `readdir` result before its kind is settled.
struct Listed {
    path: PathBuf,
    name: String,
    kind: io::Result<EntryKind>,
}

/// A failed `readdir` step fails the whole listing, so the directory is
/// reported as unreadable. An entry whose type cannot be read is kept as
/// `EntryKind::Other`.
fn collect_listing<I>(listing: I) -> io::Result<Vec<FsEntry>>
where
    I: IntoIterator<Item = io::Result<Listed>>,
{
    let mut entries = Vec::new();
    for listed in listing {
        let listed = listed?;
        let kind = listed.kind.unwrap_or_else(|err| {
            log::debug!("unknown type for {}: {err}", listed.path.display());
            EntryKind::Other
        });
        entries.push(FsEntry {
            path: listed.path,
            name: listed.name,
            kind,
        });
    }
    Ok(entries)
}

fn kind_of(file_type: FileType) -> EntryKind {
    if file_type.is_symlink() {
        EntryKind::Symlink
    } else if file_type.is_dir() {
        EntryKind::Directory
    } else if file_type.is_file() {
        EntryKind::File
    } else {
        EntryKind::Other
    }
}

fn to_fs_metadata(metadata: &Metadata) -> FsMetadata {
    FsMetadata {
        kind: kind_of(metadata.file_type()),
        size: metadata.len(),
        mode: mode_bits(metadata),
        modified: metadata.modified().ok().map(DateTime::<Utc>::from),
    }
}

#[cfg(unix)]
fn mode_bits(metadata: &Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o7777
}

#[cfg(not(unix))]
fn mode_bits(metadata: &Metadata) -> u32 {
    let base = if metadata.is_dir() { 0o755 } else { 0o644 };
    if metadata.permissions().readonly() {
        base & !0o222
    } else {
        base
    }
}
