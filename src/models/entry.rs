use std::path::PathBuf;

use chrono::{DateTime, Utc};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EntryKind {
    Directory,
    File,
    Symlink,
    Other,
}

/// One child as returned by a directory listing.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FsEntry {
    pub path: PathBuf,
    pub name: String,
    pub kind: EntryKind,
}

/// Result of stat-ing a path without following symlinks.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FsMetadata {
    pub kind: EntryKind,
    pub size: u64,
    /// Permission bits (`0o7777` range).
    pub mode: u32,
    pub modified: Option<DateTime<Utc>>,
}

impl FsMetadata {
    pub fn is_executable(&self) -> bool {
        self.kind == EntryKind::File && self.mode & 0o111 != 0
    }
}
