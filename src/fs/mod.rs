mod real;

#[cfg(test)]
mod mock;

pub use real::RealFileSystem;

#[cfg(test)]
pub use mock::MockFileSystem;

use anyhow::Result;
use async_trait::async_trait;
use std::path::Path;

use crate::models::{FsEntry, FsMetadata};

/// The only I/O boundary of the walker.
#[async_trait]
pub trait FileSystem: Send + Sync {
    /// Kind, size, mode and mtime of `path`, without following symlinks.
    /// A missing path must surface an `std::io::ErrorKind::NotFound` error.
    async fn stat(&self, path: &Path) -> Result<FsMetadata>;

    /// Children of `dir` in no particular order, excluding `.` and `..`.
    async fn read_dir(&self, dir: &Path) -> Result<Vec<FsEntry>>;
}
