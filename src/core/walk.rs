use std::io;
use std::path::Path;

use crate::config::TraversalConfig;
use crate::error::TreeError;
use crate::fs::FileSystem;
use crate::models::{EntryKind, FsEntry, FsMetadata, PathEntry, Sibling};

use super::filter::{is_dot_entry, select_children};

/// Children of one directory still waiting to be emitted.
struct Frame {
    children: std::vec::IntoIter<FsEntry>,
    depth: usize,
    /// Chain shared by every child of this directory.
    ancestors_last: Vec<bool>,
}

/// Lazy pre-order walk over the tree below `config.root`.
///
/// Uses an explicit stack of frames instead of recursion, so memory is bounded
/// by depth times fan-out. Each directory is listed once, its handle released
/// by the filesystem layer before any child is visited.
pub struct TreeWalker<'a, F: FileSystem> {
    fs: &'a F,
    config: &'a TraversalConfig,
    /// The root itself when it is not a directory.
    single: Option<PathEntry>,
    stack: Vec<Frame>,
}

/// Start a walk. Fails when the root is missing or cannot be listed; nothing
/// is produced in that case.
pub async fn build<'a, F: FileSystem>(
    fs: &'a F,
    config: &'a TraversalConfig,
) -> Result<TreeWalker<'a, F>, TreeError> {
    TreeWalker::new(fs, config).await
}

impl<'a, F: FileSystem> TreeWalker<'a, F> {
    pub async fn new(fs: &'a F, config: &'a TraversalConfig) -> Result<Self, TreeError> {
        let root = config.root.as_path();
        let metadata = fs
            .stat(root)
            .await
            .map_err(|err| root_error(root, &err))?;

        if metadata.kind != EntryKind::Directory {
            let entry = PathEntry {
                path: root.to_path_buf(),
                name: root.as_os_str().to_string_lossy().into_owned(),
                kind: metadata.kind,
                depth: 0,
                sibling: Sibling::Alone,
                ancestors_last: Vec::new(),
                metadata: config.needs_metadata().then_some(metadata),
                error: None,
            };
            return Ok(Self {
                fs,
                config,
                single: Some(entry),
                stack: Vec::new(),
            });
        }

        let listed = fs.read_dir(root).await.map_err(|err| TreeError::Inaccessible {
            path: root.to_path_buf(),
            reason: err.to_string(),
        })?;
        log::debug!("listed {} ({} entries)", root.display(), listed.len());

        let children = select_children(root, listed, config);
        Ok(Self {
            fs,
            config,
            single: None,
            stack: vec![Frame {
                children: children.into_iter(),
                depth: 0,
                ancestors_last: Vec::new(),
            }],
        })
    }

    /// True until the walk of a non-directory root has yielded its entry.
    pub fn is_single_entry(&self) -> bool {
        self.single.is_some()
    }

    /// The next entry in pre-order, or `None` once the walk is done.
    pub async fn next(&mut self) -> Option<PathEntry> {
        if let Some(entry) = self.single.take() {
            return Some(entry);
        }

        loop {
            let frame = self.stack.last_mut()?;
            let Some(child) = frame.children.next() else {
                self.stack.pop();
                continue;
            };
            let is_last = frame.children.len() == 0;
            let depth = frame.depth;
            let ancestors_last = frame.ancestors_last.clone();

            return Some(self.visit(child, depth, is_last, ancestors_last).await);
        }
    }

    /// Drain the walk into a vector.
    pub async fn collect_entries(mut self) -> Vec<PathEntry> {
        let mut entries = Vec::new();
        while let Some(entry) = self.next().await {
            entries.push(entry);
        }
        entries
    }

    async fn visit(
        &mut self,
        child: FsEntry,
        depth: usize,
        is_last: bool,
        ancestors_last: Vec<bool>,
    ) -> PathEntry {
        let metadata = if self.config.needs_metadata() {
            self.metadata_for(&child.path).await
        } else {
            None
        };

        let mut entry = PathEntry {
            path: child.path,
            name: child.name,
            kind: child.kind,
            depth,
            sibling: if is_last {
                Sibling::Last
            } else {
                Sibling::Middle
            },
            ancestors_last,
            metadata,
            error: None,
        };

        if self.should_descend(&entry) {
            match self.fs.read_dir(&entry.path).await {
                Ok(listed) => {
                    log::debug!("listed {} ({} entries)", entry.path.display(), listed.len());
                    let children = select_children(&entry.path, listed, self.config);
                    if !children.is_empty() {
                        let mut chain = entry.ancestors_last.clone();
                        chain.push(is_last);
                        self.stack.push(Frame {
                            children: children.into_iter(),
                            depth: depth + 1,
                            ancestors_last: chain,
                        });
                    }
                }
                Err(err) => {
                    let error = TreeError::UnreadableDirectory {
                        path: entry.path.clone(),
                        reason: err.to_string(),
                    };
                    log::debug!("skipping subtree: {error}");
                    entry.error = Some(error);
                }
            }
        }

        entry
    }

    async fn metadata_for(&self, path: &Path) -> Option<FsMetadata> {
        match self.fs.stat(path).await {
            Ok(metadata) => Some(metadata),
            Err(err) => {
                log::debug!("no metadata for {}: {err}", path.display());
                None
            }
        }
    }

    /// Symlinks are never followed; `.` and `..` are never entered.
    /// `effective_max_depth` is 0 under `--no-recursive`.
    fn should_descend(&self, entry: &PathEntry) -> bool {
        entry.kind == EntryKind::Directory
            && !is_dot_entry(&entry.name)
            && entry.depth < self.config.effective_max_depth()
    }
}

fn root_error(root: &Path, err: &anyhow::Error) -> TreeError {
    let not_found = err
        .chain()
        .filter_map(|cause| cause.downcast_ref::<io::Error>())
        .any(|io_err| io_err.kind() == io::ErrorKind::NotFound);

    if not_found {
        TreeError::NotFound {
            path: root.to_path_buf(),
        }
    } else {
        TreeError::Inaccessible {
            path: root.to_path_buf(),
            reason: err.to_string(),
        }
    }
}
