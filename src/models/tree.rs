use std::path::PathBuf;

use super::{EntryKind, FsMetadata};
use crate::error::TreeError;

/// Position of an entry among its siblings.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Sibling {
    /// More siblings follow.
    Middle,
    /// Last in its directory.
    Last,
    /// Not part of a sibling group: the root itself when it is not a directory.
    Alone,
}

/// One visited filesystem node, in pre-order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PathEntry {
    pub path: PathBuf,
    pub name: String,
    pub kind: EntryKind,
    /// 0 for the root's direct children.
    pub depth: usize,
    pub sibling: Sibling,
    /// For every ancestor between the root and this entry, whether it was
    /// last among its siblings. Its length always equals `depth`.
    pub ancestors_last: Vec<bool>,
    /// Present only when something needed it (long format, classify, color).
    pub metadata: Option<FsMetadata>,
    /// Set when this directory could not be listed.
    pub error: Option<TreeError>,
}

impl PathEntry {
    pub fn is_last(&self) -> bool {
        self.sibling != Sibling::Middle
    }

    pub fn is_executable(&self) -> bool {
        self.metadata.as_ref().is_some_and(FsMetadata::is_executable)
    }
}
