mod entry;
mod line;
mod tree;

pub use entry::{EntryKind, FsEntry, FsMetadata};
pub use line::{COLUMN_GAP, LongColumns, Paint, RenderLine};
pub use tree::{PathEntry, Sibling};
