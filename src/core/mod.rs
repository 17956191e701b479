mod filter;
pub mod render;
pub mod walk;

pub use filter::{CompiledPatterns, is_dot_entry, select_children};
pub use render::{render, render_header};
pub use walk::{TreeWalker, build};
