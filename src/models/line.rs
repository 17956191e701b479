use std::fmt;

/// Separator between long-format columns.
pub const COLUMN_GAP: &str = "  ";

/// Advisory styling for a rendered name. Translated to terminal escapes by the
/// output writer, never embedded in the text.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Paint {
    Directory,
    Symlink,
    Executable,
    Unreadable,
}

/// Long-format columns, kept separate so the writer can align them.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LongColumns {
    pub mode: String,
    pub size: String,
    pub modified: String,
}

/// One output line.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RenderLine {
    pub long: Option<LongColumns>,
    /// Continuation columns plus the tee/elbow glyph.
    pub branch: String,
    pub name: String,
    /// Classification character and any error marker.
    pub suffix: String,
    pub paint: Option<Paint>,
}

/// Unaligned form of the line: long columns at their natural width, joined
/// with the same gap the output writer uses. `output::write_lines` pads the
/// columns to a common width across all lines.
impl fmt::Display for RenderLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(long) = &self.long {
            write!(
                f,
                "{}{gap}{}{gap}{}{gap}",
                long.mode,
                long.size,
                long.modified,
                gap = COLUMN_GAP
            )?;
        }
        write!(f, "{}{}{}", self.branch, self.name, self.suffix)
    }
}
