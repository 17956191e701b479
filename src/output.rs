use std::io;

use termcolor::{Color, ColorSpec, WriteColor};

use crate::models::{COLUMN_GAP, Paint, RenderLine};

fn color_spec(paint: Paint) -> ColorSpec {
    let mut spec = ColorSpec::new();
    match paint {
        Paint::Directory => {
            spec.set_fg(Some(Color::Blue)).set_bold(true);
        }
        Paint::Symlink => {
            spec.set_fg(Some(Color::Cyan));
        }
        Paint::Executable => {
            spec.set_fg(Some(Color::Green)).set_bold(true);
        }
        Paint::Unreadable => {
            spec.set_fg(Some(Color::Red));
        }
    }
    spec
}

#[derive(Default)]
struct Widths {
    mode: usize,
    size: usize,
    modified: usize,
}

fn long_widths(lines: &[RenderLine]) -> Widths {
    lines
        .iter()
        .filter_map(|line| line.long.as_ref())
        .fold(Widths::default(), |acc, long| Widths {
            mode: acc.mode.max(long.mode.chars().count()),
            size: acc.size.max(long.size.chars().count()),
            modified: acc.modified.max(long.modified.chars().count()),
        })
}

/// Write lines in order, one per line. Long-format columns are aligned across
/// all lines; paint is applied to the name only. Whether escapes are emitted
/// is up to the writer (`ColorChoice` / `Buffer` kind).
pub fn write_lines<W: WriteColor>(writer: &mut W, lines: &[RenderLine]) -> io::Result<()> {
    let widths = long_widths(lines);

    for line in lines {
        if let Some(long) = &line.long {
            write!(
                writer,
                "{:<mode$}{gap}{:>size$}{gap}{:<modified$}{gap}",
                long.mode,
                long.size,
                long.modified,
                gap = COLUMN_GAP,
                mode = widths.mode,
                size = widths.size,
                modified = widths.modified,
            )?;
        }

        writer.write_all(line.branch.as_bytes())?;

        match line.paint {
            Some(paint) => {
                writer.set_color(&color_spec(paint))?;
                writer.write_all(line.name.as_bytes())?;
                writer.reset()?;
            }
            None => writer.write_all(line.name.as_bytes())?,
        }

        writer.write_all(line.suffix.as_bytes())?;
        writer.write_all(b"\n")?;
    }

    writer.flush()
}
