use std::fmt::Write as _;

use crate::config::TraversalConfig;
use crate::models::{EntryKind, FsMetadata, LongColumns, Paint, PathEntry, RenderLine, Sibling};

const TEE: &str = "|-- ";
const ELBOW: &str = "`-- ";
const PIPE: &str = "|   ";
const BLANK: &str = "    ";

const MISSING: &str = "?";
const TIME_FORMAT: &str = "%b %d %Y %H:%M";

/// Turn one entry into its output line. Pure: no I/O, no terminal queries.
pub fn render(entry: &PathEntry, config: &TraversalConfig) -> RenderLine {
    let mut branch = String::with_capacity((entry.depth + 1) * TEE.len());
    if entry.sibling != Sibling::Alone {
        for &ancestor_last in &entry.ancestors_last {
            branch.push_str(if ancestor_last { BLANK } else { PIPE });
        }
        branch.push_str(if entry.is_last() { ELBOW } else { TEE });
    }

    let mut suffix = String::new();
    if config.classify
        && let Some(indicator) = classify(entry)
    {
        suffix.push(indicator);
    }
    if let Some(error) = &entry.error {
        let _ = write!(suffix, " [error: {}]", error.reason());
    }

    RenderLine {
        long: config.long_format.then(|| {
            long_columns(entry.kind, entry.metadata.as_ref(), config.human_readable)
        }),
        branch,
        name: entry.name.clone(),
        suffix,
        paint: if config.color_active {
            paint(entry)
        } else {
            None
        },
    }
}

/// The line naming the root directory, printed before its entries.
pub fn render_header(config: &TraversalConfig) -> RenderLine {
    RenderLine {
        long: config.long_format.then(|| LongColumns {
            mode: String::new(),
            size: String::new(),
            modified: String::new(),
        }),
        branch: String::new(),
        name: crate::root_display_name(&config.root, config.root_is_current_dir),
        suffix: if config.classify {
            "/".to_owned()
        } else {
            String::new()
        },
        paint: config.color_active.then_some(Paint::Directory),
    }
}

fn classify(entry: &PathEntry) -> Option<char> {
    match entry.kind {
        EntryKind::Directory => Some('/'),
        EntryKind::Symlink => Some('@'),
        EntryKind::File if entry.is_executable() => Some('*'),
        EntryKind::File | EntryKind::Other => None,
    }
}

fn paint(entry: &PathEntry) -> Option<Paint> {
    if entry.error.is_some() {
        return Some(Paint::Unreadable);
    }
    match entry.kind {
        EntryKind::Directory => Some(Paint::Directory),
        EntryKind::Symlink => Some(Paint::Symlink),
        EntryKind::File if entry.is_executable() => Some(Paint::Executable),
        EntryKind::File | EntryKind::Other => None,
    }
}

fn long_columns(kind: EntryKind, metadata: Option<&FsMetadata>, human_readable: bool) -> LongColumns {
    let Some(metadata) = metadata else {
        return LongColumns {
            mode: MISSING.to_owned(),
            size: MISSING.to_owned(),
            modified: MISSING.to_owned(),
        };
    };

    LongColumns {
        mode: mode_string(kind, metadata.mode),
        size: if human_readable {
            format_size(metadata.size)
        } else {
            metadata.size.to_string()
        },
        modified: metadata
            .modified
            .map(|time| time.format(TIME_FORMAT).to_string())
            .unwrap_or_else(|| MISSING.to_owned()),
    }
}

/// ls-style permission string, e.g. `drwxr-xr-x`.
pub fn mode_string(kind: EntryKind, mode: u32) -> String {
    let file_type = match kind {
        EntryKind::Directory => 'd',
        EntryKind::Symlink => 'l',
        EntryKind::File => '-',
        EntryKind::Other => '?',
    };
    let mut s = String::with_capacity(10);
    s.push(file_type);
    for shift in [6, 3, 0] {
        let bits = (mode >> shift) & 7;
        s.push(if bits & 4 != 0 { 'r' } else { '-' });
        s.push(if bits & 2 != 0 { 'w' } else { '-' });
        s.push(if bits & 1 != 0 { 'x' } else { '-' });
    }
    s
}

/// Binary-prefixed size with one decimal, e.g. `1.5K`. Moves to the next
/// unit when rounding would print `1024.0`.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [char; 4] = ['K', 'M', 'G', 'T'];

    if bytes < 1024 {
        return format!("{bytes}B");
    }

    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while unit + 1 < UNITS.len() && (value * 10.0).round() / 10.0 >= 1024.0 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1}{}", UNITS[unit])
}
