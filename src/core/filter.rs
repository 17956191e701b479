use std::collections::HashSet;
use std::path::Path;

use anyhow::Context;
use regex::RegexSet;

use crate::config::TraversalConfig;
use crate::models::{EntryKind, FsEntry};

const BACKUP_SUFFIX: char = '~';

/// Pre-compiled `--ignore` patterns.
/// Separates exact-match patterns from glob patterns so plain names skip the regex.
#[derive(Clone, Debug)]
pub struct CompiledPatterns {
    /// Patterns without wildcards
    exact_matches: HashSet<String>,
    /// Compiled regex set for glob patterns with wildcards
    regex_set: Option<RegexSet>,
}

impl CompiledPatterns {
    /// Compile a pipe-separated pattern string.
    /// Returns an error if any glob pattern produces invalid regex.
    pub fn new(pattern: &str) -> anyhow::Result<Self> {
        let mut exact_matches = HashSet::new();
        let mut regex_patterns = Vec::new();

        for segment in pattern.split('|') {
            let p = segment.trim();
            if p.is_empty() {
                continue;
            }

            if p.contains('*') || p.contains('?') {
                regex_patterns.push(glob_to_regex(p));
            } else {
                exact_matches.insert(p.to_owned());
            }
        }

        let regex_set = if regex_patterns.is_empty() {
            None
        } else {
            Some(
                RegexSet::new(&regex_patterns)
                    .with_context(|| format!("invalid ignore pattern: {pattern}"))?,
            )
        };

        Ok(Self {
            exact_matches,
            regex_set,
        })
    }

    #[inline]
    pub fn matches(&self, name: &str) -> bool {
        if self.exact_matches.contains(name) {
            return true;
        }

        match &self.regex_set {
            Some(regex_set) => regex_set.is_match(name),
            None => false,
        }
    }
}

/// Convert a glob pattern to an anchored regex string.
/// Supports `*` (any sequence) and `?` (single char) wildcards.
fn glob_to_regex(pattern: &str) -> String {
    let mut regex_pattern = String::with_capacity(pattern.len() * 2 + 2);
    regex_pattern.push('^');

    for c in pattern.chars() {
        match c {
            '*' => regex_pattern.push_str(".*"),
            '?' => regex_pattern.push('.'),
            '.' | '+' | '(' | ')' | '[' | ']' | '{' | '}' | '^' | '$' | '\\' | '|' => {
                regex_pattern.push('\\');
                regex_pattern.push(c);
            }
            _ => regex_pattern.push(c),
        }
    }

    regex_pattern.push('$');
    regex_pattern
}

/// `.` and `..`: listed under `-a` but never descended into.
pub fn is_dot_entry(name: &str) -> bool {
    name == "." || name == ".."
}

/// Apply the listing rules to the raw children of `dir`, in order:
/// implied `.`/`..`, hidden names, backup names, `--ignore` patterns,
/// then a byte-wise sort on the name (uppercase sorts before lowercase).
pub fn select_children(dir: &Path, listed: Vec<FsEntry>, config: &TraversalConfig) -> Vec<FsEntry> {
    let mut children: Vec<FsEntry> = Vec::with_capacity(listed.len() + 2);

    if config.show_hidden && !config.almost_all {
        for name in [".", ".."] {
            children.push(FsEntry {
                path: dir.join(name),
                name: name.to_owned(),
                kind: EntryKind::Directory,
            });
        }
    }

    let show_dotfiles = config.show_hidden || config.almost_all;
    children.extend(listed.into_iter().filter(|entry| {
        if is_dot_entry(&entry.name) {
            return false;
        }
        if !show_dotfiles && entry.name.starts_with('.') {
            return false;
        }
        if config.ignore_backups && entry.name.ends_with(BACKUP_SUFFIX) {
            return false;
        }
        true
    }));

    if let Some(patterns) = &config.ignore {
        children.retain(|entry| !patterns.matches(&entry.name));
    }

    children.sort_by(|a, b| a.name.cmp(&b.name));
    children
}
