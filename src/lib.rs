pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod fs;
pub mod models;
pub mod output;

use std::path::Path;

use crate::config::TraversalConfig;
use crate::error::TreeError;
use crate::fs::FileSystem;
use crate::models::RenderLine;

pub fn root_display_name(root_path: &Path, is_current_dir: bool) -> String {
    if is_current_dir {
        return ".".to_owned();
    }

    root_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| root_path.as_os_str().to_string_lossy().into_owned())
}

/// Walk `config.root` and render every line of output, header first when the
/// root is a directory.
pub async fn run<F: FileSystem>(
    fs: &F,
    config: &TraversalConfig,
) -> Result<Vec<RenderLine>, TreeError> {
    let mut walker = crate::core::build(fs, config).await?;

    let mut lines = Vec::new();
    if !walker.is_single_entry() {
        lines.push(crate::core::render_header(config));
    }
    while let Some(entry) = walker.next().await {
        lines.push(crate::core::render(&entry, config));
    }
    Ok(lines)
}
