use std::path::PathBuf;

use thiserror::Error;

#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum TreeError {
    /// The root path does not exist.
    #[error("{}: No such file or directory", .path.display())]
    NotFound { path: PathBuf },

    /// The root path exists but cannot be inspected or listed.
    #[error("{}: {reason}", .path.display())]
    Inaccessible { path: PathBuf, reason: String },

    /// A directory below the root could not be listed. Recovered by the walker.
    #[error("{}: {reason}", .path.display())]
    UnreadableDirectory { path: PathBuf, reason: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl TreeError {
    /// Short reason shown inline next to an entry.
    pub fn reason(&self) -> String {
        match self {
            TreeError::NotFound { .. } => "No such file or directory".to_owned(),
            TreeError::Inaccessible { reason, .. }
            | TreeError::UnreadableDirectory { reason, .. } => reason.clone(),
            TreeError::InvalidConfig(message) => message.clone(),
        }
    }
}
