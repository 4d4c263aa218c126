//! Launcher errors
//!
//! One taxonomy for every failure the core can report. Only a corrupt
//! library file is fatal; everything else becomes a user-visible notice.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LauncherError {
    /// The library file exists but could not be parsed.
    #[error("library file {path:?} is corrupt: {source}")]
    StorageCorrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not download the image: {0}")]
    FetchFailed(String),

    #[error("could not decode the inline image: {0}")]
    DecodeFailed(String),

    #[error("cannot read {0:?}")]
    PathUnreadable(PathBuf),

    #[error("unknown theme '{0}' (expected one of: blue, moon, meadow)")]
    UnknownTheme(String),

    #[error("select a game first")]
    NothingSelected,

    #[error("failed to open {path:?}: {message}")]
    LaunchFailed { path: PathBuf, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl LauncherError {
    /// Whether the process must stop instead of reporting and carrying on.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::StorageCorrupt { .. })
    }
}

pub type Result<T> = std::result::Result<T, LauncherError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_corrupt_storage_is_fatal() {
        let corrupt = LauncherError::StorageCorrupt {
            path: PathBuf::from("games.json"),
            source: serde_json::from_str::<Vec<u8>>("{").unwrap_err(),
        };
        assert!(corrupt.is_fatal());
        assert!(!LauncherError::FetchFailed("HTTP 404".into()).is_fatal());
        assert!(!LauncherError::DecodeFailed("bad".into()).is_fatal());
        assert!(!LauncherError::UnknownTheme("pink".into()).is_fatal());
        assert!(!LauncherError::PathUnreadable(PathBuf::from("/nope")).is_fatal());
    }
}
