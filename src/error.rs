//! Global error handling for dirclip
//!
//! Only run-wide conditions live here. A file that cannot be read is not an
//! error: it is recorded as [`FileContent::Unreadable`](crate::types::FileContent)
//! and rendered inline.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::clipboard::ClipboardError;

/// Global error type for dirclip operations
#[derive(Error, Debug)]
pub enum DirClipError {
    /// The traversal root does not exist or is not a directory
    #[error("Directory not found: {}", .0.display())]
    RootNotFound(PathBuf),

    /// A directory selected for traversal could not be listed
    #[error("Failed to read directory {}: {source}", path.display())]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Settings file could not be parsed
    #[error("Invalid settings file: {0}")]
    Json(#[from] serde_json::Error),

    /// Clipboard delivery errors
    #[error("Clipboard error: {0}")]
    Clipboard(#[from] ClipboardError),

    /// File system errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl DirClipError {
    /// Whether this error means the root directory is missing
    pub fn is_root_not_found(&self) -> bool {
        matches!(self, Self::RootNotFound(_))
    }
}

/// Specialized Result type for dirclip operations
pub type Result<T> = std::result::Result<T, DirClipError>;

/// Creates a DirClipError with a formatted message
#[macro_export]
macro_rules! error {
    ($error_type:ident, $($arg:tt)*) => {
        $crate::error::DirClipError::$error_type(format!($($arg)*))
    };
}

/// Returns an error result with a formatted message
#[macro_export]
macro_rules! bail {
    ($error_type:ident, $($arg:tt)*) => {
        return Err($crate::error!($error_type, $($arg)*))
    };
}

/// Ensures a condition is true, otherwise returns an error
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $error_type:ident, $($arg:tt)*) => {
        if !($cond) {
            $crate::bail!($error_type, $($arg)*)
        }
    };
}
