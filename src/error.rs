//! Error types for compdoc
//!
//! Library code returns `CompdocError`; the binary wraps it with `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

use crate::docgen::ExtractError;

/// Result type alias for compdoc operations
pub type CompdocResult<T> = Result<T, CompdocError>;

/// Main error type for compdoc operations
#[derive(Error, Debug)]
pub enum CompdocError {
    /// File or directory does not exist
    #[error("ENOENT: no such file or directory, '{}'", path.display())]
    NotFound { path: PathBuf },

    /// IO error on a known path
    #[error("IO error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Documentation extraction failed
    #[error("{source}")]
    Extraction {
        file: PathBuf,
        #[source]
        source: ExtractError,
    },

    /// Component directory does not contain `<Name>/<Name>.<ext>`
    #[error("component '{component}' has no main file (expected '{}')", expected.display())]
    NamingConvention {
        component: String,
        expected: PathBuf,
    },

    /// Output document could not be serialized
    #[error("failed to serialize component data: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Invalid configuration file
    #[error("invalid config in {}: {message}", file.display())]
    Config { file: PathBuf, message: String },

    /// File watcher could not be set up
    #[error("watch error: {0}")]
    Watch(#[from] notify::Error),

    /// A pass was requested while another one was still running
    #[error("a generation pass is already in progress")]
    PassInProgress,
}

impl CompdocError {
    /// Wrap an `io::Error`, mapping `NotFound` to its own variant.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            CompdocError::NotFound { path }
        } else {
            CompdocError::Io { path, source }
        }
    }
}
