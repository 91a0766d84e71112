//! Global error handling for contree
//!
//! Only failures that abort the whole run live here. Problems with a single
//! entry (unreadable file, locked directory) are rendered into the report
//! instead of being raised.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Global error type for contree operations
#[derive(Error, Debug)]
pub enum ContreeError {
    /// Target path does not exist
    #[error("The path '{}' does not exist.", .0.display())]
    PathNotFound(PathBuf),

    /// Target path exists but is not a directory
    #[error("'{}' is not a directory.", .0.display())]
    NotADirectory(PathBuf),

    /// File system errors tied to a path
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Invalid command line usage
    #[error("{0}")]
    Usage(String),
}

impl ContreeError {
    pub(crate) fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        ContreeError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Whether this error stems from bad input rather than a failed write
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            ContreeError::PathNotFound(_) | ContreeError::NotADirectory(_) | ContreeError::Usage(_)
        )
    }
}

/// Specialized Result type for contree operations
pub type Result<T> = std::result::Result<T, ContreeError>;

/// Extension trait for attaching a path to raw I/O errors
pub trait IoResultExt<T> {
    /// Wrap the error with the path that produced it
    fn at_path(self, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn at_path(self, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|e| ContreeError::io(path, e))
    }
}
