/*!
 * Core types and data structures for contree
 */

use std::fs::{self, FileType};
use std::path::{Path, PathBuf};

/// Kind of a filesystem entry, as both walks see it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A real directory (never a symlink)
    Directory,
    /// A regular file, or a symlink resolving to one
    File,
    /// Any other symlink; rendered as an opaque leaf and never followed
    Symlink,
}

impl EntryKind {
    /// Classify an entry from its unfollowed file type.
    ///
    /// Returns `None` for sockets, FIFOs and devices, which are skipped.
    pub fn classify(file_type: FileType, path: &Path) -> Option<Self> {
        if file_type.is_dir() {
            Some(EntryKind::Directory)
        } else if file_type.is_file() {
            Some(EntryKind::File)
        } else if file_type.is_symlink() {
            match fs::metadata(path) {
                Ok(target) if target.is_file() => Some(EntryKind::File),
                _ => Some(EntryKind::Symlink),
            }
        } else {
            None
        }
    }
}

/// One visible child of a directory
#[derive(Debug, Clone)]
pub struct DirectoryEntry {
    /// Base name
    pub name: String,
    /// Absolute path
    pub path: PathBuf,
    /// Entry kind
    pub kind: EntryKind,
}

/// Pending directory on the renderer's work stack
#[derive(Debug, Clone)]
pub struct RenderFrame {
    /// Directory to list
    pub path: PathBuf,
    /// Accumulated tree-drawing indentation
    pub prefix: String,
    /// Whether this is the target directory itself
    pub is_root: bool,
}

impl RenderFrame {
    pub fn root(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            prefix: String::new(),
            is_root: true,
        }
    }

    /// Frame for a subdirectory, extending the prefix with the right spacer
    pub fn child(&self, path: impl Into<PathBuf>, is_last: bool) -> Self {
        let spacer = if is_last { "    " } else { "│   " };
        Self {
            path: path.into(),
            prefix: format!("{}{}", self.prefix, spacer),
            is_root: false,
        }
    }
}

/// Totals gathered before rendering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Statistics {
    /// Non-ignored directories below the root
    pub folder_count: u64,
    /// Non-ignored files and symlinks below the root
    pub file_count: u64,
    /// Sum of file sizes in bytes
    pub total_size_bytes: u64,
}
