/*!
 * Entry filtering shared by the renderer and the statistics walk
 */

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;

/// Names excluded wherever they appear, in display order
pub const IGNORED_NAMES: &[&str] = &["__pycache__", "migrations", "venv", "env", "node_modules"];

static IGNORE_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| IGNORED_NAMES.iter().copied().collect());

/// Human-readable summary of the ignore rules
pub fn ignore_summary() -> String {
    format!("{} and all hidden files/folders", IGNORED_NAMES.join(", "))
}

/// Check whether a base name is hidden or in the ignore set
pub fn should_ignore(name: &str) -> bool {
    name.starts_with('.') || IGNORE_SET.contains(name)
}

/// Filter applied identically by both walks
#[derive(Debug, Clone, Default)]
pub struct EntryFilter {
    /// Exact path to leave out (the report being written)
    skip: Option<PathBuf>,
}

impl EntryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also exclude one exact path
    pub fn skipping(path: impl Into<PathBuf>) -> Self {
        Self {
            skip: Some(path.into()),
        }
    }

    pub fn is_excluded(&self, path: &Path) -> bool {
        let name = path.file_name().unwrap_or_default().to_string_lossy();
        should_ignore(&name) || self.skip.as_deref() == Some(path)
    }
}
