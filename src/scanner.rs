/*!
 * Statistics walk over the target directory
 */

use std::path::Path;

use walkdir::WalkDir;

use crate::filter::EntryFilter;
use crate::types::{EntryKind, Statistics};
use crate::utils::file_size;

/// Independent walk producing the header and footer totals
pub struct Scanner {
    filter: EntryFilter,
}

impl Scanner {
    /// Create a new scanner
    pub fn new(filter: EntryFilter) -> Self {
        Self { filter }
    }

    /// Count folders and files under `root` and sum file sizes.
    ///
    /// Ignored directories are pruned before descent, so nothing below them
    /// is counted. Symlinks are never followed.
    pub fn walk_stats(&self, root: &Path) -> Statistics {
        let mut stats = Statistics::default();

        let walker = WalkDir::new(root)
            .follow_links(false)
            .min_depth(1)
            .into_iter()
            .filter_entry(|entry| !self.filter.is_excluded(entry.path()));

        for result in walker {
            let entry = match result {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::debug!("Skipping during statistics walk: {}", e);
                    continue;
                }
            };

            match EntryKind::classify(entry.file_type(), entry.path()) {
                Some(EntryKind::Directory) => stats.folder_count += 1,
                Some(EntryKind::File) => {
                    stats.file_count += 1;
                    if let Some(size) = file_size(entry.path()) {
                        stats.total_size_bytes += size;
                    }
                }
                Some(EntryKind::Symlink) => stats.file_count += 1,
                None => {}
            }
        }

        tracing::info!(
            folders = stats.folder_count,
            files = stats.file_count,
            bytes = stats.total_size_bytes,
            "Collected statistics for {}",
            root.display()
        );

        stats
    }
}
