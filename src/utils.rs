/*!
 * Utility functions for contree
 */

use std::fs;
use std::path::Path;

const KB: u64 = 1024;
const MB: u64 = KB * 1024;

/// Size annotation for a single file: bytes below 1 KB, kilobytes otherwise
pub fn format_file_size(size: u64) -> String {
    if size < KB {
        format!("{} bytes", size)
    } else {
        format!("{:.1} KB", size as f64 / KB as f64)
    }
}

/// Size of the whole tree, scaling up to megabytes
pub fn format_total_size(size: u64) -> String {
    if size < KB {
        format!("{} bytes", size)
    } else if size < MB {
        format!("{:.1} KB", size as f64 / KB as f64)
    } else {
        format!("{:.1} MB", size as f64 / MB as f64)
    }
}

/// Size of a file, following symlinks
pub fn file_size(path: &Path) -> Option<u64> {
    fs::metadata(path).ok().map(|m| m.len())
}

/// Base name used to derive the report file name
pub fn dir_basename(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_sizes() {
        assert_eq!(format_file_size(0), "0 bytes");
        assert_eq!(format_file_size(1023), "1023 bytes");
        assert_eq!(format_file_size(1024), "1.0 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(5 * MB), "5120.0 KB");
    }

    #[test]
    fn total_sizes() {
        assert_eq!(format_total_size(12), "12 bytes");
        assert_eq!(format_total_size(2048), "2.0 KB");
        assert_eq!(format_total_size(3 * MB + MB / 2), "3.5 MB");
    }

    #[test]
    fn basename_of_root_is_empty() {
        assert_eq!(dir_basename(Path::new("/")), "");
        assert_eq!(dir_basename(Path::new("/home/me/proj")), "proj");
    }
}
