/*!
 * Tree rendering with inlined file contents
 *
 * The walk is depth-first but runs on an explicit stack of listed
 * directories, so arbitrarily deep trees cannot exhaust the call stack.
 * Output order is fixed: within every directory, subdirectories come
 * first, then files, each group sorted by name.
 */

use std::fs;
use std::io::{self, Write};
use std::iter::Enumerate;
use std::path::Path;
use std::vec;

use indicatif::ProgressBar;

use crate::filter::EntryFilter;
use crate::reader::{read_content, Decoding, EMPTY_MARKER};
use crate::types::{DirectoryEntry, EntryKind, RenderFrame, Statistics};
use crate::utils::{file_size, format_file_size};

const RULE_WIDTH: usize = 60;

/// A listed directory whose entries are still being emitted
struct Pending {
    frame: RenderFrame,
    entries: Enumerate<vec::IntoIter<DirectoryEntry>>,
    len: usize,
}

/// Renders a directory tree, inlining the content of every file
pub struct TreeRenderer {
    filter: EntryFilter,
    chain: Vec<Decoding>,
    progress: ProgressBar,
}

impl TreeRenderer {
    /// Create a new renderer
    pub fn new(filter: EntryFilter, chain: &[Decoding]) -> Self {
        Self {
            filter,
            chain: chain.to_vec(),
            progress: ProgressBar::hidden(),
        }
    }

    /// Report each rendered file on `progress`
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// Render the tree below `root` into `out`.
    ///
    /// Returns what was actually emitted, which matches the statistics walk
    /// unless the filesystem changed in between. Only failures writing to
    /// `out` are returned as errors.
    pub fn render<W: Write>(&self, root: &Path, out: &mut W) -> io::Result<Statistics> {
        let mut emitted = Statistics::default();
        let mut stack = Vec::new();

        if let Some(pending) = self.open(RenderFrame::root(root), out)? {
            stack.push(pending);
        }

        while let Some(top) = stack.last_mut() {
            let Some((index, entry)) = top.entries.next() else {
                stack.pop();
                continue;
            };

            let is_last = index + 1 == top.len;
            let connector = connector(top.frame.is_root, index, is_last);
            let prefix = top.frame.prefix.clone();

            match entry.kind {
                EntryKind::Directory => {
                    writeln!(out, "{}{}📁 {}", prefix, connector, entry.name)?;
                    emitted.folder_count += 1;

                    let child = top.frame.child(&entry.path, is_last);
                    if let Some(pending) = self.open(child, out)? {
                        stack.push(pending);
                    }
                }
                EntryKind::File => {
                    let size = self.write_file(&entry, &prefix, connector, out)?;
                    emitted.file_count += 1;
                    emitted.total_size_bytes += size.unwrap_or(0);
                }
                EntryKind::Symlink => {
                    let target = fs::read_link(&entry.path)
                        .map(|t| t.display().to_string())
                        .unwrap_or_else(|_| "(unresolved)".to_string());
                    writeln!(out, "{}{}🔗 {} -> {}", prefix, connector, entry.name, target)?;
                    emitted.file_count += 1;
                }
            }
        }

        Ok(emitted)
    }

    /// List a directory and queue its visible entries.
    ///
    /// Listing failures and empty directories are written out here and
    /// yield `None`.
    fn open<W: Write>(&self, frame: RenderFrame, out: &mut W) -> io::Result<Option<Pending>> {
        tracing::debug!("Listing {}", frame.path.display());

        let entries = match self.list(&frame.path) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
                tracing::warn!("Permission denied: {}", frame.path.display());
                writeln!(out, "{}└── 🔒 [Permission Denied]", frame.prefix)?;
                return Ok(None);
            }
            Err(e) => {
                tracing::warn!("Cannot list {}: {}", frame.path.display(), e);
                writeln!(out, "{}└── ⚠️ [Unreadable Directory: {}]", frame.prefix, e)?;
                return Ok(None);
            }
        };

        if entries.is_empty() {
            if frame.is_root {
                writeln!(out, "📁 (Empty Directory)")?;
            }
            return Ok(None);
        }

        Ok(Some(Pending {
            frame,
            len: entries.len(),
            entries: entries.into_iter().enumerate(),
        }))
    }

    /// Visible entries of `dir`: directories first, then files, each sorted by name
    fn list(&self, dir: &Path) -> io::Result<Vec<DirectoryEntry>> {
        let mut dirs = Vec::new();
        let mut files = Vec::new();

        for result in fs::read_dir(dir)? {
            let entry = match result {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry in {}: {}", dir.display(), e);
                    continue;
                }
            };

            let path = entry.path();
            if self.filter.is_excluded(&path) {
                continue;
            }

            let file_type = match entry.file_type() {
                Ok(ft) => ft,
                Err(e) => {
                    tracing::warn!("Cannot stat {}: {}", path.display(), e);
                    continue;
                }
            };

            let Some(kind) = EntryKind::classify(file_type, &path) else {
                continue;
            };

            let item = DirectoryEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                path,
                kind,
            };
            match kind {
                EntryKind::Directory => dirs.push(item),
                EntryKind::File | EntryKind::Symlink => files.push(item),
            }
        }

        dirs.sort_by(|a, b| a.name.cmp(&b.name));
        files.sort_by(|a, b| a.name.cmp(&b.name));
        dirs.extend(files);
        Ok(dirs)
    }

    /// Write a file's tree line and its content block; returns its size if known
    fn write_file<W: Write>(
        &self,
        entry: &DirectoryEntry,
        prefix: &str,
        connector: &str,
        out: &mut W,
    ) -> io::Result<Option<u64>> {
        tracing::trace!("Rendering {}", entry.path.display());
        self.progress.set_message(entry.name.clone());

        let size = file_size(&entry.path);
        let annotation = match size {
            Some(bytes) => format!("({})", format_file_size(bytes)),
            None => "(size unknown)".to_string(),
        };
        writeln!(out, "{}{}📄 {} {}", prefix, connector, annotation, entry.name)?;

        let indent = format!("{}    ", prefix);
        let rule = "=".repeat(RULE_WIDTH);
        writeln!(out, "{}📍 PATH: {}", indent, entry.path.display())?;
        writeln!(out, "{}{}", indent, rule)?;

        let content = read_content(&entry.path, &self.chain);
        if content.is_blank() {
            writeln!(out, "{}│ {}", indent, EMPTY_MARKER)?;
        } else {
            for line in content.to_string().split('\n') {
                writeln!(out, "{}│ {}", indent, line)?;
            }
        }

        writeln!(out, "{}{}", indent, rule)?;
        writeln!(out)?;

        self.progress.inc(1);
        Ok(size)
    }
}

/// Connector glyph for the entry at `index` within its directory
fn connector(is_root: bool, index: usize, is_last: bool) -> &'static str {
    if is_root && index == 0 {
        "📁 "
    } else if is_last {
        "└── "
    } else {
        "├── "
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn render(root: &Path) -> (String, Statistics) {
        let renderer = TreeRenderer::new(EntryFilter::new(), Decoding::DEFAULT_CHAIN);
        let mut out = Vec::new();
        let emitted = renderer.render(root, &mut out).unwrap();
        (String::from_utf8(out).unwrap(), emitted)
    }

    /// Lines that announce an entry, i.e. everything but content blocks
    fn tree_lines(rendered: &str) -> Vec<&str> {
        rendered
            .lines()
            .filter(|l| l.contains("📁 ") || l.contains("📄 ") || l.contains("🔗 "))
            .collect()
    }

    #[test]
    fn connectors() {
        assert_eq!(connector(true, 0, false), "📁 ");
        assert_eq!(connector(true, 0, true), "📁 ");
        assert_eq!(connector(true, 1, false), "├── ");
        assert_eq!(connector(false, 0, false), "├── ");
        assert_eq!(connector(false, 2, true), "└── ");
    }

    #[test]
    fn empty_root_gets_marker() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(".hidden"), "secret").unwrap();

        let (out, emitted) = render(dir.path());
        assert_eq!(out, "📁 (Empty Directory)\n");
        assert_eq!(emitted, Statistics::default());
    }

    #[test]
    fn empty_subdirectory_emits_only_its_line() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("empty")).unwrap();
        fs::create_dir(dir.path().join("empty/venv")).unwrap();

        let (out, _) = render(dir.path());
        assert_eq!(out, "📁 📁 empty\n");
    }

    #[test]
    fn directories_before_files_in_ordinal_order() {
        let dir = tempdir().unwrap();
        for name in ["b_dir", "A_dir", "_x"] {
            fs::create_dir(dir.path().join(name)).unwrap();
        }
        for name in ["zeta.txt", "Alpha.txt", "alpha.txt", "-dash.txt", "1.txt"] {
            fs::write(dir.path().join(name), "x").unwrap();
        }

        let (out, _) = render(dir.path());
        let names: Vec<&str> = tree_lines(&out)
            .iter()
            .map(|l| l.rsplit(' ').next().unwrap())
            .collect();
        assert_eq!(
            names,
            vec![
                "A_dir",
                "_x",
                "b_dir",
                "-dash.txt",
                "1.txt",
                "Alpha.txt",
                "alpha.txt",
                "zeta.txt"
            ]
        );
    }

    #[test]
    fn nested_prefixes_and_content_block() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("a/b")).unwrap();
        fs::write(dir.path().join("a/b/deep.txt"), "line1\nline2").unwrap();
        fs::write(dir.path().join("a/mid.txt"), "m").unwrap();
        fs::write(dir.path().join("top.txt"), "t").unwrap();

        let (out, emitted) = render(dir.path());
        let deep = dir.path().join("a/b/deep.txt");
        let rule = "=".repeat(60);
        let p = "│   │   ";
        let expected_deep = format!(
            "{p}└── 📄 (11 bytes) deep.txt\n\
             {p}    📍 PATH: {}\n\
             {p}    {rule}\n\
             {p}    │ line1\n\
             {p}    │ line2\n\
             {p}    {rule}\n\n",
            deep.display()
        );

        assert!(out.starts_with("📁 📁 a\n│   ├── 📁 b\n"));
        assert!(out.contains(&expected_deep));
        assert!(out.contains("│   └── 📄 (1 bytes) mid.txt\n"));
        assert!(out.contains("└── 📄 (1 bytes) top.txt\n"));
        assert_eq!(emitted.folder_count, 2);
        assert_eq!(emitted.file_count, 3);
        assert_eq!(emitted.total_size_bytes, 13);
    }

    #[test]
    fn trailing_newline_keeps_last_empty_line() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "hi\n").unwrap();

        let (out, _) = render(dir.path());
        assert!(out.contains("    │ hi\n    │ \n"));
    }

    #[test]
    fn whitespace_only_file_is_marked_empty() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("blank.txt"), "  \n\n\t").unwrap();
        fs::write(dir.path().join("zero.txt"), "").unwrap();

        let (out, _) = render(dir.path());
        assert_eq!(out.matches("│ [EMPTY FILE]").count(), 2);
    }

    #[test]
    fn latin1_fallback_is_marked() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("old.txt"), [b'n', 0xE4, b'h']).unwrap();

        let (out, _) = render(dir.path());
        assert!(out.contains("    │ // Binary or non-UTF-8 file content (shown as latin-1):\n    │ näh\n"));
    }

    #[test]
    fn large_files_are_annotated_in_kilobytes() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("big.txt"), "x".repeat(2560)).unwrap();

        let (out, _) = render(dir.path());
        assert!(out.starts_with("📁 📄 (2.5 KB) big.txt\n"));
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_directories_are_not_followed() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("real")).unwrap();
        fs::write(dir.path().join("real/f.txt"), "abc").unwrap();
        std::os::unix::fs::symlink(dir.path(), dir.path().join("real/loop")).unwrap();

        let (out, emitted) = render(dir.path());
        assert!(out.contains(&format!("└── 🔗 loop -> {}\n", dir.path().display())));
        assert_eq!(out.matches("📄 ").count(), 1);
        assert_eq!(emitted.folder_count, 1);
        assert_eq!(emitted.file_count, 2);
    }

    #[cfg(unix)]
    #[test]
    fn permission_denied_is_local() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let locked = dir.path().join("locked");
        fs::create_dir(&locked).unwrap();
        fs::write(dir.path().join("after.txt"), "still here").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Privileged users can list the directory anyway
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let (out, _) = render(dir.path());
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        assert!(out.starts_with("📁 📁 locked\n│   └── 🔒 [Permission Denied]\n"));
        assert!(out.contains("│ still here"));
    }
}
