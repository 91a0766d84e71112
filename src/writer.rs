/*!
 * Report writer for contree
 */

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use chrono::Local;

use crate::error::{IoResultExt, Result};
use crate::filter::ignore_summary;
use crate::tree::TreeRenderer;
use crate::types::Statistics;
use crate::utils::{dir_basename, format_total_size};

const BANNER_WIDTH: usize = 80;

/// Writes the full report: header, tree section and summary footer
pub struct ReportWriter<'a> {
    renderer: &'a TreeRenderer,
}

impl<'a> ReportWriter<'a> {
    /// Create a new report writer
    pub fn new(renderer: &'a TreeRenderer) -> Self {
        Self { renderer }
    }

    /// Write the report for `target` to the file at `output`.
    ///
    /// The file is created (or truncated) up front and flushed before
    /// returning. Returns the totals the rendered tree actually contains.
    pub fn write(&self, target: &Path, stats: &Statistics, output: &Path) -> Result<Statistics> {
        let file = File::create(output).at_path(output)?;
        let mut out = BufWriter::new(file);

        let emitted = self.write_to(target, stats, &mut out).at_path(output)?;
        out.flush().at_path(output)?;

        Ok(emitted)
    }

    /// Write the report for `target` to any sink
    pub fn write_to<W: Write>(
        &self,
        target: &Path,
        stats: &Statistics,
        out: &mut W,
    ) -> io::Result<Statistics> {
        self.write_header(target, stats, out)?;

        banner(out, "TREE STRUCTURE WITH FILE CONTENTS:", true)?;
        writeln!(out)?;
        let emitted = self.renderer.render(target, out)?;

        self.write_footer(stats, out)?;
        Ok(emitted)
    }

    fn write_header<W: Write>(
        &self,
        target: &Path,
        stats: &Statistics,
        out: &mut W,
    ) -> io::Result<()> {
        banner(out, &format!("FOLDER CONTENT TREE: {}", dir_basename(target)), false)?;
        writeln!(out)?;

        writeln!(out, "📁 Target Directory: {}", target.display())?;
        writeln!(out, "📅 Generated: {}", Local::now().format("%Y-%m-%d %H:%M:%S"))?;
        writeln!(
            out,
            "📊 Statistics: {} folders, {} files, {}",
            stats.folder_count,
            stats.file_count,
            format_total_size(stats.total_size_bytes)
        )?;
        writeln!(out, "🚫 Ignored folders/files: {}", ignore_summary())?;

        Ok(())
    }

    fn write_footer<W: Write>(&self, stats: &Statistics, out: &mut W) -> io::Result<()> {
        banner(out, "SUMMARY", true)?;
        writeln!(out, "Total folders scanned: {}", stats.folder_count)?;
        writeln!(out, "Total files scanned: {}", stats.file_count)?;
        writeln!(out, "Total size: {} bytes", stats.total_size_bytes)?;
        writeln!(out, "Generation completed: {}", Local::now().format("%H:%M:%S"))?;
        writeln!(out, "Ignored items: {}", ignore_summary())?;
        Ok(())
    }
}

/// Boxed section title between two 80-column rules
fn banner<W: Write>(out: &mut W, title: &str, leading_blank: bool) -> io::Result<()> {
    let rule = "=".repeat(BANNER_WIDTH);
    if leading_blank {
        writeln!(out)?;
    }
    writeln!(out, "{}", rule)?;
    writeln!(out, "{}", title)?;
    writeln!(out, "{}", rule)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::EntryFilter;
    use crate::reader::Decoding;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn sections_appear_in_order() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "hi").unwrap();
        let stats = Statistics {
            folder_count: 0,
            file_count: 1,
            total_size_bytes: 2,
        };

        let renderer = TreeRenderer::new(EntryFilter::new(), Decoding::DEFAULT_CHAIN);
        let mut out = Vec::new();
        ReportWriter::new(&renderer)
            .write_to(dir.path(), &stats, &mut out)
            .unwrap();
        let report = String::from_utf8(out).unwrap();

        let rule = "=".repeat(80);
        assert!(report.starts_with(&format!(
            "{rule}\nFOLDER CONTENT TREE: {}\n{rule}\n\n📁 Target Directory: {}\n📅 Generated: ",
            dir_basename(dir.path()),
            dir.path().display()
        )));
        assert!(report.contains("📊 Statistics: 0 folders, 1 files, 2 bytes\n"));
        assert!(report.contains(&format!(
            "\n\n{rule}\nTREE STRUCTURE WITH FILE CONTENTS:\n{rule}\n\n📁 📄 (2 bytes) a.txt\n"
        )));
        assert!(report.contains(&format!(
            "\n\n{rule}\nSUMMARY\n{rule}\nTotal folders scanned: 0\nTotal files scanned: 1\nTotal size: 2 bytes\nGeneration completed: "
        )));
        assert!(report.ends_with(
            "Ignored items: __pycache__, migrations, venv, env, node_modules and all hidden files/folders\n"
        ));
    }

    #[test]
    fn write_reports_missing_output_directory() {
        let dir = tempdir().unwrap();
        let renderer = TreeRenderer::new(EntryFilter::new(), Decoding::DEFAULT_CHAIN);
        let output = dir.path().join("no/such/dir/report.txt");

        let err = ReportWriter::new(&renderer)
            .write(dir.path(), &Statistics::default(), &output)
            .unwrap_err();
        assert!(!err.is_usage());
        assert!(err.to_string().starts_with(&output.display().to_string()));
    }
}
