/*!
 * Console reporting for contree
 *
 * Everything here is informational: failures to read the finished report
 * for the preview are printed, never raised.
 */

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::time::Duration;

use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::types::Statistics;
use crate::utils::format_total_size;

/// Outcome of one report generation
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Report file that was written
    pub output_file: PathBuf,
    /// Time taken for statistics and rendering
    pub duration: Duration,
    /// Totals from the statistics walk
    pub stats: Statistics,
}

/// First lines of a file plus how many were left out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    pub lines: Vec<String>,
    pub remaining: usize,
}

impl Preview {
    /// Read up to `limit` lines of `path`, counting the rest
    pub fn load(path: &Path, limit: usize) -> io::Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let mut lines = Vec::with_capacity(limit);
        let mut total = 0;

        for line in reader.lines() {
            let line = line?;
            if total < limit {
                lines.push(line.trim_end().to_string());
            }
            total += 1;
        }

        Ok(Self {
            remaining: total.saturating_sub(limit),
            lines,
        })
    }
}

/// Prints progress and results to stdout
pub struct Reporter;

impl Reporter {
    /// Announce what is about to happen
    pub fn print_start(target: &Path, output_name: &str, ignored: &str) {
        println!("🌳 Generating folder tree with content for: {}", target.display());
        println!("💾 Output will be saved to: {}", output_name);
        println!("🚫 Ignoring: {}", ignored);
    }

    /// Success banner and summary table
    pub fn print_report(report: &RunReport) {
        println!(
            "✅ Success! Folder content tree saved to '{}'",
            report.output_file.display()
        );
        println!(
            "📊 Processed {} folders and {} files",
            report.stats.folder_count, report.stats.file_count
        );
        println!("\n{}", Self::summary_table(report));
    }

    /// Echo the start of the written report
    pub fn print_preview(path: &Path, limit: usize) {
        if limit == 0 {
            return;
        }

        println!(
            "\n📋 Preview of first {} lines from '{}':",
            limit,
            path.display()
        );
        println!("{}", "-".repeat(50));

        match Preview::load(path, limit) {
            Ok(preview) => {
                for line in &preview.lines {
                    println!("{}", line);
                }
                if preview.remaining > 0 {
                    println!("... and {} more lines", preview.remaining);
                }
            }
            Err(e) => println!("(Preview not available: {})", e),
        }
    }

    /// Summary table of one run
    pub fn summary_table(report: &RunReport) -> String {
        #[derive(Tabled)]
        struct SummaryRow {
            #[tabled(rename = "Metric")]
            key: &'static str,

            #[tabled(rename = "Value")]
            value: String,
        }

        let rows = vec![
            SummaryRow {
                key: "📂 Output File",
                value: report.output_file.display().to_string(),
            },
            SummaryRow {
                key: "⏱️ Process Time",
                value: format!("{:.4?}", report.duration),
            },
            SummaryRow {
                key: "📁 Folders",
                value: report.stats.folder_count.to_string(),
            },
            SummaryRow {
                key: "📄 Files",
                value: report.stats.file_count.to_string(),
            },
            SummaryRow {
                key: "📦 Total Size",
                value: format_total_size(report.stats.total_size_bytes),
            },
        ];

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }
}
