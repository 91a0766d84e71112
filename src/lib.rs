/*!
 * contree - Render a directory as a tree with file contents inlined
 *
 * This library walks a directory, draws its structure as a tree and inlines
 * the text of every non-ignored file into one consolidated report, together
 * with folder/file counts and the total size.
 */

pub mod config;
pub mod error;
pub mod filter;
pub mod reader;
pub mod report;
pub mod scanner;
pub mod tree;
pub mod types;
pub mod utils;
pub mod writer;


use std::path::Path;
use std::time::Instant;

use indicatif::ProgressBar;

// Re-export main components for easier access
pub use config::{Args, Config};
pub use error::{ContreeError, Result};
pub use filter::{should_ignore, EntryFilter, IGNORED_NAMES};
pub use reader::{read_content, Decoding, FileContent};
pub use report::{Reporter, RunReport};
pub use scanner::Scanner;
pub use tree::TreeRenderer;
pub use types::{DirectoryEntry, EntryKind, RenderFrame, Statistics};
pub use utils::{format_file_size, format_total_size};
pub use writer::ReportWriter;

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Generate the report for an already resolved target directory.
///
/// Statistics are gathered first by an independent walk, then the report is
/// rendered into `output`. Both walks share one filter that also excludes
/// `output` itself.
pub fn generate(
    config: &Config,
    target: &Path,
    output: &Path,
    progress: ProgressBar,
) -> Result<RunReport> {
    let start = Instant::now();
    let filter = EntryFilter::skipping(output);

    let stats = Scanner::new(filter.clone()).walk_stats(target);
    progress.set_length(stats.file_count);

    let renderer = TreeRenderer::new(filter, config.decode_chain()).with_progress(progress);
    let emitted = ReportWriter::new(&renderer).write(target, &stats, output)?;

    if emitted != stats {
        tracing::warn!(
            ?stats,
            ?emitted,
            "Directory changed while generating; header totals may not match the tree"
        );
    }

    Ok(RunReport {
        output_file: output.to_path_buf(),
        duration: start.elapsed(),
        stats,
    })
}
