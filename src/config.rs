/*!
 * Configuration handling for contree
 */

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use clap_complete::Shell;

use crate::error::{ContreeError, IoResultExt, Result};
use crate::reader::Decoding;
use crate::utils::dir_basename;

/// Suffix appended to the target's base name to form the report name
pub const OUTPUT_SUFFIX: &str = "_content_tree.txt";

/// Command-line arguments for contree
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "contree",
    version = env!("CARGO_PKG_VERSION"),
    about = "Render a directory as a tree with every file's content inlined",
    long_about = "Walks a directory, draws its structure as a tree and inlines the text of every non-ignored file into a single <name>_content_tree.txt report, for sharing a codebase with a reviewer or a language model."
)]
pub struct Args {
    /// Directory to process
    #[clap(required_unless_present = "generate")]
    pub directory_path: Option<PathBuf>,

    /// Directory the report is written into
    #[clap(short = 'o', long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Number of report lines to echo after generation (0 disables)
    #[clap(long, default_value = "30")]
    pub preview_lines: usize,

    /// Show non-UTF-8 files as unreadable instead of decoding them as latin-1
    #[clap(long)]
    pub strict_utf8: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[clap(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors and skip the console report
    #[clap(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Target directory, as given
    pub target_dir: PathBuf,

    /// Directory the report is written into
    pub output_dir: PathBuf,

    /// Lines of the report to preview on the console
    pub preview_lines: usize,

    /// Disable the latin-1 fallback
    pub strict_utf8: bool,

    /// Suppress console output other than errors
    pub quiet: bool,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args(args: Args) -> Result<Self> {
        let target_dir = args.directory_path.ok_or_else(|| {
            ContreeError::Usage("Usage: contree <folder_name>\nExample: contree src".to_string())
        })?;

        Ok(Self {
            target_dir,
            output_dir: args.output_dir,
            preview_lines: args.preview_lines,
            strict_utf8: args.strict_utf8,
            quiet: args.quiet,
        })
    }

    /// Configuration with defaults for a target directory
    pub fn new(target_dir: impl Into<PathBuf>) -> Self {
        Self {
            target_dir: target_dir.into(),
            output_dir: PathBuf::from("."),
            preview_lines: 30,
            strict_utf8: false,
            quiet: false,
        }
    }

    /// Validate the target and resolve it to an absolute path
    pub fn validate(&self) -> Result<PathBuf> {
        let absolute = if self.target_dir.is_absolute() {
            self.target_dir.clone()
        } else {
            env::current_dir()
                .at_path(&self.target_dir)?
                .join(&self.target_dir)
        };

        if !absolute.exists() {
            return Err(ContreeError::PathNotFound(absolute));
        }
        if !absolute.is_dir() {
            return Err(ContreeError::NotADirectory(absolute));
        }

        fs::canonicalize(&absolute).at_path(&absolute)
    }

    /// Report file name for a resolved target
    pub fn output_name(target: &Path) -> String {
        format!("{}{}", dir_basename(target), OUTPUT_SUFFIX)
    }

    /// Absolute path of the report for a resolved target
    pub fn output_path(&self, target: &Path) -> Result<PathBuf> {
        let dir = fs::canonicalize(&self.output_dir).at_path(&self.output_dir)?;
        Ok(dir.join(Self::output_name(target)))
    }

    /// Decoders to try, in order
    pub fn decode_chain(&self) -> &'static [Decoding] {
        if self.strict_utf8 {
            Decoding::STRICT_CHAIN
        } else {
            Decoding::DEFAULT_CHAIN
        }
    }
}
