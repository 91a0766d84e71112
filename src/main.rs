/*!
 * Command-line interface for contree
 */

use std::io;
use std::process::ExitCode;
use std::time::Duration;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use indicatif::{ProgressBar, ProgressStyle};

use contree::config::{Args, Config};
use contree::filter::ignore_summary;
use contree::report::Reporter;

fn main() -> ExitCode {
    // clap exits with 2 on bad usage; this tool reports every usage error as 1
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            return ExitCode::from(code);
        }
    };

    init_logging(args.verbose, args.quiet);

    if let Some(shell) = args.generate {
        let mut cmd = Args::command();
        let name = cmd.get_name().to_string();
        generate(shell, &mut cmd, name, &mut io::stdout());
        return ExitCode::SUCCESS;
    }

    let config = match Config::from_args(args) {
        Ok(config) => config,
        Err(e) => {
            println!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let target = match config.validate() {
        Ok(target) => target,
        Err(e) => {
            println!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let output = match config.output_path(&target) {
        Ok(output) => output,
        Err(e) => {
            println!("❌ Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    tracing::debug!(?config, target = %target.display(), output = %output.display());

    if !config.quiet {
        Reporter::print_start(&target, &Config::output_name(&target), &ignore_summary());
    }

    let progress = if config.quiet {
        ProgressBar::hidden()
    } else {
        spinner()
    };

    let report = match contree::generate(&config, &target, &output, progress.clone()) {
        Ok(report) => report,
        Err(e) => {
            progress.finish_and_clear();
            tracing::error!("Report generation failed: {}", e);
            println!("❌ Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    progress.finish_and_clear();

    if !config.quiet {
        Reporter::print_report(&report);
        Reporter::print_preview(&report.output_file, config.preview_lines);
    }

    ExitCode::SUCCESS
}

fn spinner() -> ProgressBar {
    let progress = ProgressBar::new(0);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} {prefix:.bold.cyan} {wide_msg:.dim.white} {pos}/{len}")
    {
        progress.set_style(style);
    }
    progress.set_prefix("📄 Rendering");
    progress.enable_steady_tick(Duration::from_millis(100));
    progress
}

fn init_logging(verbosity: u8, quiet: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let level = if quiet {
        "error"
    } else {
        match verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("contree={}", level)));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .with(filter)
        .init();
}
