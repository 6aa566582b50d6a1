/*!
 * Command-line interface for dirclip
 */

use std::io;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::{CommandFactory, Parser};
use indicatif::{ProgressBar, ProgressStyle};

use dirclip::config::{Args, Config};
use dirclip::error::Result;
use dirclip::minify::minify;
use dirclip::report::{Reporter, RunReport};
use dirclip::scanner::Scanner;
use dirclip::writer::TextWriter;

fn main() -> ExitCode {
    // Parse command line arguments
    let args = Args::parse();

    init_logging(args.verbose);

    if let Some(shell) = args.generate {
        clap_complete::generate(shell, &mut Args::command(), "dirclip", &mut io::stdout());
        return ExitCode::SUCCESS;
    }

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn run(args: Args) -> Result<()> {
    // Create configuration
    let config = Config::from_args(args)?;

    // Validate configuration
    config.validate()?;

    if let Some(path) = &config.settings_file {
        log::info!("Using settings from {}", path.display());
    }

    let progress = if config.quiet {
        ProgressBar::hidden()
    } else {
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {wide_msg:.dim}") {
            bar.set_style(style);
        }
        bar.enable_steady_tick(Duration::from_millis(100));
        bar
    };
    progress.set_message(format!("Scanning {}", config.target_dir.display()));

    let start_time = Instant::now();

    // Scan directory
    let mut scanner = Scanner::new(config.settings.clone(), Arc::new(progress.clone()));
    let scanned = scanner.scan(&config.target_dir);
    progress.finish_and_clear();
    let tree = scanned?;
    log::info!("Selected {} files under {}", tree.file_count(), tree.path.display());

    // Render and optionally minify
    let rendered = TextWriter::new().render(&tree);
    let rendered_bytes = rendered.len();
    let (document, minified_bytes) = if config.settings.minify_output {
        let minified = minify(&rendered);
        let len = minified.len();
        (minified, Some(len))
    } else {
        (rendered, None)
    };

    config.sink.deliver(&document)?;
    log::info!("Delivered {} bytes to {}", document.len(), config.sink);

    if !config.quiet {
        let report = RunReport {
            sink: config.sink.to_string(),
            duration: start_time.elapsed(),
            statistics: scanner.statistics().clone(),
            rendered_bytes,
            minified_bytes,
        };
        Reporter::new().print_report(&report);
    }

    Ok(())
}
