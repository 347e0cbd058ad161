use anyhow::{Context, Result};
use clap::Parser;
use lessonsplit::audio::FfmpegEngine;
use lessonsplit::languages::LanguageRegistry;
use lessonsplit::pipeline::{print_summary, run_batch, BatchOptions};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "lessonsplit")]
#[command(version, about = "Split multi-language audio lessons into per-sentence files")]
#[command(long_about = "Split lesson recordings into individually labeled per-sentence, per-language MP3 files ready for spaced-repetition study tools.")]
struct Cli {
    /// Directory containing the source recordings
    #[arg(short, long, default_value = "files")]
    input: PathBuf,

    /// Directory the labeled sentence files are written to
    #[arg(short, long, default_value = "output")]
    output: PathBuf,

    /// Disable progress bars
    #[arg(short, long)]
    quiet: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    if !cli.input.is_dir() {
        anyhow::bail!("Input directory not found: {}", cli.input.display());
    }

    info!("Input:  {}", cli.input.display());
    info!("Output: {}", cli.output.display());

    let engine = FfmpegEngine;
    let registry = LanguageRegistry::builtin();

    let options = BatchOptions {
        show_progress: !cli.quiet,
        ..Default::default()
    };

    let report = run_batch(&engine, &registry, &cli.input, &cli.output, &options)
        .context("Batch processing failed")?;

    print_summary(&report);

    Ok(())
}
