use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use crate::assign::assign_labels;
use crate::audio::{AudioEngine, SilenceParams};
use crate::error::Result;
use crate::languages::LanguageRegistry;
use crate::metadata::parse_source_path;
use crate::output::export_clip;
use crate::trim::content_range;

/// Options for one batch run.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Silence-detection parameters handed to the engine.
    pub silence: SilenceParams,
    /// Show progress bars.
    pub show_progress: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            silence: SilenceParams::default(),
            show_progress: true,
        }
    }
}

/// Outcome of processing one source file.
#[derive(Debug)]
pub struct FileReport {
    /// Source recording this report covers.
    pub source: PathBuf,
    /// Sentences successfully written.
    pub exported: usize,
    /// Sentences whose export failed.
    pub failed: usize,
}

/// Statistics for one batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub files_found: usize,
    pub files_processed: usize,
    pub files_skipped: usize,
    pub clips_exported: usize,
    pub export_failures: usize,
    pub total_time: Duration,
}

/// Enumerate the source MP3s under `input_dir`, sorted by path.
///
/// Sorted order matters: continuation files of the same book must be
/// processed after their predecessors so log output reads chronologically.
pub fn discover_sources(input_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut sources = Vec::new();

    for entry in fs::read_dir(input_dir)? {
        let entry = entry?;
        let path = entry.path();
        let is_mp3 = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("mp3"));
        if path.is_file() && is_mp3 {
            sources.push(path);
        }
    }

    sources.sort();
    Ok(sources)
}

/// Split every source file under `input_dir` into labeled sentence files.
///
/// Per-file failures are logged and skipped; the batch always attempts every
/// discovered file. Only an unreadable input directory fails the run itself.
pub fn run_batch(
    engine: &dyn AudioEngine,
    registry: &LanguageRegistry,
    input_dir: &Path,
    output_dir: &Path,
    options: &BatchOptions,
) -> Result<BatchReport> {
    let start_time = Instant::now();

    let sources = discover_sources(input_dir)?;
    info!(
        "Found {} source files in {}",
        sources.len(),
        input_dir.display()
    );

    let mut report = BatchReport {
        files_found: sources.len(),
        ..Default::default()
    };

    let progress = if options.show_progress {
        let pb = ProgressBar::new(sources.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{bar:40.green} {pos}/{len} {msg}")
                .unwrap(),
        );
        Some(pb)
    } else {
        None
    };

    for source in &sources {
        if let Some(pb) = &progress {
            let name = source
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            pb.set_message(name);
        }

        match split_file(engine, registry, source, output_dir, options) {
            Ok(file_report) => {
                report.files_processed += 1;
                report.clips_exported += file_report.exported;
                report.export_failures += file_report.failed;
            }
            Err(err) => {
                warn!("Skipping {}: {}", source.display(), err);
                report.files_skipped += 1;
            }
        }

        if let Some(pb) = &progress {
            pb.inc(1);
        }
    }

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    report.total_time = start_time.elapsed();
    Ok(report)
}

/// Split one source recording into labeled sentence files.
///
/// Any error before export rejects the whole file: a malformed name, an
/// unknown language group, or a chunk count that doesn't survive trimming.
/// Export errors are counted per clip and the remaining clips still run.
pub fn split_file(
    engine: &dyn AudioEngine,
    registry: &LanguageRegistry,
    source: &Path,
    output_dir: &Path,
    options: &BatchOptions,
) -> Result<FileReport> {
    let metadata = parse_source_path(source)?;
    let group = registry.resolve(&metadata.group_code)?;

    info!("Analyzing {}", source.display());
    let clips = engine.segment(source, &options.silence)?;
    debug!("Segmentation produced {} raw clips", clips.len());

    let content = content_range(clips.len(), group.arity())?;
    let clips = &clips[content];
    let labels = assign_labels(clips.len(), group, metadata.start_sentence);

    let mut exported = 0;
    let mut failed = 0;
    for (clip, label) in clips.iter().zip(&labels) {
        match export_clip(engine, clip, output_dir, &metadata.book, label) {
            Ok(dest) => {
                debug!("Wrote {}", dest.display());
                exported += 1;
            }
            Err(err) => {
                warn!("{}", err);
                failed += 1;
            }
        }
    }

    info!(
        "{}: exported {} of {} sentences",
        metadata.book,
        exported,
        labels.len()
    );

    Ok(FileReport {
        source: source.to_path_buf(),
        exported,
        failed,
    })
}

/// Print a summary of the batch results.
pub fn print_summary(report: &BatchReport) {
    println!();
    println!("═══════════════════════════════════════════════════════════════");
    println!("                     Lesson Splitting Complete                  ");
    println!("═══════════════════════════════════════════════════════════════");
    println!();
    println!("  Files found:      {}", report.files_found);
    println!("  Files processed:  {}", report.files_processed);
    println!("  Files skipped:    {}", report.files_skipped);
    println!("  Sentences:        {}", report.clips_exported);
    if report.export_failures > 0 {
        println!("  Export failures:  {}", report.export_failures);
    }
    println!();
    println!("  Total time:       {:.2}s", report.total_time.as_secs_f64());
    println!();
    println!("═══════════════════════════════════════════════════════════════");
}
