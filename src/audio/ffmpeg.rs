use std::path::Path;
use std::process::Command;
use std::time::Duration;

use tracing::{debug, info};

use crate::error::{LessonsplitError, Result};

use super::silence::{detect_clip_regions, SilenceParams};
use super::{AudioClip, ClipRegion};

/// Check if FFmpeg is installed and accessible.
pub fn check_ffmpeg() -> Result<()> {
    let output = Command::new("ffmpeg").arg("-version").output().map_err(|e| {
        LessonsplitError::Segmentation(format!(
            "FFmpeg not found. Please install FFmpeg and ensure it's in your PATH. Error: {e}"
        ))
    })?;

    if !output.status.success() {
        return Err(LessonsplitError::Segmentation(
            "FFmpeg check failed".to_string(),
        ));
    }

    debug!("FFmpeg is available");
    Ok(())
}

/// Check if FFprobe is installed and accessible.
pub fn check_ffprobe() -> Result<()> {
    let output = Command::new("ffprobe").arg("-version").output().map_err(|e| {
        LessonsplitError::Segmentation(format!(
            "FFprobe not found. Please install FFmpeg (includes FFprobe). Error: {e}"
        ))
    })?;

    if !output.status.success() {
        return Err(LessonsplitError::Segmentation(
            "FFprobe check failed".to_string(),
        ));
    }

    debug!("FFprobe is available");
    Ok(())
}

/// Get track duration using FFprobe.
pub fn probe_duration(input: &Path) -> Result<Duration> {
    let output = Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-show_entries",
            "format=duration",
            "-of",
            "default=noprint_wrappers=1:nokey=1",
        ])
        .arg(input)
        .output()
        .map_err(|e| LessonsplitError::Segmentation(format!("Failed to run FFprobe: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(LessonsplitError::Segmentation(format!(
            "FFprobe failed: {stderr}"
        )));
    }

    let duration_str = String::from_utf8_lossy(&output.stdout);
    let duration_secs: f64 = duration_str.trim().parse().map_err(|e| {
        LessonsplitError::Segmentation(format!(
            "Failed to parse duration '{}': {e}",
            duration_str.trim()
        ))
    })?;

    Ok(Duration::from_secs_f64(duration_secs))
}

/// Decode a track to WAV for silence analysis.
///
/// The output is mono 16-bit PCM at 16kHz, plenty for energy measurement.
/// The original track stays untouched; exports are cut from it later.
pub fn decode_to_wav(input: &Path, output: &Path) -> Result<()> {
    if !input.exists() {
        return Err(LessonsplitError::Segmentation(format!(
            "Source file not found: {}",
            input.display()
        )));
    }

    let status = Command::new("ffmpeg")
        .args(["-y", "-i"])
        .arg(input)
        .args(["-vn", "-acodec", "pcm_s16le", "-ar", "16000", "-ac", "1"])
        .arg(output)
        .status()
        .map_err(|e| LessonsplitError::Segmentation(format!("Failed to run FFmpeg: {e}")))?;

    if !status.success() {
        return Err(LessonsplitError::Segmentation(
            "FFmpeg decode failed".to_string(),
        ));
    }

    if !output.exists() {
        return Err(LessonsplitError::Segmentation(
            "Decoded WAV file was not created".to_string(),
        ));
    }

    Ok(())
}

/// Map a codec identifier to the FFmpeg encoder name.
fn encoder_for(codec: &str) -> &str {
    match codec {
        "mp3" => "libmp3lame",
        other => other,
    }
}

/// Cut one time region out of the original track and encode it to `dest`.
pub fn export_segment(
    input: &Path,
    dest: &Path,
    region: &ClipRegion,
    codec: &str,
) -> Result<()> {
    let duration = region.duration();
    if duration.is_zero() {
        return Err(LessonsplitError::Export {
            path: dest.display().to_string(),
            reason: "segment duration is zero".to_string(),
        });
    }

    let start_secs = format!("{:.3}", region.start.as_secs_f64());
    let duration_secs = format!("{:.3}", duration.as_secs_f64());

    debug!(
        "Exporting segment: start={}, duration={}",
        start_secs, duration_secs
    );

    let status = Command::new("ffmpeg")
        .args(["-y", "-ss"])
        .arg(&start_secs)
        .arg("-t")
        .arg(&duration_secs)
        .arg("-i")
        .arg(input)
        .args(["-vn", "-codec:a", encoder_for(codec)])
        .arg(dest)
        .status()
        .map_err(|e| LessonsplitError::Export {
            path: dest.display().to_string(),
            reason: format!("failed to run FFmpeg: {e}"),
        })?;

    if !status.success() {
        return Err(LessonsplitError::Export {
            path: dest.display().to_string(),
            reason: "FFmpeg segment export failed".to_string(),
        });
    }

    Ok(())
}

/// FFmpeg-backed implementation of [`AudioEngine`](super::AudioEngine).
///
/// Segmentation decodes the track to a temporary WAV, measures it, and
/// returns clips that reference the original file by time region; export cuts
/// the region back out of the original so no quality is lost to the analysis
/// format.
#[derive(Debug, Clone, Copy, Default)]
pub struct FfmpegEngine;

impl super::AudioEngine for FfmpegEngine {
    fn segment(&self, track: &Path, params: &SilenceParams) -> Result<Vec<AudioClip>> {
        check_ffmpeg()?;
        check_ffprobe()?;

        let duration = probe_duration(track)?;
        debug!("Track duration: {:.1}s", duration.as_secs_f64());

        let workspace = tempfile::tempdir()?;
        let wav_path = workspace.path().join("track.wav");

        decode_to_wav(track, &wav_path)?;
        let regions = detect_clip_regions(&wav_path, params)?;

        info!(
            "Segmented {} into {} raw clips",
            track.display(),
            regions.len()
        );

        Ok(regions
            .into_iter()
            .enumerate()
            .map(|(index, region)| AudioClip {
                source: track.to_path_buf(),
                region,
                index,
            })
            .collect())
    }

    fn export(&self, clip: &AudioClip, dest: &Path, codec: &str) -> Result<()> {
        export_segment(&clip.source, dest, &clip.region, codec)
    }
}
