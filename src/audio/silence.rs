use std::path::Path;
use std::time::Duration;

use hound::WavReader;
use tracing::{debug, info};

use crate::error::{LessonsplitError, Result};

use super::ClipRegion;

/// Parameters for silence-based track segmentation.
///
/// The defaults match the production lesson recordings: sentences are
/// separated by generous pauses, so the minimum silence is long and the
/// threshold low.
#[derive(Debug, Clone)]
pub struct SilenceParams {
    /// Minimum silence duration that separates two clips.
    pub min_silence: Duration,

    /// Energy threshold in dBFS below which a window counts as silent.
    pub silence_threshold_db: f32,

    /// Silence retained at each clip edge.
    pub keep_silence: Duration,
}

impl Default for SilenceParams {
    fn default() -> Self {
        Self {
            min_silence: Duration::from_millis(1800),
            silence_threshold_db: -60.0,
            keep_silence: Duration::from_millis(25),
        }
    }
}

/// Analysis window length. Clip boundaries are resolved at this granularity.
const WINDOW_MS: u64 = 10;

/// RMS energy of a sample window in dBFS. Pure silence is negative infinity.
fn window_rms_dbfs(samples: &[i16]) -> f32 {
    if samples.is_empty() {
        return f32::NEG_INFINITY;
    }

    let sum_squares: f64 = samples
        .iter()
        .map(|&s| {
            let normalized = s as f64 / i16::MAX as f64;
            normalized * normalized
        })
        .sum();

    let rms = (sum_squares / samples.len() as f64).sqrt();
    if rms <= 0.0 {
        f32::NEG_INFINITY
    } else {
        (20.0 * rms.log10()) as f32
    }
}

/// Split a decoded WAV file into silence-delimited clip regions.
///
/// A clip boundary occurs only where the energy stays below the silence
/// threshold for at least `min_silence`; shorter dips stay inside the clip.
/// `keep_silence` of padding is retained on each side, clamped to the track.
pub fn detect_clip_regions(wav_path: &Path, params: &SilenceParams) -> Result<Vec<ClipRegion>> {
    let reader = WavReader::open(wav_path)
        .map_err(|e| LessonsplitError::Segmentation(format!("failed to open WAV file: {e}")))?;

    let spec = reader.spec();
    let sample_rate = spec.sample_rate;

    debug!(
        "Analyzing audio: {} Hz, {} channels, {} bits",
        sample_rate, spec.channels, spec.bits_per_sample
    );

    let samples: Vec<i16> = match spec.sample_format {
        hound::SampleFormat::Int => reader
            .into_samples::<i16>()
            .map(|s| s.unwrap_or(0))
            .collect(),
        hound::SampleFormat::Float => reader
            .into_samples::<f32>()
            .map(|s| (s.unwrap_or(0.0) * i16::MAX as f32) as i16)
            .collect(),
    };

    if samples.is_empty() {
        return Ok(vec![]);
    }

    let window = ((sample_rate as u64 * WINDOW_MS / 1000) as usize).max(1);
    let window_duration = window as f64 / sample_rate as f64;

    let loud_windows: Vec<bool> = samples
        .chunks(window)
        .map(|w| window_rms_dbfs(w) >= params.silence_threshold_db)
        .collect();

    let min_silence_windows =
        (params.min_silence.as_secs_f64() / window_duration).ceil() as usize;

    let total_duration = Duration::from_secs_f64(samples.len() as f64 / sample_rate as f64);

    let regions: Vec<ClipRegion> = windows_to_runs(&loud_windows, min_silence_windows)
        .into_iter()
        .map(|(start, end)| {
            let start_time = Duration::from_secs_f64(start as f64 * window_duration);
            let end_time = Duration::from_secs_f64(end as f64 * window_duration);
            ClipRegion {
                start: start_time.saturating_sub(params.keep_silence),
                end: (end_time + params.keep_silence).min(total_duration),
            }
        })
        .collect();

    info!(
        "Detected {} clips in {:.1}s of audio",
        regions.len(),
        total_duration.as_secs_f64()
    );

    Ok(regions)
}

/// Collapse per-window loudness flags into clip runs.
///
/// Silences shorter than `min_silence_windows` stay inside the surrounding
/// clip instead of splitting it.
fn windows_to_runs(loud_windows: &[bool], min_silence_windows: usize) -> Vec<(usize, usize)> {
    let mut runs: Vec<(usize, usize)> = Vec::new();
    let mut in_clip = false;
    let mut start = 0;

    for (i, &is_loud) in loud_windows.iter().enumerate() {
        if is_loud && !in_clip {
            in_clip = true;
            start = i;
        } else if !is_loud && in_clip {
            in_clip = false;
            runs.push((start, i));
        }
    }

    if in_clip {
        runs.push((start, loud_windows.len()));
    }

    let mut merged: Vec<(usize, usize)> = Vec::new();
    for (run_start, run_end) in runs {
        if let Some((_, last_end)) = merged.last_mut() {
            if run_start.saturating_sub(*last_end) < min_silence_windows {
                *last_end = run_end;
                continue;
            }
        }
        merged.push((run_start, run_end));
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const TEST_RATE: u32 = 8000;

    fn write_wav(dir: &TempDir, name: &str, samples: &[i16]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: TEST_RATE,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(&path, spec).unwrap();
        for &s in samples {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();
        path
    }

    fn tone(duration: Duration) -> Vec<i16> {
        let count = (duration.as_secs_f64() * TEST_RATE as f64) as usize;
        (0..count)
            .map(|i| if i % 2 == 0 { 20_000 } else { -20_000 })
            .collect()
    }

    fn silence(duration: Duration) -> Vec<i16> {
        vec![0; (duration.as_secs_f64() * TEST_RATE as f64) as usize]
    }

    #[test]
    fn test_window_rms_dbfs_silence() {
        let samples = vec![0i16; 100];
        assert_eq!(window_rms_dbfs(&samples), f32::NEG_INFINITY);
    }

    #[test]
    fn test_window_rms_dbfs_full_scale() {
        let samples = vec![i16::MAX; 100];
        let db = window_rms_dbfs(&samples);
        assert!(db.abs() < 0.01, "full scale should be ~0 dBFS, got {db}");
    }

    #[test]
    fn test_windows_to_runs_splits_on_long_silence() {
        let mut windows = vec![true; 10];
        windows.extend(vec![false; 20]);
        windows.extend(vec![true; 10]);

        let runs = windows_to_runs(&windows, 15);
        assert_eq!(runs, vec![(0, 10), (30, 40)]);
    }

    #[test]
    fn test_windows_to_runs_keeps_short_silence_inside() {
        let mut windows = vec![true; 10];
        windows.extend(vec![false; 5]);
        windows.extend(vec![true; 10]);

        let runs = windows_to_runs(&windows, 15);
        assert_eq!(runs, vec![(0, 25)]);
    }

    #[test]
    fn test_detect_two_clips() {
        let dir = TempDir::new().unwrap();
        let mut samples = tone(Duration::from_millis(500));
        samples.extend(silence(Duration::from_millis(2500)));
        samples.extend(tone(Duration::from_millis(500)));
        let path = write_wav(&dir, "two.wav", &samples);

        let regions = detect_clip_regions(&path, &SilenceParams::default()).unwrap();
        assert_eq!(regions.len(), 2);
        assert!(regions[0].start < regions[0].end);
        assert!(regions[0].end < regions[1].start);
    }

    #[test]
    fn test_detect_merges_short_gap() {
        let dir = TempDir::new().unwrap();
        let mut samples = tone(Duration::from_millis(500));
        samples.extend(silence(Duration::from_millis(800)));
        samples.extend(tone(Duration::from_millis(500)));
        let path = write_wav(&dir, "merged.wav", &samples);

        let regions = detect_clip_regions(&path, &SilenceParams::default()).unwrap();
        assert_eq!(regions.len(), 1);
    }

    #[test]
    fn test_detect_all_silence() {
        let dir = TempDir::new().unwrap();
        let path = write_wav(&dir, "quiet.wav", &silence(Duration::from_secs(3)));

        let regions = detect_clip_regions(&path, &SilenceParams::default()).unwrap();
        assert!(regions.is_empty());
    }

    #[test]
    fn test_padding_clamped_to_track() {
        let dir = TempDir::new().unwrap();
        let samples = tone(Duration::from_millis(300));
        let path = write_wav(&dir, "edge.wav", &samples);

        let regions = detect_clip_regions(&path, &SilenceParams::default()).unwrap();
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].start, Duration::ZERO);
        assert!(regions[0].end <= Duration::from_millis(301));
    }

    #[test]
    fn test_silence_params_default() {
        let params = SilenceParams::default();
        assert_eq!(params.min_silence, Duration::from_millis(1800));
        assert_eq!(params.silence_threshold_db, -60.0);
        assert_eq!(params.keep_silence, Duration::from_millis(25));
    }
}
