pub mod ffmpeg;
pub mod silence;

pub use ffmpeg::{check_ffmpeg, check_ffprobe, FfmpegEngine};
pub use silence::{detect_clip_regions, SilenceParams};

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::Result;

/// A silence-delimited region of a source track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipRegion {
    pub start: Duration,
    pub end: Duration,
}

impl ClipRegion {
    /// Get the duration of this region.
    pub fn duration(&self) -> Duration {
        self.end.saturating_sub(self.start)
    }
}

/// One detected chunk of a source track, in chronological order.
///
/// The labeling pipeline only looks at `index`; the payload stays opaque
/// until export.
#[derive(Debug, Clone)]
pub struct AudioClip {
    pub source: PathBuf,
    pub region: ClipRegion,
    pub index: usize,
}

impl AudioClip {
    /// Get the duration of this clip.
    pub fn duration(&self) -> Duration {
        self.region.duration()
    }
}

/// Audio decode/segment/export capability consumed by the pipeline.
///
/// The shipped implementation drives FFmpeg; tests substitute scripted
/// engines so the labeling logic runs without real audio.
pub trait AudioEngine {
    /// Split a track into silence-delimited clips in chronological order.
    fn segment(&self, track: &Path, params: &SilenceParams) -> Result<Vec<AudioClip>>;

    /// Encode one clip to `dest` with the given codec.
    fn export(&self, clip: &AudioClip, dest: &Path, codec: &str) -> Result<()>;
}
