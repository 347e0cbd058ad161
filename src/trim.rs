use std::ops::Range;

use crate::error::{LessonsplitError, Result};

/// Canonical number of sentences in one content batch.
pub const SENTENCE_BATCH: usize = 50;

/// Raw chunk counts above this belong to full-format recordings.
const FULL_FORMAT_MIN_CHUNKS: usize = 100;

/// Chunks of outro material at the tail of every recording.
const TRAILING_NOISE: usize = 2;

/// Chunks of intro material at the head of a compact recording: the spoken
/// intro plus the announced target language name.
const COMPACT_LEADING_NOISE: usize = 2;

/// The two recording formats, distinguished by chunk volume alone.
///
/// No format flag is carried in filenames or metadata; the content encodes
/// the distinction purely in how many chunks a recording produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordingFormat {
    /// One batch of sentences in a single solo language.
    Compact,
    /// An interleaved round-robin across every language in the group.
    Full,
}

/// Classify a recording by its raw chunk count.
pub fn classify_format(raw_count: usize) -> RecordingFormat {
    if raw_count > FULL_FORMAT_MIN_CHUNKS {
        RecordingFormat::Full
    } else {
        RecordingFormat::Compact
    }
}

/// Decide which slice of the raw chunk sequence is actual content.
///
/// A full recording opens with one announcement chunk per language; a compact
/// one opens with exactly two. Both close with two chunks of outro. The
/// surviving count must be a nonzero multiple of [`SENTENCE_BATCH`], anything
/// else means the segmentation itself went wrong and the file is rejected
/// rather than partially processed.
pub fn content_range(raw_count: usize, arity: usize) -> Result<Range<usize>> {
    let leading = match classify_format(raw_count) {
        RecordingFormat::Full => arity,
        RecordingFormat::Compact => COMPACT_LEADING_NOISE,
    };

    let start = leading.min(raw_count);
    let end = raw_count.saturating_sub(TRAILING_NOISE).max(start);
    let trimmed = end - start;

    if trimmed == 0 || trimmed % SENTENCE_BATCH != 0 {
        return Err(LessonsplitError::InvalidChunkCount {
            raw: raw_count,
            trimmed,
        });
    }

    Ok(start..end)
}
