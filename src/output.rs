use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::assign::SentenceLabel;
use crate::audio::{AudioClip, AudioEngine};
use crate::error::Result;

/// Codec identifier handed to the engine for every exported sentence.
pub const EXPORT_CODEC: &str = "mp3";

/// Deterministic destination for one labeled sentence.
///
/// The `(language, book, sentence)` triple is unique within a run, so the
/// path is collision-free; a collision would mean the trimming or labeling
/// upstream mislabeled a chunk.
pub fn resolve_output_path(root: &Path, language: &str, book: &str, sentence: u32) -> PathBuf {
    root.join(language)
        .join(book)
        .join(format!("{language} - {book} - {sentence:04}.mp3"))
}

/// Export one labeled clip, creating the destination directory on demand.
///
/// Directory creation is idempotent. A failed export surfaces as an error for
/// this clip only; sibling clips are unaffected.
pub fn export_clip(
    engine: &dyn AudioEngine,
    clip: &AudioClip,
    root: &Path,
    book: &str,
    label: &SentenceLabel,
) -> Result<PathBuf> {
    let dest = resolve_output_path(root, &label.language, book, label.sentence);

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }

    debug!("Exporting {}", dest.display());
    engine.export(clip, &dest, EXPORT_CODEC)?;

    Ok(dest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_output_path() {
        let path = resolve_output_path(Path::new("output"), "EN", "C1", 7);
        assert_eq!(path, PathBuf::from("output/EN/C1/EN - C1 - 0007.mp3"));
    }

    #[test]
    fn test_resolve_output_path_pads_to_four_digits() {
        let path = resolve_output_path(Path::new("output"), "DE", "C1", 0);
        assert_eq!(path, PathBuf::from("output/DE/C1/DE - C1 - 0000.mp3"));

        let path = resolve_output_path(Path::new("output"), "DE", "C1", 12345);
        assert_eq!(path, PathBuf::from("output/DE/C1/DE - C1 - 12345.mp3"));
    }

    #[test]
    fn test_resolve_output_path_under_custom_root() {
        let path = resolve_output_path(Path::new("/data/out"), "FR", "B2", 150);
        assert_eq!(path, PathBuf::from("/data/out/FR/B2/FR - B2 - 0150.mp3"));
    }
}
