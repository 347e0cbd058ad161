use std::path::{Path, PathBuf};

use crate::error::{LessonsplitError, Result};

/// Metadata derived from a source filename, computed once per file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFileMetadata {
    /// Location of the source recording.
    pub path: PathBuf,
    /// Identifier shared by all sentences in the recording.
    pub book: String,
    /// Sequence number of the first content sentence in this file.
    ///
    /// Books too long for a single recording are split across files; the
    /// continuation file starts at a nonzero number.
    pub start_sentence: u32,
    /// Key into the language group registry.
    pub group_code: String,
}

/// Parse a source path of the form `<group>-<book>-...-<start>.mp3`.
///
/// Only the first two fields and the trailing numeric field are interpreted;
/// any descriptive text in between is tolerated and ignored.
pub fn parse_source_path(path: &Path) -> Result<SourceFileMetadata> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| LessonsplitError::MalformedFilename(path.display().to_string()))?;

    let fields: Vec<&str> = file_name.split('-').collect();
    if fields.len() < 3 {
        return Err(LessonsplitError::MalformedFilename(format!(
            "{file_name}: expected at least <group>-<book>-<start>"
        )));
    }

    let trailing = fields[fields.len() - 1];
    let digits = trailing.split('.').next().unwrap_or(trailing);
    let start_sentence: u32 = digits.parse().map_err(|_| {
        LessonsplitError::MalformedFilename(format!(
            "{file_name}: trailing field '{trailing}' is not a sentence number"
        ))
    })?;

    Ok(SourceFileMetadata {
        path: path.to_path_buf(),
        book: fields[1].to_string(),
        start_sentence,
        group_code: fields[0].to_string(),
    })
}
