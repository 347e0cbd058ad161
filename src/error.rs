use thiserror::Error;

#[derive(Error, Debug)]
pub enum LessonsplitError {
    #[error("Malformed filename: {0}")]
    MalformedFilename(String),

    #[error("Unknown language group: {0}")]
    UnknownLanguageGroup(String),

    #[error("Invalid chunk count: {raw} raw chunks, {trimmed} after trimming")]
    InvalidChunkCount { raw: usize, trimmed: usize },

    #[error("Segmentation failed: {0}")]
    Segmentation(String),

    #[error("Export failed for {path}: {reason}")]
    Export { path: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LessonsplitError>;
