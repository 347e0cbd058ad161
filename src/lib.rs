pub mod assign;
pub mod audio;
pub mod error;
pub mod languages;
pub mod metadata;
pub mod output;
pub mod pipeline;
pub mod trim;

pub use error::{LessonsplitError, Result};
pub use languages::{LanguageGroup, LanguageRegistry};
pub use pipeline::{print_summary, run_batch, BatchOptions, BatchReport, FileReport};
