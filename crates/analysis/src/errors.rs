use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading observed mutation-call files.
#[derive(Debug, Error)]
pub enum ObservedDataError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed CSV in {name}: {source}")]
    Csv {
        name: String,
        #[source]
        source: csv::Error,
    },

    /// The file name does not carry strain, generation and file id.
    #[error("Cannot parse strain and generation from file name: {0}")]
    FileName(String),

    #[error("Invalid file name pattern: {0}")]
    Pattern(#[from] regex::Error),
}
