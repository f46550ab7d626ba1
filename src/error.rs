use std::path::PathBuf;
use thiserror::Error;

/// Failures the seeding driver cannot degrade around.
///
/// The tokenizer and the resolution engine never produce these; a bad answer
/// cell becomes a fallback plus an [`UnresolvedEntry`](crate::UnresolvedEntry).
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("{source_name}: no header row")]
    EmptyInput { source_name: String },

    #[error("{source_name}: missing required column '{column}'")]
    MissingColumn { source_name: String, column: &'static str },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("record sink failed: {0}")]
    Sink(String),
}

pub type Result<T> = std::result::Result<T, SeedError>;
