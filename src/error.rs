//! Error handling for the resume scorer

use thiserror::Error;

/// Errors surfaced by the scoring core and its callers.
///
/// Only document extraction and the outer layers (config, file loading) can
/// fail. Segmentation and scoring degrade to zero/empty results instead of
/// returning an error, so a malformed resume shows up as low scores and
/// issue strings rather than as a variant here.
#[derive(Error, Debug)]
pub enum ResumeScorerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Text extraction failed: {0}")]
    ExtractionFailed(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ResumeScorerError>;

impl ResumeScorerError {
    /// Whether repeating the same call could succeed.
    ///
    /// The core is deterministic, so only I/O failures are worth retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ResumeScorerError::Io(_))
    }
}
