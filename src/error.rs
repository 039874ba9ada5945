//! Error types for knn_sketchpad.

use thiserror::Error;

/// Top-level error type for sketchpad operations.
#[derive(Debug, Error)]
pub enum SketchError {
    /// A correction label that was never used for training.
    #[error("that is not a known label: {0:?}")]
    UnknownLabel(String),

    /// Feedback was given without a guess to attach it to.
    #[error("no guess is waiting for feedback")]
    NoPendingGuess,

    /// The neighbor count must be positive.
    #[error("k must be greater than 0")]
    InvalidK,

    /// Only the fixed grid sizes are supported.
    #[error("unsupported grid size {0} (expected 16, 32 or 48)")]
    InvalidGridSize(usize),

    /// Console input that could not be parsed.
    #[error("command error: {0}")]
    Command(String),

    /// I/O error wrapper.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serde serialization/deserialization error.
    #[error("serde error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for sketchpad operations.
pub type Result<T> = std::result::Result<T, SketchError>;
