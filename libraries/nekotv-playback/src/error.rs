//! Error types for the playback engine

use thiserror::Error;

/// Playback errors
///
/// The taxonomy is deliberately narrow: most "failures" in this engine are
/// no-ops (commands to a backend that is not ready, playlist references that
/// do not resolve). Errors exist only where an operation has a genuinely
/// reportable failure.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// The embedder's playback surface rejected an operation
    #[error("surface error: {0}")]
    Surface(String),

    /// A timestamp string could not be parsed
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
