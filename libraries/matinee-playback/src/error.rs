//! Error types for playback engines

use thiserror::Error;

/// Result type alias using `EngineError`
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors reported by playback engine implementations
#[derive(Error, Debug)]
pub enum EngineError {
    /// The engine process or its control channel is gone
    #[error("Playback engine unavailable: {0}")]
    Unavailable(String),

    /// I/O error talking to the engine
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl EngineError {
    /// Create an unavailable error
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }
}
