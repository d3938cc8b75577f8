//! Error types for the OCR layer.

use thiserror::Error;

/// Errors that can occur while running text recognition.
#[derive(Error, Debug)]
pub enum OcrError {
    /// The OCR binary could not be found or spawned.
    #[error("failed to launch OCR engine: {0}")]
    EngineUnavailable(String),

    /// The engine ran but reported a failure.
    #[error("recognition failed: {0}")]
    RecognitionFailed(String),

    /// The engine produced output that could not be parsed.
    #[error("unreadable engine output: {0}")]
    MalformedOutput(String),

    /// I/O error while staging the image for the engine.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
