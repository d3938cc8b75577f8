//! Error types for the rcpt-core library.

use thiserror::Error;

/// Main error type for the rcpt library.
#[derive(Error, Debug)]
pub enum RcptError {
    /// Receipt scan error.
    #[error("scan error: {0}")]
    Scan(#[from] ScanError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors that abort a receipt scan.
///
/// Heuristic misses are not errors: a receipt whose amount or vendor
/// cannot be located still produces an entry filled with defaults. Only
/// failures that leave nothing to extract from abort the scan.
#[derive(Error, Debug)]
pub enum ScanError {
    /// The supplied bytes are not a recognizable image.
    #[error("not a readable image: {0}")]
    InputRejected(String),

    /// Image preprocessing failed.
    #[error("preprocessing failed: {0}")]
    Preprocess(#[from] PreprocessError),

    /// The OCR engine failed.
    #[error("OCR error: {0}")]
    Ocr(#[from] rcpt_ocr::OcrError),

    /// A scan is already running on this session.
    #[error("scan already in progress")]
    AlreadyRunning,
}

/// Errors from image preprocessing.
#[derive(Error, Debug)]
pub enum PreprocessError {
    /// The image bytes could not be decoded.
    #[error("failed to decode image: {0}")]
    Decode(String),

    /// The processed image could not be re-encoded.
    #[error("failed to encode image: {0}")]
    Encode(String),
}

/// Result type for the rcpt library.
pub type Result<T> = std::result::Result<T, RcptError>;
