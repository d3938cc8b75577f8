//! OCR abstraction layer for rcpt.
//!
//! This crate defines the recognition contract between the extraction
//! pipeline and whatever actually reads text off a receipt photo:
//! - `TesseractCli` shells out to an installed tesseract binary on native
//!   platforms
//! - browser builds construct a [`RawOcrResult`] directly from a JS-side
//!   recognizer and skip the engine entirely

mod engine;
mod error;
mod image;
mod progress;
mod result;

pub use engine::OcrEngine;
pub use error::OcrError;
pub use image::{ImageEncoding, ScanImage};
pub use progress::{NullSink, ProgressSink, ScanProgress, ScanStage};
pub use result::{BoundingBox, OcrLine, OcrWord, RawOcrResult};

#[cfg(feature = "native")]
pub use engine::tesseract::TesseractCli;

/// Result type for OCR operations.
pub type Result<T> = std::result::Result<T, OcrError>;
