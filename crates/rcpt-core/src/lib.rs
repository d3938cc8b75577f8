//! Core library for receipt scanning and record keeping.
//!
//! This crate provides:
//! - Image preprocessing (downscale, contrast stretch, binarization)
//! - A scan pipeline turning OCR output into draft ledger entries
//! - Layout-based extraction of the total amount and vendor name,
//!   with raw-text fallbacks for amount, vendor, and date
//! - A small ledger of entries with JSON persistence

pub mod error;
pub mod ledger;
pub mod models;
pub mod scan;

pub use error::{PreprocessError, RcptError, Result, ScanError};
pub use ledger::{Ledger, LedgerTotals};
pub use models::config::{ExtractionConfig, PreprocessConfig, RcptConfig};
pub use models::entry::{EntryKind, ExtractedEntry, LedgerEntry};
pub use scan::{ReceiptScanner, ScanSession, SessionState};

/// Re-export recognition types so downstream crates only depend on this one.
pub use rcpt_ocr::{
    BoundingBox, ImageEncoding, NullSink, OcrEngine, OcrError, OcrLine, OcrWord, ProgressSink,
    RawOcrResult, ScanImage, ScanProgress, ScanStage,
};

#[cfg(feature = "native")]
pub use rcpt_ocr::TesseractCli;
