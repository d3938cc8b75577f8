//! OCR engine implementations.

#[cfg(feature = "native")]
pub mod tesseract;

use crate::{ProgressSink, RawOcrResult, Result, ScanImage};

/// Trait for text recognition engines.
///
/// This trait abstracts over where recognition actually happens: a local
/// tesseract binary on native platforms, or a browser-side recognizer
/// whose results arrive already parsed. Engines may fail outright; the
/// caller treats that as recoverable and keeps the original input around
/// for a retry.
pub trait OcrEngine: Send + Sync {
    /// Run recognition on a prepared image.
    ///
    /// Implementations report coarse progress through `progress`; the
    /// caller decides how (and whether) to display it.
    fn recognize(&self, image: &ScanImage, progress: &mut dyn ProgressSink)
    -> Result<RawOcrResult>;

    /// Short engine name for logs.
    fn name(&self) -> &str;
}
