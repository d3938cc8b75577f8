//! Encoded image payload handed to OCR engines.

use serde::{Deserialize, Serialize};

/// Encoding of the bytes inside a [`ScanImage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageEncoding {
    Jpeg,
    Png,
}

impl ImageEncoding {
    /// File extension used when the image is staged on disk.
    pub fn extension(&self) -> &'static str {
        match self {
            ImageEncoding::Jpeg => "jpg",
            ImageEncoding::Png => "png",
        }
    }
}

/// A preprocessed, encoded image ready for recognition.
///
/// Produced by the preprocessing step; engines receive it as an opaque
/// payload and never see the caller's original file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanImage {
    /// Encoded image bytes.
    pub bytes: Vec<u8>,

    /// How `bytes` is encoded.
    pub encoding: ImageEncoding,

    /// Pixel width.
    pub width: u32,

    /// Pixel height.
    pub height: u32,
}

impl ScanImage {
    pub fn new(bytes: Vec<u8>, encoding: ImageEncoding, width: u32, height: u32) -> Self {
        Self {
            bytes,
            encoding,
            width,
            height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
