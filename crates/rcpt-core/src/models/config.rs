//! Configuration structures for the scan pipeline.

use serde::{Deserialize, Serialize};

/// Main configuration for the rcpt pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RcptConfig {
    /// Image preprocessing configuration.
    pub preprocess: PreprocessConfig,

    /// Field extraction configuration.
    pub extraction: ExtractionConfig,
}

impl Default for RcptConfig {
    fn default() -> Self {
        Self {
            preprocess: PreprocessConfig::default(),
            extraction: ExtractionConfig::default(),
        }
    }
}

/// Image preprocessing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessConfig {
    /// Maximum image dimension (longer side). Larger photos are
    /// downscaled so the longer side equals this. 0 disables the cap.
    pub max_dimension: u32,

    /// JPEG re-encode quality, 0.0 - 1.0.
    pub jpeg_quality: f32,

    /// Run the contrast/binarization pass. Helps on printed receipts;
    /// disable for glossy or colored photos where thresholding hurts.
    pub binarize: bool,

    /// Linear contrast stretch factor.
    pub contrast_factor: f32,

    /// Midpoint the contrast stretch pivots around.
    pub contrast_midpoint: f32,

    /// Luminance cutoff: brighter pixels become white, darker black.
    pub binarize_threshold: u8,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            max_dimension: 1600,
            jpeg_quality: 0.85,
            binarize: true,
            contrast_factor: 1.25,
            contrast_midpoint: 128.0,
            binarize_threshold: 190,
        }
    }
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Fraction of the page height, measured from the top, where vendor
    /// candidate lines may start.
    pub top_band_ratio: f32,

    /// Minimum vendor line length in characters.
    pub vendor_min_len: usize,

    /// Maximum vendor line length in characters.
    pub vendor_max_len: usize,

    /// How many leading text lines the vendor fallback inspects.
    pub fallback_vendor_lines: usize,

    /// Category assigned to extracted entries.
    pub default_category: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            top_band_ratio: 0.35,
            vendor_min_len: 3,
            vendor_max_len: 50,
            fallback_vendor_lines: 6,
            default_category: "Supplies".to_string(),
        }
    }
}

impl RcptConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}
