//! WASM bindings for receipt scanning.
//!
//! Recognition itself happens in the browser (for example with
//! Tesseract.js); these bindings take the recognized words and lines,
//! run the same extraction pipeline the native build uses, and hand a
//! draft ledger entry back to JavaScript.

use wasm_bindgen::prelude::*;

use rcpt_core::scan::{assemble, layout::LayoutExtractor, text};
use rcpt_core::{BoundingBox, ExtractionConfig, OcrLine, OcrWord, RawOcrResult};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Extract a draft ledger entry from plain recognized text.
///
/// Runs only the text-based fallbacks; use [`OcrResultJs`] when word
/// geometry is available, it finds totals far more reliably.
#[wasm_bindgen]
pub fn extract_entry_from_text(text: &str) -> Result<JsValue, JsValue> {
    let config = ExtractionConfig::default();
    let entry = assemble::assemble(text, None, None, &config);

    serde_wasm_bindgen::to_value(&entry).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Parse a single money token such as "$1,234.56".
#[wasm_bindgen]
pub fn parse_money(value: &str) -> Option<f64> {
    text::parse_money(value).map(|d| d.to_string().parse().unwrap_or(0.0))
}

/// Find a date in recognized text, as an ISO `YYYY-MM-DD` string.
#[wasm_bindgen]
pub fn extract_date(text_value: &str) -> Option<String> {
    text::extract_date(text_value).map(|d| d.to_string())
}

/// Recognition result assembled on the JavaScript side.
///
/// Feed it lines and words as the browser OCR reports them, then call
/// [`extract_entry`](OcrResultJs::extract_entry).
#[wasm_bindgen]
pub struct OcrResultJs {
    result: RawOcrResult,
}

#[wasm_bindgen]
impl OcrResultJs {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            result: RawOcrResult::default(),
        }
    }

    /// Add a recognized line. `id` is referenced by the words on it.
    #[wasm_bindgen]
    pub fn add_line(&mut self, id: u32, x0: f32, y0: f32, x1: f32, y1: f32, text: &str) {
        self.result.lines.push(OcrLine {
            id,
            bbox: BoundingBox::new(x0, y0, x1, y1),
            text: text.to_string(),
        });
    }

    /// Add a recognized word belonging to line `line_id`.
    #[wasm_bindgen]
    pub fn add_word(
        &mut self,
        line_id: u32,
        x0: f32,
        y0: f32,
        x1: f32,
        y1: f32,
        text: &str,
        confidence: f32,
    ) {
        self.result.words.push(OcrWord {
            line_id,
            bbox: BoundingBox::new(x0, y0, x1, y1),
            text: text.to_string(),
            confidence,
        });
    }

    /// Set the full recognized text.
    #[wasm_bindgen]
    pub fn set_text(&mut self, text: &str) {
        self.result.full_text = text.to_string();
    }

    /// The full text, falling back to the joined line texts.
    #[wasm_bindgen]
    pub fn get_text(&self) -> String {
        if self.result.full_text.is_empty() {
            self.result
                .lines
                .iter()
                .map(|l| l.text.as_str())
                .collect::<Vec<_>>()
                .join("\n")
        } else {
            self.result.full_text.clone()
        }
    }

    /// Run layout extraction and return a draft ledger entry.
    #[wasm_bindgen]
    pub fn extract_entry(&self) -> Result<JsValue, JsValue> {
        let config = ExtractionConfig::default();

        let extractor = LayoutExtractor::new(&self.result);
        let amount = extractor.amount();
        let vendor = extractor.vendor(&config);

        let full_text = self.get_text();
        let entry = assemble::assemble(&full_text, amount, vendor, &config);

        serde_wasm_bindgen::to_value(&entry).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl Default for OcrResultJs {
    fn default() -> Self {
        Self::new()
    }
}
