//! Recognition output: words, lines, and their geometry.

use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in image pixel coordinates.
///
/// `y` grows downward, so `y0` is the top edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Left edge.
    pub x0: f32,
    /// Top edge.
    pub y0: f32,
    /// Right edge.
    pub x1: f32,
    /// Bottom edge.
    pub y1: f32,
}

impl BoundingBox {
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }
}

/// A recognized word with its position and confidence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrWord {
    /// Id of the line this word belongs to. Words carrying an id that
    /// matches no line are ignored by layout reasoning.
    pub line_id: u32,

    /// Word bounding box.
    pub bbox: BoundingBox,

    /// Recognized text.
    pub text: String,

    /// Recognition confidence, 0.0 - 1.0.
    pub confidence: f32,
}

/// A recognized line of text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrLine {
    /// Line id, referenced by [`OcrWord::line_id`].
    pub id: u32,

    /// Line bounding box.
    pub bbox: BoundingBox,

    /// Line text (its words joined with spaces).
    pub text: String,
}

/// Result of text recognition on a receipt image.
///
/// Words are not presorted; consumers that care about reading order group
/// them by `line_id` and sort within each line themselves.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawOcrResult {
    /// All recognized text, lines joined with newlines.
    pub full_text: String,

    /// Recognized lines in document order.
    pub lines: Vec<OcrLine>,

    /// Recognized words, unordered.
    pub words: Vec<OcrWord>,
}

impl RawOcrResult {
    /// Build a text-only result with no geometry.
    ///
    /// Used by callers whose recognizer reports plain text, and in tests.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            full_text: text.into(),
            lines: Vec::new(),
            words: Vec::new(),
        }
    }

    /// True when recognition produced nothing usable.
    pub fn is_empty(&self) -> bool {
        self.full_text.trim().is_empty() && self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn bounding_box_dimensions() {
        let bbox = BoundingBox::new(10.0, 20.0, 110.0, 45.0);
        assert_eq!(bbox.width(), 100.0);
        assert_eq!(bbox.height(), 25.0);
    }

    #[test]
    fn text_only_result_has_no_geometry() {
        let result = RawOcrResult::from_text("CORNER CAFE\nTOTAL $4.50");
        assert_eq!(result.lines.len(), 0);
        assert_eq!(result.words.len(), 0);
        assert!(!result.is_empty());
    }

    #[test]
    fn whitespace_only_result_is_empty() {
        assert!(RawOcrResult::from_text("  \n\t ").is_empty());
        assert!(RawOcrResult::default().is_empty());
    }
}
