//! Layout-based field extraction over word/line geometry.
//!
//! Receipts put the grand total and the store name in predictable
//! visual zones. Working from word positions avoids the classic regex
//! failure of grabbing a subtotal or tax figure instead of the total.

use std::collections::{HashMap, HashSet};

use rust_decimal::Decimal;
use tracing::debug;

use rcpt_ocr::{OcrWord, RawOcrResult};

use super::text::parse_money;
use crate::models::config::ExtractionConfig;

/// Phrases marking a grand-total line.
const ANCHOR_PHRASES: [&str; 7] = [
    "TOTAL",
    "AMOUNT DUE",
    "BALANCE DUE",
    "GRAND TOTAL",
    "TOTAL DUE",
    "AMOUNT PAYABLE",
    "AMOUNT DUE NOW",
];

/// The individual words those phrases are built from, for word-level
/// matching within an anchor line.
const ANCHOR_TOKENS: [&str; 7] = [
    "TOTAL", "AMOUNT", "DUE", "BALANCE", "GRAND", "PAYABLE", "NOW",
];

/// Lines containing these are never vendor candidates.
const VENDOR_STOPWORDS: [&str; 10] = [
    "INVOICE",
    "TAX INVOICE",
    "STATEMENT",
    "RECEIPT",
    "SALES RECEIPT",
    "BILL",
    "ESTIMATE",
    "QUOTE",
    "ORDER",
    "PURCHASE ORDER",
];

/// Field extractor over recognized geometry.
///
/// Construction performs the grouping pass once: every word is bucketed
/// under its line id and sorted left to right. Words whose line id
/// matches no recognized line take no part in layout reasoning (they
/// still reach the raw-text fallback through `full_text`).
pub struct LayoutExtractor<'a> {
    ocr: &'a RawOcrResult,
    words_by_line: HashMap<u32, Vec<&'a OcrWord>>,
}

impl<'a> LayoutExtractor<'a> {
    pub fn new(ocr: &'a RawOcrResult) -> Self {
        let line_ids: HashSet<u32> = ocr.lines.iter().map(|l| l.id).collect();
        let mut words_by_line: HashMap<u32, Vec<&OcrWord>> = HashMap::new();
        for word in &ocr.words {
            if line_ids.contains(&word.line_id) {
                words_by_line.entry(word.line_id).or_default().push(word);
            }
        }
        for words in words_by_line.values_mut() {
            words.sort_by(|a, b| a.bbox.x0.total_cmp(&b.bbox.x0));
        }

        Self { ocr, words_by_line }
    }

    fn line_words(&self, id: u32) -> &[&'a OcrWord] {
        self.words_by_line.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Locate the receipt total.
    ///
    /// Anchor-labelled lines are scanned top to bottom. For each, the
    /// value is looked for to the right of the label on the same line,
    /// then anywhere on the immediately following line; an anchor line
    /// that yields nothing does not stop the scan. With no anchored hit
    /// anywhere, the largest money value on the page wins. Returns
    /// `None` when the page carries no money value at all.
    pub fn amount(&self) -> Option<Decimal> {
        for (idx, line) in self.ocr.lines.iter().enumerate() {
            if !is_anchor_line(&line.text) {
                continue;
            }

            let words = self.line_words(line.id);
            let anchor_edge = words
                .iter()
                .filter(|w| is_anchor_word(&w.text))
                .map(|w| w.bbox.x1)
                .fold(f32::NEG_INFINITY, f32::max);
            if !anchor_edge.is_finite() {
                continue;
            }

            let same_line = words
                .iter()
                .filter(|w| w.bbox.x0 > anchor_edge)
                .find_map(|w| parse_money(&w.text));
            if let Some(value) = same_line {
                debug!("anchored amount {} on line {}", value, line.id);
                return Some(value);
            }

            if let Some(next) = self.ocr.lines.get(idx + 1) {
                let stacked = self
                    .line_words(next.id)
                    .iter()
                    .find_map(|w| parse_money(&w.text));
                if let Some(value) = stacked {
                    debug!("stacked amount {} under line {}", value, line.id);
                    return Some(value);
                }
            }
        }

        let largest = self
            .words_by_line
            .values()
            .flatten()
            .filter_map(|w| parse_money(&w.text))
            .max();
        if let Some(value) = &largest {
            debug!("falling back to largest money value {}", value);
        }
        largest
    }

    /// Locate the vendor name in the top band of the page.
    ///
    /// Candidate lines start within the configured top fraction of the
    /// page and must look like a name: some uppercase content, no
    /// prices, no document-type stopwords, sane length. The tallest
    /// candidate wins on the logic that store names are set in the
    /// largest type; ties go to the shorter text.
    pub fn vendor(&self, config: &ExtractionConfig) -> Option<String> {
        let page_height = self
            .ocr
            .lines
            .iter()
            .map(|l| l.bbox.y1)
            .fold(f32::NEG_INFINITY, f32::max);
        if !page_height.is_finite() || page_height <= 0.0 {
            return None;
        }
        let band = page_height * config.top_band_ratio;

        let mut best: Option<(f32, usize, &str)> = None;
        for line in &self.ocr.lines {
            if line.bbox.y0 > band {
                continue;
            }
            let text = line.text.trim();
            if !is_vendor_candidate(text, config) {
                continue;
            }

            let height = line.bbox.height().max(1.0);
            let len = text.chars().count();
            let replace = match &best {
                None => true,
                Some((best_height, best_len, _)) => {
                    match height.total_cmp(best_height) {
                        std::cmp::Ordering::Greater => true,
                        std::cmp::Ordering::Equal => len < *best_len,
                        std::cmp::Ordering::Less => false,
                    }
                }
            };
            if replace {
                best = Some((height, len, text));
            }
        }

        best.map(|(_, _, text)| text.to_string())
    }
}

fn is_anchor_line(text: &str) -> bool {
    let upper = text.to_uppercase();
    ANCHOR_PHRASES.iter().any(|phrase| upper.contains(phrase))
}

/// Word-level anchor check. Tokens are compared on their alphanumeric
/// content so trailing punctuation ("TOTAL:") does not hide the label.
fn is_anchor_word(text: &str) -> bool {
    let normalized: String = text
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect::<String>()
        .to_uppercase();
    if normalized.is_empty() {
        return false;
    }
    ANCHOR_TOKENS.iter().any(|token| normalized.contains(token))
}

fn is_vendor_candidate(text: &str, config: &ExtractionConfig) -> bool {
    if !text.chars().any(|c| c.is_ascii_uppercase()) {
        return false;
    }
    if super::patterns::PRICE_HINT.is_match(text) {
        return false;
    }
    let upper = text.to_uppercase();
    if VENDOR_STOPWORDS.iter().any(|stop| upper.contains(stop)) {
        return false;
    }
    let len = text.chars().count();
    len >= config.vendor_min_len && len <= config.vendor_max_len
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rcpt_ocr::{BoundingBox, OcrLine};
    use std::str::FromStr;

    fn line(id: u32, y0: f32, y1: f32, text: &str) -> OcrLine {
        OcrLine {
            id,
            bbox: BoundingBox::new(0.0, y0, 600.0, y1),
            text: text.to_string(),
        }
    }

    fn word(line_id: u32, x0: f32, x1: f32, text: &str) -> OcrWord {
        OcrWord {
            line_id,
            bbox: BoundingBox::new(x0, 0.0, x1, 20.0),
            text: text.to_string(),
            confidence: 0.9,
        }
    }

    fn ocr(lines: Vec<OcrLine>, words: Vec<OcrWord>) -> RawOcrResult {
        let full_text = lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        RawOcrResult {
            full_text,
            lines,
            words,
        }
    }

    fn money(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn amount_right_of_anchor_on_same_line() {
        let result = ocr(
            vec![
                line(0, 0.0, 30.0, "CORNER CAFE"),
                line(1, 400.0, 430.0, "TOTAL $45.67"),
            ],
            vec![
                word(0, 10.0, 150.0, "CORNER"),
                word(0, 160.0, 250.0, "CAFE"),
                word(1, 10.0, 120.0, "TOTAL"),
                word(1, 400.0, 500.0, "$45.67"),
            ],
        );

        let extractor = LayoutExtractor::new(&result);
        assert_eq!(extractor.amount(), Some(money("45.67")));
    }

    #[test]
    fn amount_stacked_on_the_following_line() {
        let result = ocr(
            vec![
                line(0, 300.0, 330.0, "AMOUNT DUE"),
                line(1, 340.0, 370.0, "$120.00"),
            ],
            vec![
                word(0, 10.0, 120.0, "AMOUNT"),
                word(0, 130.0, 190.0, "DUE"),
                word(1, 400.0, 500.0, "$120.00"),
            ],
        );

        let extractor = LayoutExtractor::new(&result);
        assert_eq!(extractor.amount(), Some(money("120.00")));
    }

    #[test]
    fn barren_anchor_does_not_stop_the_scan() {
        // The first TOTAL line has no value on it or under it; the
        // second one carries the amount.
        let result = ocr(
            vec![
                line(0, 100.0, 130.0, "TOTAL SAVINGS"),
                line(1, 140.0, 170.0, "thank you"),
                line(2, 400.0, 430.0, "TOTAL $33.10"),
            ],
            vec![
                word(0, 10.0, 120.0, "TOTAL"),
                word(0, 130.0, 280.0, "SAVINGS"),
                word(1, 10.0, 150.0, "thank"),
                word(1, 160.0, 220.0, "you"),
                word(2, 10.0, 120.0, "TOTAL"),
                word(2, 400.0, 500.0, "$33.10"),
            ],
        );

        let extractor = LayoutExtractor::new(&result);
        assert_eq!(extractor.amount(), Some(money("33.10")));
    }

    #[test]
    fn no_anchor_falls_back_to_largest_value() {
        let result = ocr(
            vec![
                line(0, 0.0, 30.0, "MILK 3.49"),
                line(1, 40.0, 70.0, "BREAD 4.99"),
                line(2, 80.0, 110.0, "12.48"),
            ],
            vec![
                word(0, 10.0, 100.0, "MILK"),
                word(0, 400.0, 460.0, "3.49"),
                word(1, 10.0, 110.0, "BREAD"),
                word(1, 400.0, 460.0, "4.99"),
                word(2, 400.0, 470.0, "12.48"),
            ],
        );

        let extractor = LayoutExtractor::new(&result);
        assert_eq!(extractor.amount(), Some(money("12.48")));
    }

    #[test]
    fn largest_value_fallback_can_pick_a_non_total_figure() {
        // Known heuristic limitation: with no anchor, a handwritten tip
        // annotation or tendered-cash figure larger than the charge wins.
        let result = ocr(
            vec![
                line(0, 0.0, 30.0, "CHARGE 23.45"),
                line(1, 40.0, 70.0, "CASH 50.00"),
            ],
            vec![
                word(0, 10.0, 110.0, "CHARGE"),
                word(0, 400.0, 460.0, "23.45"),
                word(1, 10.0, 80.0, "CASH"),
                word(1, 400.0, 460.0, "50.00"),
            ],
        );

        let extractor = LayoutExtractor::new(&result);
        assert_eq!(extractor.amount(), Some(money("50.00")));
    }

    #[test]
    fn words_left_of_the_anchor_label_are_ignored() {
        // A line-item price printed left of the TOTAL token must not be
        // mistaken for the total.
        let result = ocr(
            vec![line(0, 0.0, 30.0, "2.00 TOTAL $9.00")],
            vec![
                word(0, 10.0, 70.0, "2.00"),
                word(0, 100.0, 200.0, "TOTAL"),
                word(0, 300.0, 380.0, "$9.00"),
            ],
        );

        let extractor = LayoutExtractor::new(&result);
        assert_eq!(extractor.amount(), Some(money("9.00")));
    }

    #[test]
    fn unsorted_words_are_ordered_before_reasoning() {
        // Words arrive shuffled; grouping must sort them by x before
        // the left-to-right search.
        let result = ocr(
            vec![line(0, 0.0, 30.0, "TOTAL 8.00 12.00")],
            vec![
                word(0, 450.0, 520.0, "12.00"),
                word(0, 10.0, 120.0, "TOTAL"),
                word(0, 200.0, 280.0, "8.00"),
            ],
        );

        let extractor = LayoutExtractor::new(&result);
        assert_eq!(extractor.amount(), Some(money("8.00")));
    }

    #[test]
    fn orphan_words_are_invisible_to_layout() {
        // A stray word with an unknown line id must not win the
        // largest-value fallback.
        let result = ocr(
            vec![line(0, 0.0, 30.0, "COFFEE 4.50")],
            vec![
                word(0, 10.0, 110.0, "COFFEE"),
                word(0, 400.0, 460.0, "4.50"),
                word(99, 400.0, 460.0, "999.99"),
            ],
        );

        let extractor = LayoutExtractor::new(&result);
        assert_eq!(extractor.amount(), Some(money("4.50")));
    }

    #[test]
    fn empty_page_has_no_amount_or_vendor() {
        let result = RawOcrResult::default();
        let extractor = LayoutExtractor::new(&result);
        assert_eq!(extractor.amount(), None);
        assert_eq!(extractor.vendor(&ExtractionConfig::default()), None);
    }

    #[test]
    fn vendor_is_tallest_top_band_line() {
        let result = ocr(
            vec![
                OcrLine {
                    id: 0,
                    bbox: BoundingBox::new(0.0, 10.0, 400.0, 60.0),
                    text: "BIG MART".to_string(),
                },
                OcrLine {
                    id: 1,
                    bbox: BoundingBox::new(0.0, 70.0, 400.0, 90.0),
                    text: "123 Main Street Anytown".to_string(),
                },
                OcrLine {
                    id: 2,
                    bbox: BoundingBox::new(0.0, 900.0, 400.0, 1000.0),
                    text: "HUGE FOOTER".to_string(),
                },
            ],
            Vec::new(),
        );

        let extractor = LayoutExtractor::new(&result);
        assert_eq!(
            extractor.vendor(&ExtractionConfig::default()),
            Some("BIG MART".to_string())
        );
    }

    #[test]
    fn vendor_ties_break_to_shorter_text() {
        let result = ocr(
            vec![
                OcrLine {
                    id: 0,
                    bbox: BoundingBox::new(0.0, 10.0, 400.0, 40.0),
                    text: "SPROCKET COMPANY OF AMERICA".to_string(),
                },
                OcrLine {
                    id: 1,
                    bbox: BoundingBox::new(0.0, 50.0, 400.0, 80.0),
                    text: "SPROCKET CO".to_string(),
                },
                OcrLine {
                    id: 2,
                    bbox: BoundingBox::new(0.0, 900.0, 400.0, 1000.0),
                    text: "thank you for shopping".to_string(),
                },
            ],
            Vec::new(),
        );

        let extractor = LayoutExtractor::new(&result);
        assert_eq!(
            extractor.vendor(&ExtractionConfig::default()),
            Some("SPROCKET CO".to_string())
        );
    }

    #[test]
    fn vendor_rejects_stopwords_prices_and_casing() {
        let config = ExtractionConfig::default();
        let result = ocr(
            vec![
                OcrLine {
                    id: 0,
                    bbox: BoundingBox::new(0.0, 0.0, 400.0, 50.0),
                    text: "SALES RECEIPT".to_string(),
                },
                OcrLine {
                    id: 1,
                    bbox: BoundingBox::new(0.0, 60.0, 400.0, 100.0),
                    text: "$5 FOOTLONG DEALS".to_string(),
                },
                OcrLine {
                    id: 2,
                    bbox: BoundingBox::new(0.0, 110.0, 400.0, 150.0),
                    text: "no capitals here".to_string(),
                },
                OcrLine {
                    id: 3,
                    bbox: BoundingBox::new(0.0, 160.0, 400.0, 180.0),
                    text: "AJ COFFEE ROASTERS".to_string(),
                },
                OcrLine {
                    id: 4,
                    bbox: BoundingBox::new(0.0, 190.0, 400.0, 220.0),
                    text: "AB".to_string(),
                },
                OcrLine {
                    id: 5,
                    bbox: BoundingBox::new(0.0, 900.0, 400.0, 1000.0),
                    text: "thank you for shopping".to_string(),
                },
            ],
            Vec::new(),
        );

        let extractor = LayoutExtractor::new(&result);
        assert_eq!(
            extractor.vendor(&config),
            Some("AJ COFFEE ROASTERS".to_string())
        );
    }
}
