//! Text-pattern fallbacks over flat OCR text.
//!
//! Used when layout data is missing or the layout extractor came up
//! empty for a field. Dates always come from here.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

use super::patterns::{DATE_DASH_MDY, DATE_ISO, DATE_SLASH_MDY, MONEY, MONEY_EXACT};
use crate::models::config::ExtractionConfig;

/// Lines containing these never qualify as a fallback vendor.
const FALLBACK_VENDOR_STOPWORDS: [&str; 4] = ["INVOICE", "STATEMENT", "RECEIPT", "TOTAL"];

/// Parse a token as a monetary amount.
///
/// Accepts an optional `$` prefix and optional comma grouping, and
/// requires exactly two decimal digits; anything else is rejected. The
/// returned value always carries two fractional digits and is never
/// negative.
pub fn parse_money(s: &str) -> Option<Decimal> {
    if !MONEY_EXACT.is_match(s) {
        return None;
    }
    let cleaned: String = s.chars().filter(|c| *c != '$' && *c != ',').collect();
    Decimal::from_str(&cleaned).ok()
}

/// Last money-shaped substring in the text.
///
/// Totals tend to come after line items in reading order, so the final
/// occurrence is the best guess.
pub fn extract_amount(text: &str) -> Option<Decimal> {
    MONEY
        .find_iter(text)
        .last()
        .and_then(|m| parse_money(m.as_str()))
}

/// First plausible vendor among the leading text lines.
///
/// Inspects the first few non-empty lines and returns the first that is
/// longer than two characters, does not look like an amount (leading
/// digit or dollar sign), and carries none of the stopwords.
pub fn extract_vendor(text: &str, config: &ExtractionConfig) -> Option<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(config.fallback_vendor_lines)
        .find(|line| {
            if line.chars().count() <= 2 {
                return false;
            }
            if line.starts_with(|c: char| c.is_ascii_digit()) || line.starts_with('$') {
                return false;
            }
            let upper = line.to_uppercase();
            !FALLBACK_VENDOR_STOPWORDS
                .iter()
                .any(|stop| upper.contains(stop))
        })
        .map(str::to_string)
}

/// First recognizable date in the text.
///
/// Patterns are tried in priority order: slashed month/day/year, ISO,
/// dashed month/day/year. Each pattern contributes its first textual
/// match; a match that is not a valid calendar date falls through to the
/// next pattern.
pub fn extract_date(text: &str) -> Option<NaiveDate> {
    if let Some(caps) = DATE_SLASH_MDY.captures(text) {
        if let Some(date) = ymd(&caps[3], &caps[1], &caps[2]) {
            return Some(date);
        }
    }
    if let Some(caps) = DATE_ISO.captures(text) {
        if let Some(date) = ymd(&caps[1], &caps[2], &caps[3]) {
            return Some(date);
        }
    }
    if let Some(caps) = DATE_DASH_MDY.captures(text) {
        if let Some(date) = ymd(&caps[3], &caps[1], &caps[2]) {
            return Some(date);
        }
    }
    None
}

fn ymd(year: &str, month: &str, day: &str) -> Option<NaiveDate> {
    let year: i32 = year.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    let day: u32 = day.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}
