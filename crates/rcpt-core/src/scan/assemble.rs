//! Combine layout and raw-text extraction into a draft entry.

use chrono::Local;
use rust_decimal::Decimal;
use tracing::debug;

use super::text;
use crate::models::config::ExtractionConfig;
use crate::models::entry::ExtractedEntry;

/// Build the draft entry from both extraction passes.
///
/// Layout results win when present; the raw-text pass fills the gaps.
/// Every field ends up populated so the caller always receives a
/// reviewable draft, never an error, however poor the scan.
pub fn assemble(
    full_text: &str,
    layout_amount: Option<Decimal>,
    layout_vendor: Option<String>,
    config: &ExtractionConfig,
) -> ExtractedEntry {
    let amount = layout_amount
        .or_else(|| text::extract_amount(full_text))
        .map(sanitize_amount)
        .unwrap_or_default();

    let vendor = layout_vendor
        .or_else(|| text::extract_vendor(full_text, config))
        .unwrap_or_default();

    let date = text::extract_date(full_text).unwrap_or_else(|| {
        debug!("no date recognized, defaulting to today");
        Local::now().date_naive()
    });

    let description = if vendor.is_empty() {
        "Scanned receipt".to_string()
    } else {
        format!("Purchase from {vendor}")
    };

    ExtractedEntry {
        amount,
        vendor,
        date,
        description,
        category: config.default_category.clone(),
        notes: "Extracted from receipt scan".to_string(),
    }
}

/// Entries never carry negative or sub-cent amounts.
fn sanitize_amount(amount: Decimal) -> Decimal {
    amount.max(Decimal::ZERO).round_dp(2)
}
