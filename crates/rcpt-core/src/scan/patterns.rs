//! Common regex patterns for receipt field extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Money: optional dollar sign, optional comma grouping, exactly two
    // decimal digits. The word boundaries keep it from matching inside
    // longer digit runs ("1234.567" yields nothing, not "234.56").
    pub static ref MONEY: Regex = Regex::new(
        r"\$?\b(?:\d{1,3}(?:,\d{3})+|\d+)\.\d{2}\b"
    ).unwrap();

    // Same shape, anchored: does this whole token parse as money?
    pub static ref MONEY_EXACT: Regex = Regex::new(
        r"^\$?(?:\d{1,3}(?:,\d{3})+|\d+)\.\d{2}$"
    ).unwrap();

    // Price-like content: a dollar sign immediately followed by a digit.
    pub static ref PRICE_HINT: Regex = Regex::new(
        r"\$\d"
    ).unwrap();

    // US month/day/year with slashes: 3/14/2026
    pub static ref DATE_SLASH_MDY: Regex = Regex::new(
        r"\b(\d{1,2})/(\d{1,2})/(\d{4})\b"
    ).unwrap();

    // ISO calendar date: 2026-03-14
    pub static ref DATE_ISO: Regex = Regex::new(
        r"\b(\d{4})-(\d{2})-(\d{2})\b"
    ).unwrap();

    // US month/day/year with dashes: 3-14-2026
    pub static ref DATE_DASH_MDY: Regex = Regex::new(
        r"\b(\d{1,2})-(\d{1,2})-(\d{4})\b"
    ).unwrap();
}
