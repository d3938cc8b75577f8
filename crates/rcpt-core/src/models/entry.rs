//! Ledger entry models for business expenses and donations.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Whether money went out as a purchase or a donation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Expense,
    Donation,
}

impl EntryKind {
    /// Stable identifier used in exports.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Expense => "expense",
            EntryKind::Donation => "donation",
        }
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            EntryKind::Expense => "Expense",
            EntryKind::Donation => "Donation",
        }
    }
}

impl Default for EntryKind {
    fn default() -> Self {
        Self::Expense
    }
}

impl std::str::FromStr for EntryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "expense" => Ok(EntryKind::Expense),
            "donation" => Ok(EntryKind::Donation),
            other => Err(format!("unknown entry kind: {other}")),
        }
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Entry fields extracted from a receipt scan.
///
/// Every field is always populated: extraction misses degrade to
/// defaults (zero amount, empty vendor, today's date) rather than
/// leaving holes for the caller to check. The caller pre-fills an
/// editable entry from this and lets the user correct it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedEntry {
    /// Receipt total. Zero when no amount was found.
    pub amount: Decimal,

    /// Vendor name. Empty when no vendor was found.
    pub vendor: String,

    /// Receipt date; today's date when none was recognized.
    pub date: NaiveDate,

    /// Prefilled description.
    pub description: String,

    /// Prefilled category.
    pub category: String,

    /// Provenance note marking the values as machine-extracted.
    pub notes: String,
}

impl ExtractedEntry {
    /// Turn the extraction into a ledger entry of the given kind.
    ///
    /// The returned entry has no id yet; [`crate::Ledger::add`] assigns
    /// one on insert.
    pub fn into_ledger_entry(self, kind: EntryKind) -> LedgerEntry {
        LedgerEntry {
            id: 0,
            kind,
            date: self.date,
            amount: self.amount,
            category: self.category,
            description: self.description,
            vendor: self.vendor,
            notes: self.notes,
        }
    }
}

/// A single row in the business ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Unique id, assigned by the ledger on insert.
    pub id: u64,

    /// Expense or donation.
    pub kind: EntryKind,

    /// Transaction date.
    pub date: NaiveDate,

    /// Amount in dollars.
    pub amount: Decimal,

    /// Category label.
    pub category: String,

    /// Short description.
    pub description: String,

    /// Vendor or payee.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub vendor: String,

    /// Free-form notes.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub notes: String,
}

impl LedgerEntry {
    /// Validate the entry and return any issues found.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.amount <= Decimal::ZERO {
            issues.push("Amount must be greater than zero".to_string());
        }

        if self.amount.scale() > 2 {
            issues.push("Amount has sub-cent precision".to_string());
        }

        if self.description.trim().is_empty() {
            issues.push("Missing description".to_string());
        }

        issues
    }
}
