//! Ledger of expense and donation entries with per-kind totals.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::entry::{EntryKind, LedgerEntry};

/// Amount totals per entry kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerTotals {
    pub expenses: Decimal,
    pub donations: Decimal,
}

/// An ordered collection of ledger entries, newest first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ledger {
    entries: Vec<LedgerEntry>,
}

impl Ledger {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// All entries, newest first.
    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert an entry at the front, assigning the next free id.
    ///
    /// Ids are one past the current maximum, so they stay unique for the
    /// life of the ledger as long as the newest entries are the ones
    /// removed last.
    pub fn add(&mut self, mut entry: LedgerEntry) -> u64 {
        let id = self.entries.iter().map(|e| e.id).max().unwrap_or(0) + 1;
        entry.id = id;
        debug!("adding ledger entry {} ({})", id, entry.kind.as_str());
        self.entries.insert(0, entry);
        id
    }

    /// Replace the entry carrying the same id. Returns false when no
    /// such entry exists.
    pub fn update(&mut self, entry: LedgerEntry) -> bool {
        match self.entries.iter_mut().find(|e| e.id == entry.id) {
            Some(slot) => {
                *slot = entry;
                true
            }
            None => false,
        }
    }

    /// Remove an entry by id. Returns false when no such entry exists.
    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    pub fn get(&self, id: u64) -> Option<&LedgerEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Sum amounts per kind.
    pub fn totals(&self) -> LedgerTotals {
        let mut totals = LedgerTotals::default();
        for entry in &self.entries {
            match entry.kind {
                EntryKind::Expense => totals.expenses += entry.amount,
                EntryKind::Donation => totals.donations += entry.amount,
            }
        }
        totals
    }
}
