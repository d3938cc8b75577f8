//! Add command - record a ledger entry by hand.

use std::path::Path;

use chrono::{Local, NaiveDate};
use clap::Args;
use console::style;
use rust_decimal::Decimal;

use rcpt_core::LedgerEntry;

use super::KindArg;
use crate::store::LedgerStore;

/// Arguments for the add command.
#[derive(Args)]
pub struct AddArgs {
    /// Amount in dollars, e.g. 12.50
    #[arg(required = true)]
    amount: Decimal,

    /// Short description
    #[arg(required = true)]
    description: String,

    /// Entry kind
    #[arg(short, long, value_enum, default_value = "expense")]
    kind: KindArg,

    /// Category label
    #[arg(long, default_value = "Supplies")]
    category: String,

    /// Vendor or payee
    #[arg(long)]
    vendor: Option<String>,

    /// Transaction date (YYYY-MM-DD, default today)
    #[arg(short, long)]
    date: Option<NaiveDate>,

    /// Free-form notes
    #[arg(long)]
    notes: Option<String>,
}

pub async fn run(args: AddArgs, ledger_path: Option<&Path>) -> anyhow::Result<()> {
    let entry = LedgerEntry {
        id: 0,
        kind: args.kind.into(),
        date: args.date.unwrap_or_else(|| Local::now().date_naive()),
        amount: args.amount,
        category: args.category,
        description: args.description,
        vendor: args.vendor.unwrap_or_default(),
        notes: args.notes.unwrap_or_default(),
    };

    // Hand-entered records are held to the full rules; only scanned
    // drafts may carry placeholder values.
    let issues = entry.validate();
    if !issues.is_empty() {
        for issue in &issues {
            eprintln!("  - {}", issue);
        }
        anyhow::bail!("Entry is not valid");
    }

    let store = LedgerStore::new(ledger_path);
    let mut ledger = store.load()?;
    let id = ledger.add(entry);
    store.save(&ledger)?;

    println!(
        "{} Added entry #{} to {}",
        style("✓").green(),
        id,
        store.path().display()
    );

    Ok(())
}
