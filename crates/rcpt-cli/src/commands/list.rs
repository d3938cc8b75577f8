//! List command - show ledger entries and totals.

use std::path::Path;

use clap::Args;
use console::style;

use rcpt_core::EntryKind;

use super::KindArg;
use crate::store::LedgerStore;

/// Arguments for the list command.
#[derive(Args)]
pub struct ListArgs {
    /// Show at most this many entries
    #[arg(short = 'n', long)]
    limit: Option<usize>,

    /// Only show entries of this kind
    #[arg(long, value_enum)]
    kind: Option<KindArg>,
}

pub async fn run(args: ListArgs, ledger_path: Option<&Path>) -> anyhow::Result<()> {
    let store = LedgerStore::new(ledger_path);
    let ledger = store.load()?;

    if ledger.is_empty() {
        println!("No entries in {}", store.path().display());
        return Ok(());
    }

    let kind_filter: Option<EntryKind> = args.kind.map(EntryKind::from);
    let shown = ledger
        .entries()
        .iter()
        .filter(|e| kind_filter.map_or(true, |k| e.kind == k))
        .take(args.limit.unwrap_or(usize::MAX));

    for entry in shown {
        let vendor = if entry.vendor.is_empty() {
            String::new()
        } else {
            format!("  ({})", entry.vendor)
        };
        println!(
            "#{:<4} {}  {:<8} {:>10}  {:<14} {}{}",
            entry.id,
            entry.date,
            entry.kind.label(),
            format!("${}", entry.amount),
            entry.category,
            entry.description,
            vendor
        );
    }

    let totals = ledger.totals();
    println!();
    println!(
        "{} expenses ${}, donations ${}",
        style("Totals:").bold(),
        totals.expenses,
        totals.donations
    );

    Ok(())
}
