//! Export command - write the ledger as CSV for record keeping.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use clap::Args;
use console::style;

use rcpt_core::LedgerEntry;

use crate::store::LedgerStore;

/// Arguments for the export command.
#[derive(Args)]
pub struct ExportArgs {
    /// Output file (default: business-records-<today>.csv)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub async fn run(args: ExportArgs, ledger_path: Option<&Path>) -> anyhow::Result<()> {
    let store = LedgerStore::new(ledger_path);
    let ledger = store.load()?;

    if ledger.is_empty() {
        anyhow::bail!("Nothing to export: {} has no entries", store.path().display());
    }

    // The ledger keeps newest first; exports read better chronologically.
    let mut entries: Vec<LedgerEntry> = ledger.entries().to_vec();
    entries.sort_by_key(|e| (e.date, e.id));

    let data = write_csv(&entries)?;

    let output_path = args.output.unwrap_or_else(default_export_path);
    fs::write(&output_path, data)?;

    println!(
        "{} Exported {} entries to {}",
        style("✓").green(),
        entries.len(),
        output_path.display()
    );

    Ok(())
}

/// Render entries as CSV rows under a fixed header.
pub(crate) fn write_csv(entries: &[LedgerEntry]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "Date",
        "Type",
        "Amount",
        "Category",
        "Description",
        "Vendor",
        "Notes",
    ])?;

    for entry in entries {
        wtr.write_record([
            entry.date.to_string().as_str(),
            entry.kind.label(),
            entry.amount.to_string().as_str(),
            entry.category.as_str(),
            entry.description.as_str(),
            entry.vendor.as_str(),
            entry.notes.as_str(),
        ])?;
    }

    Ok(String::from_utf8(wtr.into_inner()?)?)
}

fn default_export_path() -> PathBuf {
    PathBuf::from(format!(
        "business-records-{}.csv",
        Local::now().format("%Y-%m-%d")
    ))
}
