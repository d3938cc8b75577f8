//! Scan command - extract a ledger entry from a receipt photo.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use rcpt_core::{LedgerEntry, ReceiptScanner, ScanProgress, ScanSession, TesseractCli};

use super::KindArg;
use crate::store::LedgerStore;

/// Arguments for the scan command.
#[derive(Args)]
pub struct ScanArgs {
    /// Receipt photo (JPEG or PNG)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Append the entry to the ledger
    #[arg(long)]
    save: bool,

    /// Entry kind recorded with --save
    #[arg(long, value_enum, default_value = "expense")]
    kind: KindArg,

    /// Skip the black-and-white preprocessing pass
    #[arg(long)]
    no_binarize: bool,

    /// Recognition language passed to tesseract
    #[arg(long, default_value = "eng")]
    lang: String,

    /// Tesseract binary to run
    #[arg(long)]
    tesseract: Option<PathBuf>,

    /// Tesseract page segmentation mode
    #[arg(long)]
    psm: Option<u8>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text summary
    Text,
    /// JSON output
    Json,
    /// CSV row
    Csv,
}

pub async fn run(
    args: ScanArgs,
    config_path: Option<&str>,
    ledger_path: Option<&Path>,
) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = super::load_config(config_path)?;
    if args.no_binarize {
        config.preprocess.binarize = false;
    }

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let extension = args
        .input
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    if !matches!(extension.as_str(), "jpg" | "jpeg" | "png") {
        anyhow::bail!("Unsupported file format: {} (expected jpg, jpeg, or png)", extension);
    }

    info!("Scanning receipt: {}", args.input.display());

    let bytes = fs::read(&args.input)?;
    let mut session = ScanSession::new(bytes)?;

    let mut engine = TesseractCli::new().with_language(&args.lang);
    if let Some(binary) = &args.tesseract {
        engine = engine.with_binary(binary);
    }
    if let Some(psm) = args.psm {
        engine = engine.with_psm(psm);
    }

    // Create progress bar
    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {msg}")
            .unwrap()
            .progress_chars("##-"),
    );

    let scanner = ReceiptScanner::with_config(config);
    let mut sink = |p: ScanProgress| {
        pb.set_position(p.percent as u64);
        pb.set_message(p.stage.label());
    };

    let extracted = match scanner.scan(&mut session, &engine, &mut sink) {
        Ok(entry) => entry,
        Err(err) => {
            pb.finish_and_clear();
            return Err(err.into());
        }
    };
    pb.finish_with_message("Done");

    let entry = extracted.into_ledger_entry(args.kind.into());

    // A draft full of defaults is still shown, but flag what to check
    // before it lands in the ledger.
    let issues = entry.validate();
    if !issues.is_empty() {
        eprintln!("{}", style("Review before saving:").yellow());
        for issue in &issues {
            eprintln!("  - {}", issue);
        }
    }

    let output = format_entry(&entry, args.format)?;
    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.save {
        let store = LedgerStore::new(ledger_path);
        let mut ledger = store.load()?;
        let id = ledger.add(entry);
        store.save(&ledger)?;
        println!(
            "{} Saved entry #{} to {}",
            style("✓").green(),
            id,
            store.path().display()
        );
    }

    debug!("Total scan time: {:?}", start.elapsed());

    Ok(())
}

fn format_entry(entry: &LedgerEntry, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(entry)?),
        OutputFormat::Csv => super::export::write_csv(std::slice::from_ref(entry)),
        OutputFormat::Text => Ok(format_text(entry)),
    }
}

fn format_text(entry: &LedgerEntry) -> String {
    let mut output = String::new();

    let vendor = if entry.vendor.is_empty() {
        "(not found)"
    } else {
        entry.vendor.as_str()
    };
    output.push_str(&format!("Vendor:      {}\n", vendor));
    output.push_str(&format!("Date:        {}\n", entry.date));
    output.push_str(&format!("Amount:      ${}\n", entry.amount));
    output.push_str(&format!("Category:    {}\n", entry.category));
    output.push_str(&format!("Description: {}\n", entry.description));
    if !entry.notes.is_empty() {
        output.push_str(&format!("Notes:       {}\n", entry.notes));
    }

    output
}
