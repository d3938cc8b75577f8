//! CLI application for scanning receipts into ledger entries.

mod commands;
mod store;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{add, config, export, list, scan};

/// Receipt scanner - turn receipt photos into ledger entries
#[derive(Parser)]
#[command(name = "rcpt")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file to use instead of the per-user one
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Path to the ledger file
    #[arg(short, long, global = true)]
    ledger: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a receipt photo into a draft entry
    Scan(scan::ScanArgs),

    /// Record an entry by hand
    Add(add::AddArgs),

    /// List ledger entries and totals
    List(list::ListArgs),

    /// Export the ledger as CSV
    Export(export::ExportArgs),

    /// Inspect or create the configuration file
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Scan(args) => {
            scan::run(args, cli.config.as_deref(), cli.ledger.as_deref()).await
        }
        Commands::Add(args) => add::run(args, cli.ledger.as_deref()).await,
        Commands::List(args) => list::run(args, cli.ledger.as_deref()).await,
        Commands::Export(args) => export::run(args, cli.ledger.as_deref()).await,
        Commands::Config(args) => config::run(args, cli.config.as_deref()).await,
    }
}
