//! Config command - inspect and create the configuration file.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use console::style;

use rcpt_core::RcptConfig;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print the configuration the other commands run with
    Show,

    /// Write a config file populated with the defaults
    Init(InitArgs),

    /// Print the config file location and whether it exists
    Path,
}

#[derive(Args)]
struct InitArgs {
    /// Where to write the file (default: the per-user location)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Overwrite an existing file
    #[arg(long)]
    force: bool,
}

pub async fn run(args: ConfigArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    // The global -c flag points this command at the same file the other
    // subcommands would load.
    let active = config_path
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path);

    match args.command {
        ConfigCommand::Show => show(&active),
        ConfigCommand::Init(init) => write_defaults(init),
        ConfigCommand::Path => describe(&active, config_path.is_none()),
    }
}

pub(crate) fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("rcpt")
        .join("config.json")
}

fn show(path: &Path) -> anyhow::Result<()> {
    let config = if path.exists() {
        println!("{} Using {}", style("ℹ").blue(), path.display());
        RcptConfig::from_file(path)?
    } else {
        println!(
            "{} No config file at {}, showing defaults.",
            style("ℹ").blue(),
            path.display()
        );
        RcptConfig::default()
    };

    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

fn write_defaults(args: InitArgs) -> anyhow::Result<()> {
    let path = args.output.unwrap_or_else(default_config_path);

    if path.exists() && !args.force {
        anyhow::bail!(
            "{} already exists; pass --force to overwrite it",
            path.display()
        );
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    RcptConfig::default().save(&path)?;
    println!(
        "{} Wrote default configuration to {}",
        style("✓").green(),
        path.display()
    );
    Ok(())
}

fn describe(path: &Path, is_default: bool) -> anyhow::Result<()> {
    let status = if path.exists() {
        style("exists").green()
    } else {
        style("not created").yellow()
    };
    println!("{} ({})", path.display(), status);

    if !path.exists() && is_default {
        println!("Run 'rcpt config init' to create it.");
    }
    Ok(())
}
