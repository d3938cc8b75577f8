//! CLI subcommands.

pub mod add;
pub mod config;
pub mod export;
pub mod list;
pub mod scan;

use anyhow::Context;
use clap::ValueEnum;

use rcpt_core::{EntryKind, RcptConfig};

/// Entry kind as a command-line value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    /// Business expense
    Expense,
    /// Charitable donation
    Donation,
}

impl From<KindArg> for EntryKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Expense => EntryKind::Expense,
            KindArg::Donation => EntryKind::Donation,
        }
    }
}

/// Resolve configuration: an explicit path, then the per-user config
/// file if one exists, then compiled-in defaults.
pub(crate) fn load_config(path: Option<&str>) -> anyhow::Result<RcptConfig> {
    match path {
        Some(path) => RcptConfig::from_file(std::path::Path::new(path))
            .with_context(|| format!("failed to load config from {path}")),
        None => {
            let default = config::default_config_path();
            if default.exists() {
                RcptConfig::from_file(&default).with_context(|| {
                    format!("failed to load config from {}", default.display())
                })
            } else {
                Ok(RcptConfig::default())
            }
        }
    }
}
