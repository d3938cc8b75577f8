//! Ledger persistence on disk.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::debug;

use rcpt_core::Ledger;

/// Where the ledger JSON lives and how it is read and written.
pub struct LedgerStore {
    path: PathBuf,
}

impl LedgerStore {
    /// Store at the given path, or at the per-user default location.
    pub fn new(path: Option<&Path>) -> Self {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(default_ledger_path);
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the ledger; a missing file is an empty ledger.
    pub fn load(&self) -> anyhow::Result<Ledger> {
        if !self.path.exists() {
            debug!("no ledger at {}, starting empty", self.path.display());
            return Ok(Ledger::new());
        }

        let data = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read ledger from {}", self.path.display()))?;
        let ledger = serde_json::from_str(&data)
            .with_context(|| format!("ledger at {} is not valid JSON", self.path.display()))?;
        Ok(ledger)
    }

    pub fn save(&self, ledger: &Ledger) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let data = serde_json::to_string_pretty(ledger)?;
        fs::write(&self.path, data)
            .with_context(|| format!("failed to write ledger to {}", self.path.display()))?;
        debug!("saved {} entries to {}", ledger.len(), self.path.display());
        Ok(())
    }
}

fn default_ledger_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("rcpt")
        .join("ledger.json")
}
