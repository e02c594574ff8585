//! Completed-items ledger.
//!
//! A newline-delimited file of item ids with append-only semantics: once an
//! id is acknowledged it is never reprocessed. A missing file reads as an
//! empty ledger.

use std::collections::HashSet;
use std::io::Write;
use std::path::{Path, PathBuf};

/// The completion ledger backing `completed.txt`.
#[derive(Debug, Clone)]
pub struct CompletedLedger {
    path: PathBuf,
    completed: HashSet<String>,
}

impl CompletedLedger {
    /// Open the ledger at `path`, reading any ids already recorded.
    pub fn open(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let completed = if path.exists() {
            std::fs::read_to_string(&path)?
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect()
        } else {
            HashSet::new()
        };
        Ok(Self { path, completed })
    }

    /// Whether an item id has been acknowledged.
    pub fn contains(&self, id: &str) -> bool {
        self.completed.contains(id)
    }

    /// Acknowledge an item id, appending it to the ledger file.
    pub fn mark_completed(&mut self, id: &str) -> std::io::Result<()> {
        if self.completed.contains(id) {
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{id}")?;
        self.completed.insert(id.to_string());
        tracing::info!(item = %id, "Marked item as completed");
        Ok(())
    }

    /// Number of acknowledged ids.
    pub fn len(&self) -> usize {
        self.completed.len()
    }

    /// Whether the ledger is empty.
    pub fn is_empty(&self) -> bool {
        self.completed.is_empty()
    }
}
