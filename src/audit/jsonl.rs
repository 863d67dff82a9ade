//! File-backed audit trail using JSONL format.
//!
//! Entries are stored as newline-delimited JSON for simplicity and easy
//! debugging/inspection. Appends take an exclusive file lock so that
//! writers from concurrent processes keep a total order.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;

use super::{AuditEntry, AuditTrail, ReadOrder};

/// Audit trail stored as an append-only JSONL file
pub struct JsonlTrail {
    path: PathBuf,
}

impl JsonlTrail {
    /// Create a trail handle for the given file path.
    ///
    /// The file is created lazily on the first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path to the underlying JSONL file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replay all entries in append order
    fn replay(&self) -> Result<Vec<AuditEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open audit file: {}", self.path.display()))?;

        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let entry: AuditEntry = serde_json::from_str(&line)
                .with_context(|| format!("Failed to parse audit entry: {}", line))?;
            entries.push(entry);
        }

        Ok(entries)
    }
}

impl AuditTrail for JsonlTrail {
    fn append(&self, entry: &AuditEntry) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create audit directory: {}", parent.display())
            })?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open audit file: {}", self.path.display()))?;

        // Exclusive lock keeps appends from interleaving; released on drop
        file.lock_exclusive()
            .context("Failed to acquire file lock on audit trail")?;

        let json = serde_json::to_string(entry).context("Failed to serialize audit entry")?;
        writeln!(file, "{}", json).context("Failed to write audit entry")?;
        file.flush().context("Failed to flush audit entry")?;

        Ok(())
    }

    fn read(&self, limit: usize, order: ReadOrder) -> Result<Vec<AuditEntry>> {
        let entries = self.replay()?;

        let selected = match order {
            ReadOrder::NewestFirst => entries.into_iter().rev().take(limit).collect(),
            ReadOrder::OldestFirst => entries.into_iter().take(limit).collect(),
        };

        Ok(selected)
    }
}
