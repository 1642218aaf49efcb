//! Result ledger
//!
//! Append-only record of completed transfers for one run, and the writer of
//! the run's audit artifact. Entries are never rewritten or removed once
//! appended; the artifact fully replaces any prior file so stale rows from an
//! earlier run can never mix with new ones.

use crate::error::{Error, Result};
use crate::types::{CompletedTransfer, TokenAmount};
use std::path::Path;
use tracing::{info, warn};

/// Audit artifact header row
const HEADER: [&str; 3] = ["recipient", "amount", "transaction_hash"];

/// Append-only ledger of completed transfers
#[derive(Debug, Default)]
pub struct ResultLedger {
    entries: Vec<CompletedTransfer>,
}

impl ResultLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Append entries in production order (batch order, then within-batch order)
    pub fn record(&mut self, entries: impl IntoIterator<Item = CompletedTransfer>) {
        self.entries.extend(entries);
    }

    /// Recorded entries, in append order
    pub fn entries(&self) -> &[CompletedTransfer] {
        &self.entries
    }

    /// Number of recorded entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact sum of all recorded amounts
    pub fn total_recorded(&self) -> Result<TokenAmount> {
        TokenAmount::checked_sum(self.entries.iter().map(|e| &e.amount))
            .ok_or_else(|| Error::Overflow("total recorded amount".to_string()))
    }

    /// Write the audit artifact, replacing any existing file
    ///
    /// Idempotent: flushing again with no new entries produces a
    /// byte-identical file.
    pub fn flush(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut writer = csv::Writer::from_path(path)?;

        writer.write_record(HEADER)?;
        for entry in &self.entries {
            writer.write_record([
                entry.recipient.as_str(),
                entry.amount.to_string().as_str(),
                entry.transaction_hash.as_str(),
            ])?;
        }
        writer.flush()?;

        info!(
            "Wrote {} completed transfers to {}",
            self.entries.len(),
            path.display()
        );

        Ok(())
    }

    /// Dump every entry to the log
    ///
    /// Last-resort reporting path when the artifact cannot be written, so the
    /// run's successful transfers are never silently lost.
    pub fn log_entries(&self) {
        warn!(
            "Audit artifact unavailable; dumping {} recorded transfers",
            self.entries.len()
        );
        for entry in &self.entries {
            warn!(
                "recorded: {} {} {}",
                entry.recipient, entry.amount, entry.transaction_hash
            );
        }
    }
}
