//! Core types for the distribution pipeline

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use ledger_client::types::{Address, TokenAmount};

/// One recipient/amount instruction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transfer {
    /// Receiving account
    pub recipient: Address,

    /// Base units to move
    pub amount: TokenAmount,
}

/// A contiguous group of transfers submitted as one atomic transaction
///
/// Immutable once planned: batches partition the recipient list exactly,
/// preserving original order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Batch {
    /// 0-based position in the planned sequence
    pub index: usize,

    /// Transfers in original relative order; never empty
    pub transfers: Vec<Transfer>,
}

impl Batch {
    /// Number of transfers in the batch
    pub fn len(&self) -> usize {
        self.transfers.len()
    }

    /// True if the batch holds no transfers
    pub fn is_empty(&self) -> bool {
        self.transfers.is_empty()
    }
}

/// A batch transaction accepted by the network, before confirmation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmittedTransaction {
    /// The batch the transaction carries
    pub batch: Batch,

    /// Hash assigned by the network at acceptance
    pub transaction_hash: String,
}

impl SubmittedTransaction {
    /// Produce one completed-transfer entry per transfer, all sharing the
    /// batch's transaction hash, in within-batch order
    pub fn into_completed(self) -> Vec<CompletedTransfer> {
        let hash = self.transaction_hash;
        self.batch
            .transfers
            .into_iter()
            .map(|t| CompletedTransfer {
                recipient: t.recipient,
                amount: t.amount,
                transaction_hash: hash.clone(),
            })
            .collect()
    }
}

/// A transfer whose batch reached the required confirmation depth
///
/// Never mutated after creation; transfers in a failed batch never produce one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedTransfer {
    /// Receiving account
    pub recipient: Address,

    /// Base units moved
    pub amount: TokenAmount,

    /// Hash of the confirmed batch transaction
    pub transaction_hash: String,
}

/// Per-batch execution state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatchState {
    /// Planned, not yet touched
    Planned,
    /// Building calls and submitting the transaction
    Submitting,
    /// Accepted by the network
    Submitted,
    /// Awaiting the configured confirmation depth
    Confirming,
    /// Confirmation depth reached (success terminal)
    Confirmed,
    /// Failure terminal, reachable from any non-terminal state
    Failed,
}

impl std::fmt::Display for BatchState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BatchState::Planned => "PLANNED",
            BatchState::Submitting => "SUBMITTING",
            BatchState::Submitted => "SUBMITTED",
            BatchState::Confirming => "CONFIRMING",
            BatchState::Confirmed => "CONFIRMED",
            BatchState::Failed => "FAILED",
        };
        write!(f, "{}", s)
    }
}

/// Stage at which a batch failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureStage {
    /// Rejected at submission
    Submission,
    /// Dropped, reverted or timed out while confirming
    Confirmation,
}

impl std::fmt::Display for FailureStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureStage::Submission => write!(f, "submission"),
            FailureStage::Confirmation => write!(f, "confirmation"),
        }
    }
}

/// A failed batch, kept whole for manual reconciliation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchFailure {
    /// Index of the failed batch
    pub batch_index: usize,

    /// Full batch contents
    pub transfers: Vec<Transfer>,

    /// Stage that failed
    pub stage: FailureStage,

    /// Raw error detail
    pub error: String,
}

impl BatchFailure {
    /// Record a failure from a batch and the error that stopped it
    pub fn new(batch: Batch, stage: FailureStage, error: impl ToString) -> Self {
        Self {
            batch_index: batch.index,
            transfers: batch.transfers,
            stage,
            error: error.to_string(),
        }
    }
}

/// Figures for the pre-flight display and the end-of-run report; derived,
/// never persisted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// Run identifier
    pub run_id: Uuid,

    /// Run start timestamp
    pub started_at: DateTime<Utc>,

    /// Recipients in the input list
    pub recipient_count: usize,

    /// Exact sum of all requested amounts
    pub total_requested: TokenAmount,

    /// Exact sum of all recorded amounts
    pub total_recorded: TokenAmount,

    /// Completed transfers recorded
    pub completed_count: usize,

    /// Batches that failed
    pub failed_batches: usize,
}

/// Exact sum of the requested amounts; overflow is an error, never a wrap
pub fn total_requested(transfers: &[Transfer]) -> Result<TokenAmount> {
    TokenAmount::checked_sum(transfers.iter().map(|t| &t.amount))
        .ok_or_else(|| Error::Overflow("total requested amount".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transfer(addr: &str, amount: &str) -> Transfer {
        Transfer {
            recipient: Address::new(addr).unwrap(),
            amount: TokenAmount::parse(amount).unwrap(),
        }
    }

    #[test]
    fn test_submitted_transaction_fans_out() {
        let batch = Batch {
            index: 2,
            transfers: vec![transfer("0xaa", "100"), transfer("0xbb", "200")],
        };
        let submitted = SubmittedTransaction {
            batch,
            transaction_hash: "0xh1".to_string(),
        };

        let completed = submitted.into_completed();
        assert_eq!(completed.len(), 2);
        assert!(completed.iter().all(|c| c.transaction_hash == "0xh1"));
        assert_eq!(completed[0].recipient.as_str(), "0xaa");
        assert_eq!(completed[1].recipient.as_str(), "0xbb");
    }

    #[test]
    fn test_total_requested() {
        let transfers = vec![transfer("0xaa", "100"), transfer("0xbb", "250")];
        let total = total_requested(&transfers).unwrap();
        assert_eq!(total, TokenAmount::parse("350").unwrap());

        assert_eq!(total_requested(&[]).unwrap(), TokenAmount::ZERO);
    }

    #[test]
    fn test_batch_state_display() {
        assert_eq!(BatchState::Confirming.to_string(), "CONFIRMING");
        assert_eq!(BatchState::Failed.to_string(), "FAILED");
    }
}
