//! Batch executor
//!
//! Drives each planned batch through its state machine, strictly one batch
//! at a time:
//!
//! ```text
//! PLANNED -> SUBMITTING -> SUBMITTED -> CONFIRMING -> CONFIRMED
//!                |              |            |
//!                +--------------+------------+-----> FAILED
//! ```
//!
//! All transfer calls of a batch go out as one atomic transaction under the
//! run's fixed sender identity. A failed batch is reported and skipped; it
//! never halts the batches behind it. Batch *i+1* is not submitted until
//! batch *i* reaches a terminal state, so the sender's account sequence
//! numbers stay predictable.

use crate::error::{Error, Result};
use crate::ledger::ResultLedger;
use crate::types::{
    Batch, BatchFailure, BatchState, CompletedTransfer, FailureStage, SubmittedTransaction,
};
use ledger_client::types::{Address, TransferCall};
use ledger_client::LedgerClient;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Outcome of a distribution run
#[derive(Debug)]
pub struct DistributionOutcome {
    /// Completed transfers across all confirmed batches
    pub ledger: ResultLedger,

    /// Batches that failed, kept whole for manual reconciliation
    pub failures: Vec<BatchFailure>,
}

/// Sequential batch executor
pub struct DistributionExecutor {
    client: Arc<dyn LedgerClient>,
    confirmation_depth: u64,
    /// Sender identity, resolved once for the whole run
    sender: Address,
}

impl DistributionExecutor {
    /// Create an executor for a client and confirmation depth
    pub fn new(client: Arc<dyn LedgerClient>, confirmation_depth: u64) -> Result<Self> {
        if confirmation_depth == 0 {
            return Err(Error::Config(
                "confirmation depth must be at least 1".to_string(),
            ));
        }

        let sender = client.resolve_sender_address();
        Ok(Self {
            client,
            confirmation_depth,
            sender,
        })
    }

    /// The sender identity used for every transfer call in this run
    pub fn sender(&self) -> &Address {
        &self.sender
    }

    /// Process all batches sequentially
    ///
    /// Never fails as a whole: per-batch errors are isolated into the
    /// outcome's failure list and execution continues with the next batch.
    pub async fn execute(&self, batches: Vec<Batch>) -> DistributionOutcome {
        let total = batches.len();
        let mut ledger = ResultLedger::new();
        let mut failures = Vec::new();

        for batch in batches {
            let index = batch.index;
            debug!(
                "Batch {} {}: {} transfers queued",
                index,
                BatchState::Planned,
                batch.len()
            );
            match self.run_batch(batch).await {
                Ok(completed) => {
                    info!(
                        "Batch {}/{} confirmed: {} transfers recorded",
                        index + 1,
                        total,
                        completed.len()
                    );
                    ledger.record(completed);
                }
                Err(failure) => {
                    report_failure(&failure);
                    failures.push(failure);
                }
            }
        }

        info!(
            "Distribution run finished: {} transfers recorded, {} of {} batches failed",
            ledger.len(),
            failures.len(),
            total
        );

        DistributionOutcome { ledger, failures }
    }

    /// Drive one batch to a terminal state
    async fn run_batch(
        &self,
        batch: Batch,
    ) -> std::result::Result<Vec<CompletedTransfer>, BatchFailure> {
        let mut state = BatchState::Submitting;
        debug!(
            "Batch {} {}: building {} transfer calls",
            batch.index,
            state,
            batch.len()
        );

        let calls: Vec<TransferCall> = batch
            .transfers
            .iter()
            .map(|t| {
                self.client
                    .build_transfer_call(&self.sender, &t.recipient, &t.amount)
            })
            .collect();

        let pending = match self.client.submit(&calls).await {
            Ok(pending) => pending,
            Err(e) => return Err(BatchFailure::new(batch, FailureStage::Submission, e)),
        };

        state = BatchState::Submitted;
        info!(
            "Batch {} {}: transaction {} accepted",
            batch.index, state, pending.transaction_hash
        );

        let submitted = SubmittedTransaction {
            batch,
            transaction_hash: pending.transaction_hash,
        };

        state = BatchState::Confirming;
        debug!(
            "Batch {} {}: awaiting {} confirmations",
            submitted.batch.index, state, self.confirmation_depth
        );

        if let Err(e) = self
            .client
            .await_confirmations(&submitted.transaction_hash, self.confirmation_depth)
            .await
        {
            return Err(BatchFailure::new(
                submitted.batch,
                FailureStage::Confirmation,
                e,
            ));
        }

        state = BatchState::Confirmed;
        debug!("Batch {} {}", submitted.batch.index, state);

        Ok(submitted.into_completed())
    }
}

/// Delimited failure block for manual reconciliation
fn report_failure(failure: &BatchFailure) {
    error!(
        "==================== BATCH {} FAILED ====================",
        failure.batch_index
    );
    error!("stage: {}", failure.stage);
    error!("error: {}", failure.error);
    error!("transfers in the failed batch:");
    for t in &failure.transfers {
        error!("  {} {}", t.recipient, t.amount);
    }
    error!("no entries were recorded for this batch; verify on the network before redistributing");
    error!("=========================================================");
}
