//! In-memory mock client for tests
//!
//! Records every submission attempt and supports scripted failures by
//! submission order, so executor behavior can be exercised without a network.

use crate::client::LedgerClient;
use crate::error::{ClientError, Result};
use crate::types::{Address, PendingTransaction, TokenAmount, TransferCall};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::info;

/// Mock ledger client with scripted failures
pub struct MockLedgerClient {
    sender: Address,
    latency: Duration,
    balance: TokenAmount,
    state: Arc<RwLock<MockState>>,
}

#[derive(Default)]
struct MockState {
    /// Calls of every submission attempt, in order (failed attempts included)
    submissions: Vec<Vec<TransferCall>>,
    /// Attempt indices that fail at submission
    fail_submission: HashSet<usize>,
    /// Attempt indices whose transaction fails confirmation
    fail_confirmation: HashSet<usize>,
    /// Accepted hash -> attempt index
    accepted: HashMap<String, usize>,
}

impl MockLedgerClient {
    /// Create a mock with zero latency and a large balance
    pub fn new() -> Self {
        Self {
            sender: Address::new("0x00112233445566778899aabbccddeeff00112233")
                .expect("static sender address"),
            latency: Duration::ZERO,
            balance: TokenAmount::parse("10000000").expect("static balance"),
            state: Arc::new(RwLock::new(MockState::default())),
        }
    }

    /// Simulate network latency on every call
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Balance reported for every account
    pub fn with_balance(mut self, balance: TokenAmount) -> Self {
        self.balance = balance;
        self
    }

    /// Script the `attempt`-th submission (0-based) to be rejected
    pub async fn fail_submission_at(&self, attempt: usize) {
        self.state.write().await.fail_submission.insert(attempt);
    }

    /// Script the `attempt`-th submission's transaction to revert during confirmation
    pub async fn fail_confirmation_at(&self, attempt: usize) {
        self.state.write().await.fail_confirmation.insert(attempt);
    }

    /// Number of submission attempts seen so far
    pub async fn submission_count(&self) -> usize {
        self.state.read().await.submissions.len()
    }

    /// Calls of every submission attempt, in order
    pub async fn submitted_calls(&self) -> Vec<Vec<TransferCall>> {
        self.state.read().await.submissions.clone()
    }

    /// The hash the mock assigns to the `attempt`-th submission
    pub fn hash_for_attempt(attempt: usize) -> String {
        format!("MOCK-TX-{:04}", attempt)
    }
}

impl Default for MockLedgerClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LedgerClient for MockLedgerClient {
    fn resolve_sender_address(&self) -> Address {
        self.sender.clone()
    }

    fn build_transfer_call(
        &self,
        from: &Address,
        to: &Address,
        amount: &TokenAmount,
    ) -> TransferCall {
        TransferCall {
            from: from.clone(),
            to: to.clone(),
            amount: *amount,
            token: "MOCK".to_string(),
        }
    }

    async fn submit(&self, calls: &[TransferCall]) -> Result<PendingTransaction> {
        tokio::time::sleep(self.latency).await;

        let mut state = self.state.write().await;
        let attempt = state.submissions.len();
        state.submissions.push(calls.to_vec());

        if state.fail_submission.contains(&attempt) {
            info!("Mock ledger: rejecting submission {}", attempt);
            return Err(ClientError::Submission(
                "simulated submission rejection".to_string(),
            ));
        }

        let hash = Self::hash_for_attempt(attempt);
        state.accepted.insert(hash.clone(), attempt);
        info!("Mock ledger: accepted {} with {} calls", hash, calls.len());

        Ok(PendingTransaction {
            transaction_hash: hash,
            accepted_at: Utc::now(),
        })
    }

    async fn await_confirmations(&self, transaction_hash: &str, _depth: u64) -> Result<()> {
        tokio::time::sleep(self.latency).await;

        let state = self.state.read().await;
        let attempt = state.accepted.get(transaction_hash).ok_or_else(|| {
            ClientError::Confirmation(format!("unknown transaction: {}", transaction_hash))
        })?;

        if state.fail_confirmation.contains(attempt) {
            return Err(ClientError::Confirmation(format!(
                "transaction {} reverted",
                transaction_hash
            )));
        }

        Ok(())
    }

    async fn token_balance(&self, _address: &Address) -> Result<TokenAmount> {
        tokio::time::sleep(self.latency).await;
        Ok(self.balance)
    }
}
