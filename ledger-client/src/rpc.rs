//! JSON-RPC ledger client
//!
//! Speaks JSON-RPC 2.0 to a network endpoint:
//! - `tx_submitBatch`: atomic multi-call transfer transaction
//! - `tx_getConfirmations`: confirmation status polling
//! - `token_balanceOf`: balance query
//!
//! Confirmation waiting is a polling loop bounded by an overall timeout.

use crate::client::LedgerClient;
use crate::crypto::SenderKey;
use crate::error::{ClientError, Result};
use crate::types::{Address, PendingTransaction, TokenAmount, TransferCall};
use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, info};

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);
const DEFAULT_CONFIRMATION_TIMEOUT: Duration = Duration::from_secs(300);

/// JSON-RPC 2.0 client for a ledger network endpoint
pub struct RpcLedgerClient {
    endpoint: String,
    token: String,
    key: SenderKey,
    http: reqwest::Client,
    request_id: AtomicU64,
    poll_interval: Duration,
    confirmation_timeout: Duration,
}

#[derive(Serialize)]
struct RpcRequest<'a, P: Serialize> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: P,
}

#[derive(Deserialize)]
struct RpcResponse {
    result: Option<serde_json::Value>,
    error: Option<RpcErrorObject>,
}

#[derive(Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

/// Signed submission envelope for `tx_submitBatch`
#[derive(Serialize)]
struct SubmitEnvelope<'a> {
    from: &'a Address,
    token: &'a str,
    calls: &'a [TransferCall],
    public_key: String,
    signature: String,
}

#[derive(Deserialize)]
struct SubmitResult {
    hash: String,
}

#[derive(Deserialize)]
struct ConfirmationStatus {
    confirmations: u64,
    status: String,
}

#[derive(Deserialize)]
struct BalanceResult {
    balance: String,
}

impl RpcLedgerClient {
    /// Create a client for an endpoint, token contract and sender key
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>, key: SenderKey) -> Self {
        Self {
            endpoint: endpoint.into(),
            token: token.into(),
            key,
            http: reqwest::Client::new(),
            request_id: AtomicU64::new(1),
            poll_interval: DEFAULT_POLL_INTERVAL,
            confirmation_timeout: DEFAULT_CONFIRMATION_TIMEOUT,
        }
    }

    /// Override confirmation polling cadence and overall timeout
    pub fn with_polling(mut self, interval: Duration, timeout: Duration) -> Self {
        self.poll_interval = interval;
        self.confirmation_timeout = timeout;
        self
    }

    async fn rpc_call<P: Serialize, R: for<'de> Deserialize<'de>>(
        &self,
        method: &str,
        params: P,
    ) -> Result<R> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: self.request_id.fetch_add(1, Ordering::Relaxed),
            method,
            params,
        };

        let response: RpcResponse = self
            .http
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if let Some(err) = response.error {
            return Err(ClientError::Rpc {
                code: err.code,
                message: err.message,
            });
        }

        let result = response.result.ok_or(ClientError::Rpc {
            code: -1,
            message: "response carried neither result nor error".to_string(),
        })?;

        serde_json::from_value(result).map_err(|e| ClientError::Rpc {
            code: -1,
            message: format!("malformed result for {}: {}", method, e),
        })
    }
}

#[async_trait]
impl LedgerClient for RpcLedgerClient {
    fn resolve_sender_address(&self) -> Address {
        self.key.address().clone()
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
            token: self.token.clone(),
        }
    }

    async fn submit(&self, calls: &[TransferCall]) -> Result<PendingTransaction> {
        if calls.is_empty() {
            return Err(ClientError::Submission(
                "refusing to submit an empty batch".to_string(),
            ));
        }

        let payload = serde_json::to_vec(calls)
            .map_err(|e| ClientError::Submission(format!("failed to encode calls: {}", e)))?;

        let envelope = SubmitEnvelope {
            from: self.key.address(),
            token: &self.token,
            calls,
            public_key: hex::encode(self.key.public_key()),
            signature: hex::encode(self.key.sign(&payload)),
        };

        info!(
            "Submitting batch transaction with {} transfer calls",
            calls.len()
        );

        let result: SubmitResult = self
            .rpc_call("tx_submitBatch", [envelope])
            .await
            .map_err(|e| match e {
                ClientError::Submission(_) => e,
                other => ClientError::Submission(other.to_string()),
            })?;

        Ok(PendingTransaction {
            transaction_hash: result.hash,
            accepted_at: Utc::now(),
        })
    }

    async fn await_confirmations(&self, transaction_hash: &str, depth: u64) -> Result<()> {
        let started = tokio::time::Instant::now();

        loop {
            if started.elapsed() > self.confirmation_timeout {
                return Err(ClientError::ConfirmationTimeout(
                    self.confirmation_timeout.as_secs(),
                ));
            }

            let status: ConfirmationStatus = self
                .rpc_call("tx_getConfirmations", [transaction_hash])
                .await
                .map_err(|e| ClientError::Confirmation(e.to_string()))?;

            match status.status.as_str() {
                "dropped" | "reverted" => {
                    return Err(ClientError::Confirmation(format!(
                        "transaction {} {}",
                        transaction_hash, status.status
                    )));
                }
                _ if status.confirmations >= depth => {
                    debug!(
                        "Transaction {} reached {} confirmations",
                        transaction_hash, status.confirmations
                    );
                    return Ok(());
                }
                _ => {
                    debug!(
                        "Transaction {} at {}/{} confirmations",
                        transaction_hash, status.confirmations, depth
                    );
                }
            }

            tokio::time::sleep(self.poll_interval).await;
        }
    }

    async fn token_balance(&self, address: &Address) -> Result<TokenAmount> {
        let result: BalanceResult = self
            .rpc_call("token_balanceOf", (&self.token, address))
            .await?;
        TokenAmount::parse(&result.balance)
    }
}
