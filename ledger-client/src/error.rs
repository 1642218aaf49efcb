//! Error types for the ledger client

use thiserror::Error;

/// Result type for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Ledger client errors
#[derive(Error, Debug)]
pub enum ClientError {
    /// Transaction rejected at submission
    #[error("Submission error: {0}")]
    Submission(String),

    /// Transaction dropped or reverted while awaiting confirmations
    #[error("Confirmation error: {0}")]
    Confirmation(String),

    /// Confirmation depth not reached within the allotted time
    #[error("Confirmation timeout after {0}s")]
    ConfirmationTimeout(u64),

    /// Error object returned by the RPC endpoint
    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// HTTP transport error
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// Signing key missing or malformed
    #[error("Invalid signing key: {0}")]
    InvalidKey(String),

    /// Address failed validation
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Amount failed validation
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
}
