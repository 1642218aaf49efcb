//! Error types for the distribution pipeline

use thiserror::Error;

/// Result type for distribution operations
pub type Result<T> = std::result::Result<T, Error>;

/// Distribution errors
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Malformed record in the recipient list
    #[error("Invalid recipient record at line {line}: {reason}")]
    Recipients { line: u64, reason: String },

    /// Amount arithmetic overflow
    #[error("Amount overflow: {0}")]
    Overflow(String),

    /// Operator interrupt during the pre-flight pause
    #[error("Aborted by operator before submission")]
    Aborted,

    /// Ledger client error
    #[error("Ledger client error: {0}")]
    Client(#[from] ledger_client::ClientError),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
