//! Ledger network client
//!
//! Client capability for submitting batched token transfers to a remote
//! ledger network and waiting for them to reach a confirmation depth.
//!
//! # Architecture
//!
//! The crate exposes one seam, the [`LedgerClient`] trait:
//!
//! 1. **Build**: one transfer call per recipient
//! 2. **Submit**: all calls of a batch as a single atomic transaction
//! 3. **Confirm**: poll until the transaction is N blocks deep
//! 4. **Query**: token balance lookups for pre-flight display
//!
//! Two implementations ship with the crate: [`RpcLedgerClient`] speaks
//! JSON-RPC 2.0 to a network endpoint, [`MockLedgerClient`] runs in-memory
//! with scripted failures for tests.
//!
//! # Example
//!
//! ```no_run
//! use ledger_client::{LedgerClient, RpcLedgerClient, SenderKey};
//! use ledger_client::types::{Address, TokenAmount};
//!
//! #[tokio::main]
//! async fn main() -> ledger_client::Result<()> {
//!     let key = SenderKey::from_seed(&[7u8; 32]);
//!     let client = RpcLedgerClient::new("http://127.0.0.1:8545", "DRP", key);
//!
//!     let to = Address::new("0x92a1b2c3d4e5f60718293a4b5c6d7e8f90a1b2c3")?;
//!     let amount = TokenAmount::parse("1000")?;
//!     let call = client.build_transfer_call(&client.resolve_sender_address(), &to, &amount);
//!
//!     let pending = client.submit(&[call]).await?;
//!     client.await_confirmations(&pending.transaction_hash, 3).await?;
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms, unused_qualifications)]

pub mod client;
pub mod crypto;
pub mod error;
pub mod mock;
pub mod rpc;
pub mod types;

// Re-exports
pub use client::LedgerClient;
pub use crypto::SenderKey;
pub use error::{ClientError, Result};
pub use mock::MockLedgerClient;
pub use rpc::RpcLedgerClient;
pub use types::{Address, PendingTransaction, TokenAmount, TransferCall};
