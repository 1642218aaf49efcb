//! Token Distribution Rail
//!
//! Distributes a fungible token to a list of recipients by submitting
//! batched transfer transactions to a remote ledger network.
//!
//! # Architecture
//!
//! The pipeline runs in four stages:
//!
//! 1. **Load**: parse and validate the delimited recipient list
//! 2. **Plan**: partition the list into fixed-size contiguous batches
//! 3. **Execute**: one atomic multi-call transaction per batch, strictly
//!    sequential, awaiting the configured confirmation depth; a failed batch
//!    is reported and skipped, never halting the run
//! 4. **Record**: append-only result ledger flushed as the audit artifact
//!
//! A mandatory pre-flight pause sits between planning and execution so the
//! operator can abort before anything reaches the network.
//!
//! # Example
//!
//! ```no_run
//! use distributor::{plan, Config, DistributionExecutor};
//! use distributor::recipients::load_recipients;
//! use ledger_client::{RpcLedgerClient, SenderKey};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     config.validate()?;
//!
//!     let key = SenderKey::from_env()?;
//!     let client = Arc::new(RpcLedgerClient::new(
//!         &config.network.endpoint,
//!         &config.network.token_contract,
//!         key,
//!     ));
//!
//!     let transfers = load_recipients(&config.distribution_file, config.delimiter)?;
//!     let batches = plan(&transfers, config.batch.capacity)?;
//!
//!     let executor = DistributionExecutor::new(client, config.batch.confirmation_depth)?;
//!     let outcome = executor.execute(batches).await;
//!     outcome.ledger.flush(&config.output_file)?;
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms, unused_qualifications)]

pub mod config;
pub mod error;
pub mod executor;
pub mod ledger;
pub mod planner;
pub mod preflight;
pub mod recipients;
pub mod types;

// Re-exports
pub use config::Config;
pub use error::{Error, Result};
pub use executor::{DistributionExecutor, DistributionOutcome};
pub use ledger::ResultLedger;
pub use planner::plan;
pub use types::*;
