//! Token distributor binary
//!
//! Runs one distribution end to end: load recipients, plan batches, hold the
//! pre-flight gate, execute, write the audit artifact.

use anyhow::Context;
use chrono::Utc;
use distributor::recipients::load_recipients;
use distributor::{plan, preflight, total_requested, Config, DistributionExecutor, RunSummary};
use ledger_client::{RpcLedgerClient, SenderKey};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Token distributor starting");

    dotenv::dotenv().ok();

    // Configuration file from the first argument, env/defaults otherwise
    let config = match std::env::args().nth(1) {
        Some(path) => Config::from_file(&path)
            .with_context(|| format!("loading configuration from {}", path))?,
        None => Config::from_env()?,
    };
    config.validate()?;

    // A missing signing credential is fatal before anything else happens
    let key = SenderKey::from_env().context("loading signing credential")?;
    info!("Sender address: {}", key.address());

    let client = Arc::new(
        RpcLedgerClient::new(
            &config.network.endpoint,
            &config.network.token_contract,
            key,
        )
        .with_polling(
            Duration::from_millis(config.network.poll_interval_ms),
            Duration::from_secs(config.network.confirmation_timeout_secs),
        ),
    );

    let transfers = load_recipients(&config.distribution_file, config.delimiter)?;
    let batches = plan(&transfers, config.batch.capacity)?;

    let run_id = Uuid::new_v4();
    let started_at = Utc::now();
    info!(
        "Run {}: {} transfers across {} batches (capacity {}, depth {})",
        run_id,
        transfers.len(),
        batches.len(),
        config.batch.capacity,
        config.batch.confirmation_depth
    );

    preflight::confirm_distribution(
        client.as_ref(),
        &transfers,
        Duration::from_secs(config.preflight.pause_secs),
    )
    .await?;

    let executor = DistributionExecutor::new(client, config.batch.confirmation_depth)?;
    let outcome = executor.execute(batches).await;

    let summary = RunSummary {
        run_id,
        started_at,
        recipient_count: transfers.len(),
        total_requested: total_requested(&transfers)?,
        total_recorded: outcome.ledger.total_recorded()?,
        completed_count: outcome.ledger.len(),
        failed_batches: outcome.failures.len(),
    };

    if let Err(e) = outcome.ledger.flush(&config.output_file) {
        // The record of successful transfers must survive a write failure
        error!("Could not write audit artifact: {}", e);
        outcome.ledger.log_entries();
        return Err(e.into());
    }

    info!("Run {} complete", summary.run_id);
    info!("  recipients:      {}", summary.recipient_count);
    info!("  total requested: {}", summary.total_requested);
    info!("  total recorded:  {}", summary.total_recorded);
    info!("  completed:       {}", summary.completed_count);
    if summary.failed_batches > 0 {
        warn!(
            "  failed batches:  {} (see the failure blocks above for manual reconciliation)",
            summary.failed_batches
        );
    }

    Ok(())
}
