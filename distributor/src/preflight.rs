//! Pre-flight confirmation gate
//!
//! Human-in-the-loop safety control, not a resumable checkpoint: display the
//! run's totals and the sender balance, then hold for a configured pause so
//! the operator can abort before anything is submitted.

use crate::error::{Error, Result};
use crate::types::{total_requested, TokenAmount, Transfer};
use ledger_client::LedgerClient;
use std::time::Duration;
use tracing::{info, warn};

/// Figures shown to the operator before submission
#[derive(Debug, Clone)]
pub struct PreflightReport {
    /// Recipients in the input list
    pub recipient_count: usize,

    /// Exact sum of all requested amounts
    pub total_requested: TokenAmount,

    /// Sender balance at gate time, if the query succeeded
    pub sender_balance: Option<TokenAmount>,
}

/// Display run totals and hold for the configured pause
///
/// An interrupt during the pause aborts the run cleanly; nothing has been
/// submitted yet. The balance is display only, never an enforcement.
pub async fn confirm_distribution(
    client: &dyn LedgerClient,
    transfers: &[Transfer],
    pause: Duration,
) -> Result<PreflightReport> {
    let total = total_requested(transfers)?;
    let sender = client.resolve_sender_address();

    let sender_balance = match client.token_balance(&sender).await {
        Ok(balance) => Some(balance),
        Err(e) => {
            warn!("Could not fetch sender balance: {}", e);
            None
        }
    };

    info!(
        "About to distribute {} base units across {} recipients",
        total,
        transfers.len()
    );
    info!("Sender: {}", sender);
    if let Some(balance) = &sender_balance {
        info!("Sender token balance: {}", balance);
    }

    if pause > Duration::ZERO {
        info!(
            "Pausing {}s before submission; interrupt now to abort",
            pause.as_secs()
        );
        tokio::select! {
            _ = tokio::time::sleep(pause) => {}
            _ = tokio::signal::ctrl_c() => {
                warn!("Interrupt received during pre-flight pause");
                return Err(Error::Aborted);
            }
        }
    }

    Ok(PreflightReport {
        recipient_count: transfers.len(),
        total_requested: total,
        sender_balance,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Address;
    use ledger_client::MockLedgerClient;

    fn transfers(pairs: &[(&str, &str)]) -> Vec<Transfer> {
        pairs
            .iter()
            .map(|(addr, amount)| Transfer {
                recipient: Address::new(*addr).unwrap(),
                amount: TokenAmount::parse(amount).unwrap(),
            })
            .collect()
    }

    #[tokio::test]
    async fn test_report_totals() {
        let client = MockLedgerClient::new().with_balance(TokenAmount::parse("9000").unwrap());
        let transfers = transfers(&[
            ("0xA", "100"),
            ("0xB", "200"),
            ("0xC", "300"),
            ("0xD", "400"),
            ("0xE", "500"),
        ]);

        let report = confirm_distribution(&client, &transfers, Duration::ZERO)
            .await
            .unwrap();

        assert_eq!(report.recipient_count, 5);
        assert_eq!(report.total_requested, TokenAmount::parse("1500").unwrap());
        assert_eq!(report.sender_balance, Some(TokenAmount::parse("9000").unwrap()));
    }

    #[tokio::test]
    async fn test_empty_list_passes_gate() {
        let client = MockLedgerClient::new();
        let report = confirm_distribution(&client, &[], Duration::ZERO)
            .await
            .unwrap();

        assert_eq!(report.recipient_count, 0);
        assert_eq!(report.total_requested, TokenAmount::ZERO);
    }
}
