//! The ledger client boundary

use crate::error::Result;
use crate::types::{Address, PendingTransaction, TokenAmount, TransferCall};
use async_trait::async_trait;

/// Client capability against a ledger network
///
/// A batch of transfer calls submitted through [`submit`](Self::submit) lands
/// as ONE atomic transaction: either every call executes or none does.
/// Implementations must keep the sender identity fixed for the lifetime of
/// the client so account sequence numbers stay predictable.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// The sender identity used for every transfer call in a run
    fn resolve_sender_address(&self) -> Address;

    /// Build one transfer call for a recipient
    fn build_transfer_call(&self, from: &Address, to: &Address, amount: &TokenAmount)
        -> TransferCall;

    /// Submit all calls as a single atomic multi-call transaction
    async fn submit(&self, calls: &[TransferCall]) -> Result<PendingTransaction>;

    /// Block until the transaction is `depth` blocks deep
    ///
    /// Fails with [`ClientError::Confirmation`](crate::ClientError::Confirmation)
    /// if the transaction is dropped or reverted, or with
    /// [`ClientError::ConfirmationTimeout`](crate::ClientError::ConfirmationTimeout)
    /// if the depth is not reached in time.
    async fn await_confirmations(&self, transaction_hash: &str, depth: u64) -> Result<()>;

    /// Query the token balance of an account
    async fn token_balance(&self, address: &Address) -> Result<TokenAmount>;
}
