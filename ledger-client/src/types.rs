//! Wire types shared across client implementations

use crate::error::{ClientError, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Ledger account address
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address(String);

impl Address {
    /// Create a new address; surrounding whitespace is trimmed
    pub fn new(addr: impl Into<String>) -> Result<Self> {
        let addr = addr.into().trim().to_string();
        if addr.is_empty() {
            return Err(ClientError::InvalidAddress("empty address".to_string()));
        }
        Ok(Self(addr))
    }

    /// Get as string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Token quantity in base units
///
/// Always a non-negative integer; construction rejects negative or
/// fractional values and all arithmetic is checked. Serializes as a plain
/// decimal string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct TokenAmount(Decimal);

impl TokenAmount {
    /// Zero base units
    pub const ZERO: TokenAmount = TokenAmount(Decimal::ZERO);

    /// Parse from a decimal string (surrounding whitespace is trimmed)
    pub fn parse(s: &str) -> Result<Self> {
        let value = Decimal::from_str_exact(s.trim())
            .map_err(|e| ClientError::InvalidAmount(format!("{}: {}", s.trim(), e)))?;
        Self::from_decimal(value)
    }

    /// Validate a decimal as a token amount
    pub fn from_decimal(value: Decimal) -> Result<Self> {
        if value.is_sign_negative() {
            return Err(ClientError::InvalidAmount(format!(
                "negative amount: {}",
                value
            )));
        }
        if !value.is_integer() {
            return Err(ClientError::InvalidAmount(format!(
                "fractional base units: {}",
                value
            )));
        }
        Ok(Self(value.normalize()))
    }

    /// Checked addition; `None` on overflow
    pub fn checked_add(&self, other: &TokenAmount) -> Option<TokenAmount> {
        self.0.checked_add(other.0).map(TokenAmount)
    }

    /// Checked sum over a sequence of amounts; `None` on overflow
    pub fn checked_sum<'a>(amounts: impl IntoIterator<Item = &'a TokenAmount>) -> Option<TokenAmount> {
        amounts
            .into_iter()
            .try_fold(TokenAmount::ZERO, |acc, a| acc.checked_add(a))
    }

    /// Underlying decimal value
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for TokenAmount {
    type Error = ClientError;

    fn try_from(value: Decimal) -> Result<Self> {
        Self::from_decimal(value)
    }
}

impl From<TokenAmount> for Decimal {
    fn from(amount: TokenAmount) -> Self {
        amount.0
    }
}

impl std::fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One token transfer operation inside a batch transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferCall {
    /// Sending account (fixed for a run)
    pub from: Address,

    /// Receiving account
    pub to: Address,

    /// Base units to move
    pub amount: TokenAmount,

    /// Token/contract identifier
    pub token: String,
}

/// Transaction accepted by the network, not yet confirmed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingTransaction {
    /// Hash assigned by the network at acceptance
    pub transaction_hash: String,

    /// Acceptance timestamp
    pub accepted_at: DateTime<Utc>,
}
