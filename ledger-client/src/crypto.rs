//! Sender key handling
//!
//! Ed25519 signing key for the distribution sender, loaded from the process
//! environment, with address derivation from the verifying key.

use crate::error::{ClientError, Result};
use crate::types::Address;
use ed25519_dalek::{Signer, SigningKey, VerifyingKey};
use sha2::{Digest, Sha256};

/// Environment variable holding the 32-byte hex seed
pub const SIGNING_KEY_ENV: &str = "DISTRIBUTOR_SIGNING_KEY";

/// Ed25519 signing key with its derived sender address
pub struct SenderKey {
    signing_key: SigningKey,
    address: Address,
}

impl std::fmt::Debug for SenderKey {
    // Key material stays out of logs
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SenderKey")
            .field("address", &self.address)
            .finish()
    }
}

impl SenderKey {
    /// Generate a new random key
    pub fn generate() -> Self {
        Self::from_seed(&rand::random::<[u8; 32]>())
    }

    /// Load from the `DISTRIBUTOR_SIGNING_KEY` environment variable
    ///
    /// A missing or malformed credential is a fatal startup error.
    pub fn from_env() -> Result<Self> {
        let seed = std::env::var(SIGNING_KEY_ENV)
            .map_err(|_| ClientError::InvalidKey(format!("{} not set", SIGNING_KEY_ENV)))?;
        Self::from_hex(&seed)
    }

    /// Create from a 64-character hex seed
    pub fn from_hex(seed_hex: &str) -> Result<Self> {
        let bytes = hex::decode(seed_hex.trim())
            .map_err(|e| ClientError::InvalidKey(format!("seed is not valid hex: {}", e)))?;
        let seed: [u8; 32] = bytes.try_into().map_err(|bytes: Vec<u8>| {
            ClientError::InvalidKey(format!("seed must be 32 bytes, got {}", bytes.len()))
        })?;
        Ok(Self::from_seed(&seed))
    }

    /// Create from seed (32 bytes) - deterministic
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        let signing_key = SigningKey::from_bytes(seed);
        let address = derive_address(&signing_key.verifying_key());

        Self {
            signing_key,
            address,
        }
    }

    /// Sender address derived from the verifying key
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Public key bytes
    pub fn public_key(&self) -> [u8; 32] {
        self.signing_key.verifying_key().to_bytes()
    }

    /// Sign a message
    pub fn sign(&self, message: &[u8]) -> [u8; 64] {
        self.signing_key.sign(message).to_bytes()
    }
}

/// Derive an address from a verifying key: first 20 bytes of
/// SHA-256(public key), hex encoded with a `0x` prefix
fn derive_address(key: &VerifyingKey) -> Address {
    let mut hasher = Sha256::new();
    hasher.update(key.to_bytes());
    let hash = hasher.finalize();

    // Address::new cannot fail on a non-empty hex string
    Address::new(format!("0x{}", hex::encode(&hash[..20])))
        .expect("derived address is non-empty")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_derivation_is_deterministic() {
        let a = SenderKey::from_seed(&[1u8; 32]);
        let b = SenderKey::from_seed(&[1u8; 32]);
        assert_eq!(a.address(), b.address());

        let c = SenderKey::from_seed(&[2u8; 32]);
        assert_ne!(a.address(), c.address());
    }

    #[test]
    fn test_address_format() {
        let key = SenderKey::from_seed(&[9u8; 32]);
        let addr = key.address().as_str();
        assert!(addr.starts_with("0x"));
        // 20 bytes hex encoded plus the prefix
        assert_eq!(addr.len(), 42);
    }

    #[test]
    fn test_from_hex_roundtrip() {
        let seed = [0xabu8; 32];
        let key = SenderKey::from_hex(&hex::encode(seed)).unwrap();
        assert_eq!(key.address(), SenderKey::from_seed(&seed).address());
    }

    #[test]
    fn test_from_hex_rejects_bad_input() {
        assert!(SenderKey::from_hex("not hex").is_err());
        assert!(SenderKey::from_hex("abcd").is_err()); // too short
    }

    #[test]
    fn test_signing_is_deterministic() {
        let key = SenderKey::from_seed(&[5u8; 32]);
        let sig_a = key.sign(b"batch payload");
        let sig_b = key.sign(b"batch payload");
        assert_eq!(sig_a, sig_b);
    }
}
