//! # Network configuration
//!
//! A [`NetworkContext`] carries the network byte and the selected crypto
//! backend. It is threaded explicitly through the encoder instead of living
//! in process-wide mutable state, so encodings stay pure and testable. A
//! context shared with in-flight encodings must not be mutated mid-batch;
//! that stability is the caller's responsibility.

use crate::crypto::{backend, CryptoBackend};
use crate::error::SignerError;

/// Mainnet network byte
pub const MAINNET_BYTE: u8 = b'V';
/// Testnet network byte
pub const TESTNET_BYTE: u8 = b'T';

/// First byte of every address
pub const ADDRESS_VERSION: u8 = 1;
/// First byte of every encoded alias
pub const ALIAS_VERSION: u8 = 2;

/// Well-known symbol of the chain's base currency. An asset id equal to this
/// sentinel (case-insensitive) serializes in the short single-byte form.
pub const NATIVE_ASSET: &str = "WAVES";

/// Minimal accepted seed phrase length, in characters
pub const MIN_SEED_LENGTH: usize = 15;

/// Transfer attachment ceiling, in decoded bytes
pub const TRANSFER_ATTACHMENT_BYTE_LIMIT: usize = 140;

const DATA_TX_SIZE_WITHOUT_ENTRIES: usize = 52;
/// Byte ceiling for a serialized data-entry list (140 KB for the whole tx)
pub const DATA_ENTRIES_BYTE_LIMIT: usize = 140 * 1024 - DATA_TX_SIZE_WITHOUT_ENTRIES;

/// Selector for the active cryptographic backend.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CryptoType {
    Curve25519,
    Gost,
}

/// Process-level configuration for one batch of encodings.
#[derive(Clone, Copy, Debug)]
pub struct NetworkContext {
    network_byte: Option<u8>,
    crypto: CryptoType,
}

impl NetworkContext {
    pub fn new(network_byte: u8, crypto: CryptoType) -> NetworkContext {
        NetworkContext {
            network_byte: Some(network_byte),
            crypto,
        }
    }

    pub fn mainnet() -> NetworkContext {
        NetworkContext::new(MAINNET_BYTE, CryptoType::Curve25519)
    }

    pub fn testnet() -> NetworkContext {
        NetworkContext::new(TESTNET_BYTE, CryptoType::Curve25519)
    }

    /// Network byte, or a configuration error if none was ever set. Alias and
    /// alias-recipient encodings require it.
    pub fn network_byte(&self) -> Result<u8, SignerError> {
        self.network_byte.ok_or_else(|| {
            SignerError::Configuration("network byte is not set".to_string())
        })
    }

    pub fn crypto(&self) -> CryptoType {
        self.crypto
    }

    pub fn backend(&self) -> &'static dyn CryptoBackend {
        backend(self.crypto)
    }
}

impl Default for NetworkContext {
    /// A context with no network byte and the curve25519 backend. Enough for
    /// network-independent encodings; alias fields will fail until a byte is
    /// provided.
    fn default() -> Self {
        NetworkContext {
            network_byte: None,
            crypto: CryptoType::Curve25519,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn testnet_byte_is_ascii_t() {
        assert_eq!(TESTNET_BYTE, 84);
    }

    #[test]
    fn default_context_has_no_network_byte() {
        let ctx = NetworkContext::default();
        assert!(matches!(
            ctx.network_byte(),
            Err(SignerError::Configuration(_))
        ));
    }

    #[test]
    fn explicit_context_exposes_byte() {
        let ctx = NetworkContext::new(TESTNET_BYTE, CryptoType::Gost);
        assert_eq!(ctx.network_byte().unwrap(), b'T');
        assert_eq!(ctx.crypto(), CryptoType::Gost);
    }
}
