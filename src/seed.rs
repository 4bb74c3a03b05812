//! # Seed phrase to account keys
//!
//! A [`Seed`] binds a phrase to the key pair and address derived from it by
//! the context-selected crypto backend. Phrase *generation* and encrypted
//! storage belong to external tooling; this module only derives.

use crate::chain::{NetworkContext, MIN_SEED_LENGTH};
use crate::convert::to_base58;
use crate::crypto::build_address;
use crate::error::SignerError;

/// Base58-encoded account key pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyPair {
    pub public_key: String,
    pub private_key: String,
}

#[derive(Clone, Debug)]
pub struct Seed {
    pub phrase: String,
    pub key_pair: KeyPair,
    pub address: String,
}

impl Seed {
    /// Derive keys and address from an existing phrase.
    pub fn from_existing_phrase(phrase: &str, ctx: &NetworkContext) -> Result<Seed, SignerError> {
        if phrase.len() < MIN_SEED_LENGTH {
            return Err(SignerError::Configuration(format!(
                "seed phrase is shorter than the minimum of {} characters",
                MIN_SEED_LENGTH
            )));
        }

        let backend = ctx.backend();
        let keys = backend.key_pair(phrase)?;
        let address = build_address(&keys.public_key, ctx.network_byte()?, backend)?;

        Ok(Seed {
            phrase: phrase.to_string(),
            key_pair: KeyPair {
                public_key: to_base58(&keys.public_key),
                private_key: to_base58(&keys.private_key),
            },
            address,
        })
    }
}
