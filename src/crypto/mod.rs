/*
Copyright 2024 Vostok Signer Developers

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/
//! # Cryptographic backends
//!
//! Two interchangeable backends sit behind the [`CryptoBackend`] trait: the
//! curve25519 scheme used by Waves-derived networks and the GOST R 34.10-2012
//! scheme. The encoder treats signature and hash output as opaque bytes; the
//! backend is selected through [`CryptoType`](crate::chain::CryptoType).

pub mod curve25519;
pub mod error;
pub mod gost;

use crate::chain::{CryptoType, ADDRESS_VERSION};
use crate::convert::{int_to_bytes, to_base58};
use crate::crypto::error::CryptoError;

pub const PRIVATE_KEY_LENGTH: usize = 32;
pub const PUBLIC_KEY_LENGTH: usize = 32;
pub const PUBLIC_KEY_LENGTH_GOST: usize = 64;
pub const SIGNATURE_LENGTH: usize = 64;

/// Nonce mixed into the seed hash. Account index 0; derivation of further
/// accounts from one phrase is not exposed here.
pub const INITIAL_NONCE: i32 = 0;

const ADDRESS_HASH_LENGTH: usize = 20;
const ADDRESS_CHECKSUM_LENGTH: usize = 4;

/// Raw key pair produced by seed derivation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyPairBytes {
    pub public_key: Vec<u8>,
    pub private_key: Vec<u8>,
}

/// One cryptographic scheme: seed derivation, signing, verification and the
/// hashes used for addresses and transaction ids.
pub trait CryptoBackend: Send + Sync {
    /// Hash used for addresses and seed derivation.
    fn secure_hash(&self, data: &[u8]) -> [u8; 32];

    /// Hash used for transaction ids.
    fn fast_hash(&self, data: &[u8]) -> [u8; 32];

    /// Derive the account key pair from a seed phrase.
    fn key_pair(&self, seed_phrase: &str) -> Result<KeyPairBytes, CryptoError>;

    fn sign(&self, private_key: &[u8], data: &[u8]) -> Result<Vec<u8>, CryptoError>;

    fn verify(&self, public_key: &[u8], data: &[u8], signature: &[u8]) -> bool;

    fn public_key_length(&self) -> usize;
}

static CURVE25519: curve25519::Curve25519Backend = curve25519::Curve25519Backend;
static GOST: gost::GostBackend = gost::GostBackend;

pub fn backend(crypto: CryptoType) -> &'static dyn CryptoBackend {
    match crypto {
        CryptoType::Curve25519 => &CURVE25519,
        CryptoType::Gost => &GOST,
    }
}

/// Seed bytes prefixed with the 4-byte big-endian account nonce.
pub(crate) fn seed_with_nonce(seed_phrase: &str) -> Vec<u8> {
    let mut data = Vec::with_capacity(seed_phrase.len() + 4);
    data.extend_from_slice(&int_to_bytes(INITIAL_NONCE));
    data.extend_from_slice(seed_phrase.as_bytes());
    data
}

/// Base58 address for a raw public key:
/// `[version, network_byte] ++ hash(pk)[..20] ++ checksum`.
pub fn build_address(
    public_key: &[u8],
    network_byte: u8,
    backend: &dyn CryptoBackend,
) -> Result<String, CryptoError> {
    if public_key.len() != backend.public_key_length() {
        return Err(CryptoError::InvalidKey);
    }

    let mut raw = Vec::with_capacity(ADDRESS_HASH_LENGTH + ADDRESS_CHECKSUM_LENGTH + 2);
    raw.push(ADDRESS_VERSION);
    raw.push(network_byte);
    raw.extend_from_slice(&backend.secure_hash(public_key)[..ADDRESS_HASH_LENGTH]);

    let checksum = backend.secure_hash(&raw);
    raw.extend_from_slice(&checksum[..ADDRESS_CHECKSUM_LENGTH]);

    Ok(to_base58(&raw))
}

/// Structural address check: version, network byte and checksum.
pub fn is_valid_address(address: &str, network_byte: u8, backend: &dyn CryptoBackend) -> bool {
    let bytes = match crate::convert::from_base58(address) {
        Ok(b) => b,
        Err(_) => return false,
    };
    if bytes.len() != 2 + ADDRESS_HASH_LENGTH + ADDRESS_CHECKSUM_LENGTH {
        return false;
    }
    if bytes[0] != ADDRESS_VERSION || bytes[1] != network_byte {
        return false;
    }
    let (key, check) = bytes.split_at(2 + ADDRESS_HASH_LENGTH);
    let expected = backend.secure_hash(key);
    check == &expected[..ADDRESS_CHECKSUM_LENGTH]
}
