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
//! # Curve25519 backend
//!
//! The Waves-family scheme: account keys are X25519-style Montgomery keys
//! derived from `sha256(keccak256(blake2b256(nonce ++ seed)))`, signatures
//! are randomized Schnorr signatures over the Edwards form of the key, with
//! the public key's sign bit folded into the last signature byte.

use blake2::digest::consts::U32;
use blake2::Blake2b;
use curve25519_dalek::edwards::EdwardsPoint;
use curve25519_dalek::montgomery::MontgomeryPoint;
use curve25519_dalek::scalar::Scalar;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256, Sha512};
use sha3::Keccak256;

use super::{seed_with_nonce, CryptoBackend, KeyPairBytes, PRIVATE_KEY_LENGTH, PUBLIC_KEY_LENGTH, SIGNATURE_LENGTH};
use crate::convert::to_arr;
use crate::crypto::error::CryptoError;

type Blake2b256 = Blake2b<U32>;

fn clamp(key: &mut [u8; 32]) {
    key[0] &= 248;
    key[31] &= 127;
    key[31] |= 64;
}

/// Derive the key pair from a 32-byte account seed. The exported private key
/// is the clamped seed; clamping is idempotent, so signing re-clamps safely.
pub fn generate_key_pair(account_seed: &[u8; 32]) -> ([u8; 32], [u8; 32]) {
    let mut clamped = *account_seed;
    clamp(&mut clamped);
    let scalar = Scalar::from_bytes_mod_order(clamped);
    let public = EdwardsPoint::mul_base(&scalar).to_montgomery().to_bytes();
    (clamped, public)
}

/// Randomized signature of `data` by a Montgomery private key.
pub fn sign(private_key: &[u8; 32], data: &[u8], random: &[u8; 64]) -> [u8; 64] {
    let mut clamped = *private_key;
    clamp(&mut clamped);
    let a = Scalar::from_bytes_mod_order(clamped);
    let a_public = EdwardsPoint::mul_base(&a).compress().to_bytes();
    let sign_bit = a_public[31] & 0x80;

    // domain-separating prefix, then key, message and the random suffix
    let mut hasher = Sha512::new();
    hasher.update([0xFEu8]);
    hasher.update([0xFFu8; 31]);
    hasher.update(clamped);
    hasher.update(data);
    hasher.update(random);
    let digest: [u8; 64] = hasher.finalize().into();
    let r = Scalar::from_bytes_mod_order_wide(&digest);

    let r_public = EdwardsPoint::mul_base(&r).compress().to_bytes();

    let mut hasher = Sha512::new();
    hasher.update(r_public);
    hasher.update(a_public);
    hasher.update(data);
    let digest: [u8; 64] = hasher.finalize().into();
    let h = Scalar::from_bytes_mod_order_wide(&digest);

    let s = r + h * a;

    let mut signature = [0u8; 64];
    signature[..32].copy_from_slice(&r_public);
    signature[32..].copy_from_slice(s.as_bytes());
    signature[63] |= sign_bit;
    signature
}

/// Verify a signature against a Montgomery public key. The Edwards sign bit
/// is carried in the top bit of the last signature byte.
pub fn verify(public_key: &[u8; 32], data: &[u8], signature: &[u8; 64]) -> bool {
    let sign_bit = (signature[63] & 0x80) >> 7;
    let a_point = match MontgomeryPoint(*public_key).to_edwards(sign_bit) {
        Some(p) => p,
        None => return false,
    };
    let a_public = a_point.compress().to_bytes();

    let mut s_bytes: [u8; 32] = to_arr(&signature[32..]);
    s_bytes[31] &= 0x7f;
    let s: Scalar = match Option::from(Scalar::from_canonical_bytes(s_bytes)) {
        Some(s) => s,
        None => return false,
    };

    let mut hasher = Sha512::new();
    hasher.update(&signature[..32]);
    hasher.update(a_public);
    hasher.update(data);
    let digest: [u8; 64] = hasher.finalize().into();
    let h = Scalar::from_bytes_mod_order_wide(&digest);

    // R == s*B - h*A
    let r_check = EdwardsPoint::vartime_double_scalar_mul_basepoint(&-h, &a_point, &s);
    r_check.compress().as_bytes() == &signature[..32]
}

pub struct Curve25519Backend;

impl CryptoBackend for Curve25519Backend {
    fn secure_hash(&self, data: &[u8]) -> [u8; 32] {
        let blake: [u8; 32] = Blake2b256::digest(data).into();
        Keccak256::digest(blake).into()
    }

    fn fast_hash(&self, data: &[u8]) -> [u8; 32] {
        Blake2b256::digest(data).into()
    }

    fn key_pair(&self, seed_phrase: &str) -> Result<KeyPairBytes, CryptoError> {
        let seed_hash = self.secure_hash(&seed_with_nonce(seed_phrase));
        let account_seed: [u8; 32] = Sha256::digest(seed_hash).into();
        let (private, public) = generate_key_pair(&account_seed);
        Ok(KeyPairBytes {
            public_key: public.to_vec(),
            private_key: private.to_vec(),
        })
    }

    fn sign(&self, private_key: &[u8], data: &[u8]) -> Result<Vec<u8>, CryptoError> {
        if private_key.len() != PRIVATE_KEY_LENGTH {
            return Err(CryptoError::InvalidKey);
        }
        let mut random = [0u8; 64];
        OsRng
            .try_fill_bytes(&mut random)
            .map_err(|_| CryptoError::NoEntropy)?;
        let key: [u8; 32] = to_arr(private_key);
        Ok(sign(&key, data, &random).to_vec())
    }

    fn verify(&self, public_key: &[u8], data: &[u8], signature: &[u8]) -> bool {
        if public_key.len() != PUBLIC_KEY_LENGTH || signature.len() != SIGNATURE_LENGTH {
            return false;
        }
        let pk: [u8; 32] = to_arr(public_key);
        let mut sig = [0u8; 64];
        sig.copy_from_slice(signature);
        verify(&pk, data, &sig)
    }

    fn public_key_length(&self) -> usize {
        PUBLIC_KEY_LENGTH
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::{from_base58, to_base58};

    const PHRASE: &str =
        "boil hip drill joke ability ghost match dizzy opera interest damage cute critic happy eye";

    #[test]
    fn derive_known_key_pair() {
        let backend = Curve25519Backend;
        let keys = backend.key_pair(PHRASE).unwrap();
        assert_eq!(
            to_base58(&keys.public_key),
            "ChziWp2CBVfoYN1CdYzoSvQL4xMNB7mjKaXgMFrVJoPW"
        );
        assert_eq!(
            to_base58(&keys.private_key),
            "6wa1xTfbg6KeGfj3mRPAVMeTYMVghFqBvpnAwWfiQHSu"
        );
    }

    #[test]
    fn exported_private_key_is_clamped() {
        let (private, _) = generate_key_pair(&[0xffu8; 32]);
        assert_eq!(private[0] & 0b0000_0111, 0);
        assert_eq!(private[31] & 0b1000_0000, 0);
        assert_eq!(private[31] & 0b0100_0000, 0b0100_0000);
    }

    #[test]
    fn sign_and_verify() {
        let backend = Curve25519Backend;
        let keys = backend.key_pair(PHRASE).unwrap();
        let data = b"some payload to sign";
        let signature = backend.sign(&keys.private_key, data).unwrap();
        assert_eq!(signature.len(), SIGNATURE_LENGTH);
        assert!(backend.verify(&keys.public_key, data, &signature));
        assert!(!backend.verify(&keys.public_key, b"another payload", &signature));
    }

    #[test]
    fn signatures_are_randomized_but_both_valid() {
        let backend = Curve25519Backend;
        let keys = backend.key_pair(PHRASE).unwrap();
        let data = b"payload";
        let first = backend.sign(&keys.private_key, data).unwrap();
        let second = backend.sign(&keys.private_key, data).unwrap();
        assert_ne!(first, second);
        assert!(backend.verify(&keys.public_key, data, &first));
        assert!(backend.verify(&keys.public_key, data, &second));
    }

    #[test]
    fn deterministic_sign_with_fixed_random() {
        let seed = [7u8; 32];
        let (private, public) = generate_key_pair(&seed);
        let random = [42u8; 64];
        let first = sign(&private, b"data", &random);
        let second = sign(&private, b"data", &random);
        assert_eq!(first, second);
        assert!(verify(&public, b"data", &first));
    }

    #[test]
    fn verify_foreign_public_key_length() {
        let backend = Curve25519Backend;
        let gost_sized = from_base58(
            "2Vx27WrzyS7Ngbq5TtSUhrv1ip8Vqr5hjoXoPfBDKGdbXQe2hhg67WHqd5spnAdxkeGjc9pPpmHn9t4zcgDoUMq8",
        )
        .unwrap();
        assert!(!backend.verify(&gost_sized, b"x", &[0u8; 64]));
    }
}
