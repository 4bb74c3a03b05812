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
//! # GOST backend
//!
//! GOST R 34.10-2012 (256 bit) signatures over the CryptoPro-A parameter set
//! with GOST R 34.11-2012 (Streebog-256) as the secure hash. The group
//! arithmetic is plain affine math over `num-bigint`; performance is not a
//! concern at this layer.
//!
//! Wire formats: private key is the 32-byte big-endian scalar, public key is
//! the 64-byte big-endian `x ++ y` pair, a signature is `r ++ s` (32 + 32,
//! big-endian).

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{One, Zero};
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Digest;
use streebog::Streebog256;

use super::{seed_with_nonce, CryptoBackend, KeyPairBytes, PRIVATE_KEY_LENGTH, PUBLIC_KEY_LENGTH_GOST, SIGNATURE_LENGTH};
use crate::crypto::error::CryptoError;

struct CurveParams {
    p: BigInt,
    a: BigInt,
    b: BigInt,
    q: BigInt,
    gx: BigInt,
    gy: BigInt,
}

lazy_static! {
    // id-GostR3410-2001-CryptoPro-A-ParamSet, reused by the 2012 256-bit mode
    static ref CURVE: CurveParams = {
        let hex = |s: &str| {
            BigInt::parse_bytes(s.as_bytes(), 16).expect("curve constant")
        };
        let p = hex("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFD97");
        let a = &p - BigInt::from(3);
        CurveParams {
            a,
            b: BigInt::from(166),
            q: hex("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF6C611070995AD10045841B09B761B893"),
            gx: BigInt::one(),
            gy: hex("8D91E471E0989CDA27DF505A453F2B7635294F2DDF23E3B122ACC99C9E9F1E14"),
            p,
        }
    };
}

/// Affine point; `None` is the point at infinity.
type Point = Option<(BigInt, BigInt)>;

fn modp(value: &BigInt) -> BigInt {
    let m = &CURVE.p;
    ((value % m) + m) % m
}

fn modq(value: &BigInt) -> BigInt {
    let m = &CURVE.q;
    ((value % m) + m) % m
}

fn mod_inv(value: &BigInt, modulus: &BigInt) -> BigInt {
    // modulus is prime, Fermat inverse
    value.modpow(&(modulus - BigInt::from(2)), modulus)
}

fn point_double(point: &Point) -> Point {
    let (x, y) = match point {
        Some(p) => p,
        None => return None,
    };
    if y.is_zero() {
        return None;
    }
    let xx = x * x;
    let num = modp(&(&xx + &xx + &xx + &CURVE.a));
    let slope = modp(&(num * mod_inv(&modp(&(y + y)), &CURVE.p)));
    let rx = modp(&(&slope * &slope - x - x));
    let ry = modp(&(&slope * (x - &rx) - y));
    Some((rx, ry))
}

fn point_add(lhs: &Point, rhs: &Point) -> Point {
    let (x1, y1) = match lhs {
        Some(p) => p,
        None => return rhs.clone(),
    };
    let (x2, y2) = match rhs {
        Some(p) => p,
        None => return lhs.clone(),
    };
    if x1 == x2 {
        return if modp(&(y1 + y2)).is_zero() {
            None
        } else {
            point_double(lhs)
        };
    }
    let slope = modp(&((y2 - y1) * mod_inv(&modp(&(x2 - x1)), &CURVE.p)));
    let rx = modp(&(&slope * &slope - x1 - x2));
    let ry = modp(&(&slope * (x1 - &rx) - y1));
    Some((rx, ry))
}

fn point_mul(scalar: &BigInt, point: &Point) -> Point {
    let k = scalar
        .to_biguint()
        .unwrap_or_else(BigUint::zero);
    let mut result: Point = None;
    for i in (0..k.bits()).rev() {
        result = point_double(&result);
        if k.bit(i) {
            result = point_add(&result, point);
        }
    }
    result
}

fn base_point() -> Point {
    Some((CURVE.gx.clone(), CURVE.gy.clone()))
}

fn on_curve(x: &BigInt, y: &BigInt) -> bool {
    let lhs = modp(&(y * y));
    let rhs = modp(&(x * x * x + &CURVE.a * x + &CURVE.b));
    lhs == rhs
}

pub fn streebog256(data: &[u8]) -> [u8; 32] {
    Streebog256::digest(data).into()
}

fn digest_scalar(data: &[u8]) -> BigInt {
    let digest = streebog256(data);
    let e = modq(&BigInt::from_bytes_be(Sign::Plus, &digest));
    if e.is_zero() {
        BigInt::one()
    } else {
        e
    }
}

fn to_fixed_be(value: &BigInt, width: usize) -> Vec<u8> {
    let (_, bytes) = value.to_bytes_be();
    let mut out = vec![0u8; width];
    out[width - bytes.len()..].copy_from_slice(&bytes);
    out
}

fn random_scalar() -> Result<BigInt, CryptoError> {
    loop {
        let mut buf = [0u8; 32];
        OsRng
            .try_fill_bytes(&mut buf)
            .map_err(|_| CryptoError::NoEntropy)?;
        let k = modq(&BigInt::from_bytes_be(Sign::Plus, &buf));
        if !k.is_zero() {
            return Ok(k);
        }
    }
}

pub struct GostBackend;

impl CryptoBackend for GostBackend {
    fn secure_hash(&self, data: &[u8]) -> [u8; 32] {
        streebog256(data)
    }

    fn fast_hash(&self, data: &[u8]) -> [u8; 32] {
        streebog256(data)
    }

    fn key_pair(&self, seed_phrase: &str) -> Result<KeyPairBytes, CryptoError> {
        let ukm = streebog256(&seed_with_nonce(seed_phrase));
        let mut d = modq(&BigInt::from_bytes_be(Sign::Plus, &ukm));
        if d.is_zero() {
            d = BigInt::one();
        }
        let public = point_mul(&d, &base_point()).ok_or(CryptoError::InvalidSeed)?;
        let mut public_key = to_fixed_be(&public.0, 32);
        public_key.extend_from_slice(&to_fixed_be(&public.1, 32));
        Ok(KeyPairBytes {
            public_key,
            private_key: to_fixed_be(&d, 32),
        })
    }

    fn sign(&self, private_key: &[u8], data: &[u8]) -> Result<Vec<u8>, CryptoError> {
        if private_key.len() != PRIVATE_KEY_LENGTH {
            return Err(CryptoError::InvalidKey);
        }
        let d = BigInt::from_bytes_be(Sign::Plus, private_key);
        if d.is_zero() || d >= CURVE.q {
            return Err(CryptoError::InvalidKey);
        }
        let e = digest_scalar(data);

        loop {
            let k = random_scalar()?;
            let c = match point_mul(&k, &base_point()) {
                Some(point) => point,
                None => continue,
            };
            let r = modq(&c.0);
            if r.is_zero() {
                continue;
            }
            let s = modq(&(&r * &d + &k * &e));
            if s.is_zero() {
                continue;
            }
            let mut signature = to_fixed_be(&r, 32);
            signature.extend_from_slice(&to_fixed_be(&s, 32));
            return Ok(signature);
        }
    }

    fn verify(&self, public_key: &[u8], data: &[u8], signature: &[u8]) -> bool {
        if public_key.len() != PUBLIC_KEY_LENGTH_GOST || signature.len() != SIGNATURE_LENGTH {
            return false;
        }
        let qx = BigInt::from_bytes_be(Sign::Plus, &public_key[..32]);
        let qy = BigInt::from_bytes_be(Sign::Plus, &public_key[32..]);
        if !on_curve(&qx, &qy) {
            return false;
        }
        let r = BigInt::from_bytes_be(Sign::Plus, &signature[..32]);
        let s = BigInt::from_bytes_be(Sign::Plus, &signature[32..]);
        if r.is_zero() || r >= CURVE.q || s.is_zero() || s >= CURVE.q {
            return false;
        }

        let e = digest_scalar(data);
        let v = mod_inv(&e, &CURVE.q);
        let z1 = modq(&(&s * &v));
        let z2 = modq(&(-(&r * &v)));

        let c = point_add(
            &point_mul(&z1, &base_point()),
            &point_mul(&z2, &Some((qx, qy))),
        );
        match c {
            Some(point) => modq(&point.0) == r,
            None => false,
        }
    }

    fn public_key_length(&self) -> usize {
        PUBLIC_KEY_LENGTH_GOST
    }
}
