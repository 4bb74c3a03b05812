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
//! # Wire-level byte codecs
//!
//! Pure transforms between numbers, strings and byte sequences. All integers
//! are big-endian; variable payloads get a big-endian length prefix whose
//! width depends on the context (2 bytes for most fields, 4 bytes for
//! contract parameter payloads).

mod error;

pub use self::error::ConversionError;

use byteorder::{BigEndian, ByteOrder};
use num_bigint::{BigInt, BigUint, Sign};
use num_traits::One;

/// Length-prefix width for strings and binary payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthWidth {
    Two,
    Four,
}

/// Convert a slice into a fixed-size array
pub fn to_arr<A, T>(slice: &[T]) -> A
where
    A: AsMut<[T]> + Default,
    T: Clone,
{
    let mut arr = Default::default();
    <A as AsMut<[T]>>::as_mut(&mut arr).clone_from_slice(slice);
    arr
}

pub fn short_to_bytes(value: u16) -> [u8; 2] {
    let mut buf = [0u8; 2];
    BigEndian::write_u16(&mut buf, value);
    buf
}

pub fn int_to_bytes(value: i32) -> [u8; 4] {
    let mut buf = [0u8; 4];
    BigEndian::write_i32(&mut buf, value);
    buf
}

pub fn long_to_bytes(value: i64) -> [u8; 8] {
    let mut buf = [0u8; 8];
    BigEndian::write_i64(&mut buf, value);
    buf
}

/// 8-byte big-endian two's complement of an arbitrary-precision integer.
///
/// Accepts the full `[i64::MIN, u64::MAX]` window so amounts above the
/// 53-bit-safe JSON range still encode exactly.
pub fn big_to_long_bytes(value: &BigInt) -> Result<[u8; 8], ConversionError> {
    let unsigned: BigUint = if value.sign() == Sign::Minus {
        // below i64::MIN the shifted value would alias a positive encoding
        if *value < BigInt::from(i64::MIN) {
            return Err(ConversionError::LongOverflow);
        }
        (value + (BigInt::one() << 64u32))
            .to_biguint()
            .ok_or(ConversionError::LongOverflow)?
    } else {
        // non-negative always converts
        value.to_biguint().ok_or(ConversionError::LongOverflow)?
    };
    if unsigned.bits() > 64 {
        return Err(ConversionError::LongOverflow);
    }
    let le = unsigned.to_bytes_le();
    let mut out = [0u8; 8];
    for (i, b) in le.iter().enumerate() {
        out[7 - i] = *b;
    }
    Ok(out)
}

/// The cast wraps for payloads longer than the prefix can express, same as
/// the reference encoder; fields with protocol size limits reject such
/// payloads before they reach this point.
fn write_length(out: &mut Vec<u8>, len: usize, width: LengthWidth) {
    match width {
        LengthWidth::Two => out.extend_from_slice(&short_to_bytes(len as u16)),
        LengthWidth::Four => {
            let mut buf = [0u8; 4];
            BigEndian::write_u32(&mut buf, len as u32);
            out.extend_from_slice(&buf);
        }
    }
}

/// UTF-8 bytes of `value` prefixed with its byte length.
pub fn string_with_size(value: &str, width: LengthWidth) -> Vec<u8> {
    bytes_with_size(value.as_bytes(), width)
}

/// `data` prefixed with its length.
pub fn bytes_with_size(data: &[u8], width: LengthWidth) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len() + 4);
    write_length(&mut out, data.len(), width);
    out.extend_from_slice(data);
    out
}

pub fn from_base58(value: &str) -> Result<Vec<u8>, ConversionError> {
    Ok(bs58::decode(value).into_vec()?)
}

pub fn to_base58(data: &[u8]) -> String {
    bs58::encode(data).into_string()
}

/// Decode a raw base64 payload (without the `base64:` marker).
pub fn from_base64(payload: &str) -> Result<Vec<u8>, ConversionError> {
    Ok(base64::decode(payload)?)
}

pub fn from_hex(value: &str) -> Result<Vec<u8>, ConversionError> {
    Ok(hex::decode(value)?)
}

pub fn to_hex(data: &[u8]) -> String {
    hex::encode(data)
}
