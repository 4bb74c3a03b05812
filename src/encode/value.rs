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
//! # Field values
//!
//! The value shapes a schema entry can resolve to. Request structs hand these
//! out by reference; codecs read them and emit bytes.

use std::fmt;
use std::str::FromStr;

use num_bigint::BigInt;
use num_traits::Zero;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::convert::{big_to_long_bytes, long_to_bytes, ConversionError};

/// A 64-bit wire amount. Keeps the native representation when it fits and an
/// arbitrary-precision one for values beyond the JSON-safe range; both encode
/// to the same 8 big-endian bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Amount {
    Int(i64),
    Big(BigInt),
}

impl Amount {
    pub fn to_long_bytes(&self) -> Result<[u8; 8], ConversionError> {
        match self {
            Amount::Int(v) => Ok(long_to_bytes(*v)),
            Amount::Big(v) => big_to_long_bytes(v),
        }
    }

    pub fn is_zero(&self) -> bool {
        match self {
            Amount::Int(v) => *v == 0,
            Amount::Big(v) => v.is_zero(),
        }
    }
}

impl From<i64> for Amount {
    fn from(value: i64) -> Self {
        Amount::Int(value)
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(v) => Amount::Int(v),
            Err(_) => Amount::Big(BigInt::from(value)),
        }
    }
}

impl FromStr for Amount {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(v) = s.parse::<i64>() {
            return Ok(Amount::Int(v));
        }
        BigInt::from_str(s)
            .map(Amount::Big)
            .map_err(|_| ConversionError::UnsupportedValue(format!("not a decimal: {}", s)))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Amount::Int(v) => write!(f, "{}", v),
            Amount::Big(v) => write!(f, "{}", v),
        }
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Amount::Int(v) => serializer.serialize_i64(*v),
            Amount::Big(v) => serializer.serialize_str(&v.to_string()),
        }
    }
}

struct AmountVisitor;

impl<'de> Visitor<'de> for AmountVisitor {
    type Value = Amount;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "an integer or a decimal string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Amount, E> {
        Ok(Amount::Int(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Amount, E> {
        Ok(Amount::from(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Amount, E> {
        Amount::from_str(v).map_err(|e| E::custom(e.to_string()))
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Amount, D::Error> {
        deserializer.deserialize_any(AmountVisitor)
    }
}

/// One item of a mass-transfer list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transfer {
    pub recipient: String,
    pub amount: Amount,
}

/// Typed payload of a data entry / contract parameter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum DataValue {
    Integer(Amount),
    Boolean(bool),
    /// Base64 payload carrying the mandatory `base64:` marker
    Binary(String),
    String(String),
}

/// Key/type/value triple for data transactions and contract parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DataEntry {
    pub key: String,
    #[serde(flatten)]
    pub value: DataValue,
}

/// Marker of an atomic-container member.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtomicBadge {
    pub trusted_sender: Option<String>,
}

/// Permission operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionOp {
    Add,
    Remove,
}

impl PermissionOp {
    pub fn byte(&self) -> u8 {
        match self {
            PermissionOp::Add => b'a',
            PermissionOp::Remove => b'r',
        }
    }
}

/// On-chain role granted or revoked by a permit transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Miner,
    Issuer,
    Dex,
    Permissioner,
    Blacklister,
    Banned,
    ContractDeveloper,
    ConnectionManager,
    Sender,
    ContractValidator,
}

impl Role {
    pub fn byte(&self) -> u8 {
        match self {
            Role::Miner => 1,
            Role::Issuer => 2,
            Role::Dex => 3,
            Role::Permissioner => 4,
            Role::Blacklister => 5,
            Role::Banned => 6,
            Role::ContractDeveloper => 7,
            Role::ConnectionManager => 8,
            Role::Sender => 9,
            Role::ContractValidator => 10,
        }
    }
}

/// Result-validation policy of a contract.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ValidationPolicy {
    Any,
    Majority,
    MajorityWithOneOf { addresses: Vec<String> },
}

/// A borrowed view of one schema field's value.
#[derive(Clone, Copy, Debug)]
pub enum FieldValue<'a> {
    Int(i64),
    Long(&'a Amount),
    Bool(bool),
    Str(&'a str),
    Transfers(&'a [Transfer]),
    DataEntries(&'a [DataEntry]),
    Recipients(&'a [String]),
    OpType(PermissionOp),
    Role(Role),
    Badge(&'a AtomicBadge),
    Policy(&'a ValidationPolicy),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_from_string_and_number_encode_alike() {
        let a: Amount = "7000000000000000000".parse().unwrap();
        let b = Amount::Int(7_000_000_000_000_000_000);
        assert_eq!(a.to_long_bytes().unwrap(), b.to_long_bytes().unwrap());
    }

    #[test]
    fn amount_beyond_i64_parses_as_big() {
        let a: Amount = "9223372036854775808".parse().unwrap();
        assert!(matches!(a, Amount::Big(_)));
        assert_eq!(
            a.to_long_bytes().unwrap(),
            [0x80, 0, 0, 0, 0, 0, 0, 0]
        );
    }

    #[test]
    fn amount_rejects_non_decimal() {
        assert!("12.5".parse::<Amount>().is_err());
        assert!("ten".parse::<Amount>().is_err());
    }

    #[test]
    fn amount_json_shapes() {
        let from_number: Amount = serde_json::from_str("42").unwrap();
        let from_string: Amount = serde_json::from_str("\"42\"").unwrap();
        assert_eq!(
            from_number.to_long_bytes().unwrap(),
            from_string.to_long_bytes().unwrap()
        );
    }

    #[test]
    fn data_entry_json_round_trip() {
        let json = r#"{"key":"count","type":"integer","value":10}"#;
        let entry: DataEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.key, "count");
        assert_eq!(entry.value, DataValue::Integer(Amount::Int(10)));

        let json = r#"{"key":"blob","type":"binary","value":"base64:AQID"}"#;
        let entry: DataEntry = serde_json::from_str(json).unwrap();
        assert_eq!(
            entry.value,
            DataValue::Binary("base64:AQID".to_string())
        );
    }

    #[test]
    fn unknown_data_entry_type_is_rejected() {
        let json = r#"{"key":"x","type":"float","value":1}"#;
        assert!(serde_json::from_str::<DataEntry>(json).is_err());
    }

    #[test]
    fn role_bytes_are_stable() {
        assert_eq!(Role::Miner.byte(), 1);
        assert_eq!(Role::Dex.byte(), 3);
        assert_eq!(Role::ContractValidator.byte(), 10);
    }

    #[test]
    fn op_type_bytes_are_ascii() {
        assert_eq!(PermissionOp::Add.byte(), 97);
        assert_eq!(PermissionOp::Remove.byte(), 114);
    }

    #[test]
    fn validation_policy_json() {
        let p: ValidationPolicy = serde_json::from_str(r#"{"type":"any"}"#).unwrap();
        assert_eq!(p, ValidationPolicy::Any);
        let p: ValidationPolicy =
            serde_json::from_str(r#"{"type":"majority_with_one_of","addresses":[]}"#).unwrap();
        assert_eq!(
            p,
            ValidationPolicy::MajorityWithOneOf { addresses: vec![] }
        );
    }
}
