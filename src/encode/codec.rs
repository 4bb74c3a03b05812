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
//! # Field codecs
//!
//! One codec per wire layout. A codec answers two questions about a field:
//! is the supplied value acceptable (`validate`), and what bytes does it
//! produce (`serialize`). Validation collects soft failures; serialization
//! of a value that cannot be encoded is a hard error.

use regex::Regex;

use crate::chain::{
    ALIAS_VERSION, DATA_ENTRIES_BYTE_LIMIT, NATIVE_ASSET, NetworkContext,
    TRANSFER_ATTACHMENT_BYTE_LIMIT,
};
use crate::convert::{
    bytes_with_size, from_base58, from_base64, int_to_bytes, long_to_bytes, short_to_bytes,
    string_with_size, LengthWidth,
};
use crate::error::{ConstraintError, SignerError};

use super::value::{DataValue, FieldValue, ValidationPolicy as Policy};
use super::ValidationKind;

const BASE64_MARKER: &str = "base64:";

lazy_static! {
    static ref ALIAS_PATTERN: Regex = Regex::new("(?i)alias:.:").unwrap();
}

/// Binary layout of a single schema field.
pub trait FieldCodec: Send + Sync {
    /// Whether the schema treats an absent value as an error.
    fn required(&self) -> bool;

    /// Layout-specific constraints on a present value.
    fn check(&self, _value: FieldValue, _ctx: &NetworkContext) -> Option<ValidationKind> {
        None
    }

    fn validate(&self, value: Option<FieldValue>, ctx: &NetworkContext) -> Option<ValidationKind> {
        match value {
            None if self.required() => Some(ValidationKind::Required),
            None => None,
            Some(v) => self.check(v, ctx),
        }
    }

    fn serialize(
        &self,
        name: &str,
        value: Option<FieldValue>,
        ctx: &NetworkContext,
    ) -> Result<Vec<u8>, SignerError>;
}

fn present<'v>(name: &str, value: Option<FieldValue<'v>>) -> Result<FieldValue<'v>, SignerError> {
    value.ok_or_else(|| SignerError::MissingField(name.to_string()))
}

fn wrong_type(name: &str, expected: &str) -> SignerError {
    SignerError::InvalidData(format!("field '{}' expects {}", name, expected))
}

fn str_value<'v>(name: &str, value: FieldValue<'v>) -> Result<&'v str, SignerError> {
    match value {
        FieldValue::Str(s) => Ok(s),
        _ => Err(wrong_type(name, "a string")),
    }
}

fn int_value(name: &str, value: FieldValue) -> Result<i64, SignerError> {
    match value {
        FieldValue::Int(v) => Ok(v),
        _ => Err(wrong_type(name, "an integer")),
    }
}

fn long_bytes(name: &str, value: FieldValue) -> Result<[u8; 8], SignerError> {
    match value {
        FieldValue::Int(v) => Ok(long_to_bytes(v)),
        FieldValue::Long(a) => a.to_long_bytes().map_err(SignerError::Conversion),
        _ => Err(wrong_type(name, "a 64-bit amount")),
    }
}

fn range_check(value: FieldValue, min: i64, max: i64) -> Option<ValidationKind> {
    match value {
        FieldValue::Int(v) if v >= min && v <= max => None,
        FieldValue::Int(_) => Some(ValidationKind::OutOfRange { min, max }),
        _ => Some(ValidationKind::WrongType),
    }
}

/// Single unsigned byte.
pub struct Byte {
    required: bool,
}

impl Byte {
    pub fn new(required: bool) -> Self {
        Byte { required }
    }
}

impl FieldCodec for Byte {
    fn required(&self) -> bool {
        self.required
    }

    fn check(&self, value: FieldValue, _ctx: &NetworkContext) -> Option<ValidationKind> {
        range_check(value, 0, 0xff)
    }

    fn serialize(
        &self,
        name: &str,
        value: Option<FieldValue>,
        _ctx: &NetworkContext,
    ) -> Result<Vec<u8>, SignerError> {
        let v = int_value(name, present(name, value)?)?;
        if !(0..=0xff).contains(&v) {
            return Err(wrong_type(name, "a byte in [0, 255]"));
        }
        Ok(vec![v as u8])
    }
}

/// Big-endian unsigned 16-bit integer.
pub struct Short {
    required: bool,
}

impl Short {
    pub fn new(required: bool) -> Self {
        Short { required }
    }
}

impl FieldCodec for Short {
    fn required(&self) -> bool {
        self.required
    }

    fn check(&self, value: FieldValue, _ctx: &NetworkContext) -> Option<ValidationKind> {
        range_check(value, 0, 0xffff)
    }

    fn serialize(
        &self,
        name: &str,
        value: Option<FieldValue>,
        _ctx: &NetworkContext,
    ) -> Result<Vec<u8>, SignerError> {
        let v = int_value(name, present(name, value)?)?;
        if !(0..=0xffff).contains(&v) {
            return Err(wrong_type(name, "a short in [0, 65535]"));
        }
        Ok(short_to_bytes(v as u16).to_vec())
    }
}

/// Big-endian signed 32-bit integer.
pub struct Integer {
    required: bool,
}

impl Integer {
    pub fn new(required: bool) -> Self {
        Integer { required }
    }
}

impl FieldCodec for Integer {
    fn required(&self) -> bool {
        self.required
    }

    fn check(&self, value: FieldValue, _ctx: &NetworkContext) -> Option<ValidationKind> {
        range_check(value, i32::MIN as i64, i32::MAX as i64)
    }

    fn serialize(
        &self,
        name: &str,
        value: Option<FieldValue>,
        _ctx: &NetworkContext,
    ) -> Result<Vec<u8>, SignerError> {
        let v = int_value(name, present(name, value)?)?;
        let v = i32::try_from(v).map_err(|_| wrong_type(name, "a 32-bit integer"))?;
        Ok(int_to_bytes(v).to_vec())
    }
}

/// Big-endian signed 64-bit integer. Accepts both native and
/// arbitrary-precision amounts.
pub struct Long {
    required: bool,
}

impl Long {
    pub fn new(required: bool) -> Self {
        Long { required }
    }
}

impl FieldCodec for Long {
    fn required(&self) -> bool {
        self.required
    }

    fn check(&self, value: FieldValue, _ctx: &NetworkContext) -> Option<ValidationKind> {
        match value {
            FieldValue::Int(_) => None,
            FieldValue::Long(a) => a.to_long_bytes().err().map(|_| ValidationKind::LongOverflow),
            _ => Some(ValidationKind::WrongType),
        }
    }

    fn serialize(
        &self,
        name: &str,
        value: Option<FieldValue>,
        _ctx: &NetworkContext,
    ) -> Result<Vec<u8>, SignerError> {
        Ok(long_bytes(name, present(name, value)?)?.to_vec())
    }
}

/// Single boolean byte.
pub struct Bool {
    required: bool,
}

impl Bool {
    pub fn new(required: bool) -> Self {
        Bool { required }
    }
}

impl FieldCodec for Bool {
    fn required(&self) -> bool {
        self.required
    }

    fn check(&self, value: FieldValue, _ctx: &NetworkContext) -> Option<ValidationKind> {
        match value {
            FieldValue::Bool(_) => None,
            _ => Some(ValidationKind::WrongType),
        }
    }

    fn serialize(
        &self,
        name: &str,
        value: Option<FieldValue>,
        _ctx: &NetworkContext,
    ) -> Result<Vec<u8>, SignerError> {
        match present(name, value)? {
            FieldValue::Bool(b) => Ok(vec![b as u8]),
            _ => Err(wrong_type(name, "a boolean")),
        }
    }
}

/// Raw base58 payload, no length prefix. An optional limit bounds the
/// decoded size.
pub struct Base58 {
    required: bool,
    limit: Option<usize>,
}

impl Base58 {
    pub fn new(required: bool) -> Self {
        Base58 {
            required,
            limit: None,
        }
    }

    pub fn with_limit(required: bool, limit: usize) -> Self {
        Base58 {
            required,
            limit: Some(limit),
        }
    }
}

impl FieldCodec for Base58 {
    fn required(&self) -> bool {
        self.required
    }

    fn check(&self, value: FieldValue, _ctx: &NetworkContext) -> Option<ValidationKind> {
        let s = match value {
            FieldValue::Str(s) => s,
            _ => return Some(ValidationKind::WrongType),
        };
        match (self.limit, from_base58(s)) {
            (Some(limit), Ok(raw)) if raw.len() > limit => {
                Some(ValidationKind::LimitExceeded { limit })
            }
            _ => None,
        }
    }

    fn serialize(
        &self,
        name: &str,
        value: Option<FieldValue>,
        _ctx: &NetworkContext,
    ) -> Result<Vec<u8>, SignerError> {
        let s = str_value(name, present(name, value)?)?;
        let raw = from_base58(s)?;
        if let Some(limit) = self.limit {
            if raw.len() > limit {
                return Err(SignerError::InvalidData(format!(
                    "field '{}' exceeds {} bytes",
                    name, limit
                )));
            }
        }
        Ok(raw)
    }
}

/// Base58 payload with a 2-byte length prefix.
pub struct Base58WithLength {
    required: bool,
}

impl Base58WithLength {
    pub fn new(required: bool) -> Self {
        Base58WithLength { required }
    }
}

impl FieldCodec for Base58WithLength {
    fn required(&self) -> bool {
        self.required
    }

    fn serialize(
        &self,
        name: &str,
        value: Option<FieldValue>,
        _ctx: &NetworkContext,
    ) -> Result<Vec<u8>, SignerError> {
        let s = str_value(name, present(name, value)?)?;
        let raw = from_base58(s)?;
        Ok(bytes_with_size(&raw, LengthWidth::Two))
    }
}

/// Base64 payload carrying the `base64:` marker, emitted with a length
/// prefix of the configured width.
pub struct Base64 {
    required: bool,
    width: LengthWidth,
}

impl Base64 {
    pub fn new(required: bool) -> Self {
        Base64 {
            required,
            width: LengthWidth::Two,
        }
    }

    pub fn with_width(required: bool, width: LengthWidth) -> Self {
        Base64 { required, width }
    }
}

impl FieldCodec for Base64 {
    fn required(&self) -> bool {
        self.required
    }

    fn check(&self, value: FieldValue, _ctx: &NetworkContext) -> Option<ValidationKind> {
        match value {
            FieldValue::Str(s) if s.starts_with(BASE64_MARKER) => None,
            FieldValue::Str(_) => Some(ValidationKind::Base64Prefix),
            _ => Some(ValidationKind::WrongType),
        }
    }

    fn serialize(
        &self,
        name: &str,
        value: Option<FieldValue>,
        _ctx: &NetworkContext,
    ) -> Result<Vec<u8>, SignerError> {
        let s = str_value(name, present(name, value)?)?;
        let payload = s.strip_prefix(BASE64_MARKER).ok_or_else(|| {
            SignerError::InvalidData(format!(
                "field '{}' must start with the '{}' marker",
                name, BASE64_MARKER
            ))
        })?;
        let raw = from_base64(payload)?;
        Ok(bytes_with_size(&raw, self.width))
    }
}

/// Plain UTF-8 string with a length prefix of the configured width.
pub struct StringWithLength {
    required: bool,
    width: LengthWidth,
}

impl StringWithLength {
    pub fn new(required: bool) -> Self {
        StringWithLength {
            required,
            width: LengthWidth::Two,
        }
    }

    pub fn with_width(required: bool, width: LengthWidth) -> Self {
        StringWithLength { required, width }
    }
}

impl FieldCodec for StringWithLength {
    fn required(&self) -> bool {
        self.required
    }

    fn serialize(
        &self,
        name: &str,
        value: Option<FieldValue>,
        _ctx: &NetworkContext,
    ) -> Result<Vec<u8>, SignerError> {
        let s = str_value(name, present(name, value)?)?;
        Ok(string_with_size(s, self.width))
    }
}

/// Alias name: version byte, network byte, then the name with a 2-byte
/// length prefix.
pub struct Alias {
    required: bool,
}

impl Alias {
    pub fn new(required: bool) -> Self {
        Alias { required }
    }
}

impl FieldCodec for Alias {
    fn required(&self) -> bool {
        self.required
    }

    fn serialize(
        &self,
        name: &str,
        value: Option<FieldValue>,
        ctx: &NetworkContext,
    ) -> Result<Vec<u8>, SignerError> {
        let s = str_value(name, present(name, value)?)?;
        let mut out = vec![ALIAS_VERSION, ctx.network_byte()?];
        out.extend(string_with_size(s, LengthWidth::Two));
        Ok(out)
    }
}

/// Asset reference. The native asset, given either as the well-known
/// ticker or as an absent value, encodes as a single zero byte; any other
/// asset as a presence byte plus its 32-byte id.
pub struct AssetId {
    required: bool,
}

impl AssetId {
    pub fn new(required: bool) -> Self {
        AssetId { required }
    }
}

impl FieldCodec for AssetId {
    fn required(&self) -> bool {
        self.required
    }

    // the native sentinel makes absence a legal encoding, never an error
    fn validate(&self, value: Option<FieldValue>, ctx: &NetworkContext) -> Option<ValidationKind> {
        match value {
            None => None,
            Some(v) => self.check(v, ctx),
        }
    }

    fn serialize(
        &self,
        name: &str,
        value: Option<FieldValue>,
        _ctx: &NetworkContext,
    ) -> Result<Vec<u8>, SignerError> {
        let s = match value {
            None => return Ok(vec![0]),
            Some(v) => str_value(name, v)?,
        };
        if s.eq_ignore_ascii_case(NATIVE_ASSET) {
            return Ok(vec![0]);
        }
        let mut out = vec![1];
        out.extend(from_base58(s)?);
        Ok(out)
    }
}

/// Transfer target, either an address or an alias reference of the form
/// `alias:<chain>:<name>`.
pub struct Recipient {
    required: bool,
}

impl Recipient {
    pub fn new(required: bool) -> Self {
        Recipient { required }
    }
}

impl FieldCodec for Recipient {
    fn required(&self) -> bool {
        self.required
    }

    fn serialize(
        &self,
        name: &str,
        value: Option<FieldValue>,
        ctx: &NetworkContext,
    ) -> Result<Vec<u8>, SignerError> {
        let s = str_value(name, present(name, value)?)?;
        if ALIAS_PATTERN.is_match(s) {
            let alias = s.rsplit(':').next().unwrap_or(s);
            let mut out = vec![ALIAS_VERSION, ctx.network_byte()?];
            out.extend(string_with_size(alias, LengthWidth::Two));
            Ok(out)
        } else {
            Ok(from_base58(s)?)
        }
    }
}

/// Optional base58 attachment with a 2-byte length prefix, bounded by the
/// protocol attachment limit.
pub struct Attachment {
    required: bool,
}

impl Attachment {
    pub fn new(required: bool) -> Self {
        Attachment { required }
    }
}

impl FieldCodec for Attachment {
    fn required(&self) -> bool {
        self.required
    }

    fn check(&self, value: FieldValue, _ctx: &NetworkContext) -> Option<ValidationKind> {
        let s = match value {
            FieldValue::Str(s) => s,
            _ => return Some(ValidationKind::WrongType),
        };
        match from_base58(s) {
            Ok(raw) if raw.len() > TRANSFER_ATTACHMENT_BYTE_LIMIT => {
                Some(ValidationKind::LimitExceeded {
                    limit: TRANSFER_ATTACHMENT_BYTE_LIMIT,
                })
            }
            _ => None,
        }
    }

    fn serialize(
        &self,
        name: &str,
        value: Option<FieldValue>,
        _ctx: &NetworkContext,
    ) -> Result<Vec<u8>, SignerError> {
        let s = match value {
            None => return Ok(bytes_with_size(&[], LengthWidth::Two)),
            Some(v) => str_value(name, v)?,
        };
        let raw = from_base58(s)?;
        if raw.len() > TRANSFER_ATTACHMENT_BYTE_LIMIT {
            return Err(SignerError::InvalidData(format!(
                "field '{}' exceeds {} bytes",
                name, TRANSFER_ATTACHMENT_BYTE_LIMIT
            )));
        }
        Ok(bytes_with_size(&raw, LengthWidth::Two))
    }
}

/// Mass-transfer list: 2-byte count, then recipient and amount pairs.
pub struct Transfers {
    required: bool,
}

impl Transfers {
    pub fn new(required: bool) -> Self {
        Transfers { required }
    }
}

impl FieldCodec for Transfers {
    fn required(&self) -> bool {
        self.required
    }

    fn serialize(
        &self,
        name: &str,
        value: Option<FieldValue>,
        ctx: &NetworkContext,
    ) -> Result<Vec<u8>, SignerError> {
        let list = match present(name, value)? {
            FieldValue::Transfers(list) => list,
            _ => return Err(wrong_type(name, "a transfer list")),
        };
        let count =
            u16::try_from(list.len()).map_err(|_| wrong_type(name, "at most 65535 transfers"))?;
        let recipient = Recipient::new(true);
        let mut out = short_to_bytes(count).to_vec();
        for t in list {
            out.extend(recipient.serialize(name, Some(FieldValue::Str(&t.recipient)), ctx)?);
            out.extend_from_slice(&t.amount.to_long_bytes().map_err(SignerError::Conversion)?);
        }
        Ok(out)
    }
}

/// Typed key/value entries: 2-byte count, then key, type tag and payload
/// per entry. `width` sets the length prefix of binary and string payloads,
/// data transactions use two bytes and contract parameters four.
pub struct DataEntries {
    required: bool,
    width: LengthWidth,
}

impl DataEntries {
    pub fn new(required: bool) -> Self {
        DataEntries {
            required,
            width: LengthWidth::Two,
        }
    }

    pub fn with_width(required: bool, width: LengthWidth) -> Self {
        DataEntries { required, width }
    }
}

impl FieldCodec for DataEntries {
    fn required(&self) -> bool {
        self.required
    }

    fn check(&self, value: FieldValue, _ctx: &NetworkContext) -> Option<ValidationKind> {
        let entries = match value {
            FieldValue::DataEntries(entries) => entries,
            _ => return Some(ValidationKind::WrongType),
        };
        for e in entries {
            match &e.value {
                DataValue::Binary(s) if !s.starts_with(BASE64_MARKER) => {
                    return Some(ValidationKind::Base64Prefix)
                }
                DataValue::Integer(a) if a.to_long_bytes().is_err() => {
                    return Some(ValidationKind::LongOverflow)
                }
                _ => {}
            }
        }
        None
    }

    fn serialize(
        &self,
        name: &str,
        value: Option<FieldValue>,
        _ctx: &NetworkContext,
    ) -> Result<Vec<u8>, SignerError> {
        let entries = match present(name, value)? {
            FieldValue::DataEntries(entries) => entries,
            _ => return Err(wrong_type(name, "a data entry list")),
        };
        let count =
            u16::try_from(entries.len()).map_err(|_| wrong_type(name, "at most 65535 entries"))?;
        let mut out = short_to_bytes(count).to_vec();
        for e in entries {
            out.extend(string_with_size(&e.key, LengthWidth::Two));
            match &e.value {
                DataValue::Integer(a) => {
                    out.push(0);
                    out.extend_from_slice(
                        &a.to_long_bytes().map_err(SignerError::Conversion)?,
                    );
                }
                DataValue::Boolean(b) => {
                    out.push(1);
                    out.push(*b as u8);
                }
                DataValue::Binary(s) => {
                    out.push(2);
                    let payload = s.strip_prefix(BASE64_MARKER).ok_or_else(|| {
                        SignerError::InvalidData(format!(
                            "field '{}' binary entry '{}' must start with the '{}' marker",
                            name, e.key, BASE64_MARKER
                        ))
                    })?;
                    out.extend(bytes_with_size(&from_base64(payload)?, self.width));
                }
                DataValue::String(s) => {
                    out.push(3);
                    out.extend(string_with_size(s, self.width));
                }
            }
        }
        if out.len() > DATA_ENTRIES_BYTE_LIMIT {
            return Err(SignerError::Constraint(ConstraintError::DataTooLarge {
                size: out.len(),
                limit: DATA_ENTRIES_BYTE_LIMIT,
            }));
        }
        Ok(out)
    }
}

/// Address list with a 4-byte count. An empty list still emits the count.
pub struct Recipients {
    required: bool,
}

impl Recipients {
    pub fn new(required: bool) -> Self {
        Recipients { required }
    }
}

impl FieldCodec for Recipients {
    fn required(&self) -> bool {
        self.required
    }

    fn serialize(
        &self,
        name: &str,
        value: Option<FieldValue>,
        _ctx: &NetworkContext,
    ) -> Result<Vec<u8>, SignerError> {
        let list = match present(name, value)? {
            FieldValue::Recipients(list) => list,
            _ => return Err(wrong_type(name, "an address list")),
        };
        let count =
            i32::try_from(list.len()).map_err(|_| wrong_type(name, "a bounded address list"))?;
        let mut out = int_to_bytes(count).to_vec();
        for addr in list {
            out.extend(from_base58(addr)?);
        }
        Ok(out)
    }
}

/// Permission operation, one ASCII byte.
pub struct PermissionOpType {
    required: bool,
}

impl PermissionOpType {
    pub fn new(required: bool) -> Self {
        PermissionOpType { required }
    }
}

impl FieldCodec for PermissionOpType {
    fn required(&self) -> bool {
        self.required
    }

    fn serialize(
        &self,
        name: &str,
        value: Option<FieldValue>,
        _ctx: &NetworkContext,
    ) -> Result<Vec<u8>, SignerError> {
        match present(name, value)? {
            FieldValue::OpType(op) => Ok(vec![op.byte()]),
            _ => Err(wrong_type(name, "a permission operation")),
        }
    }
}

/// Permission role, one numeric byte.
pub struct PermissionRole {
    required: bool,
}

impl PermissionRole {
    pub fn new(required: bool) -> Self {
        PermissionRole { required }
    }
}

impl FieldCodec for PermissionRole {
    fn required(&self) -> bool {
        self.required
    }

    fn serialize(
        &self,
        name: &str,
        value: Option<FieldValue>,
        _ctx: &NetworkContext,
    ) -> Result<Vec<u8>, SignerError> {
        match present(name, value)? {
            FieldValue::Role(role) => Ok(vec![role.byte()]),
            _ => Err(wrong_type(name, "a permission role")),
        }
    }
}

/// Optional role expiry. Absent or zero encodes as nine zero bytes, a set
/// expiry as a presence byte plus the timestamp.
pub struct PermissionDueTimestamp {
    required: bool,
}

impl PermissionDueTimestamp {
    pub fn new(required: bool) -> Self {
        PermissionDueTimestamp { required }
    }
}

impl FieldCodec for PermissionDueTimestamp {
    fn required(&self) -> bool {
        self.required
    }

    // absence encodes as "no expiry" regardless of the required flag
    fn validate(&self, value: Option<FieldValue>, ctx: &NetworkContext) -> Option<ValidationKind> {
        value.and_then(|v| self.check(v, ctx))
    }

    fn check(&self, value: FieldValue, _ctx: &NetworkContext) -> Option<ValidationKind> {
        match value {
            FieldValue::Int(_) => None,
            FieldValue::Long(a) => a.to_long_bytes().err().map(|_| ValidationKind::LongOverflow),
            _ => Some(ValidationKind::WrongType),
        }
    }

    fn serialize(
        &self,
        name: &str,
        value: Option<FieldValue>,
        _ctx: &NetworkContext,
    ) -> Result<Vec<u8>, SignerError> {
        let value = match value {
            None => return Ok(vec![0; 9]),
            Some(v) => v,
        };
        let zero = matches!(value, FieldValue::Int(0))
            || matches!(value, FieldValue::Long(a) if a.is_zero());
        if zero {
            return Ok(vec![0; 9]);
        }
        let mut out = vec![1];
        out.extend_from_slice(&long_bytes(name, value)?);
        Ok(out)
    }
}

/// Atomic-container marker: a zero byte when the transaction is standalone,
/// otherwise a presence byte plus the trusted sender address.
///
/// The built-in registry stops at the transaction versions that predate
/// atomic containers; this codec is for caller-assembled layouts.
pub struct AtomicBadge {
    required: bool,
}

impl AtomicBadge {
    pub fn new(required: bool) -> Self {
        AtomicBadge { required }
    }
}

impl FieldCodec for AtomicBadge {
    fn required(&self) -> bool {
        self.required
    }

    fn validate(&self, value: Option<FieldValue>, ctx: &NetworkContext) -> Option<ValidationKind> {
        value.and_then(|v| self.check(v, ctx))
    }

    fn check(&self, value: FieldValue, _ctx: &NetworkContext) -> Option<ValidationKind> {
        match value {
            FieldValue::Badge(_) => None,
            _ => Some(ValidationKind::WrongType),
        }
    }

    fn serialize(
        &self,
        name: &str,
        value: Option<FieldValue>,
        _ctx: &NetworkContext,
    ) -> Result<Vec<u8>, SignerError> {
        let badge = match value {
            None => return Ok(vec![0]),
            Some(FieldValue::Badge(b)) => b,
            Some(_) => return Err(wrong_type(name, "an atomic badge")),
        };
        match &badge.trusted_sender {
            None => Ok(vec![0]),
            Some(sender) => {
                let mut out = vec![1];
                out.extend(from_base58(sender)?);
                Ok(out)
            }
        }
    }
}

/// Contract API version given as `major.minor`, encoded as two big-endian
/// 16-bit integers.
///
/// Appears in contract transaction versions newer than the registry's
/// built-in layouts; kept public for caller-assembled [`Schema`]s.
///
/// [`Schema`]: crate::encode::schema::Schema
pub struct ContractApiVersion {
    required: bool,
}

impl ContractApiVersion {
    pub fn new(required: bool) -> Self {
        ContractApiVersion { required }
    }
}

impl FieldCodec for ContractApiVersion {
    fn required(&self) -> bool {
        self.required
    }

    fn serialize(
        &self,
        name: &str,
        value: Option<FieldValue>,
        _ctx: &NetworkContext,
    ) -> Result<Vec<u8>, SignerError> {
        let s = str_value(name, present(name, value)?)?;
        let bad = || wrong_type(name, "a version of the form 'major.minor'");
        let (major, minor) = s.split_once('.').ok_or_else(bad)?;
        let major: u16 = major.parse().map_err(|_| bad())?;
        let minor: u16 = minor.parse().map_err(|_| bad())?;
        let mut out = short_to_bytes(major).to_vec();
        out.extend_from_slice(&short_to_bytes(minor));
        Ok(out)
    }
}

/// Contract result-validation policy: a tag byte, plus the address list for
/// the majority-with-one-of variant.
///
/// Like [`ContractApiVersion`], this belongs to contract transaction
/// versions beyond the built-in registry and exists for caller-assembled
/// layouts.
pub struct ValidationPolicy {
    required: bool,
}

impl ValidationPolicy {
    pub fn new(required: bool) -> Self {
        ValidationPolicy { required }
    }
}

impl FieldCodec for ValidationPolicy {
    fn required(&self) -> bool {
        self.required
    }

    fn serialize(
        &self,
        name: &str,
        value: Option<FieldValue>,
        _ctx: &NetworkContext,
    ) -> Result<Vec<u8>, SignerError> {
        let policy = match present(name, value)? {
            FieldValue::Policy(p) => p,
            _ => return Err(wrong_type(name, "a validation policy")),
        };
        match policy {
            Policy::Any => Ok(vec![0]),
            Policy::Majority => Ok(vec![1]),
            Policy::MajorityWithOneOf { addresses } => {
                let count = u16::try_from(addresses.len())
                    .map_err(|_| wrong_type(name, "a bounded address list"))?;
                let mut out = vec![2];
                out.extend_from_slice(&short_to_bytes(count));
                for addr in addresses {
                    out.extend(from_base58(addr)?);
                }
                Ok(out)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::value::{Amount, AtomicBadge as Badge, DataEntry, Role, Transfer};

    fn ctx() -> NetworkContext {
        NetworkContext::testnet()
    }

    #[test]
    fn byte_and_short_ranges() {
        let byte = Byte::new(true);
        assert_eq!(
            byte.serialize("version", Some(FieldValue::Int(2)), &ctx()).unwrap(),
            vec![2]
        );
        assert!(byte.serialize("version", Some(FieldValue::Int(256)), &ctx()).is_err());
        assert_eq!(
            byte.check(FieldValue::Int(300), &ctx()),
            Some(ValidationKind::OutOfRange { min: 0, max: 255 })
        );

        let short = Short::new(true);
        assert_eq!(
            short
                .serialize("count", Some(FieldValue::Int(0x0102)), &ctx())
                .unwrap(),
            vec![1, 2]
        );
    }

    #[test]
    fn missing_required_field_is_a_hard_error_on_serialize() {
        let long = Long::new(true);
        assert!(matches!(
            long.serialize("fee", None, &ctx()),
            Err(SignerError::MissingField(_))
        ));
        assert_eq!(long.validate(None, &ctx()), Some(ValidationKind::Required));
    }

    #[test]
    fn long_encodes_amounts_and_flags_overflow() {
        let long = Long::new(true);
        let amount = Amount::Int(1540202842920);
        assert_eq!(
            long.serialize("timestamp", Some(FieldValue::Long(&amount)), &ctx())
                .unwrap(),
            vec![0x00, 0x00, 0x01, 0x66, 0x9b, 0x3e, 0x4b, 0x28]
        );

        let too_big: Amount = "200000000000000000000".parse().unwrap();
        assert_eq!(
            long.check(FieldValue::Long(&too_big), &ctx()),
            Some(ValidationKind::LongOverflow)
        );
    }

    #[test]
    fn base64_requires_marker() {
        let codec = Base64::new(true);
        assert_eq!(
            codec.check(FieldValue::Str("AQID"), &ctx()),
            Some(ValidationKind::Base64Prefix)
        );
        assert_eq!(
            codec
                .serialize("script", Some(FieldValue::Str("base64:AQID")), &ctx())
                .unwrap(),
            vec![0, 3, 1, 2, 3]
        );
    }

    #[test]
    fn base64_four_byte_width() {
        let codec = Base64::with_width(true, LengthWidth::Four);
        assert_eq!(
            codec
                .serialize("image", Some(FieldValue::Str("base64:AQID")), &ctx())
                .unwrap(),
            vec![0, 0, 0, 3, 1, 2, 3]
        );
    }

    #[test]
    fn asset_id_sentinel_and_absence() {
        let codec = AssetId::new(true);
        assert_eq!(codec.serialize("assetId", None, &ctx()).unwrap(), vec![0]);
        assert_eq!(
            codec
                .serialize("assetId", Some(FieldValue::Str("WAVES")), &ctx())
                .unwrap(),
            vec![0]
        );
        assert_eq!(codec.validate(None, &ctx()), None);

        // a real id gets the presence byte
        let id = "9gqcTyupiDWuogWhKv8G3EMwjMaobkw9Lpys4EY2F62t";
        let bytes = codec
            .serialize("assetId", Some(FieldValue::Str(id)), &ctx())
            .unwrap();
        assert_eq!(bytes[0], 1);
        assert_eq!(bytes.len(), 33);
    }

    #[test]
    fn recipient_switches_on_alias_pattern() {
        let codec = Recipient::new(true);
        let bytes = codec
            .serialize("recipient", Some(FieldValue::Str("alias:T:merchant")), &ctx())
            .unwrap();
        assert_eq!(&bytes[..2], &[ALIAS_VERSION, b'T']);
        assert_eq!(&bytes[2..4], &[0, 8]);
        assert_eq!(&bytes[4..], b"merchant");

        let addr = "3FV34HcWJEq7eQEvzWdwyhsxrMr2qHBN5k6";
        let bytes = codec
            .serialize("recipient", Some(FieldValue::Str(addr)), &ctx())
            .unwrap();
        assert_eq!(bytes, from_base58(addr).unwrap());
    }

    #[test]
    fn recipient_alias_needs_network_byte() {
        let codec = Recipient::new(true);
        let ctx = NetworkContext::default();
        assert!(matches!(
            codec.serialize("recipient", Some(FieldValue::Str("alias:T:shop")), &ctx),
            Err(SignerError::Configuration(_))
        ));
    }

    #[test]
    fn attachment_absent_is_empty_with_length() {
        let codec = Attachment::new(false);
        assert_eq!(codec.serialize("attachment", None, &ctx()).unwrap(), vec![0, 0]);
    }

    #[test]
    fn attachment_limit() {
        let codec = Attachment::new(false);
        let long_payload = crate::convert::to_base58(&[7u8; 141]);
        assert_eq!(
            codec.check(FieldValue::Str(&long_payload), &ctx()),
            Some(ValidationKind::LimitExceeded {
                limit: TRANSFER_ATTACHMENT_BYTE_LIMIT
            })
        );
        assert!(codec
            .serialize("attachment", Some(FieldValue::Str(&long_payload)), &ctx())
            .is_err());
    }

    #[test]
    fn transfers_layout() {
        let codec = Transfers::new(true);
        let addr = "3FV34HcWJEq7eQEvzWdwyhsxrMr2qHBN5k6";
        let list = vec![Transfer {
            recipient: addr.to_string(),
            amount: Amount::Int(5),
        }];
        let bytes = codec
            .serialize("transfers", Some(FieldValue::Transfers(&list)), &ctx())
            .unwrap();
        let addr_raw = from_base58(addr).unwrap();
        assert_eq!(&bytes[..2], &[0, 1]);
        assert_eq!(&bytes[2..2 + addr_raw.len()], &addr_raw[..]);
        assert_eq!(&bytes[2 + addr_raw.len()..], &[0, 0, 0, 0, 0, 0, 0, 5]);
    }

    #[test]
    fn data_entries_tags_and_widths() {
        use crate::encode::value::DataValue;

        let entries = vec![
            DataEntry {
                key: "n".to_string(),
                value: DataValue::Integer(Amount::Int(1)),
            },
            DataEntry {
                key: "ok".to_string(),
                value: DataValue::Boolean(true),
            },
            DataEntry {
                key: "b".to_string(),
                value: DataValue::Binary("base64:AQ==".to_string()),
            },
            DataEntry {
                key: "s".to_string(),
                value: DataValue::String("hi".to_string()),
            },
        ];

        let two = DataEntries::new(true)
            .serialize("data", Some(FieldValue::DataEntries(&entries)), &ctx())
            .unwrap();
        let expected_two: Vec<u8> = vec![
            0, 4, // count
            0, 1, b'n', 0, 0, 0, 0, 0, 0, 0, 0, 1, // integer
            0, 2, b'o', b'k', 1, 1, // boolean
            0, 1, b'b', 2, 0, 1, 1, // binary, short length
            0, 1, b's', 3, 0, 2, b'h', b'i', // string, short length
        ];
        assert_eq!(two, expected_two);

        let four = DataEntries::with_width(true, LengthWidth::Four)
            .serialize("params", Some(FieldValue::DataEntries(&entries)), &ctx())
            .unwrap();
        let expected_four: Vec<u8> = vec![
            0, 4,
            0, 1, b'n', 0, 0, 0, 0, 0, 0, 0, 0, 1,
            0, 2, b'o', b'k', 1, 1,
            0, 1, b'b', 2, 0, 0, 0, 1, 1, // binary, int length
            0, 1, b's', 3, 0, 0, 0, 2, b'h', b'i',
        ];
        assert_eq!(four, expected_four);
    }

    #[test]
    fn data_entries_empty_list() {
        let codec = DataEntries::new(true);
        let entries: Vec<DataEntry> = vec![];
        assert_eq!(
            codec
                .serialize("data", Some(FieldValue::DataEntries(&entries)), &ctx())
                .unwrap(),
            vec![0, 0]
        );
    }

    #[test]
    fn data_entries_binary_without_marker() {
        use crate::encode::value::DataValue;

        let entries = vec![DataEntry {
            key: "b".to_string(),
            value: DataValue::Binary("AQID".to_string()),
        }];
        let codec = DataEntries::new(true);
        assert_eq!(
            codec.check(FieldValue::DataEntries(&entries), &ctx()),
            Some(ValidationKind::Base64Prefix)
        );
        assert!(codec
            .serialize("data", Some(FieldValue::DataEntries(&entries)), &ctx())
            .is_err());
    }

    #[test]
    fn data_entries_size_ceiling() {
        use crate::encode::value::DataValue;

        let blob = "x".repeat(DATA_ENTRIES_BYTE_LIMIT);
        let entries = vec![DataEntry {
            key: "big".to_string(),
            value: DataValue::String(blob),
        }];
        let result = DataEntries::new(true).serialize(
            "data",
            Some(FieldValue::DataEntries(&entries)),
            &ctx(),
        );
        assert!(matches!(
            result,
            Err(SignerError::Constraint(ConstraintError::DataTooLarge { .. }))
        ));
    }

    #[test]
    fn recipients_empty_list_keeps_count() {
        let codec = Recipients::new(true);
        let list: Vec<String> = vec![];
        assert_eq!(
            codec
                .serialize("recipients", Some(FieldValue::Recipients(&list)), &ctx())
                .unwrap(),
            vec![0, 0, 0, 0]
        );
    }

    #[test]
    fn permission_fields() {
        let op = PermissionOpType::new(true);
        assert_eq!(
            op.serialize("opType", Some(FieldValue::OpType(crate::encode::PermissionOp::Add)), &ctx())
                .unwrap(),
            vec![b'a']
        );

        let role = PermissionRole::new(true);
        assert_eq!(
            role.serialize("role", Some(FieldValue::Role(Role::Dex)), &ctx())
                .unwrap(),
            vec![3]
        );

        let due = PermissionDueTimestamp::new(true);
        assert_eq!(due.serialize("dueTimestamp", None, &ctx()).unwrap(), vec![0; 9]);
        assert_eq!(
            due.serialize("dueTimestamp", Some(FieldValue::Int(0)), &ctx())
                .unwrap(),
            vec![0; 9]
        );
        let ts = Amount::Int(1540212842920);
        assert_eq!(
            due.serialize("dueTimestamp", Some(FieldValue::Long(&ts)), &ctx())
                .unwrap(),
            vec![1, 0x00, 0x00, 0x01, 0x66, 0x9b, 0xd6, 0xe1, 0xa8]
        );
    }

    #[test]
    fn atomic_badge_presence() {
        let codec = AtomicBadge::new(false);
        assert_eq!(codec.serialize("atomicBadge", None, &ctx()).unwrap(), vec![0]);

        let standalone = Badge::default();
        assert_eq!(
            codec
                .serialize("atomicBadge", Some(FieldValue::Badge(&standalone)), &ctx())
                .unwrap(),
            vec![0]
        );

        let sender = "3FV34HcWJEq7eQEvzWdwyhsxrMr2qHBN5k6";
        let member = Badge {
            trusted_sender: Some(sender.to_string()),
        };
        let bytes = codec
            .serialize("atomicBadge", Some(FieldValue::Badge(&member)), &ctx())
            .unwrap();
        assert_eq!(bytes[0], 1);
        assert_eq!(&bytes[1..], &from_base58(sender).unwrap()[..]);
    }

    #[test]
    fn contract_api_version() {
        let codec = ContractApiVersion::new(true);
        assert_eq!(
            codec
                .serialize("apiVersion", Some(FieldValue::Str("1.0")), &ctx())
                .unwrap(),
            vec![0, 1, 0, 0]
        );
        assert!(codec
            .serialize("apiVersion", Some(FieldValue::Str("1")), &ctx())
            .is_err());
    }

    #[test]
    fn validation_policy_tags() {
        let codec = ValidationPolicy::new(true);
        assert_eq!(
            codec
                .serialize("validationPolicy", Some(FieldValue::Policy(&Policy::Any)), &ctx())
                .unwrap(),
            vec![0]
        );
        assert_eq!(
            codec
                .serialize(
                    "validationPolicy",
                    Some(FieldValue::Policy(&Policy::Majority)),
                    &ctx()
                )
                .unwrap(),
            vec![1]
        );

        let addr = "3FV34HcWJEq7eQEvzWdwyhsxrMr2qHBN5k6";
        let policy = Policy::MajorityWithOneOf {
            addresses: vec![addr.to_string()],
        };
        let bytes = codec
            .serialize("validationPolicy", Some(FieldValue::Policy(&policy)), &ctx())
            .unwrap();
        assert_eq!(&bytes[..3], &[2, 0, 1]);
        assert_eq!(&bytes[3..], &from_base58(addr).unwrap()[..]);
    }
}
