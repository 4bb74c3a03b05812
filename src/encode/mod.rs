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
//! # Wire encoding
//!
//! Byte assembly of signable transaction bodies. A [`schema::Schema`] is an
//! ordered list of literal bytes and named fields, each field bound to a
//! [`codec::FieldCodec`] that knows its binary layout.

pub mod codec;
pub mod registry;
pub mod schema;
pub mod value;

use std::fmt;

pub use value::{
    Amount, AtomicBadge, DataEntry, DataValue, FieldValue, PermissionOp, Role, Transfer,
    ValidationPolicy,
};

/// What went wrong with a single field during pre-flight validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValidationKind {
    /// Field is mandatory for this schema and no value was supplied
    Required,
    /// Numeric value does not fit the field width
    OutOfRange { min: i64, max: i64 },
    /// Binary payload must carry the `base64:` marker
    Base64Prefix,
    /// Decoded payload exceeds the protocol limit, in bytes
    LimitExceeded { limit: usize },
    /// Value cannot be represented as a signed 64-bit quantity
    LongOverflow,
    /// Supplied value has a shape the field cannot encode
    WrongType,
}

/// A field-level validation failure. Validation never aborts on the first
/// problem, callers get the full list for the transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub kind: ValidationKind,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.kind {
            ValidationKind::Required => write!(f, "field '{}' is required", self.field),
            ValidationKind::OutOfRange { min, max } => write!(
                f,
                "field '{}' is out of range [{}, {}]",
                self.field, min, max
            ),
            ValidationKind::Base64Prefix => write!(
                f,
                "field '{}' must start with the 'base64:' marker",
                self.field
            ),
            ValidationKind::LimitExceeded { limit } => write!(
                f,
                "field '{}' exceeds the limit of {} bytes",
                self.field, limit
            ),
            ValidationKind::LongOverflow => {
                write!(f, "field '{}' does not fit into 64 bits", self.field)
            }
            ValidationKind::WrongType => {
                write!(f, "field '{}' has an unexpected value shape", self.field)
            }
        }
    }
}
