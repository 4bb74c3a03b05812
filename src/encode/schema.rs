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
//! # Transaction schemas
//!
//! A schema fixes the byte layout of one transaction version as an ordered
//! list of entries. Encoding walks the entries once, asking the request for
//! each named field and concatenating the produced segments.

use crate::chain::NetworkContext;
use crate::error::{ConstraintError, SignerError};

use super::codec::FieldCodec;
use super::value::FieldValue;
use super::ValidationError;

/// Supplies field values by name. Implemented by every transaction request.
pub trait FieldSource {
    fn field(&self, name: &str) -> Option<FieldValue<'_>>;
}

/// One position in the wire layout.
pub enum Entry {
    /// A fixed byte emitted as-is, used for type and version markers and
    /// for flags the protocol pins to a constant
    Literal(u8),
    /// A named field encoded by its codec
    Field(&'static str, Box<dyn FieldCodec>),
}

impl Entry {
    pub fn field<C: FieldCodec + 'static>(name: &'static str, codec: C) -> Entry {
        Entry::Field(name, Box::new(codec))
    }
}

/// Ordered layout of a single transaction type and version.
pub struct Schema {
    tx_type: u8,
    version: u8,
    name: &'static str,
    entries: Vec<Entry>,
}

impl Schema {
    pub fn new(
        tx_type: u8,
        version: u8,
        name: &'static str,
        entries: Vec<Entry>,
    ) -> Result<Schema, ConstraintError> {
        if entries.is_empty() {
            return Err(ConstraintError::EmptySchema);
        }
        Ok(Schema {
            tx_type,
            version,
            name,
            entries,
        })
    }

    pub fn tx_type(&self) -> u8 {
        self.tx_type
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Collect every field-level problem. An empty list means the request
    /// can be encoded.
    pub fn validate(&self, source: &dyn FieldSource, ctx: &NetworkContext) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        for entry in &self.entries {
            if let Entry::Field(name, codec) = entry {
                if let Some(kind) = codec.validate(source.field(name), ctx) {
                    errors.push(ValidationError {
                        field: (*name).to_string(),
                        kind,
                    });
                }
            }
        }
        errors
    }

    /// Assemble the signable body by concatenating every entry's bytes in
    /// schema order.
    pub fn encode(
        &self,
        source: &dyn FieldSource,
        ctx: &NetworkContext,
    ) -> Result<Vec<u8>, SignerError> {
        let mut out = Vec::new();
        for entry in &self.entries {
            match entry {
                Entry::Literal(b) => out.push(*b),
                Entry::Field(name, codec) => {
                    out.extend(codec.serialize(name, source.field(name), ctx)?);
                }
            }
        }
        Ok(out)
    }
}
