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
//! # Signing facade
//!
//! Ties a [`NetworkContext`] to the encoding and crypto layers: produce the
//! signable body of a request, validate it field by field, sign it and
//! derive its id.

use crate::chain::NetworkContext;
use crate::convert::{from_base58, to_base58};
use crate::encode::ValidationError;
use crate::error::SignerError;
use crate::transactions::TransactionRequest;

pub struct TxSigner {
    ctx: NetworkContext,
}

impl TxSigner {
    pub fn new(ctx: NetworkContext) -> TxSigner {
        TxSigner { ctx }
    }

    pub fn context(&self) -> &NetworkContext {
        &self.ctx
    }

    /// The canonical signable byte body of a request.
    pub fn bytes(&self, tx: &TransactionRequest) -> Result<Vec<u8>, SignerError> {
        let schema = tx.schema()?;
        let bytes = schema.encode(tx.source(), &self.ctx)?;
        trace!(
            "assembled {} bytes for {} v{}",
            bytes.len(),
            schema.name(),
            schema.version()
        );
        Ok(bytes)
    }

    /// Every field-level problem of the request. Empty means encodable.
    pub fn validate(&self, tx: &TransactionRequest) -> Result<Vec<ValidationError>, SignerError> {
        let schema = tx.schema()?;
        Ok(schema.validate(tx.source(), &self.ctx))
    }

    /// Encode and sign in one step, returning the base58 signature.
    pub fn sign(&self, tx: &TransactionRequest, private_key: &str) -> Result<String, SignerError> {
        let bytes = self.bytes(tx)?;
        self.sign_bytes(&bytes, private_key)
    }

    /// Sign an already-assembled body with the context's backend.
    pub fn sign_bytes(&self, data: &[u8], private_key: &str) -> Result<String, SignerError> {
        let key = from_base58(private_key)?;
        let signature = self.ctx.backend().sign(&key, data)?;
        Ok(to_base58(&signature))
    }

    pub fn verify_signature(
        &self,
        public_key: &str,
        data: &[u8],
        signature: &str,
    ) -> Result<bool, SignerError> {
        let backend = self.ctx.backend();
        let key = from_base58(public_key)?;
        if key.len() != backend.public_key_length() {
            return Err(SignerError::InvalidData(format!(
                "public key must be {} bytes",
                backend.public_key_length()
            )));
        }
        let signature = from_base58(signature)?;
        Ok(backend.verify(&key, data, &signature))
    }

    /// Transaction id: the backend's fast hash of the signable body, base58.
    pub fn tx_id(&self, tx: &TransactionRequest) -> Result<String, SignerError> {
        let bytes = self.bytes(tx)?;
        Ok(to_base58(&self.ctx.backend().fast_hash(&bytes)))
    }
}
