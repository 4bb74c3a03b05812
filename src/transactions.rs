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
//! # Transaction requests
//!
//! Typed request structs, one per transaction family, mirroring the JSON
//! shape clients submit. Each struct exposes its fields to the encoder
//! through [`FieldSource`], and [`TransactionRequest`] ties a request to
//! its wire schema.

use crate::encode::registry;
use crate::encode::schema::{FieldSource, Schema};
use crate::encode::value::{
    Amount, DataEntry, FieldValue, PermissionOp, Role, Transfer,
};
use crate::error::ConstraintError;

fn opt_str(value: &Option<String>) -> Option<FieldValue<'_>> {
    value.as_deref().map(FieldValue::Str)
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub sender_public_key: String,
    pub chain_id: Option<u8>,
    pub name: String,
    pub description: String,
    pub quantity: Amount,
    pub precision: u8,
    pub reissuable: bool,
    pub fee: Amount,
    pub timestamp: Amount,
    pub script: Option<String>,
}

impl FieldSource for Issue {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "senderPublicKey" => Some(FieldValue::Str(&self.sender_public_key)),
            "chainId" => self.chain_id.map(|b| FieldValue::Int(b as i64)),
            "name" => Some(FieldValue::Str(&self.name)),
            "description" => Some(FieldValue::Str(&self.description)),
            "quantity" => Some(FieldValue::Long(&self.quantity)),
            "precision" => Some(FieldValue::Int(self.precision as i64)),
            "reissuable" => Some(FieldValue::Bool(self.reissuable)),
            "fee" => Some(FieldValue::Long(&self.fee)),
            "timestamp" => Some(FieldValue::Long(&self.timestamp)),
            "script" => opt_str(&self.script),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub sender_public_key: String,
    pub asset_id: Option<String>,
    pub fee_asset_id: Option<String>,
    pub timestamp: Amount,
    pub amount: Amount,
    pub fee: Amount,
    pub recipient: String,
    pub attachment: Option<String>,
}

impl FieldSource for TransferRequest {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "senderPublicKey" => Some(FieldValue::Str(&self.sender_public_key)),
            "assetId" => opt_str(&self.asset_id),
            "feeAssetId" => opt_str(&self.fee_asset_id),
            "timestamp" => Some(FieldValue::Long(&self.timestamp)),
            "amount" => Some(FieldValue::Long(&self.amount)),
            "fee" => Some(FieldValue::Long(&self.fee)),
            "recipient" => Some(FieldValue::Str(&self.recipient)),
            "attachment" => opt_str(&self.attachment),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reissue {
    pub sender_public_key: String,
    pub chain_id: Option<u8>,
    pub asset_id: String,
    pub quantity: Amount,
    pub reissuable: bool,
    pub fee: Amount,
    pub timestamp: Amount,
}

impl FieldSource for Reissue {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "senderPublicKey" => Some(FieldValue::Str(&self.sender_public_key)),
            "chainId" => self.chain_id.map(|b| FieldValue::Int(b as i64)),
            "assetId" => Some(FieldValue::Str(&self.asset_id)),
            "quantity" => Some(FieldValue::Long(&self.quantity)),
            "reissuable" => Some(FieldValue::Bool(self.reissuable)),
            "fee" => Some(FieldValue::Long(&self.fee)),
            "timestamp" => Some(FieldValue::Long(&self.timestamp)),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Burn {
    pub sender_public_key: String,
    pub chain_id: Option<u8>,
    pub asset_id: String,
    pub quantity: Amount,
    pub fee: Amount,
    pub timestamp: Amount,
}

impl FieldSource for Burn {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "senderPublicKey" => Some(FieldValue::Str(&self.sender_public_key)),
            "chainId" => self.chain_id.map(|b| FieldValue::Int(b as i64)),
            "assetId" => Some(FieldValue::Str(&self.asset_id)),
            "quantity" => Some(FieldValue::Long(&self.quantity)),
            "fee" => Some(FieldValue::Long(&self.fee)),
            "timestamp" => Some(FieldValue::Long(&self.timestamp)),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lease {
    pub sender_public_key: String,
    pub recipient: String,
    pub amount: Amount,
    pub fee: Amount,
    pub timestamp: Amount,
}

impl FieldSource for Lease {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "senderPublicKey" => Some(FieldValue::Str(&self.sender_public_key)),
            "recipient" => Some(FieldValue::Str(&self.recipient)),
            "amount" => Some(FieldValue::Long(&self.amount)),
            "fee" => Some(FieldValue::Long(&self.fee)),
            "timestamp" => Some(FieldValue::Long(&self.timestamp)),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelLease {
    pub sender_public_key: String,
    pub chain_id: Option<u8>,
    pub lease_id: String,
    pub fee: Amount,
    pub timestamp: Amount,
}

impl FieldSource for CancelLease {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "senderPublicKey" => Some(FieldValue::Str(&self.sender_public_key)),
            "chainId" => self.chain_id.map(|b| FieldValue::Int(b as i64)),
            "leaseId" => Some(FieldValue::Str(&self.lease_id)),
            "fee" => Some(FieldValue::Long(&self.fee)),
            "timestamp" => Some(FieldValue::Long(&self.timestamp)),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAlias {
    pub sender_public_key: String,
    pub alias: String,
    pub fee: Amount,
    pub timestamp: Amount,
}

impl FieldSource for CreateAlias {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "senderPublicKey" => Some(FieldValue::Str(&self.sender_public_key)),
            "alias" => Some(FieldValue::Str(&self.alias)),
            "fee" => Some(FieldValue::Long(&self.fee)),
            "timestamp" => Some(FieldValue::Long(&self.timestamp)),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MassTransfer {
    pub sender_public_key: String,
    pub asset_id: Option<String>,
    pub transfers: Vec<Transfer>,
    pub timestamp: Amount,
    pub fee: Amount,
    pub attachment: Option<String>,
}

impl FieldSource for MassTransfer {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "senderPublicKey" => Some(FieldValue::Str(&self.sender_public_key)),
            "assetId" => opt_str(&self.asset_id),
            "transfers" => Some(FieldValue::Transfers(&self.transfers)),
            "timestamp" => Some(FieldValue::Long(&self.timestamp)),
            "fee" => Some(FieldValue::Long(&self.fee)),
            "attachment" => opt_str(&self.attachment),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Data {
    pub sender_public_key: String,
    pub author_public_key: String,
    pub data: Vec<DataEntry>,
    pub timestamp: Amount,
    pub fee: Amount,
}

impl FieldSource for Data {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "senderPublicKey" => Some(FieldValue::Str(&self.sender_public_key)),
            "authorPublicKey" => Some(FieldValue::Str(&self.author_public_key)),
            "data" => Some(FieldValue::DataEntries(&self.data)),
            "timestamp" => Some(FieldValue::Long(&self.timestamp)),
            "fee" => Some(FieldValue::Long(&self.fee)),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetScript {
    pub sender_public_key: String,
    pub chain_id: Option<u8>,
    pub script: Option<String>,
    pub name: String,
    pub description: String,
    pub fee: Amount,
    pub timestamp: Amount,
}

impl FieldSource for SetScript {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "senderPublicKey" => Some(FieldValue::Str(&self.sender_public_key)),
            "chainId" => self.chain_id.map(|b| FieldValue::Int(b as i64)),
            "script" => opt_str(&self.script),
            "name" => Some(FieldValue::Str(&self.name)),
            "description" => Some(FieldValue::Str(&self.description)),
            "fee" => Some(FieldValue::Long(&self.fee)),
            "timestamp" => Some(FieldValue::Long(&self.timestamp)),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sponsorship {
    pub sender_public_key: String,
    pub asset_id: String,
    pub min_sponsored_asset_fee: Amount,
    pub fee: Amount,
    pub timestamp: Amount,
}

impl FieldSource for Sponsorship {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "senderPublicKey" => Some(FieldValue::Str(&self.sender_public_key)),
            "assetId" => Some(FieldValue::Str(&self.asset_id)),
            "minSponsoredAssetFee" => Some(FieldValue::Long(&self.min_sponsored_asset_fee)),
            "fee" => Some(FieldValue::Long(&self.fee)),
            "timestamp" => Some(FieldValue::Long(&self.timestamp)),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Permit {
    pub sender_public_key: String,
    pub target: String,
    pub timestamp: Amount,
    pub fee: Amount,
    pub op_type: PermissionOp,
    pub role: Role,
    pub due_timestamp: Option<Amount>,
}

impl FieldSource for Permit {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "senderPublicKey" => Some(FieldValue::Str(&self.sender_public_key)),
            "target" => Some(FieldValue::Str(&self.target)),
            "timestamp" => Some(FieldValue::Long(&self.timestamp)),
            "fee" => Some(FieldValue::Long(&self.fee)),
            "opType" => Some(FieldValue::OpType(self.op_type)),
            "role" => Some(FieldValue::Role(self.role)),
            "dueTimestamp" => self.due_timestamp.as_ref().map(FieldValue::Long),
            _ => None,
        }
    }
}

fn default_contract_version() -> u8 {
    1
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateContract {
    #[serde(default = "default_contract_version")]
    pub version: u8,
    pub sender_public_key: String,
    pub image: String,
    pub image_hash: String,
    pub contract_name: String,
    pub params: Vec<DataEntry>,
    pub fee: Amount,
    pub timestamp: Amount,
    pub fee_asset_id: Option<String>,
}

impl FieldSource for CreateContract {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "senderPublicKey" => Some(FieldValue::Str(&self.sender_public_key)),
            "image" => Some(FieldValue::Str(&self.image)),
            "imageHash" => Some(FieldValue::Str(&self.image_hash)),
            "contractName" => Some(FieldValue::Str(&self.contract_name)),
            "params" => Some(FieldValue::DataEntries(&self.params)),
            "fee" => Some(FieldValue::Long(&self.fee)),
            "timestamp" => Some(FieldValue::Long(&self.timestamp)),
            "feeAssetId" => opt_str(&self.fee_asset_id),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallContract {
    #[serde(default = "default_contract_version")]
    pub version: u8,
    pub sender_public_key: String,
    pub contract_id: String,
    pub params: Vec<DataEntry>,
    pub fee: Amount,
    pub timestamp: Amount,
    pub contract_version: Option<i32>,
    pub fee_asset_id: Option<String>,
}

impl FieldSource for CallContract {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "senderPublicKey" => Some(FieldValue::Str(&self.sender_public_key)),
            "contractId" => Some(FieldValue::Str(&self.contract_id)),
            "params" => Some(FieldValue::DataEntries(&self.params)),
            "fee" => Some(FieldValue::Long(&self.fee)),
            "timestamp" => Some(FieldValue::Long(&self.timestamp)),
            "contractVersion" => self.contract_version.map(|v| FieldValue::Int(v as i64)),
            "feeAssetId" => opt_str(&self.fee_asset_id),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisableContract {
    pub sender_public_key: String,
    pub contract_id: String,
    pub fee: Amount,
    pub timestamp: Amount,
}

impl FieldSource for DisableContract {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "senderPublicKey" => Some(FieldValue::Str(&self.sender_public_key)),
            "contractId" => Some(FieldValue::Str(&self.contract_id)),
            "fee" => Some(FieldValue::Long(&self.fee)),
            "timestamp" => Some(FieldValue::Long(&self.timestamp)),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyRegisterNode {
    pub sender_public_key: String,
    pub target_pub_key: String,
    pub node_name: String,
    pub op_type: PermissionOp,
    pub timestamp: Amount,
    pub fee: Amount,
}

impl FieldSource for PolicyRegisterNode {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "senderPublicKey" => Some(FieldValue::Str(&self.sender_public_key)),
            "targetPubKey" => Some(FieldValue::Str(&self.target_pub_key)),
            "nodeName" => Some(FieldValue::Str(&self.node_name)),
            "opType" => Some(FieldValue::OpType(self.op_type)),
            "timestamp" => Some(FieldValue::Long(&self.timestamp)),
            "fee" => Some(FieldValue::Long(&self.fee)),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyCreate {
    pub sender_public_key: String,
    pub policy_name: String,
    pub description: String,
    pub recipients: Vec<String>,
    pub owners: Vec<String>,
    pub timestamp: Amount,
    pub fee: Amount,
}

impl FieldSource for PolicyCreate {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "senderPublicKey" => Some(FieldValue::Str(&self.sender_public_key)),
            "policyName" => Some(FieldValue::Str(&self.policy_name)),
            "description" => Some(FieldValue::Str(&self.description)),
            "recipients" => Some(FieldValue::Recipients(&self.recipients)),
            "owners" => Some(FieldValue::Recipients(&self.owners)),
            "timestamp" => Some(FieldValue::Long(&self.timestamp)),
            "fee" => Some(FieldValue::Long(&self.fee)),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyUpdate {
    pub sender_public_key: String,
    pub policy_id: String,
    pub recipients: Vec<String>,
    pub owners: Vec<String>,
    pub op_type: PermissionOp,
    pub timestamp: Amount,
    pub fee: Amount,
}

impl FieldSource for PolicyUpdate {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "senderPublicKey" => Some(FieldValue::Str(&self.sender_public_key)),
            "policyId" => Some(FieldValue::Str(&self.policy_id)),
            "recipients" => Some(FieldValue::Recipients(&self.recipients)),
            "owners" => Some(FieldValue::Recipients(&self.owners)),
            "opType" => Some(FieldValue::OpType(self.op_type)),
            "timestamp" => Some(FieldValue::Long(&self.timestamp)),
            "fee" => Some(FieldValue::Long(&self.fee)),
            _ => None,
        }
    }
}

/// Any signable request, tagged by its name in JSON.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TransactionRequest {
    Issue(Issue),
    Transfer(TransferRequest),
    Reissue(Reissue),
    Burn(Burn),
    Lease(Lease),
    #[serde(rename = "cancelLeasing")]
    CancelLease(CancelLease),
    CreateAlias(CreateAlias),
    MassTransfer(MassTransfer),
    Data(Data),
    SetScript(SetScript),
    Sponsorship(Sponsorship),
    Permit(Permit),
    CreateContract(CreateContract),
    CallContract(CallContract),
    DisableContract(DisableContract),
    PolicyRegisterNode(PolicyRegisterNode),
    PolicyCreate(PolicyCreate),
    PolicyUpdate(PolicyUpdate),
}

impl TransactionRequest {
    pub fn tx_type(&self) -> u8 {
        match self {
            TransactionRequest::Issue(_) => 3,
            TransactionRequest::Transfer(_) => 4,
            TransactionRequest::Reissue(_) => 5,
            TransactionRequest::Burn(_) => 6,
            TransactionRequest::Lease(_) => 8,
            TransactionRequest::CancelLease(_) => 9,
            TransactionRequest::CreateAlias(_) => 10,
            TransactionRequest::MassTransfer(_) => 11,
            TransactionRequest::Data(_) => 12,
            TransactionRequest::SetScript(_) => 13,
            TransactionRequest::Sponsorship(_) => 14,
            TransactionRequest::Permit(_) => 102,
            TransactionRequest::CreateContract(_) => 103,
            TransactionRequest::CallContract(_) => 104,
            TransactionRequest::DisableContract(_) => 106,
            TransactionRequest::PolicyRegisterNode(_) => 111,
            TransactionRequest::PolicyCreate(_) => 112,
            TransactionRequest::PolicyUpdate(_) => 113,
        }
    }

    pub fn version(&self) -> u8 {
        match self {
            TransactionRequest::Issue(_)
            | TransactionRequest::Transfer(_)
            | TransactionRequest::Reissue(_)
            | TransactionRequest::Burn(_)
            | TransactionRequest::Lease(_)
            | TransactionRequest::CancelLease(_)
            | TransactionRequest::CreateAlias(_) => 2,
            TransactionRequest::CreateContract(tx) => tx.version,
            TransactionRequest::CallContract(tx) => tx.version,
            _ => 1,
        }
    }

    pub fn schema(&self) -> Result<&'static Schema, ConstraintError> {
        registry::by_type_and_version(self.tx_type(), self.version())
    }

    pub fn source(&self) -> &dyn FieldSource {
        match self {
            TransactionRequest::Issue(tx) => tx,
            TransactionRequest::Transfer(tx) => tx,
            TransactionRequest::Reissue(tx) => tx,
            TransactionRequest::Burn(tx) => tx,
            TransactionRequest::Lease(tx) => tx,
            TransactionRequest::CancelLease(tx) => tx,
            TransactionRequest::CreateAlias(tx) => tx,
            TransactionRequest::MassTransfer(tx) => tx,
            TransactionRequest::Data(tx) => tx,
            TransactionRequest::SetScript(tx) => tx,
            TransactionRequest::Sponsorship(tx) => tx,
            TransactionRequest::Permit(tx) => tx,
            TransactionRequest::CreateContract(tx) => tx,
            TransactionRequest::CallContract(tx) => tx,
            TransactionRequest::DisableContract(tx) => tx,
            TransactionRequest::PolicyRegisterNode(tx) => tx,
            TransactionRequest::PolicyCreate(tx) => tx,
            TransactionRequest::PolicyUpdate(tx) => tx,
        }
    }
}
