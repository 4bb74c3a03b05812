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
//! # Schema registry
//!
//! Every supported (type, version) pair registered once, with lookups by
//! protocol type number, by name tag and by exact (type, version). The
//! by-number map keeps the latest registered version of a type, matching
//! node behavior for unversioned lookups.

use std::collections::HashMap;

use crate::convert::LengthWidth;
use crate::error::ConstraintError;

use super::codec::{
    Alias, AssetId, Attachment, Base58, Base58WithLength, Base64, Bool, Byte, DataEntries,
    Integer, Long, PermissionDueTimestamp, PermissionOpType, PermissionRole, Recipient,
    Recipients, StringWithLength, Transfers,
};
use super::schema::{Entry, Schema};

fn sender() -> Entry {
    Entry::field("senderPublicKey", Base58::new(true))
}

fn long(name: &'static str) -> Entry {
    Entry::field(name, Long::new(true))
}

fn string(name: &'static str) -> Entry {
    Entry::field(name, StringWithLength::new(true))
}

fn contract_params(name: &'static str) -> Entry {
    Entry::field(name, DataEntries::with_width(true, LengthWidth::Four))
}

pub struct Registry {
    schemas: Vec<Schema>,
    by_number: HashMap<u8, usize>,
    by_name: HashMap<&'static str, usize>,
    by_type_version: HashMap<(u8, u8), usize>,
}

impl Registry {
    fn register(&mut self, schema: Schema) {
        let idx = self.schemas.len();
        self.by_number.insert(schema.tx_type(), idx);
        self.by_name.insert(schema.name(), idx);
        self.by_type_version
            .insert((schema.tx_type(), schema.version()), idx);
        self.schemas.push(schema);
    }

    fn build() -> Registry {
        let mut reg = Registry {
            schemas: Vec::new(),
            by_number: HashMap::new(),
            by_name: HashMap::new(),
            by_type_version: HashMap::new(),
        };

        let add = |reg: &mut Registry, tx_type: u8, version: u8, name, entries| {
            let schema = Schema::new(tx_type, version, name, entries)
                .expect("registered layouts are non-empty");
            reg.register(schema);
        };

        add(
            &mut reg,
            3,
            2,
            "issue",
            vec![
                Entry::Literal(3),
                Entry::Literal(2),
                Entry::field("chainId", Byte::new(true)),
                sender(),
                string("name"),
                string("description"),
                long("quantity"),
                Entry::field("precision", Byte::new(true)),
                Entry::field("reissuable", Bool::new(true)),
                long("fee"),
                long("timestamp"),
                // script presence flag, scripted assets are always announced
                Entry::Literal(1),
                Entry::field("script", Base64::new(true)),
            ],
        );

        add(
            &mut reg,
            4,
            2,
            "transfer",
            vec![
                Entry::Literal(4),
                Entry::Literal(2),
                sender(),
                Entry::field("assetId", AssetId::new(false)),
                Entry::field("feeAssetId", AssetId::new(false)),
                long("timestamp"),
                long("amount"),
                long("fee"),
                Entry::field("recipient", Recipient::new(true)),
                Entry::field("attachment", Attachment::new(false)),
            ],
        );

        add(
            &mut reg,
            5,
            2,
            "reissue",
            vec![
                Entry::Literal(5),
                Entry::Literal(2),
                Entry::field("chainId", Byte::new(true)),
                sender(),
                Entry::field("assetId", Base58::new(true)),
                long("quantity"),
                Entry::field("reissuable", Bool::new(true)),
                long("fee"),
                long("timestamp"),
            ],
        );

        add(
            &mut reg,
            6,
            2,
            "burn",
            vec![
                Entry::Literal(6),
                Entry::Literal(2),
                Entry::field("chainId", Byte::new(true)),
                sender(),
                Entry::field("assetId", Base58::new(true)),
                long("quantity"),
                long("fee"),
                long("timestamp"),
            ],
        );

        add(
            &mut reg,
            8,
            2,
            "lease",
            vec![
                Entry::Literal(8),
                Entry::Literal(2),
                // leasing a custom asset is not supported by the protocol
                Entry::Literal(0),
                sender(),
                Entry::field("recipient", Recipient::new(true)),
                long("amount"),
                long("fee"),
                long("timestamp"),
            ],
        );

        add(
            &mut reg,
            9,
            2,
            "cancelLeasing",
            vec![
                Entry::Literal(9),
                Entry::Literal(2),
                Entry::field("chainId", Byte::new(true)),
                sender(),
                long("fee"),
                long("timestamp"),
                Entry::field("leaseId", Base58::new(true)),
            ],
        );

        add(
            &mut reg,
            10,
            2,
            "createAlias",
            vec![
                Entry::Literal(10),
                Entry::Literal(2),
                sender(),
                Entry::field("alias", Alias::new(true)),
                long("fee"),
                long("timestamp"),
            ],
        );

        add(
            &mut reg,
            11,
            1,
            "massTransfer",
            vec![
                Entry::Literal(11),
                Entry::Literal(1),
                sender(),
                Entry::field("assetId", AssetId::new(false)),
                Entry::field("transfers", Transfers::new(true)),
                long("timestamp"),
                long("fee"),
                Entry::field("attachment", Attachment::new(false)),
            ],
        );

        add(
            &mut reg,
            12,
            1,
            "data",
            vec![
                Entry::Literal(12),
                Entry::Literal(1),
                sender(),
                Entry::field("authorPublicKey", Base58::new(true)),
                Entry::field("data", DataEntries::new(true)),
                long("timestamp"),
                long("fee"),
            ],
        );

        add(
            &mut reg,
            13,
            1,
            "setScript",
            vec![
                Entry::Literal(13),
                Entry::Literal(1),
                Entry::field("chainId", Byte::new(true)),
                sender(),
                // script language version
                Entry::Literal(1),
                Entry::field("script", Base64::new(true)),
                string("name"),
                string("description"),
                long("fee"),
                long("timestamp"),
            ],
        );

        add(
            &mut reg,
            14,
            1,
            "sponsorship",
            vec![
                Entry::Literal(14),
                Entry::Literal(1),
                sender(),
                // raw asset id, the native sentinel is not allowed here
                Entry::field("assetId", Base58::new(true)),
                long("minSponsoredAssetFee"),
                long("fee"),
                long("timestamp"),
            ],
        );

        add(
            &mut reg,
            102,
            1,
            "permit",
            vec![
                Entry::Literal(102),
                Entry::Literal(1),
                sender(),
                Entry::field("target", Recipient::new(true)),
                long("timestamp"),
                long("fee"),
                Entry::field("opType", PermissionOpType::new(true)),
                Entry::field("role", PermissionRole::new(true)),
                // the operation carries its own copy of the timestamp
                long("timestamp"),
                Entry::field("dueTimestamp", PermissionDueTimestamp::new(false)),
            ],
        );

        add(
            &mut reg,
            103,
            1,
            "createContract",
            vec![
                Entry::Literal(103),
                Entry::Literal(1),
                sender(),
                string("image"),
                string("imageHash"),
                string("contractName"),
                contract_params("params"),
                long("fee"),
                long("timestamp"),
            ],
        );

        add(
            &mut reg,
            103,
            2,
            "createContractV2",
            vec![
                Entry::Literal(103),
                Entry::Literal(2),
                sender(),
                string("image"),
                string("imageHash"),
                string("contractName"),
                contract_params("params"),
                long("fee"),
                long("timestamp"),
                Entry::field("feeAssetId", AssetId::new(false)),
            ],
        );

        add(
            &mut reg,
            104,
            1,
            "callContract",
            vec![
                Entry::Literal(104),
                Entry::Literal(1),
                sender(),
                Entry::field("contractId", Base58WithLength::new(true)),
                contract_params("params"),
                long("fee"),
                long("timestamp"),
            ],
        );

        add(
            &mut reg,
            104,
            2,
            "callContractV2",
            vec![
                Entry::Literal(104),
                Entry::Literal(2),
                sender(),
                Entry::field("contractId", Base58WithLength::new(true)),
                contract_params("params"),
                long("fee"),
                long("timestamp"),
                Entry::field("contractVersion", Integer::new(true)),
                Entry::field("feeAssetId", AssetId::new(false)),
            ],
        );

        add(
            &mut reg,
            106,
            1,
            "disableContract",
            vec![
                Entry::Literal(106),
                Entry::Literal(1),
                sender(),
                Entry::field("contractId", Base58WithLength::new(true)),
                long("fee"),
                long("timestamp"),
            ],
        );

        add(
            &mut reg,
            111,
            1,
            "policyRegisterNode",
            vec![
                Entry::Literal(111),
                Entry::Literal(1),
                sender(),
                Entry::field("targetPubKey", Base58::new(true)),
                string("nodeName"),
                Entry::field("opType", PermissionOpType::new(true)),
                long("timestamp"),
                long("fee"),
            ],
        );

        add(
            &mut reg,
            112,
            1,
            "policyCreate",
            vec![
                Entry::Literal(112),
                Entry::Literal(1),
                sender(),
                string("policyName"),
                string("description"),
                Entry::field("recipients", Recipients::new(true)),
                Entry::field("owners", Recipients::new(true)),
                long("timestamp"),
                long("fee"),
            ],
        );

        add(
            &mut reg,
            113,
            1,
            "policyUpdate",
            vec![
                Entry::Literal(113),
                Entry::Literal(1),
                sender(),
                Entry::field("policyId", Base58WithLength::new(true)),
                Entry::field("recipients", Recipients::new(true)),
                Entry::field("owners", Recipients::new(true)),
                Entry::field("opType", PermissionOpType::new(true)),
                long("timestamp"),
                long("fee"),
            ],
        );

        debug!("registered {} transaction layouts", reg.schemas.len());
        reg
    }
}

lazy_static! {
    static ref REGISTRY: Registry = Registry::build();
}

/// Look up the latest registered version of a protocol type number.
pub fn by_number(tx_type: u8) -> Result<&'static Schema, ConstraintError> {
    REGISTRY
        .by_number
        .get(&tx_type)
        .map(|&idx| &REGISTRY.schemas[idx])
        .ok_or_else(|| ConstraintError::UnknownTransaction(format!("type {}", tx_type)))
}

/// Look up a schema by its name tag.
pub fn by_name(name: &str) -> Result<&'static Schema, ConstraintError> {
    REGISTRY
        .by_name
        .get(name)
        .map(|&idx| &REGISTRY.schemas[idx])
        .ok_or_else(|| ConstraintError::UnknownTransaction(name.to_string()))
}

/// Look up an exact (type, version) pair.
pub fn by_type_and_version(tx_type: u8, version: u8) -> Result<&'static Schema, ConstraintError> {
    REGISTRY
        .by_type_version
        .get(&(tx_type, version))
        .map(|&idx| &REGISTRY.schemas[idx])
        .ok_or_else(|| {
            ConstraintError::UnknownTransaction(format!("type {} v{}", tx_type, version))
        })
}
