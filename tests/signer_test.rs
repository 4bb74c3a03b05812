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

#[macro_use]
extern crate quickcheck;

use itertools::Itertools;

use vostok_signer::chain::{CryptoType, NetworkContext, TESTNET_BYTE};
use vostok_signer::convert::{long_to_bytes, LengthWidth};
use vostok_signer::crypto;
use vostok_signer::encode::codec::{Byte, FieldCodec, StringWithLength};
use vostok_signer::encode::value::{Amount, DataEntry, DataValue, FieldValue, PermissionOp, Role, Transfer};
use vostok_signer::transactions::{
    Data, MassTransfer, Permit, TransactionRequest, TransferRequest,
};
use vostok_signer::{Seed, TxSigner};

const PHRASE: &str =
    "wreck author problem inch innocent surround raise code immune wink scare joke tank dragon teach";

fn testnet_signer() -> TxSigner {
    TxSigner::new(NetworkContext::testnet())
}

#[test]
fn permit_body_matches_reference_vector() {
    let tx = TransactionRequest::Permit(Permit {
        sender_public_key:
            "2Vx27WrzyS7Ngbq5TtSUhrv1ip8Vqr5hjoXoPfBDKGdbXQe2hhg67WHqd5spnAdxkeGjc9pPpmHn9t4zcgDoUMq8"
                .to_string(),
        target: "3FV34HcWJEq7eQEvzWdwyhsxrMr2qHBN5k6".to_string(),
        timestamp: Amount::Int(1_540_202_842_920),
        fee: Amount::Int(0),
        op_type: PermissionOp::Add,
        role: Role::Dex,
        due_timestamp: Some(Amount::Int(1_540_212_842_920)),
    });
    let bytes = testnet_signer().bytes(&tx).unwrap();
    let expected = base64::decode(
        "ZgFK+y53q2mN6HIs7IPEhjUP9U7ciQuA46nXjF/ur1DIsFxPt0qTxzjvII5MudtyepRdPaw5NowLzbfBmNhaCLaP\
         AURHm4HFLXycOHXq5AIHIHWnieAKJbF8K7sAAAFmmz5LKAAAAAAAAAAAYQMAAAFmmz5LKAEAAAFmm9bhqA==",
    )
    .unwrap();
    assert_eq!(bytes, expected);
}

#[test]
fn transfer_body_matches_reference_vector() {
    let tx = TransactionRequest::Transfer(TransferRequest {
        sender_public_key: "2VxxNCRCCtYCPvcSvpgEdvV5eRqfzSjRE75536yTyGyB".to_string(),
        asset_id: None,
        fee_asset_id: None,
        timestamp: Amount::Int(1_540_202_842_920),
        amount: Amount::Int(100_000_000),
        fee: Amount::Int(100_000),
        recipient: "3FV34HcWJEq7eQEvzWdwyhsxrMr2qHBN5k6".to_string(),
        attachment: None,
    });
    let bytes = testnet_signer().bytes(&tx).unwrap();
    let expected = base64::decode(
        "BAIWRze2GHlspCovgy4hBVxKqum6D1M0WJJj0VOqzRq5dgAAAAABZps+SygAAAAABfXhAAAAAAAAAYagAURHm4HF\
         LXycOHXq5AIHIHWnieAKJbF8K7sAAA==",
    )
    .unwrap();
    assert_eq!(bytes, expected);
}

#[test]
fn mass_transfer_body_matches_reference_vector() {
    let recipient = "3FV34HcWJEq7eQEvzWdwyhsxrMr2qHBN5k6".to_string();
    let tx = TransactionRequest::MassTransfer(MassTransfer {
        sender_public_key: "2VxxNCRCCtYCPvcSvpgEdvV5eRqfzSjRE75536yTyGyB".to_string(),
        asset_id: None,
        transfers: vec![
            Transfer {
                recipient: recipient.clone(),
                amount: Amount::Int(10),
            },
            Transfer {
                recipient,
                amount: Amount::Int(20),
            },
        ],
        timestamp: Amount::Int(1_540_202_842_920),
        fee: Amount::Int(200_000),
        attachment: None,
    });
    let bytes = testnet_signer().bytes(&tx).unwrap();
    let expected = base64::decode(
        "CwEWRze2GHlspCovgy4hBVxKqum6D1M0WJJj0VOqzRq5dgAAAgFER5uBxS18nDh16uQCByB1p4ngCiWxfCu7AAAA\
         AAAAAAoBREebgcUtfJw4derkAgcgdaeJ4AolsXwruwAAAAAAAAAUAAABZps+SygAAAAAAAMNQAAA",
    )
    .unwrap();
    assert_eq!(bytes, expected);
}

#[test]
fn seeded_account_signs_and_verifies() {
    let ctx = NetworkContext::testnet();
    let seed = Seed::from_existing_phrase(PHRASE, &ctx).unwrap();
    assert!(crypto::is_valid_address(
        &seed.address,
        TESTNET_BYTE,
        ctx.backend()
    ));

    let signer = TxSigner::new(ctx);
    let tx = TransactionRequest::Transfer(TransferRequest {
        sender_public_key: seed.key_pair.public_key.clone(),
        asset_id: None,
        fee_asset_id: None,
        timestamp: Amount::Int(1_600_000_000_000),
        amount: Amount::Int(42),
        fee: Amount::Int(100_000),
        recipient: seed.address.clone(),
        attachment: None,
    });
    let bytes = signer.bytes(&tx).unwrap();
    let signature = signer.sign(&tx, &seed.key_pair.private_key).unwrap();
    assert!(signer
        .verify_signature(&seed.key_pair.public_key, &bytes, &signature)
        .unwrap());
}

#[test]
fn gost_account_signs_and_verifies() {
    let ctx = NetworkContext::new(TESTNET_BYTE, CryptoType::Gost);
    let seed = Seed::from_existing_phrase(PHRASE, &ctx).unwrap();
    let signer = TxSigner::new(ctx);

    let tx = TransactionRequest::Permit(Permit {
        sender_public_key: seed.key_pair.public_key.clone(),
        target: seed.address.clone(),
        timestamp: Amount::Int(1_600_000_000_000),
        fee: Amount::Int(0),
        op_type: PermissionOp::Remove,
        role: Role::Miner,
        due_timestamp: None,
    });
    let bytes = signer.bytes(&tx).unwrap();
    let signature = signer.sign(&tx, &seed.key_pair.private_key).unwrap();
    assert!(signer
        .verify_signature(&seed.key_pair.public_key, &bytes, &signature)
        .unwrap());
}

#[test]
fn json_data_request_encodes_and_gets_an_id() {
    let json = r#"{
        "type": "data",
        "senderPublicKey": "2VxxNCRCCtYCPvcSvpgEdvV5eRqfzSjRE75536yTyGyB",
        "authorPublicKey": "2VxxNCRCCtYCPvcSvpgEdvV5eRqfzSjRE75536yTyGyB",
        "data": [
            {"key": "total", "type": "integer", "value": "9223372036854775807"},
            {"key": "enabled", "type": "boolean", "value": true},
            {"key": "payload", "type": "binary", "value": "base64:AQID"},
            {"key": "note", "type": "string", "value": "hello"}
        ],
        "timestamp": 1540202842920,
        "fee": 100000
    }"#;
    let tx: TransactionRequest = serde_json::from_str(json).unwrap();
    let signer = testnet_signer();
    assert!(signer.validate(&tx).unwrap().is_empty());

    let bytes = signer.bytes(&tx).unwrap();
    assert_eq!(bytes[0], 12);
    assert_eq!(bytes[1], 1);

    let id = signer.tx_id(&tx).unwrap();
    assert!(!id.is_empty());
    assert_eq!(id, signer.tx_id(&tx).unwrap());
}

#[test]
fn invalid_data_request_lists_every_problem() {
    let tx = TransactionRequest::Data(Data {
        sender_public_key: "2VxxNCRCCtYCPvcSvpgEdvV5eRqfzSjRE75536yTyGyB".to_string(),
        author_public_key: "2VxxNCRCCtYCPvcSvpgEdvV5eRqfzSjRE75536yTyGyB".to_string(),
        data: vec![DataEntry {
            key: "blob".to_string(),
            value: DataValue::Binary("AQID".to_string()),
        }],
        timestamp: Amount::Int(1),
        fee: "99999999999999999999".parse().unwrap(),
    });
    let errors = testnet_signer().validate(&tx).unwrap();
    let fields = errors.iter().map(|e| e.field.as_str()).collect_vec();
    assert_eq!(fields, vec!["data", "fee"]);
}

quickcheck! {
    fn amount_string_form_encodes_like_native(value: i64) -> bool {
        let native = Amount::Int(value);
        let parsed: Amount = value.to_string().parse().unwrap();
        parsed.to_long_bytes().unwrap() == native.to_long_bytes().unwrap()
            && native.to_long_bytes().unwrap() == long_to_bytes(value)
    }

    fn byte_codec_serializes_exactly_the_valid_range(value: i64) -> bool {
        let codec = Byte::new(true);
        let ctx = NetworkContext::testnet();
        let ok = codec.check(FieldValue::Int(value), &ctx).is_none();
        let encoded = codec.serialize("b", Some(FieldValue::Int(value)), &ctx);
        ok == encoded.is_ok()
    }

    fn string_length_prefix_is_byte_accurate(text: String) -> bool {
        if text.len() > u16::MAX as usize {
            return true;
        }
        let codec = StringWithLength::with_width(true, LengthWidth::Two);
        let ctx = NetworkContext::testnet();
        let bytes = codec
            .serialize("s", Some(FieldValue::Str(&text)), &ctx)
            .unwrap();
        let len = u16::from_be_bytes([bytes[0], bytes[1]]) as usize;
        len == text.len() && &bytes[2..] == text.as_bytes()
    }
}
