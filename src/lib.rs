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
//! # Vostok Signer
//!
//! Byte-serialization and signing library for permissioned-chain
//! transactions: typed field codecs composed into versioned wire schemas,
//! seed-phrase key derivation and pluggable curve25519 / GOST backends.

#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

pub mod chain;
pub mod convert;
pub mod crypto;
pub mod encode;
pub mod error;
pub mod seed;
pub mod signer;
pub mod transactions;

pub use chain::{CryptoType, NetworkContext};
pub use error::SignerError;
pub use seed::Seed;
pub use signer::TxSigner;
