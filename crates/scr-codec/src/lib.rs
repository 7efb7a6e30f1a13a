//! Tagged binary codec for sidechain records.
//!
//! A record payload starts with a one-byte kind tag followed by the
//! variant's fields in a fixed order. There is no schema negotiation: the
//! tag alone selects the decoder.
//!
//! # Architecture
//!
//! - [`wire`]: little-endian integers, CompactSize prefixes, reader/writer
//! - [`tx`]: the main-chain transaction carried by bundles and deposits
//! - [`record`]: `Withdrawal`, `WithdrawalBundle`, `Deposit` and the `Record` sum type
//! - [`codec`]: `encode` / `decode` with tag dispatch
//! - [`identity`]: content hash over the encoded payload

pub mod codec;
pub mod error;
pub mod identity;
pub mod record;
pub mod tx;
pub mod wire;

#[cfg(test)]
pub(crate) mod fixtures;

pub use codec::{decode, encode, peek_kind};
pub use error::{DecodeError, DecodeResult};
pub use identity::{identity, identity_of, identity_with};
pub use record::{Deposit, Record, RecordKind, Withdrawal, WithdrawalBundle};
pub use tx::{OutPoint, Transaction, TxIn, TxOut};
pub use wire::{Decodable, Encodable, WireReader, WireWriter};
