//! Foundation types for sidechain records.
//!
//! This crate provides the primitive value types shared by every other
//! `scr-*` crate. It has no knowledge of the wire format.
//!
//! # Key Types
//!
//! - [`Hash256`]: 32-byte digest (record identity, txids, blind hashes)
//! - [`KeyId`]: 20-byte destination key identifier
//! - [`Amount`]: signed integer amount in the smallest unit
//! - [`WithdrawalStatus`] / [`BundleStatus`]: per-kind lifecycle states with
//!   documented transition tables

pub mod amount;
pub mod digest;
pub mod error;
pub mod status;

pub use amount::{format_money, Amount, COIN};
pub use digest::{Hash256, KeyId};
pub use error::{TransitionError, TypeError};
pub use status::{BundleStatus, WithdrawalStatus};

/// Index of a sidechain instance.
pub type SidechainIndex = u8;
