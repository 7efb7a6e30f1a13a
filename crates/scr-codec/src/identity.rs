//! Content identity for records.
//!
//! A record's identity is the hash of its encoded payload, envelope
//! excluded. Status is part of the payload, so changing it changes the
//! identity: anything keyed by identity must be re-keyed afterwards.

use scr_crypto::{DoubleSha256, HashProvider};
use scr_types::Hash256;

use crate::record::Record;
use crate::wire::Encodable;

/// Identity under the default double-SHA-256 provider.
pub fn identity(record: &Record) -> Hash256 {
    identity_with(record, &DoubleSha256)
}

/// Identity under an explicit hash provider.
pub fn identity_with(record: &Record, hasher: &dyn HashProvider) -> Hash256 {
    identity_of(record, hasher)
}

/// Identity of any encodable value, such as a bare variant.
///
/// A variant and the `Record` wrapping it encode identically, so both give
/// the same digest.
pub fn identity_of<T: Encodable + ?Sized>(value: &T, hasher: &dyn HashProvider) -> Hash256 {
    hasher.hash(&value.to_bytes())
}

impl Record {
    /// Identity under the default provider.
    pub fn identity(&self) -> Hash256 {
        identity(self)
    }
}
