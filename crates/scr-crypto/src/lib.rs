//! Hash providers for sidechain records.
//!
//! Record identity and transaction ids are computed by a pluggable
//! [`HashProvider`]. [`DoubleSha256`] is the default and matches the digest
//! used by the main chain; [`Blake3Hasher`] is available for deployments that
//! do not need main-chain compatibility.
//!
//! All providers wrap established libraries; no custom cryptography.

pub mod hasher;

pub use hasher::{Blake3Hasher, DoubleSha256, HashAlgorithm, HashProvider, HasherError};
