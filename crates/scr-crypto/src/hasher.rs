use std::fmt;
use std::str::FromStr;

use scr_types::Hash256;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// A deterministic hash function with a fixed 32-byte output.
///
/// Implementations must be pure: the same input always produces the same
/// digest, with no hidden state.
pub trait HashProvider: Send + Sync {
    /// Hash raw bytes.
    fn hash(&self, data: &[u8]) -> Hash256;

    /// Short name for logs and diagnostics.
    fn name(&self) -> &'static str;

    /// Verify that data produces the expected digest.
    fn verify(&self, data: &[u8], expected: &Hash256) -> bool {
        self.hash(data) == *expected
    }
}

/// `SHA256(SHA256(data))`, the main chain's serialization hash.
#[derive(Clone, Copy, Debug, Default)]
pub struct DoubleSha256;

impl DoubleSha256 {
    /// Hash without going through the trait object.
    pub fn digest(data: &[u8]) -> Hash256 {
        let first = Sha256::digest(data);
        let second = Sha256::digest(first);
        let mut out = [0u8; 32];
        out.copy_from_slice(&second);
        Hash256::from_bytes(out)
    }
}

impl HashProvider for DoubleSha256 {
    fn hash(&self, data: &[u8]) -> Hash256 {
        Self::digest(data)
    }

    fn name(&self) -> &'static str {
        "sha256d"
    }
}

/// BLAKE3 hasher with an optional domain tag.
///
/// With a domain, the tag and a `:` separator are hashed before the data, so
/// two deployments with different tags never share identities.
#[derive(Clone, Copy, Debug, Default)]
pub struct Blake3Hasher {
    domain: Option<&'static str>,
}

impl Blake3Hasher {
    /// Plain BLAKE3 over the input.
    pub const PLAIN: Self = Self { domain: None };

    /// Hasher with a domain tag.
    pub const fn with_domain(domain: &'static str) -> Self {
        Self {
            domain: Some(domain),
        }
    }

    /// The domain tag, if any.
    pub fn domain(&self) -> Option<&str> {
        self.domain
    }
}

impl HashProvider for Blake3Hasher {
    fn hash(&self, data: &[u8]) -> Hash256 {
        let mut hasher = blake3::Hasher::new();
        if let Some(domain) = self.domain {
            hasher.update(domain.as_bytes());
            hasher.update(b":");
        }
        hasher.update(data);
        Hash256::from_bytes(*hasher.finalize().as_bytes())
    }

    fn name(&self) -> &'static str {
        "blake3"
    }
}

/// Selectable built-in hash algorithms.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    #[default]
    Sha256d,
    Blake3,
}

impl HashAlgorithm {
    /// The provider implementing this algorithm.
    pub fn provider(self) -> &'static dyn HashProvider {
        match self {
            Self::Sha256d => &DoubleSha256,
            Self::Blake3 => &Blake3Hasher::PLAIN,
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.provider().name())
    }
}

impl FromStr for HashAlgorithm {
    type Err = HasherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sha256d" | "double-sha256" => Ok(Self::Sha256d),
            "blake3" => Ok(Self::Blake3),
            _ => Err(HasherError::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// Errors from hash provider selection.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum HasherError {
    #[error("unknown hash algorithm: {0}")]
    UnknownAlgorithm(String),
}
