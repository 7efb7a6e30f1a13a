use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

macro_rules! fixed_digest {
    ($(#[$meta:meta])* $name:ident, $len:expr) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
        pub struct $name([u8; $len]);

        impl $name {
            /// Width of the digest in bytes.
            pub const LEN: usize = $len;

            /// Wrap raw bytes (internal byte order).
            pub const fn from_bytes(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }

            /// The all-zero value.
            pub const fn zero() -> Self {
                Self([0u8; $len])
            }

            /// Returns `true` if every byte is zero.
            pub fn is_zero(&self) -> bool {
                self.0 == [0u8; $len]
            }

            /// Raw bytes in internal (wire) order.
            pub fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }

            /// Build from a slice, which must be exactly `LEN` bytes long.
            pub fn from_slice(bytes: &[u8]) -> Result<Self, TypeError> {
                let arr: [u8; $len] =
                    bytes.try_into().map_err(|_| TypeError::InvalidLength {
                        expected: $len,
                        actual: bytes.len(),
                    })?;
                Ok(Self(arr))
            }

            /// Display hex: bytes reversed, most significant first.
            pub fn to_hex(&self) -> String {
                let mut rev = self.0;
                rev.reverse();
                hex::encode(rev)
            }

            /// Parse the display form produced by [`Self::to_hex`].
            pub fn from_hex(s: &str) -> Result<Self, TypeError> {
                let s = s.strip_prefix("0x").unwrap_or(s);
                let bytes = hex::decode(s).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
                let mut id = Self::from_slice(&bytes)?;
                id.0.reverse();
                Ok(id)
            }

            /// First 8 display hex characters.
            pub fn short_hex(&self) -> String {
                let mut hex = self.to_hex();
                hex.truncate(8);
                hex
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.short_hex())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.to_hex())
            }
        }

        impl From<[u8; $len]> for $name {
            fn from(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }
        }

        impl From<$name> for [u8; $len] {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

fixed_digest!(
    /// 256-bit digest.
    ///
    /// Used for record identities, transaction ids, and the blind hash that
    /// links a withdrawal to its partially-built bundle. Stored in wire order;
    /// the hex form is byte-reversed, so a txid reads the way block explorers
    /// print it.
    Hash256,
    32
);

fixed_digest!(
    /// 160-bit key identifier naming the destination of a deposit.
    KeyId,
    20
);
