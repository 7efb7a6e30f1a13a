//! Lifecycle states for withdrawals and withdrawal bundles.
//!
//! The records themselves only carry the current state; moving between
//! states is the orchestrator's job. The transition tables here let an
//! orchestrator check an edge before writing it.
//!
//! Withdrawal:
//!
//! ```text
//! Unspent ──► InBundle ──► Spent
//!    └──────────────────────▲
//! ```
//!
//! Bundle:
//!
//! ```text
//! Created ──► Spent
//!    └──────► Failed
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{TransitionError, TypeError};

/// State of a single withdrawal request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WithdrawalStatus {
    /// Waiting to be picked up by an aggregator.
    #[default]
    Unspent,
    /// Selected into a bundle that is not yet confirmed.
    InBundle,
    /// Paid out by a confirmed bundle.
    Spent,
}

impl WithdrawalStatus {
    /// Wire byte for this state.
    pub fn to_byte(self) -> u8 {
        match self {
            Self::Unspent => 0,
            Self::InBundle => 1,
            Self::Spent => 2,
        }
    }

    /// Parse a wire byte.
    pub fn from_byte(byte: u8) -> Result<Self, TypeError> {
        match byte {
            0 => Ok(Self::Unspent),
            1 => Ok(Self::InBundle),
            2 => Ok(Self::Spent),
            _ => Err(TypeError::UnknownStatus {
                kind: "withdrawal",
                byte,
            }),
        }
    }

    /// Human-readable name used in diagnostic dumps.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unspent => "Unspent",
            Self::InBundle => "InBundle",
            Self::Spent => "Spent",
        }
    }

    /// Whether no further transitions are possible.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Spent)
    }

    /// Whether `self -> next` is an edge of the lifecycle.
    ///
    /// `Unspent -> Spent` is allowed: skipping the bundle step is the
    /// orchestrator's call, not this crate's.
    pub fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Unspent, Self::InBundle)
                | (Self::InBundle, Self::Spent)
                | (Self::Unspent, Self::Spent)
        )
    }

    /// Checked transition.
    pub fn transition(self, next: Self) -> Result<Self, TransitionError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(TransitionError {
                kind: "withdrawal",
                from: self.as_str(),
                to: next.as_str(),
            })
        }
    }
}

impl fmt::Display for WithdrawalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WithdrawalStatus {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "unspent" => Ok(Self::Unspent),
            "inbundle" | "in-bundle" | "in_bundle" => Ok(Self::InBundle),
            "spent" => Ok(Self::Spent),
            _ => Err(TypeError::UnknownStatusName(s.to_string())),
        }
    }
}

/// State of a withdrawal bundle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BundleStatus {
    /// Built and broadcast, awaiting the validity process.
    #[default]
    Created,
    /// Rejected by the validity process.
    Failed,
    /// Confirmed on the main chain.
    Spent,
}

impl BundleStatus {
    /// Wire byte for this state.
    pub fn to_byte(self) -> u8 {
        match self {
            Self::Created => 0,
            Self::Failed => 1,
            Self::Spent => 2,
        }
    }

    /// Parse a wire byte.
    pub fn from_byte(byte: u8) -> Result<Self, TypeError> {
        match byte {
            0 => Ok(Self::Created),
            1 => Ok(Self::Failed),
            2 => Ok(Self::Spent),
            _ => Err(TypeError::UnknownStatus {
                kind: "bundle",
                byte,
            }),
        }
    }

    /// Human-readable name used in diagnostic dumps.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Created => "Created",
            Self::Failed => "Failed",
            Self::Spent => "Spent",
        }
    }

    /// Both `Failed` and `Spent` are final.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Created)
    }

    /// Whether `self -> next` is an edge of the lifecycle.
    pub fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Created, Self::Spent) | (Self::Created, Self::Failed)
        )
    }

    /// Checked transition.
    pub fn transition(self, next: Self) -> Result<Self, TransitionError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(TransitionError {
                kind: "bundle",
                from: self.as_str(),
                to: next.as_str(),
            })
        }
    }
}

impl fmt::Display for BundleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BundleStatus {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "created" => Ok(Self::Created),
            "failed" => Ok(Self::Failed),
            "spent" => Ok(Self::Spent),
            _ => Err(TypeError::UnknownStatusName(s.to_string())),
        }
    }
}
