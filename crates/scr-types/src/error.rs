use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid hex string: {0}")]
    InvalidHex(String),

    #[error("invalid byte length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("unknown {kind} status byte: {byte:#04x}")]
    UnknownStatus { kind: &'static str, byte: u8 },

    #[error("unknown status name: {0}")]
    UnknownStatusName(String),
}

/// A status change that is not an edge of the lifecycle's transition table.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{kind} cannot move from {from} to {to}")]
pub struct TransitionError {
    pub kind: &'static str,
    pub from: &'static str,
    pub to: &'static str,
}
