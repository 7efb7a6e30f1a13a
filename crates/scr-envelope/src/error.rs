use scr_codec::DecodeError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EnvelopeError {
    #[error("invalid envelope magic: expected {expected}, got {actual}")]
    BadMagic { expected: String, actual: String },

    #[error("output does not carry a structured record (leading byte {0:#04x})")]
    NotStructured(u8),
}

/// Failure to recover a record from an enveloped blob.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OpenError {
    #[error(transparent)]
    Envelope(#[from] EnvelopeError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

pub type EnvelopeResult<T> = Result<T, EnvelopeError>;
