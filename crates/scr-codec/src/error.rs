use thiserror::Error;

/// Errors produced while decoding a record payload.
///
/// All of them are recoverable: the caller gets the error back and no
/// partially-built record escapes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("empty input")]
    EmptyInput,

    #[error("unknown record kind: {0:#04x}")]
    UnknownKind(u8),

    #[error("truncated {field}: needed {needed} bytes, {remaining} remaining")]
    Truncated {
        field: &'static str,
        needed: usize,
        remaining: usize,
    },

    #[error("malformed {field}: {reason}")]
    Malformed { field: &'static str, reason: String },
}

impl DecodeError {
    pub(crate) fn malformed(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Malformed {
            field,
            reason: reason.into(),
        }
    }
}

pub type DecodeResult<T> = Result<T, DecodeError>;
