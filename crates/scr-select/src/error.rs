use scr_codec::RecordKind;
use scr_types::{Hash256, TransitionError};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("record not found: {0}")]
    NotFound(Hash256),

    #[error("record {id} is a {actual}, expected a {expected}")]
    WrongKind {
        id: Hash256,
        expected: RecordKind,
        actual: RecordKind,
    },

    #[error("invalid status change: {0}")]
    Transition(#[from] TransitionError),
}

pub type RegistryResult<T> = Result<T, RegistryError>;
