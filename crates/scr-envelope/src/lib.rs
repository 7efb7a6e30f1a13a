//! Output-script envelope for sidechain records.
//!
//! Records travel inside a data-carrying output shared with unrelated
//! payloads. The envelope is a fixed header that lets readers pick out
//! sidechain records without looking at the payload:
//!
//! ```text
//! [0x6A][0xAC][0xDC][0xF6][0x6F][record payload...]
//!  marker  └──── magic ────┘
//! ```
//!
//! The envelope never interprets the payload; [`seal`] and [`open`] combine
//! it with the codec for the common case.

pub mod envelope;
pub mod error;

pub use envelope::{
    is_record_blob, open, pack, seal, unpack, ENVELOPE_MAGIC, HEADER_LEN, RECORD_MARKER,
};
pub use error::{EnvelopeError, EnvelopeResult, OpenError};
