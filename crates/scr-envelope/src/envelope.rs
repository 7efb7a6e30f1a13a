use scr_codec::{decode, encode, Record};
use tracing::debug;

use crate::error::{EnvelopeError, EnvelopeResult, OpenError};

/// Reserved leading byte marking an output as data-carrying (`OP_RETURN`).
pub const RECORD_MARKER: u8 = 0x6a;

/// Fixed magic identifying sidechain records among other data outputs.
pub const ENVELOPE_MAGIC: [u8; 4] = [0xAC, 0xDC, 0xF6, 0x6F];

/// Bytes preceding the payload.
pub const HEADER_LEN: usize = 1 + ENVELOPE_MAGIC.len();

/// Frame a payload: `[marker][magic x4][payload...]`.
pub fn pack(payload: &[u8]) -> Vec<u8> {
    let mut blob = Vec::with_capacity(HEADER_LEN + payload.len());
    blob.push(RECORD_MARKER);
    blob.extend_from_slice(&ENVELOPE_MAGIC);
    blob.extend_from_slice(payload);
    blob
}

/// Strip and validate the header, returning the payload untouched.
pub fn unpack(blob: &[u8]) -> EnvelopeResult<&[u8]> {
    if let Some(&first) = blob.first() {
        if first != RECORD_MARKER {
            debug!(marker = first, "output is not a structured record");
            return Err(EnvelopeError::NotStructured(first));
        }
    }
    let magic = blob.get(1..HEADER_LEN);
    if magic != Some(&ENVELOPE_MAGIC[..]) {
        let actual = blob.get(1..).map(|m| &m[..m.len().min(4)]).unwrap_or_default();
        debug!(actual = %hex::encode(actual), "rejecting envelope with bad magic");
        return Err(EnvelopeError::BadMagic {
            expected: hex::encode(ENVELOPE_MAGIC),
            actual: hex::encode(actual),
        });
    }
    Ok(&blob[HEADER_LEN..])
}

/// Whether the blob carries the record header.
pub fn is_record_blob(blob: &[u8]) -> bool {
    unpack(blob).is_ok()
}

/// Encode and frame a record.
pub fn seal(record: &Record) -> Vec<u8> {
    pack(&encode(record))
}

/// Unframe and decode a record.
pub fn open(blob: &[u8]) -> Result<Record, OpenError> {
    let payload = unpack(blob)?;
    Ok(decode(payload)?)
}
