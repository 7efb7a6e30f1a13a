//! Minimal main-chain transaction model.
//!
//! Bundles and deposits carry a full transaction. Records treat it as an
//! opaque payload: they serialize it, derive its txid, and print it, but
//! never check it for validity.

use std::fmt;

use scr_crypto::DoubleSha256;
use scr_types::{format_money, Amount, Hash256};
use serde::{Deserialize, Serialize};

use crate::error::{DecodeError, DecodeResult};
use crate::wire::{write_vec, Decodable, Encodable, WireReader, WireWriter};

/// Reference to an output of a previous transaction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OutPoint {
    pub txid: Hash256,
    pub vout: u32,
}

impl OutPoint {
    pub fn new(txid: Hash256, vout: u32) -> Self {
        Self { txid, vout }
    }
}

impl fmt::Display for OutPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.txid, self.vout)
    }
}

impl Encodable for OutPoint {
    fn encode_to(&self, w: &mut WireWriter) {
        w.write_hash(&self.txid);
        w.write_u32(self.vout);
    }
}

impl Decodable for OutPoint {
    fn decode_from(r: &mut WireReader<'_>) -> DecodeResult<Self> {
        Ok(Self {
            txid: r.read_hash("prevout.txid")?,
            vout: r.read_u32("prevout.vout")?,
        })
    }
}

/// Transaction input.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxIn {
    pub prevout: OutPoint,
    pub script_sig: Vec<u8>,
    pub sequence: u32,
}

impl Encodable for TxIn {
    fn encode_to(&self, w: &mut WireWriter) {
        self.prevout.encode_to(w);
        w.write_var_bytes(&self.script_sig);
        w.write_u32(self.sequence);
    }
}

impl Decodable for TxIn {
    fn decode_from(r: &mut WireReader<'_>) -> DecodeResult<Self> {
        Ok(Self {
            prevout: OutPoint::decode_from(r)?,
            script_sig: r.read_var_bytes("script_sig")?.to_vec(),
            sequence: r.read_u32("sequence")?,
        })
    }
}

/// Transaction output.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxOut {
    pub value: Amount,
    pub script_pubkey: Vec<u8>,
}

impl Encodable for TxOut {
    fn encode_to(&self, w: &mut WireWriter) {
        w.write_i64(self.value);
        w.write_var_bytes(&self.script_pubkey);
    }
}

impl Decodable for TxOut {
    fn decode_from(r: &mut WireReader<'_>) -> DecodeResult<Self> {
        Ok(Self {
            value: r.read_i64("value")?,
            script_pubkey: r.read_var_bytes("script_pubkey")?.to_vec(),
        })
    }
}

/// A main-chain transaction in legacy (non-witness) serialization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub version: i32,
    pub inputs: Vec<TxIn>,
    pub outputs: Vec<TxOut>,
    pub lock_time: u32,
}

impl Default for Transaction {
    fn default() -> Self {
        Self {
            version: 2,
            inputs: Vec::new(),
            outputs: Vec::new(),
            lock_time: 0,
        }
    }
}

impl Transaction {
    /// Double-SHA-256 of the serialization.
    pub fn txid(&self) -> Hash256 {
        DoubleSha256::digest(&self.to_bytes())
    }

    /// Sum of output values, saturating on overflow.
    pub fn total_out(&self) -> Amount {
        self.outputs
            .iter()
            .fold(0, |acc: Amount, o| acc.saturating_add(o.value))
    }

    /// Parse a transaction embedded in a record field.
    ///
    /// The blob length was already checked against the record, so any
    /// failure inside it, truncation included, means the blob is malformed.
    pub(crate) fn from_embedded(field: &'static str, blob: &[u8]) -> DecodeResult<Self> {
        Self::from_bytes(blob).map_err(|e| match e {
            DecodeError::Malformed { .. } | DecodeError::Truncated { .. } => {
                DecodeError::malformed(field, e.to_string())
            }
            other => other,
        })
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "txid={} version={} inputs={} outputs={} out={} lock_time={}",
            self.txid(),
            self.version,
            self.inputs.len(),
            self.outputs.len(),
            format_money(self.total_out()),
            self.lock_time
        )
    }
}

impl Encodable for Transaction {
    fn encode_to(&self, w: &mut WireWriter) {
        w.write_i32(self.version);
        write_vec(w, &self.inputs);
        write_vec(w, &self.outputs);
        w.write_u32(self.lock_time);
    }
}

impl Decodable for Transaction {
    fn decode_from(r: &mut WireReader<'_>) -> DecodeResult<Self> {
        Ok(Self {
            version: r.read_i32("version")?,
            inputs: r.read_vec("inputs")?,
            outputs: r.read_vec("outputs")?,
            lock_time: r.read_u32("lock_time")?,
        })
    }
}
