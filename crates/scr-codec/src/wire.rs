//! Primitive wire encoding.
//!
//! Format rules:
//!
//! ```text
//! integers      fixed width, little-endian
//! CompactSize   < 0xFD            -> 1 byte
//!               0xFD + u16        -> 0xFD..=0xFFFF
//!               0xFE + u32        -> 0x1_0000..=0xFFFF_FFFF
//!               0xFF + u64        -> larger
//! var bytes     CompactSize(len) || bytes
//! string        var bytes, UTF-8
//! digests       raw bytes, no prefix
//! ```
//!
//! CompactSize values must use the shortest form; anything else is rejected
//! so every logical value has exactly one encoding.

use scr_types::{Hash256, KeyId};

use crate::error::{DecodeError, DecodeResult};

/// Values that can be written to the wire.
pub trait Encodable {
    /// Append the encoding of `self` to the writer.
    fn encode_to(&self, w: &mut WireWriter);

    /// Encode into a fresh buffer.
    fn to_bytes(&self) -> Vec<u8> {
        let mut w = WireWriter::new();
        self.encode_to(&mut w);
        w.into_inner()
    }
}

/// Values that can be read back from the wire.
pub trait Decodable: Sized {
    /// Consume exactly the encoding of one value from the reader.
    fn decode_from(r: &mut WireReader<'_>) -> DecodeResult<Self>;

    /// Decode a value that must span the whole input.
    fn from_bytes(data: &[u8]) -> DecodeResult<Self> {
        let mut r = WireReader::new(data);
        let value = Self::decode_from(&mut r)?;
        r.finish()?;
        Ok(value)
    }
}

/// Append-only byte sink.
#[derive(Clone, Debug, Default)]
pub struct WireWriter {
    buf: Vec<u8>,
}

impl WireWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    pub fn write_u16(&mut self, v: u16) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    pub fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    pub fn write_i32(&mut self, v: i32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    pub fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    pub fn write_i64(&mut self, v: i64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    /// Raw bytes with no length prefix.
    pub fn write_raw(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn write_hash(&mut self, h: &Hash256) {
        self.write_raw(h.as_bytes());
    }

    pub fn write_key_id(&mut self, k: &KeyId) {
        self.write_raw(k.as_bytes());
    }

    /// Shortest CompactSize encoding of `n`.
    pub fn write_compact_size(&mut self, n: u64) {
        match n {
            0..=0xFC => self.write_u8(n as u8),
            0xFD..=0xFFFF => {
                self.write_u8(0xFD);
                self.write_u16(n as u16);
            }
            0x1_0000..=0xFFFF_FFFF => {
                self.write_u8(0xFE);
                self.write_u32(n as u32);
            }
            _ => {
                self.write_u8(0xFF);
                self.write_u64(n);
            }
        }
    }

    /// Length-prefixed byte string.
    pub fn write_var_bytes(&mut self, bytes: &[u8]) {
        self.write_compact_size(bytes.len() as u64);
        self.write_raw(bytes);
    }

    pub fn write_str(&mut self, s: &str) {
        self.write_var_bytes(s.as_bytes());
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }
}

/// Cursor over a borrowed byte slice.
#[derive(Clone, Debug)]
pub struct WireReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> WireReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Look at the next byte without consuming it.
    pub fn peek_u8(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    fn take(&mut self, n: usize, field: &'static str) -> DecodeResult<&'a [u8]> {
        if self.remaining() < n {
            return Err(DecodeError::Truncated {
                field,
                needed: n,
                remaining: self.remaining(),
            });
        }
        let data = self.data;
        let out = &data[self.pos..self.pos + n];
        self.pos += n;
        Ok(out)
    }

    fn take_array<const N: usize>(&mut self, field: &'static str) -> DecodeResult<[u8; N]> {
        let mut arr = [0u8; N];
        arr.copy_from_slice(self.take(N, field)?);
        Ok(arr)
    }

    pub fn read_u8(&mut self, field: &'static str) -> DecodeResult<u8> {
        Ok(self.take(1, field)?[0])
    }

    pub fn read_u16(&mut self, field: &'static str) -> DecodeResult<u16> {
        self.take_array(field).map(u16::from_le_bytes)
    }

    pub fn read_u32(&mut self, field: &'static str) -> DecodeResult<u32> {
        self.take_array(field).map(u32::from_le_bytes)
    }

    pub fn read_i32(&mut self, field: &'static str) -> DecodeResult<i32> {
        self.take_array(field).map(i32::from_le_bytes)
    }

    pub fn read_u64(&mut self, field: &'static str) -> DecodeResult<u64> {
        self.take_array(field).map(u64::from_le_bytes)
    }

    pub fn read_i64(&mut self, field: &'static str) -> DecodeResult<i64> {
        self.take_array(field).map(i64::from_le_bytes)
    }

    pub fn read_hash(&mut self, field: &'static str) -> DecodeResult<Hash256> {
        self.take_array(field).map(Hash256::from_bytes)
    }

    pub fn read_key_id(&mut self, field: &'static str) -> DecodeResult<KeyId> {
        self.take_array(field).map(KeyId::from_bytes)
    }

    /// Read a CompactSize, rejecting non-minimal forms.
    ///
    /// There is no upper cap: lengths and counts are bounded by the input
    /// that remains, so anything the writer produces reads back.
    pub fn read_compact_size(&mut self, field: &'static str) -> DecodeResult<u64> {
        let value = match self.read_u8(field)? {
            0xFD => {
                let v = self.read_u16(field)? as u64;
                if v < 0xFD {
                    return Err(DecodeError::malformed(field, "non-canonical compact size"));
                }
                v
            }
            0xFE => {
                let v = self.read_u32(field)? as u64;
                if v <= 0xFFFF {
                    return Err(DecodeError::malformed(field, "non-canonical compact size"));
                }
                v
            }
            0xFF => {
                let v = self.read_u64(field)?;
                if v <= 0xFFFF_FFFF {
                    return Err(DecodeError::malformed(field, "non-canonical compact size"));
                }
                v
            }
            b => b as u64,
        };
        Ok(value)
    }

    /// Read a length-prefixed byte string.
    ///
    /// A declared length longer than the remaining input is `Malformed`,
    /// not `Truncated`: the prefix itself is inconsistent.
    pub fn read_var_bytes(&mut self, field: &'static str) -> DecodeResult<&'a [u8]> {
        let len = self.read_compact_size(field)?;
        if len > self.remaining() as u64 {
            return Err(DecodeError::malformed(
                field,
                format!(
                    "declared length {len} exceeds {} remaining bytes",
                    self.remaining()
                ),
            ));
        }
        self.take(len as usize, field)
    }

    pub fn read_string(&mut self, field: &'static str) -> DecodeResult<String> {
        let bytes = self.read_var_bytes(field)?;
        String::from_utf8(bytes.to_vec())
            .map_err(|e| DecodeError::malformed(field, format!("invalid UTF-8: {e}")))
    }

    /// Read a CompactSize element count and decode that many items.
    pub fn read_vec<T: Decodable>(&mut self, field: &'static str) -> DecodeResult<Vec<T>> {
        let count = self.read_compact_size(field)?;
        // Every element takes at least one byte.
        if count > self.remaining() as u64 {
            return Err(DecodeError::malformed(
                field,
                format!(
                    "declared count {count} exceeds {} remaining bytes",
                    self.remaining()
                ),
            ));
        }
        let count = count as usize;
        let mut items = Vec::with_capacity(count);
        for _ in 0..count {
            items.push(T::decode_from(self)?);
        }
        Ok(items)
    }

    /// Fail if any input is left over.
    pub fn finish(self) -> DecodeResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(DecodeError::malformed(
                "trailer",
                format!("{} unexpected trailing bytes", self.remaining()),
            ))
        }
    }
}

/// Write a CompactSize count followed by each element.
pub fn write_vec<T: Encodable>(w: &mut WireWriter, items: &[T]) {
    w.write_compact_size(items.len() as u64);
    for item in items {
        item.encode_to(w);
    }
}
