//! Primitive encoding/decoding for the binary model format.
//!
//! Wraps the VarUint/VarInt codecs together with the fixed-width byte and
//! NUL-terminated string fields the record layout is built from.

use std::borrow::Cow;

use tracing::warn;

use crate::codec::varint::{decode_varint, encode_varint};
use crate::codec::varuint::{decode_varuint, encode_varuint};
use crate::error::{DecodeError, EncodeError};

// =============================================================================
// DECODING
// =============================================================================

/// Reader for decoding binary data.
///
/// Wraps a byte slice and provides methods for reading primitives
/// with bounds checking and error handling.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    /// Creates a new reader from a byte slice.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Returns the current position in the data.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns the remaining bytes.
    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    /// Returns the number of remaining bytes.
    pub fn remaining_len(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Returns true if all data has been consumed.
    pub fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Reads a single byte.
    #[inline]
    pub fn read_byte(&mut self, context: &'static str) -> Result<u8, DecodeError> {
        let byte = *self
            .data
            .get(self.pos)
            .ok_or(DecodeError::UnexpectedEof { context })?;
        self.pos += 1;
        Ok(byte)
    }

    /// Reads exactly n bytes.
    #[inline]
    pub fn read_bytes(&mut self, n: usize, context: &'static str) -> Result<&'a [u8], DecodeError> {
        if n > self.remaining_len() {
            return Err(DecodeError::UnexpectedEof { context });
        }
        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    /// Reads a one-byte flag that must be 0 or 1.
    pub fn read_bool(&mut self, context: &'static str) -> Result<bool, DecodeError> {
        match self.read_byte(context)? {
            0 => Ok(false),
            1 => Ok(true),
            value => Err(DecodeError::InvalidBool { value }),
        }
    }

    /// Reads an unsigned prefix-length integer.
    #[inline]
    pub fn read_varuint(&mut self, context: &'static str) -> Result<u64, DecodeError> {
        let (value, len) = decode_varuint(self.remaining(), context)?;
        self.pos += len;
        Ok(value)
    }

    /// Reads a signed sign-magnitude integer.
    #[inline]
    pub fn read_varint(&mut self, context: &'static str) -> Result<i32, DecodeError> {
        let (value, len) = decode_varint(self.remaining(), context)?;
        self.pos += len;
        Ok(value)
    }

    /// Reads a VarUint record count and checks it against `max`.
    pub fn read_count(&mut self, max: usize, field: &'static str) -> Result<usize, DecodeError> {
        let len = self.read_varuint(field)?;
        match usize::try_from(len) {
            Ok(count) if count <= max => Ok(count),
            _ => Err(DecodeError::LengthExceedsLimit { field, len, max }),
        }
    }

    /// Reads a NUL-terminated string (the NUL is consumed, not returned).
    ///
    /// The bytes are not required to be UTF-8; invalid sequences become
    /// U+FFFD.
    pub fn read_cstring(&mut self, max_len: usize, field: &'static str) -> Result<String, DecodeError> {
        let rest = self.remaining();
        let len = rest
            .iter()
            .position(|&b| b == 0)
            .ok_or(DecodeError::UnexpectedEof { context: field })?;
        if len > max_len {
            return Err(DecodeError::LengthExceedsLimit {
                field,
                len: len as u64,
                max: max_len,
            });
        }
        let bytes = &rest[..len];
        self.pos += len + 1;
        let text = String::from_utf8_lossy(bytes);
        if let Cow::Owned(_) = text {
            warn!(field, "replaced invalid UTF-8 in string");
        }
        Ok(text.into_owned())
    }
}

// =============================================================================
// ENCODING
// =============================================================================

/// Writer for encoding binary data.
#[derive(Debug, Clone, Default)]
pub struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    /// Creates a new writer.
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Creates a new writer with capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Returns the written bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Returns a reference to the written bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Returns the number of bytes written.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns true if no bytes have been written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Writes a single byte.
    #[inline]
    pub fn write_byte(&mut self, byte: u8) {
        self.buf.push(byte);
    }

    /// Writes raw bytes.
    #[inline]
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Writes a one-byte flag.
    pub fn write_bool(&mut self, value: bool) {
        self.buf.push(u8::from(value));
    }

    /// Writes an unsigned prefix-length integer.
    #[inline]
    pub fn write_varuint(&mut self, value: u64) -> Result<(), EncodeError> {
        encode_varuint(value, &mut self.buf)
    }

    /// Writes a signed sign-magnitude integer.
    #[inline]
    pub fn write_varint(&mut self, value: i32) -> Result<(), EncodeError> {
        encode_varint(value, &mut self.buf)
    }

    /// Writes a record count as a VarUint.
    pub fn write_count(&mut self, count: usize) -> Result<(), EncodeError> {
        self.write_varuint(count as u64)
    }

    /// Writes a NUL-terminated string.
    pub fn write_cstring(&mut self, s: &str) -> Result<(), EncodeError> {
        if s.as_bytes().contains(&0) {
            return Err(EncodeError::CommentContainsNul);
        }
        self.buf.extend_from_slice(s.as_bytes());
        self.buf.push(0);
        Ok(())
    }
}
