//! Primitive decoding for the parse tree wire format.
//!
//! All integers are big-endian. Strings are a `u32` byte length followed by
//! that many raw bytes, with no terminator or padding.

use crate::error::DecodeError;
use crate::model::DdlString;

// =============================================================================
// DECODING
// =============================================================================

/// Cursor over a byte slice with an absolute read position.
///
/// Positions are relative to the start of the whole slice, which lets a
/// cursor start in the middle of a larger blob and still report offsets
/// that point into that blob.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    /// Creates a new reader positioned at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Creates a reader positioned at `pos`.
    pub fn at(data: &'a [u8], pos: usize) -> Result<Self, DecodeError> {
        let mut reader = Self::new(data);
        reader.seek(pos)?;
        Ok(reader)
    }

    /// Returns the current position in the data.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns the whole underlying slice.
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Returns the number of remaining bytes.
    pub fn remaining_len(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Returns true if all data has been consumed.
    pub fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Moves the read position to an absolute offset.
    ///
    /// Seeking to exactly the end of the data is allowed.
    pub fn seek(&mut self, pos: usize) -> Result<(), DecodeError> {
        if pos > self.data.len() {
            return Err(DecodeError::OutOfRange {
                offset: pos,
                len: 0,
                size: self.data.len(),
            });
        }
        self.pos = pos;
        Ok(())
    }

    /// Reads exactly n bytes.
    #[inline]
    pub fn read_bytes(&mut self, n: usize, context: &'static str) -> Result<&'a [u8], DecodeError> {
        let available = self.remaining_len();
        if n > available {
            return Err(DecodeError::Truncated {
                context,
                offset: self.pos,
                needed: n,
                available,
            });
        }
        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    /// Reads a single byte.
    #[inline]
    pub fn read_u8(&mut self, context: &'static str) -> Result<u8, DecodeError> {
        let bytes = self.read_bytes(1, context)?;
        Ok(bytes[0])
    }

    /// Reads a big-endian u32.
    #[inline]
    pub fn read_u32(&mut self, context: &'static str) -> Result<u32, DecodeError> {
        let bytes = self.read_bytes(4, context)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Reads a big-endian u32 count and widens it for indexing.
    #[inline]
    pub fn read_count(&mut self, context: &'static str) -> Result<usize, DecodeError> {
        Ok(self.read_u32(context)? as usize)
    }

    /// Reads a length-prefixed string, borrowing its bytes from the input.
    pub fn read_string(&mut self, context: &'static str) -> Result<DdlString<'a>, DecodeError> {
        let len = self.read_count(context)?;
        let bytes = self.read_bytes(len, context)?;
        Ok(DdlString::borrowed(bytes))
    }

    /// Reads four bytes at an absolute position without moving the cursor.
    pub fn peek_at(&self, pos: usize) -> Result<[u8; 4], DecodeError> {
        let end = pos.checked_add(4).filter(|&end| end <= self.data.len());
        match end {
            Some(end) => {
                let bytes = &self.data[pos..end];
                Ok([bytes[0], bytes[1], bytes[2], bytes[3]])
            }
            None => Err(DecodeError::OutOfRange {
                offset: pos,
                len: 4,
                size: self.data.len(),
            }),
        }
    }

    /// Reads a big-endian u32 at an absolute position without moving the cursor.
    pub fn peek_u32_at(&self, pos: usize) -> Result<u32, DecodeError> {
        Ok(u32::from_be_bytes(self.peek_at(pos)?))
    }
}

// =============================================================================
// TEST FIXTURES
// =============================================================================

/// Builds wire bytes for tests.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub(crate) struct Writer {
    buf: Vec<u8>,
}

#[cfg(test)]
impl Writer {
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn write_u8(&mut self, v: u8) -> &mut Self {
        self.buf.push(v);
        self
    }

    pub fn write_u32(&mut self, v: u32) -> &mut Self {
        self.buf.extend_from_slice(&v.to_be_bytes());
        self
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(bytes);
        self
    }

    pub fn write_string(&mut self, s: &str) -> &mut Self {
        self.write_u32(s.len() as u32);
        self.write_bytes(s.as_bytes())
    }
}
