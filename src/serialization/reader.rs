//! Bounds-checked BCS input cursor
//!
//! The reader borrows its input and never copies it unless asked to. Every
//! read checks the remaining length before moving the cursor, so a failed read
//! leaves the cursor exactly where it was.

use super::uleb128::decode_uleb128;
use crate::error::{BcsError, Result};

/// Non-owning cursor over a BCS byte sequence
///
/// Invariant: `position() <= len()` after every call, successful or not.
#[derive(Debug, Clone)]
pub struct BcsReader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> BcsReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Current cursor offset from the start of the input
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Total input length
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Bytes left after the cursor
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    /// The unread bytes, without advancing
    #[inline]
    pub fn peek_remaining(&self) -> &'a [u8] {
        &self.data[self.position.min(self.data.len())..]
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        let remaining = self.remaining();
        if len > remaining {
            return Err(BcsError::BufferUnderflow {
                needed: len,
                remaining,
            });
        }
        let start = self.position;
        self.position += len;
        Ok(&self.data[start..self.position])
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let bytes = self.take(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        self.take_array().map(u16::from_le_bytes)
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        self.take_array().map(u32::from_le_bytes)
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        self.take_array().map(u64::from_le_bytes)
    }

    /// Read a u128 stored low half first
    pub fn read_u128(&mut self) -> Result<u128> {
        self.take_array().map(u128::from_le_bytes)
    }

    /// Read a u256 as 32 little-endian bytes
    pub fn read_u256(&mut self) -> Result<[u8; 32]> {
        self.take_array()
    }

    /// Read a canonical boolean; any byte other than 0 or 1 is rejected
    pub fn read_bool(&mut self) -> Result<bool> {
        match self.peek_remaining().first() {
            None => Err(BcsError::BufferUnderflow {
                needed: 1,
                remaining: 0,
            }),
            Some(0) => {
                self.position += 1;
                Ok(false)
            }
            Some(1) => {
                self.position += 1;
                Ok(true)
            }
            Some(_) => Err(BcsError::invalid("boolean byte must be 0 or 1")),
        }
    }

    pub fn read_uleb128(&mut self) -> Result<u64> {
        let (value, consumed) = decode_uleb128(self.peek_remaining())?;
        self.position += consumed;
        Ok(value)
    }

    /// Read exactly `len` raw bytes, borrowed from the input
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        self.take(len)
    }

    /// Read a fixed-size array with no length prefix
    pub fn read_fixed<const N: usize>(&mut self) -> Result<[u8; N]> {
        self.take_array()
    }

    /// Read a ULEB128 length prefix followed by that many bytes
    pub fn read_byte_vec(&mut self) -> Result<&'a [u8]> {
        let start = self.position;
        let result = self.read_length().and_then(|len| self.take(len));
        if result.is_err() {
            self.position = start;
        }
        result
    }

    /// Read a length-prefixed string as validated UTF-8
    pub fn read_str(&mut self) -> Result<&'a str> {
        let start = self.position;
        let bytes = self.read_byte_vec()?;
        std::str::from_utf8(bytes).map_err(|_| {
            self.position = start;
            BcsError::invalid("string is not valid UTF-8")
        })
    }

    /// Read a length-prefixed string into `dest`, followed by a zero terminator
    ///
    /// The decoded length must be strictly less than `dest.len()`, otherwise
    /// [`BcsError::BufferTooSmall`] is returned. Returns the string length.
    pub fn read_string(&mut self, dest: &mut [u8]) -> Result<usize> {
        let start = self.position;
        let len = self.read_length()?;
        if len >= dest.len() {
            self.position = start;
            return Err(BcsError::BufferTooSmall {
                required: len.saturating_add(1),
                capacity: dest.len(),
            });
        }
        let bytes = match self.take(len) {
            Ok(bytes) => bytes,
            Err(e) => {
                self.position = start;
                return Err(e);
            }
        };
        dest[..len].copy_from_slice(bytes);
        dest[len] = 0;
        Ok(len)
    }

    /// Read a vector length (ULEB128)
    pub fn read_vec_length(&mut self) -> Result<usize> {
        self.read_length()
    }

    /// Read an option tag: `Ok(true)` for present, `Ok(false)` for absent
    pub fn read_option_tag(&mut self) -> Result<bool> {
        match self.peek_remaining().first() {
            None => Err(BcsError::BufferUnderflow {
                needed: 1,
                remaining: 0,
            }),
            Some(&tag) if tag <= 1 => {
                self.position += 1;
                Ok(tag == 1)
            }
            Some(_) => Err(BcsError::invalid("option tag must be 0 or 1")),
        }
    }

    /// Consume and return every unread byte
    pub fn read_remaining(&mut self) -> &'a [u8] {
        let rest = self.peek_remaining();
        self.position = self.data.len();
        rest
    }

    fn read_length(&mut self) -> Result<usize> {
        let start = self.position;
        let raw = self.read_uleb128()?;
        usize::try_from(raw).map_err(|_| {
            self.position = start;
            BcsError::Overflow
        })
    }
}
