//! Growable BCS output buffer
//!
//! The writer tracks its own logical capacity rather than relying on `Vec`'s
//! amortized growth: capacity starts at the configured initial size and grows
//! in steps of that same size, never past the optional maximum. This makes the
//! memory ceiling of an encode pass predictable on constrained targets.
//!
//! Any slice returned by [`BcsWriter::as_bytes`] borrows the writer, so it
//! cannot be held across a later write that may relocate the storage.

use super::uleb128::{encode_uleb128_into, MAX_ULEB128_LEN};
use crate::config::WriterConfig;
use crate::error::{BcsError, Result};

/// Owned, growable BCS output buffer
///
/// Invariant: `len() <= capacity() <= max_size()` (when a maximum is set).
#[derive(Debug, Clone)]
pub struct BcsWriter {
    buffer: Vec<u8>,
    capacity: usize,
    growth: usize,
    max_size: Option<usize>,
}

impl BcsWriter {
    /// Create a writer with `initial_capacity` bytes and no size limit
    ///
    /// Fails with [`BcsError::InvalidInput`] if `initial_capacity` is zero.
    pub fn new(initial_capacity: usize) -> Result<Self> {
        Self::with_limit(initial_capacity, None)
    }

    /// Create a writer that never grows beyond `max_size` bytes
    pub fn with_max_size(initial_capacity: usize, max_size: usize) -> Result<Self> {
        Self::with_limit(initial_capacity, Some(max_size))
    }

    /// Create a writer from configuration (`max_size == 0` means unlimited)
    pub fn from_config(config: &WriterConfig) -> Result<Self> {
        let max = (config.max_size > 0).then_some(config.max_size);
        Self::with_limit(config.initial_capacity, max)
    }

    fn with_limit(initial_capacity: usize, max_size: Option<usize>) -> Result<Self> {
        if initial_capacity == 0 {
            return Err(BcsError::invalid("writer initial capacity must be nonzero"));
        }
        if let Some(max) = max_size {
            if max < initial_capacity {
                return Err(BcsError::invalid(
                    "writer maximum size is smaller than its initial capacity",
                ));
            }
        }

        let mut buffer = Vec::new();
        buffer
            .try_reserve_exact(initial_capacity)
            .map_err(|_| BcsError::OutOfMemory {
                requested: initial_capacity,
            })?;

        Ok(Self {
            buffer,
            capacity: initial_capacity,
            growth: initial_capacity,
            max_size,
        })
    }

    /// Number of bytes written so far
    #[inline]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Current logical capacity
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Growth step applied each time the capacity is exceeded
    #[inline]
    pub fn growth_increment(&self) -> usize {
        self.growth
    }

    #[inline]
    pub fn max_size(&self) -> Option<usize> {
        self.max_size
    }

    /// The written bytes
    ///
    /// The returned slice is only usable until the next mutating call.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Consume the writer, moving the written bytes out to the caller
    pub fn into_bytes(self) -> Vec<u8> {
        let mut this = self;
        std::mem::take(&mut this.buffer)
    }

    /// Free the buffer storage
    ///
    /// Safe to call repeatedly; later calls are no-ops. A released writer
    /// starts again from zero capacity and regrows on the next write.
    pub fn release(&mut self) {
        if self.capacity == 0 && self.buffer.capacity() == 0 {
            return;
        }
        self.buffer = Vec::new();
        self.capacity = 0;
    }

    /// Make room for `additional` more bytes, growing in whole increments
    fn ensure_capacity(&mut self, additional: usize) -> Result<()> {
        let required = self
            .buffer
            .len()
            .checked_add(additional)
            .ok_or(BcsError::BufferTooSmall {
                required: usize::MAX,
                capacity: self.capacity,
            })?;

        if required <= self.capacity {
            return Ok(());
        }

        if let Some(max) = self.max_size {
            if required > max {
                return Err(BcsError::BufferTooSmall {
                    required,
                    capacity: max,
                });
            }
        }

        let shortfall = required - self.capacity;
        let steps = shortfall.div_ceil(self.growth);
        let mut new_capacity = steps
            .checked_mul(self.growth)
            .and_then(|grow_by| self.capacity.checked_add(grow_by))
            .unwrap_or(usize::MAX);

        if let Some(max) = self.max_size {
            new_capacity = new_capacity.min(max);
        }

        if new_capacity < required {
            return Err(BcsError::BufferTooSmall {
                required,
                capacity: new_capacity,
            });
        }

        let reserve = new_capacity - self.buffer.len();
        self.buffer
            .try_reserve_exact(reserve)
            .map_err(|_| BcsError::OutOfMemory { requested: reserve })?;
        self.capacity = new_capacity;

        debug_assert!(
            self.buffer.len() <= self.capacity,
            "written length ({}) must not exceed capacity ({})",
            self.buffer.len(),
            self.capacity
        );
        Ok(())
    }

    /// Append `bytes` after reserving room for all of them
    fn append(&mut self, bytes: &[u8]) -> Result<()> {
        self.ensure_capacity(bytes.len())?;
        self.buffer.extend_from_slice(bytes);
        Ok(())
    }

    pub fn write_u8(&mut self, value: u8) -> Result<()> {
        self.append(&[value])
    }

    pub fn write_u16(&mut self, value: u16) -> Result<()> {
        self.append(&value.to_le_bytes())
    }

    pub fn write_u32(&mut self, value: u32) -> Result<()> {
        self.append(&value.to_le_bytes())
    }

    pub fn write_u64(&mut self, value: u64) -> Result<()> {
        self.append(&value.to_le_bytes())
    }

    /// Append a u128: low 64-bit half first, then the high half
    pub fn write_u128(&mut self, value: u128) -> Result<()> {
        self.append(&value.to_le_bytes())
    }

    /// Append a u256 given as 32 little-endian bytes
    pub fn write_u256(&mut self, value: &[u8; 32]) -> Result<()> {
        self.append(value)
    }

    pub fn write_bool(&mut self, value: bool) -> Result<()> {
        self.write_u8(u8::from(value))
    }

    pub fn write_uleb128(&mut self, value: u64) -> Result<()> {
        let mut buf = [0u8; MAX_ULEB128_LEN];
        let len = encode_uleb128_into(value, &mut buf);
        self.append(&buf[..len])
    }

    /// Append a ULEB128 length prefix followed by `data`
    pub fn write_bytes(&mut self, data: &[u8]) -> Result<()> {
        let mut prefix = [0u8; MAX_ULEB128_LEN];
        let prefix_len = encode_uleb128_into(data.len() as u64, &mut prefix);

        let total = prefix_len
            .checked_add(data.len())
            .ok_or(BcsError::BufferTooSmall {
                required: usize::MAX,
                capacity: self.capacity,
            })?;
        self.ensure_capacity(total)?;
        self.buffer.extend_from_slice(&prefix[..prefix_len]);
        self.buffer.extend_from_slice(data);
        Ok(())
    }

    /// Append a length-prefixed UTF-8 string
    pub fn write_str(&mut self, value: &str) -> Result<()> {
        self.write_bytes(value.as_bytes())
    }

    /// Append raw bytes with no length prefix
    pub fn write_fixed_bytes(&mut self, data: &[u8]) -> Result<()> {
        self.append(data)
    }

    /// Begin a vector; the caller writes `length` elements afterwards
    pub fn write_vec_length(&mut self, length: usize) -> Result<()> {
        self.write_uleb128(length as u64)
    }

    /// Option tag for a present value; the caller writes the payload afterwards
    pub fn write_option_some(&mut self) -> Result<()> {
        self.write_u8(1)
    }

    pub fn write_option_none(&mut self) -> Result<()> {
        self.write_u8(0)
    }
}

impl Drop for BcsWriter {
    fn drop(&mut self) {
        self.release();
    }
}
