//! ULEB128 encoding/decoding
//!
//! ULEB128 (unsigned little-endian base-128) is the variable-length integer
//! encoding BCS uses for every length prefix, vector length and variant count.
//! Each byte carries 7 value bits, least significant group first; the high bit
//! is set on every byte except the last.
//!
//! Encoding rules:
//! - Values < 0x80: single byte
//! - Each further 7 bits of value: one more byte
//! - u64::MAX: 10 bytes (nine 0xff bytes followed by 0x01)

use crate::error::{BcsError, Result};

/// Longest encoding of a `u64`.
pub const MAX_ULEB128_LEN: usize = 10;

const CONTINUATION_BIT: u8 = 0x80;
const VALUE_MASK: u8 = 0x7f;

/// Encode `value` into `out`, returning the number of bytes used
///
/// Stack-buffer form used by the writer so a length prefix can be reserved in
/// one step together with the payload that follows it.
#[inline]
pub fn encode_uleb128_into(mut value: u64, out: &mut [u8; MAX_ULEB128_LEN]) -> usize {
    let mut len = 0;
    loop {
        let mut byte = (value as u8) & VALUE_MASK;
        value >>= 7;
        if value != 0 {
            byte |= CONTINUATION_BIT;
        }
        out[len] = byte;
        len += 1;
        if value == 0 {
            break;
        }
    }

    debug_assert!(
        len <= MAX_ULEB128_LEN,
        "ULEB128 encoding must not exceed {MAX_ULEB128_LEN} bytes, got {len}"
    );
    len
}

/// Encode a u64 value as ULEB128
///
/// # Examples
///
/// ```
/// use sui_sensor_tx::serialization::uleb128::encode_uleb128;
///
/// assert_eq!(encode_uleb128(0), vec![0x00]);
/// assert_eq!(encode_uleb128(127), vec![0x7f]);
/// assert_eq!(encode_uleb128(128), vec![0x80, 0x01]);
/// assert_eq!(encode_uleb128(300), vec![0xac, 0x02]);
/// ```
pub fn encode_uleb128(value: u64) -> Vec<u8> {
    let mut buf = [0u8; MAX_ULEB128_LEN];
    let len = encode_uleb128_into(value, &mut buf);
    buf[..len].to_vec()
}

/// Number of bytes `encode_uleb128(value)` produces
#[inline]
pub fn uleb128_len(value: u64) -> usize {
    let bits = 64 - value.leading_zeros() as usize;
    bits.div_ceil(7).max(1)
}

/// Decode a ULEB128 value from the start of `data`
///
/// Returns the decoded value and the number of bytes consumed.
///
/// # Errors
///
/// - [`BcsError::BufferUnderflow`] if `data` ends before a byte with the
///   continuation bit clear.
/// - [`BcsError::Overflow`] if the accumulated shift reaches 64 before the
///   sequence terminates, or the tenth byte carries bits beyond bit 63.
///
/// # Examples
///
/// ```
/// use sui_sensor_tx::serialization::uleb128::decode_uleb128;
///
/// assert_eq!(decode_uleb128(&[0x00]), Ok((0, 1)));
/// assert_eq!(decode_uleb128(&[0xac, 0x02]), Ok((300, 2)));
/// assert!(decode_uleb128(&[0x80]).is_err());
/// ```
pub fn decode_uleb128(data: &[u8]) -> Result<(u64, usize)> {
    let mut value: u64 = 0;
    let mut shift: u32 = 0;

    for (i, &byte) in data.iter().enumerate() {
        let group = u64::from(byte & VALUE_MASK);

        // Only the lowest bit of the tenth group still fits in a u64
        if shift == 63 && group > 1 {
            return Err(BcsError::Overflow);
        }
        value |= group << shift;

        if byte & CONTINUATION_BIT == 0 {
            return Ok((value, i + 1));
        }

        shift += 7;
        if shift >= 64 {
            return Err(BcsError::Overflow);
        }
    }

    Err(BcsError::BufferUnderflow {
        needed: data.len() + 1,
        remaining: data.len(),
    })
}
