//! Hex conversion at the transport boundary
//!
//! Transactions enter and leave this crate as hex text. Decoding accepts either
//! case and an optional `0x`/`0X` prefix; encoding always produces lowercase
//! with no prefix.

use crate::error::{BcsError, Result};

/// Strip an optional `0x`/`0X` prefix
#[inline]
pub fn strip_hex_prefix(hex: &str) -> &str {
    hex.strip_prefix("0x")
        .or_else(|| hex.strip_prefix("0X"))
        .unwrap_or(hex)
}

/// Number of bytes `hex` decodes to, after validating its length
fn decoded_len(digits: &str) -> Result<usize> {
    if digits.len() % 2 != 0 {
        return Err(BcsError::invalid("hex string has an odd number of digits"));
    }
    Ok(digits.len() / 2)
}

/// Decode `hex` into `dest`, returning the number of bytes written
///
/// # Errors
///
/// - [`BcsError::InvalidInput`] on odd length or any non-hex digit
/// - [`BcsError::BufferTooSmall`] if the decoded length exceeds `dest.len()`
pub fn decode_hex_into(hex: &str, dest: &mut [u8]) -> Result<usize> {
    let digits = strip_hex_prefix(hex);
    let len = decoded_len(digits)?;
    if len > dest.len() {
        return Err(BcsError::BufferTooSmall {
            required: len,
            capacity: dest.len(),
        });
    }
    decode_digits(digits, &mut dest[..len])?;
    Ok(len)
}

/// Decode `hex` into a new buffer
pub fn decode_hex(hex: &str) -> Result<Vec<u8>> {
    let digits = strip_hex_prefix(hex);
    let mut out = vec![0u8; decoded_len(digits)?];
    decode_digits(digits, &mut out)?;
    Ok(out)
}

/// `dest` must be exactly half the length of `digits`
fn decode_digits(digits: &str, dest: &mut [u8]) -> Result<()> {
    ::hex::decode_to_slice(digits, dest)
        .map_err(|_| BcsError::invalid("hex string contains a non-hex digit"))
}

/// Decode exactly 32 bytes, as used for object ids and addresses
pub fn decode_hex_32(hex: &str) -> Result<[u8; 32]> {
    let mut out = [0u8; 32];
    let len = decode_hex_into(hex, &mut out)?;
    if len != 32 {
        return Err(BcsError::invalid("expected 32 bytes of hex"));
    }
    Ok(out)
}

/// Encode bytes as lowercase hex, two characters per byte
pub fn encode_hex(bytes: &[u8]) -> String {
    ::hex::encode(bytes)
}
