//! Error types for BCS encoding, decoding and transaction rewriting

use std::borrow::Cow;
use thiserror::Error;

/// Every codec operation fails with exactly one of these kinds.
///
/// The first error aborts the current encode or decode; callers never receive
/// partially written output alongside an error.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum BcsError {
    /// A required argument was absent or a value was outside its field's domain
    /// (non-canonical boolean byte, malformed hex, unknown variant tag, ...).
    #[error("Invalid input: {0}")]
    InvalidInput(Cow<'static, str>),

    /// The allocator refused to grow a buffer.
    #[error("Out of memory growing buffer by {requested} bytes")]
    OutOfMemory { requested: usize },

    /// A write would exceed the configured maximum, or a decode target cannot
    /// hold the decoded length.
    #[error("Buffer too small: {required} bytes required, {capacity} available")]
    BufferTooSmall { required: usize, capacity: usize },

    /// A ULEB128 sequence would need more than 64 bits.
    #[error("ULEB128 value overflows 64 bits")]
    Overflow,

    /// A read needs more bytes than remain in the input.
    #[error("Buffer underflow: {needed} bytes needed, {remaining} remaining")]
    BufferUnderflow { needed: usize, remaining: usize },
}

impl BcsError {
    pub(crate) fn invalid(msg: &'static str) -> Self {
        BcsError::InvalidInput(Cow::Borrowed(msg))
    }
}

pub type Result<T> = std::result::Result<T, BcsError>;
