//! BCS wire format serialization/deserialization
//!
//! This module provides the byte-exact encoding Sui validators use to decode
//! and hash transactions. Any deviation produces a different digest and an
//! unusable signature.
//!
//! All fixed-width integers are little-endian; lengths are ULEB128.

pub mod reader;
pub mod transaction;
pub mod uleb128;
pub mod writer;

pub use reader::BcsReader;
pub use transaction::{
    decode_call_arg, deserialize_transaction_data, serialize_transaction_data,
    serialize_transaction_data_with,
};
pub use uleb128::{decode_uleb128, encode_uleb128};
pub use writer::BcsWriter;
