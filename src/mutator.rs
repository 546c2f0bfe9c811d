//! Pure input rewriting
//!
//! Takes an already-built transaction and swaps the payloads of its Pure
//! inputs, in order, for caller-supplied bytes. Nothing else is re-encoded: the
//! header, every Object input and everything after the input list (commands,
//! sender, gas, expiration) are copied from the source span by span, so the
//! output differs from the input only inside the replaced Pure payloads.
//!
//! Decoding uses only the positional variant tags of each input; no schema of
//! the called function is needed.

use tracing::{debug, trace, warn};

use crate::config::{CodecConfig, WriterConfig};
use crate::error::Result;
use crate::hex::{decode_hex, encode_hex};
use crate::serialization::transaction::decode_call_arg;
use crate::serialization::{BcsReader, BcsWriter};
use crate::types::{CallArg, SensorReading};

/// What a rewrite touched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RewriteSummary {
    /// Pure inputs found in the source
    pub pure_inputs: usize,
    /// Pure inputs whose payload was replaced
    pub replaced: usize,
    /// Object inputs copied unchanged
    pub object_inputs: usize,
}

impl RewriteSummary {
    /// Pure inputs that kept their original payload
    pub fn preserved(&self) -> usize {
        self.pure_inputs - self.replaced
    }
}

/// Replace Pure payloads with the default writer configuration
///
/// `replacements[k]` becomes the payload of the k-th Pure input. Surplus
/// Pure inputs keep their original bytes; surplus replacements are ignored.
pub fn replace_pure_inputs(tx: &[u8], replacements: &[&[u8]]) -> Result<Vec<u8>> {
    replace_pure_inputs_with(tx, replacements, &WriterConfig::default())
}

/// Replace Pure payloads with explicit writer limits
pub fn replace_pure_inputs_with(
    tx: &[u8],
    replacements: &[&[u8]],
    config: &WriterConfig,
) -> Result<Vec<u8>> {
    replace_pure_inputs_with_summary(tx, replacements, config).map(|(bytes, _)| bytes)
}

/// Replace Pure payloads and report what was touched
///
/// Any decode failure aborts the whole rewrite; no partial output is returned.
pub fn replace_pure_inputs_with_summary(
    tx: &[u8],
    replacements: &[&[u8]],
    config: &WriterConfig,
) -> Result<(Vec<u8>, RewriteSummary)> {
    let mut reader = BcsReader::new(tx);

    // Version tag, kind tag, input count: copied as found
    reader.read_u8()?;
    reader.read_u8()?;
    let input_count = reader.read_vec_length()?;
    let header_len = reader.position();

    let mut writer = BcsWriter::from_config(config)?;
    writer.write_fixed_bytes(&tx[..header_len])?;

    let mut summary = RewriteSummary::default();
    let mut pending = replacements.iter();

    for index in 0..input_count {
        let start = reader.position();
        let (arg, consumed) = decode_call_arg(reader.peek_remaining())?;
        let span = reader.read_bytes(consumed)?;

        match arg {
            CallArg::Pure(_) => {
                summary.pure_inputs += 1;
                match pending.next() {
                    Some(payload) => {
                        writer.write_u8(crate::constants::CALL_ARG_PURE)?;
                        writer.write_bytes(payload)?;
                        summary.replaced += 1;
                        trace!(index, len = payload.len(), "replaced pure input");
                    }
                    None => {
                        writer.write_fixed_bytes(span)?;
                        trace!(index, offset = start, "kept pure input");
                    }
                }
            }
            CallArg::Object(obj) => {
                summary.object_inputs += 1;
                writer.write_fixed_bytes(span)?;
                trace!(index, object_id = %encode_hex(obj.object_id()), "copied object input");
            }
        }
    }

    writer.write_fixed_bytes(reader.read_remaining())?;

    let unused = pending.len();
    if unused > 0 {
        warn!(
            unused,
            pure_inputs = summary.pure_inputs,
            "more replacement payloads than pure inputs"
        );
    }
    if summary.preserved() > 0 {
        debug!(
            preserved = summary.preserved(),
            "ran out of replacement payloads, original values kept"
        );
    }
    debug!(
        pure = summary.pure_inputs,
        replaced = summary.replaced,
        objects = summary.object_inputs,
        len = writer.len(),
        "rewrote pure inputs"
    );

    Ok((writer.into_bytes(), summary))
}

/// Hex-in, hex-out variant of [`replace_pure_inputs_with`]
pub fn replace_pure_inputs_hex(
    tx_hex: &str,
    replacements: &[&[u8]],
    config: &CodecConfig,
) -> Result<String> {
    let tx = decode_hex(tx_hex)?;
    let bytes = replace_pure_inputs_with(&tx, replacements, &config.writer)?;
    let hex = encode_hex(&bytes);
    if config.debug.log_transaction_hex {
        trace!(tx = %hex, "rewritten transaction hex");
    }
    Ok(hex)
}

/// Write a reading into the first five Pure inputs
///
/// Payloads are the 8-byte little-endian temperature, humidity, ec, ph and
/// timestamp, in that order. Placement is positional: the template must carry
/// a u64 timestamp as its fifth Pure input. In the layout built by
/// [`crate::assembler`] the fifth Pure input is the `device_id` string, which
/// this overwrites; use [`replace_pure_inputs`] with four payloads there.
pub fn apply_sensor_reading(tx: &[u8], reading: &SensorReading) -> Result<Vec<u8>> {
    let payloads = reading.pure_payloads();
    let refs: Vec<&[u8]> = payloads.iter().map(|p| p.as_slice()).collect();
    replace_pure_inputs(tx, &refs)
}

/// Hex-in, hex-out variant of [`apply_sensor_reading`]
pub fn apply_sensor_reading_hex(
    tx_hex: &str,
    reading: &SensorReading,
    config: &CodecConfig,
) -> Result<String> {
    let payloads = reading.pure_payloads();
    let refs: Vec<&[u8]> = payloads.iter().map(|p| p.as_slice()).collect();
    replace_pure_inputs_hex(tx_hex, &refs, config)
}
