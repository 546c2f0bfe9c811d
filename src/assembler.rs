//! Sensor transaction assembly
//!
//! Builds the unsigned `TransactionData` for one call of
//! `sensor_storage::store_sensor_data`. The input order below is what the Move
//! function's parameter list expects; reordering it produces a transaction the
//! validator rejects or, worse, one that stores fields in the wrong columns.
//!
//! | Input | Kind   | Value                         |
//! |-------|--------|-------------------------------|
//! | 0     | Pure   | temperature (u64)             |
//! | 1     | Pure   | humidity (u64)                |
//! | 2     | Pure   | ec (u64)                      |
//! | 3     | Pure   | ph (u64)                      |
//! | 4     | Pure   | device_id (string)            |
//! | 5     | Pure   | sensor_type (string)          |
//! | 6     | Pure   | location (string, may be "")  |
//! | 7     | Shared | clock `0x6`, version 1, immut |

use tracing::{debug, trace};

use crate::config::{CodecConfig, WriterConfig};
use crate::constants::{CLOCK_INITIAL_SHARED_VERSION, CLOCK_OBJECT_ID, SENSOR_INPUT_COUNT};
use crate::error::Result;
use crate::hex::encode_hex;
use crate::serialization::transaction::serialize_transaction_data_with;
use crate::serialization::BcsWriter;
use crate::types::{
    Argument, CallArg, Command, GasData, ObjectArg, ProgrammableMoveCall,
    ProgrammableTransaction, TransactionData, TransactionExpiration, TransactionParams,
};

/// Pure payload of a u64: 8 little-endian bytes
fn pure_u64(value: u64) -> CallArg {
    CallArg::Pure(value.to_le_bytes().to_vec())
}

/// Pure payload of a string: its BCS encoding (length prefix plus UTF-8)
fn pure_string(value: &str) -> Result<CallArg> {
    let mut writer = BcsWriter::new(value.len() + 1)?;
    writer.write_str(value)?;
    Ok(CallArg::Pure(writer.into_bytes()))
}

/// Typed form of the sensor transaction
///
/// Fails only if a string field cannot be buffered.
pub fn sensor_transaction_data(params: &TransactionParams) -> Result<TransactionData> {
    let fields = &params.fields;
    let inputs = vec![
        pure_u64(fields.temperature),
        pure_u64(fields.humidity),
        pure_u64(fields.ec),
        pure_u64(fields.ph),
        pure_string(&fields.device_id)?,
        pure_string(&fields.sensor_type)?,
        pure_string(&fields.location)?,
        CallArg::Object(ObjectArg::Shared {
            object_id: CLOCK_OBJECT_ID,
            initial_shared_version: CLOCK_INITIAL_SHARED_VERSION,
            mutable: false,
        }),
    ];
    debug_assert_eq!(inputs.len(), SENSOR_INPUT_COUNT);

    let arguments = (0..SENSOR_INPUT_COUNT as u16).map(Argument::Input).collect();

    Ok(TransactionData {
        kind: ProgrammableTransaction {
            inputs,
            commands: vec![Command::MoveCall(Box::new(ProgrammableMoveCall {
                package: params.package_id,
                module: params.module_name.clone(),
                function: params.function_name.clone(),
                type_arguments: Vec::new(),
                arguments,
            }))],
        },
        sender: params.sender,
        gas_data: GasData {
            payment: vec![params.gas_coin],
            owner: params.sender,
            price: params.gas_price,
            budget: params.gas_budget,
        },
        expiration: TransactionExpiration::None,
    })
}

/// Assemble the sensor transaction with the default writer configuration
pub fn build_sensor_transaction(params: &TransactionParams) -> Result<Vec<u8>> {
    build_sensor_transaction_with(params, &WriterConfig::default())
}

/// Assemble the sensor transaction with explicit writer limits
///
/// Identical parameters always produce identical bytes.
pub fn build_sensor_transaction_with(
    params: &TransactionParams,
    config: &WriterConfig,
) -> Result<Vec<u8>> {
    let tx = sensor_transaction_data(params)?;
    let bytes = serialize_transaction_data_with(&tx, config)?;
    debug!(
        len = bytes.len(),
        module = %params.module_name,
        function = %params.function_name,
        "assembled sensor transaction"
    );
    Ok(bytes)
}

/// Assemble the sensor transaction and hex-encode it for transport
pub fn build_sensor_transaction_hex(
    params: &TransactionParams,
    config: &CodecConfig,
) -> Result<String> {
    let bytes = build_sensor_transaction_with(params, &config.writer)?;
    let hex = encode_hex(&bytes);
    if config.debug.log_transaction_hex {
        trace!(tx = %hex, "sensor transaction hex");
    }
    Ok(hex)
}

/// Structural experiments, not a supported wire format
pub mod experimental {
    use super::*;

    /// Emit a partial transaction: sender, gas payment, budget, price, a zero
    /// sequence number, no expiration, the kind tag and the input count
    ///
    /// No validator accepts these bytes. The gas digest is written raw, with
    /// no length prefix, and inputs and commands are omitted entirely.
    pub fn build_partial_sensor_transaction(params: &TransactionParams) -> Result<Vec<u8>> {
        let mut writer = BcsWriter::from_config(&WriterConfig::default())?;

        writer.write_fixed_bytes(&params.sender)?;
        writer.write_vec_length(1)?;
        writer.write_fixed_bytes(&params.gas_coin.object_id)?;
        writer.write_u64(params.gas_coin.version)?;
        writer.write_fixed_bytes(&params.gas_coin.digest)?;
        writer.write_u64(params.gas_budget)?;
        writer.write_u64(params.gas_price)?;
        writer.write_u64(0)?;
        writer.write_u8(crate::constants::EXPIRATION_NONE)?;
        writer.write_u8(crate::constants::KIND_PROGRAMMABLE_TRANSACTION)?;
        writer.write_vec_length(SENSOR_INPUT_COUNT)?;

        debug!(len = writer.len(), "assembled partial sensor transaction");
        Ok(writer.into_bytes())
    }
}
