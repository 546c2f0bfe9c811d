//! # sui-sensor-tx
//!
//! Byte-exact BCS encoding of Sui transactions for sensor devices.
//!
//! This crate builds the unsigned `TransactionData` that records one sensor
//! reading on chain, and rewrites the Pure inputs of an existing transaction
//! without disturbing any other byte. The output is hashed and signed by an
//! external signer, so every encoder here must match the validator's BCS
//! decoder exactly.
//!
//! ## Layers
//!
//! - [`serialization`]: ULEB128, the growable [`BcsWriter`], the bounded
//!   [`BcsReader`] and the typed `TransactionData` codec
//! - [`hex`]: bytes to and from transport hex
//! - [`assembler`]: the canonical `store_sensor_data` transaction
//! - [`mutator`]: Pure input replacement on an existing transaction
//!
//! ## Usage
//!
//! ```rust
//! use sui_sensor_tx::types::{CallArg, ObjectRef, SensorFields, TransactionParams};
//! use sui_sensor_tx::assembler::build_sensor_transaction;
//! use sui_sensor_tx::mutator::replace_pure_inputs;
//!
//! let params = TransactionParams {
//!     package_id: [0xaa; 32],
//!     module_name: "sensor_storage".to_string(),
//!     function_name: "store_sensor_data".to_string(),
//!     sender: [0x11; 32],
//!     gas_coin: ObjectRef { object_id: [0x22; 32], version: 5, digest: [0x33; 32] },
//!     gas_price: 1000,
//!     gas_budget: 100_000_000,
//!     fields: SensorFields {
//!         temperature: 2550,
//!         device_id: "esp32-device".to_string(),
//!         sensor_type: "soil".to_string(),
//!         ..Default::default()
//!     },
//! };
//! let tx = build_sensor_transaction(&params).unwrap();
//!
//! // Swap in fresh measurements; device id, sensor type and location stay put
//! let fresh = [2610u64, 5800, 1400, 690].map(u64::to_le_bytes);
//! let refs: Vec<&[u8]> = fresh.iter().map(|p| p.as_slice()).collect();
//! let updated = replace_pure_inputs(&tx, &refs).unwrap();
//!
//! let decoded = sui_sensor_tx::serialization::deserialize_transaction_data(&updated).unwrap();
//! assert!(matches!(&decoded.kind.inputs[0],
//!     CallArg::Pure(p) if p[..] == 2610u64.to_le_bytes()));
//! assert!(matches!(&decoded.kind.inputs[4],
//!     CallArg::Pure(p) if p[..] == b"\x0cesp32-device"[..]));
//! ```

pub mod assembler;
pub mod config;
pub mod constants;
pub mod error;
pub mod hex;
pub mod mutator;
pub mod serialization;
pub mod types;

pub use config::CodecConfig;
pub use error::{BcsError, Result};
pub use mutator::RewriteSummary;
pub use serialization::{BcsReader, BcsWriter};
pub use types::{SensorFields, SensorReading, TransactionData, TransactionParams};

/// Configured entry point for building and rewriting sensor transactions
#[derive(Debug, Clone, Default)]
pub struct SensorTxCodec {
    config: CodecConfig,
}

impl SensorTxCodec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails with [`BcsError::InvalidInput`] if `config` does not validate
    pub fn with_config(config: CodecConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Configuration loaded from `SUI_SENSOR_TX_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::with_config(CodecConfig::from_env())
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Assemble the sensor transaction as raw bytes
    pub fn build_transaction(&self, params: &TransactionParams) -> Result<Vec<u8>> {
        assembler::build_sensor_transaction_with(params, &self.config.writer)
    }

    /// Assemble the sensor transaction as lowercase hex
    pub fn build_transaction_hex(&self, params: &TransactionParams) -> Result<String> {
        assembler::build_sensor_transaction_hex(params, &self.config)
    }

    /// Replace Pure payloads of a hex transaction, in order
    pub fn replace_pure_inputs_hex(&self, tx_hex: &str, replacements: &[&[u8]]) -> Result<String> {
        mutator::replace_pure_inputs_hex(tx_hex, replacements, &self.config)
    }

    /// Write a reading into the first five Pure inputs of a hex transaction
    pub fn apply_sensor_reading_hex(&self, tx_hex: &str, reading: &SensorReading) -> Result<String> {
        mutator::apply_sensor_reading_hex(tx_hex, reading, &self.config)
    }

    /// Decode a hex transaction into its typed form
    pub fn decode_transaction_hex(&self, tx_hex: &str) -> Result<TransactionData> {
        let bytes = hex::decode_hex(tx_hex)?;
        serialization::deserialize_transaction_data(&bytes)
    }
}
