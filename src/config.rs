//! Configuration for sui-sensor-tx
//!
//! Provides the writer limits, the Move call target and the gas defaults used
//! when assembling sensor transactions. These settings can be loaded from a JSON
//! file, environment variables, or passed programmatically. There is no global
//! instance: callers hand a config to whatever needs it.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::{
    DEFAULT_FUNCTION_NAME, DEFAULT_GAS_BUDGET, DEFAULT_GAS_PRICE, DEFAULT_MODULE_NAME,
    DEFAULT_WRITER_CAPACITY,
};
use crate::error::{BcsError, Result};
use crate::hex::decode_hex_32;
use crate::types::{ObjectRef, SensorFields, SuiAddress, TransactionParams};

/// Output buffer sizing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriterConfig {
    /// Initial capacity in bytes; also the growth step
    /// Default: 512
    #[serde(default = "default_initial_capacity")]
    pub initial_capacity: usize,

    /// Hard ceiling on the encoded size in bytes
    /// Default: 0 (unlimited)
    #[serde(default)]
    pub max_size: usize,
}

fn default_initial_capacity() -> usize {
    DEFAULT_WRITER_CAPACITY
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_WRITER_CAPACITY,
            max_size: 0,
        }
    }
}

/// Target of the `store_sensor_data` call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveCallConfig {
    /// Published package id as hex (`0x` prefix optional)
    /// Default: empty (must be set before assembling)
    #[serde(default)]
    pub package_id: String,

    #[serde(default = "default_module_name")]
    pub module_name: String,

    #[serde(default = "default_function_name")]
    pub function_name: String,
}

fn default_module_name() -> String {
    DEFAULT_MODULE_NAME.to_string()
}

fn default_function_name() -> String {
    DEFAULT_FUNCTION_NAME.to_string()
}

impl Default for MoveCallConfig {
    fn default() -> Self {
        Self {
            package_id: String::new(),
            module_name: default_module_name(),
            function_name: default_function_name(),
        }
    }
}

/// Gas parameters, in MIST
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GasConfig {
    /// Default: 100_000_000 (0.1 SUI)
    #[serde(default = "default_gas_budget")]
    pub budget: u64,

    /// Default: 1000
    #[serde(default = "default_gas_price")]
    pub price: u64,
}

fn default_gas_budget() -> u64 {
    DEFAULT_GAS_BUDGET
}

fn default_gas_price() -> u64 {
    DEFAULT_GAS_PRICE
}

impl Default for GasConfig {
    fn default() -> Self {
        Self {
            budget: DEFAULT_GAS_BUDGET,
            price: DEFAULT_GAS_PRICE,
        }
    }
}

/// Debug and development configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DebugConfig {
    /// Emit the full transaction hex at `trace` level after each build
    /// Default: false
    #[serde(default)]
    pub log_transaction_hex: bool,
}

/// Complete codec configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CodecConfig {
    #[serde(default)]
    pub writer: WriterConfig,

    #[serde(default)]
    pub move_call: MoveCallConfig,

    #[serde(default)]
    pub gas: GasConfig,

    #[serde(default)]
    pub debug: DebugConfig,
}

impl CodecConfig {
    /// Load configuration from environment variables
    ///
    /// Environment variables follow the pattern: `SUI_SENSOR_TX_<SECTION>_<KEY>`
    ///
    /// Examples:
    /// - `SUI_SENSOR_TX_WRITER_INITIAL_CAPACITY=1024`
    /// - `SUI_SENSOR_TX_MOVE_CALL_PACKAGE_ID=0xabc...`
    /// - `SUI_SENSOR_TX_GAS_BUDGET=50000000`
    ///
    /// Unparseable values are ignored and the default is kept.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("SUI_SENSOR_TX_WRITER_INITIAL_CAPACITY") {
            if let Ok(capacity) = val.parse::<usize>() {
                config.writer.initial_capacity = capacity;
            }
        }
        if let Ok(val) = std::env::var("SUI_SENSOR_TX_WRITER_MAX_SIZE") {
            if let Ok(max) = val.parse::<usize>() {
                config.writer.max_size = max;
            }
        }

        if let Ok(val) = std::env::var("SUI_SENSOR_TX_MOVE_CALL_PACKAGE_ID") {
            config.move_call.package_id = val;
        }
        if let Ok(val) = std::env::var("SUI_SENSOR_TX_MOVE_CALL_MODULE_NAME") {
            config.move_call.module_name = val;
        }
        if let Ok(val) = std::env::var("SUI_SENSOR_TX_MOVE_CALL_FUNCTION_NAME") {
            config.move_call.function_name = val;
        }

        if let Ok(val) = std::env::var("SUI_SENSOR_TX_GAS_BUDGET") {
            if let Ok(budget) = val.parse::<u64>() {
                config.gas.budget = budget;
            }
        }
        if let Ok(val) = std::env::var("SUI_SENSOR_TX_GAS_PRICE") {
            if let Ok(price) = val.parse::<u64>() {
                config.gas.price = price;
            }
        }

        if let Ok(val) = std::env::var("SUI_SENSOR_TX_DEBUG_LOG_TRANSACTION_HEX") {
            if let Ok(enabled) = val.parse::<bool>() {
                config.debug.log_transaction_hex = enabled;
            }
        }

        config
    }

    /// Load configuration from JSON file
    pub fn from_json_file(path: &Path) -> std::result::Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        serde_json::from_str(&content).map_err(|e| format!("Failed to parse config JSON: {}", e))
    }

    /// Save configuration to JSON file
    pub fn to_json_file(&self, path: &Path) -> std::result::Result<(), String> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {}", e))
    }

    /// Validate configuration
    ///
    /// Fails with [`crate::BcsError::InvalidInput`] naming the first bad field.
    pub fn validate(&self) -> Result<()> {
        if self.writer.initial_capacity == 0 {
            return Err(BcsError::invalid("writer.initial_capacity must be nonzero"));
        }
        if self.writer.max_size != 0 && self.writer.max_size < self.writer.initial_capacity {
            return Err(BcsError::invalid(
                "writer.max_size must be 0 or at least writer.initial_capacity",
            ));
        }
        if self.move_call.module_name.is_empty() || self.move_call.function_name.is_empty() {
            return Err(BcsError::invalid("move_call module and function names must be set"));
        }
        Ok(())
    }

    /// Combine this config with per-call values into assembler parameters
    ///
    /// Fails with [`crate::BcsError::InvalidInput`] if `move_call.package_id`
    /// is not 32 bytes of hex.
    pub fn transaction_params(
        &self,
        sender: SuiAddress,
        gas_coin: ObjectRef,
        fields: SensorFields,
    ) -> Result<TransactionParams> {
        Ok(TransactionParams {
            package_id: decode_hex_32(&self.move_call.package_id)?,
            module_name: self.move_call.module_name.clone(),
            function_name: self.move_call.function_name.clone(),
            sender,
            gas_coin,
            gas_price: self.gas.price,
            gas_budget: self.gas.budget,
            fields,
        })
    }
}
