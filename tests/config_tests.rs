//! Configuration module tests
//!
//! Tests for codec configuration loading, persistence and validation.


use std::sync::Mutex;

use sui_sensor_tx::config::{CodecConfig, DebugConfig, GasConfig, MoveCallConfig, WriterConfig};
use sui_sensor_tx::{BcsError, SensorTxCodec};

use test_helpers::{gas_coin, soil_fields, SENDER};

// Environment variables are process-wide
static ENV_LOCK: Mutex<()> = Mutex::new(());

#[test]
fn test_writer_config_default() {
    let config = WriterConfig::default();

    assert_eq!(config.initial_capacity, 512);
    assert_eq!(config.max_size, 0);
}

#[test]
fn test_move_call_config_default() {
    let config = MoveCallConfig::default();

    assert!(config.package_id.is_empty());
    assert_eq!(config.module_name, "sensor_storage");
    assert_eq!(config.function_name, "store_sensor_data");
}

#[test]
fn test_gas_and_debug_defaults() {
    assert_eq!(GasConfig::default().budget, 100_000_000);
    assert_eq!(GasConfig::default().price, 1000);
    assert!(!DebugConfig::default().log_transaction_hex);
}

#[test]
fn test_codec_config_from_env() {
    let _guard = ENV_LOCK.lock().unwrap();

    std::env::set_var("SUI_SENSOR_TX_WRITER_INITIAL_CAPACITY", "1024");
    std::env::set_var("SUI_SENSOR_TX_GAS_BUDGET", "42");
    std::env::set_var("SUI_SENSOR_TX_GAS_PRICE", "not-a-number");
    std::env::set_var("SUI_SENSOR_TX_MOVE_CALL_MODULE_NAME", "greenhouse");
    std::env::set_var("SUI_SENSOR_TX_DEBUG_LOG_TRANSACTION_HEX", "true");

    let config = CodecConfig::from_env();

    std::env::remove_var("SUI_SENSOR_TX_WRITER_INITIAL_CAPACITY");
    std::env::remove_var("SUI_SENSOR_TX_GAS_BUDGET");
    std::env::remove_var("SUI_SENSOR_TX_GAS_PRICE");
    std::env::remove_var("SUI_SENSOR_TX_MOVE_CALL_MODULE_NAME");
    std::env::remove_var("SUI_SENSOR_TX_DEBUG_LOG_TRANSACTION_HEX");

    assert_eq!(config.writer.initial_capacity, 1024);
    assert_eq!(config.gas.budget, 42);
    // Unparseable values keep the default
    assert_eq!(config.gas.price, 1000);
    assert_eq!(config.move_call.module_name, "greenhouse");
    assert!(config.debug.log_transaction_hex);
}

#[test]
fn test_json_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("codec.json");

    let mut config = CodecConfig::default();
    config.move_call.package_id = format!("0x{}", "ab".repeat(32));
    config.gas.price = 900;
    config.writer.max_size = 8192;

    config.to_json_file(&path).unwrap();
    let loaded = CodecConfig::from_json_file(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_json_file_errors() {
    let dir = tempfile::tempdir().unwrap();

    let missing = dir.path().join("missing.json");
    assert!(CodecConfig::from_json_file(&missing)
        .unwrap_err()
        .contains("Failed to read"));

    let garbage = dir.path().join("garbage.json");
    std::fs::write(&garbage, "{ not json").unwrap();
    assert!(CodecConfig::from_json_file(&garbage)
        .unwrap_err()
        .contains("Failed to parse"));
}

#[test]
fn test_empty_json_is_default() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.json");
    std::fs::write(&path, "{}").unwrap();
    assert_eq!(
        CodecConfig::from_json_file(&path).unwrap(),
        CodecConfig::default()
    );
}

#[test]
fn test_codec_uses_configured_target() {
    let mut config = CodecConfig::default();
    config.move_call.package_id = "cd".repeat(32);
    config.move_call.function_name = "store_batch".to_string();
    config.gas.budget = 7;

    let params = config
        .transaction_params(SENDER, gas_coin(), soil_fields())
        .unwrap();
    let codec = SensorTxCodec::with_config(config).unwrap();
    let hex = codec.build_transaction_hex(&params).unwrap();
    let decoded = codec.decode_transaction_hex(&hex).unwrap();

    assert_eq!(decoded.gas_data.budget, 7);
    match &decoded.kind.commands[0] {
        sui_sensor_tx::types::Command::MoveCall(call) => {
            assert_eq!(call.package, [0xcd; 32]);
            assert_eq!(call.function, "store_batch");
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn test_codec_writer_limit_from_config() {
    let mut config = CodecConfig::default();
    config.writer.initial_capacity = 32;
    config.writer.max_size = 64;
    config.move_call.package_id = "11".repeat(32);

    let params = config
        .transaction_params(SENDER, gas_coin(), soil_fields())
        .unwrap();
    let codec = SensorTxCodec::with_config(config).unwrap();
    assert!(codec.build_transaction(&params).is_err());
}

#[test]
fn test_codec_rejects_invalid_config() {
    let mut config = CodecConfig::default();
    config.writer.initial_capacity = 0;
    assert!(matches!(
        SensorTxCodec::with_config(config),
        Err(BcsError::InvalidInput(_))
    ));

    let mut config = CodecConfig::default();
    config.writer.initial_capacity = 64;
    config.writer.max_size = 32;
    assert!(matches!(
        SensorTxCodec::with_config(config),
        Err(BcsError::InvalidInput(_))
    ));
}

#[test]
fn test_codec_from_env_validates() {
    let _guard = ENV_LOCK.lock().unwrap();

    std::env::set_var("SUI_SENSOR_TX_WRITER_INITIAL_CAPACITY", "0");
    let rejected = SensorTxCodec::from_env();
    std::env::remove_var("SUI_SENSOR_TX_WRITER_INITIAL_CAPACITY");
    assert!(matches!(rejected, Err(BcsError::InvalidInput(_))));

    let codec = SensorTxCodec::from_env().unwrap();
    assert_eq!(codec.config().writer.initial_capacity, 512);
}
