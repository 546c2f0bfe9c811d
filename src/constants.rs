//! Wire-format tags and well-known values
//!
//! Variant tags are the BCS enum discriminants Sui's validators expect. They
//! are consensus-visible: changing one produces bytes no validator accepts.

use crate::types::ObjectId;

// TransactionData / TransactionKind

/// `TransactionData::V1`
pub const TRANSACTION_DATA_V1: u8 = 0x00;

/// `TransactionKind::ProgrammableTransaction`
pub const KIND_PROGRAMMABLE_TRANSACTION: u8 = 0x00;

// CallArg

pub const CALL_ARG_PURE: u8 = 0x00;
pub const CALL_ARG_OBJECT: u8 = 0x01;

// ObjectArg

pub const OBJECT_ARG_IMM_OR_OWNED: u8 = 0x00;
pub const OBJECT_ARG_SHARED: u8 = 0x01;
pub const OBJECT_ARG_RECEIVING: u8 = 0x02;

// Command

pub const COMMAND_MOVE_CALL: u8 = 0x00;
pub const COMMAND_TRANSFER_OBJECTS: u8 = 0x01;
pub const COMMAND_SPLIT_COINS: u8 = 0x02;
pub const COMMAND_MERGE_COINS: u8 = 0x03;
pub const COMMAND_PUBLISH: u8 = 0x04;
pub const COMMAND_MAKE_MOVE_VEC: u8 = 0x05;
pub const COMMAND_UPGRADE: u8 = 0x06;

// Argument

pub const ARGUMENT_GAS_COIN: u8 = 0x00;
pub const ARGUMENT_INPUT: u8 = 0x01;
pub const ARGUMENT_RESULT: u8 = 0x02;
pub const ARGUMENT_NESTED_RESULT: u8 = 0x03;

// TypeTag

pub const TYPE_TAG_BOOL: u8 = 0x00;
pub const TYPE_TAG_U8: u8 = 0x01;
pub const TYPE_TAG_U64: u8 = 0x02;
pub const TYPE_TAG_U128: u8 = 0x03;
pub const TYPE_TAG_ADDRESS: u8 = 0x04;
pub const TYPE_TAG_SIGNER: u8 = 0x05;
pub const TYPE_TAG_VECTOR: u8 = 0x06;
pub const TYPE_TAG_STRUCT: u8 = 0x07;
pub const TYPE_TAG_U16: u8 = 0x08;
pub const TYPE_TAG_U32: u8 = 0x09;
pub const TYPE_TAG_U256: u8 = 0x0a;

/// Deepest `vector<vector<...>>` / struct-parameter nesting accepted on decode
pub const MAX_TYPE_TAG_DEPTH: usize = 16;

// TransactionExpiration

pub const EXPIRATION_NONE: u8 = 0x00;
pub const EXPIRATION_EPOCH: u8 = 0x01;

/// Digests are BCS byte vectors of exactly this length
pub const DIGEST_LENGTH: usize = 32;

/// The system clock object, `0x6`
pub const CLOCK_OBJECT_ID: ObjectId = {
    let mut id = [0u8; 32];
    id[31] = 0x06;
    id
};

/// The clock has been shared since genesis
pub const CLOCK_INITIAL_SHARED_VERSION: u64 = 1;

/// Number of Pure sensor inputs ahead of the clock in the assembled layout
pub const SENSOR_PURE_INPUT_COUNT: usize = 7;

/// Pure sensor inputs plus the clock object
pub const SENSOR_INPUT_COUNT: usize = SENSOR_PURE_INPUT_COUNT + 1;

/// Default module of the sensor package
pub const DEFAULT_MODULE_NAME: &str = "sensor_storage";

/// Default entry function of the sensor module
pub const DEFAULT_FUNCTION_NAME: &str = "store_sensor_data";

/// Default gas budget in MIST
pub const DEFAULT_GAS_BUDGET: u64 = 100_000_000;

/// Default reference gas price in MIST
pub const DEFAULT_GAS_PRICE: u64 = 1000;

/// Default initial writer capacity (and growth step)
pub const DEFAULT_WRITER_CAPACITY: usize = 512;
