//! Sui transaction types and sensor payload types
//!
//! These mirror the BCS layout of Sui's `TransactionData` closely enough to be
//! encoded and decoded field by field. They exist only for one encode or
//! decode pass; nothing here is persisted.

use serde::{Deserialize, Serialize};

/// 32-byte object identifier
pub type ObjectId = [u8; 32];

/// 32-byte account address
pub type SuiAddress = [u8; 32];

/// 32-byte object digest
pub type Digest = [u8; 32];

/// Object version number
pub type SequenceNumber = u64;

/// Reference to a specific version of an owned object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectRef {
    pub object_id: ObjectId,
    pub version: SequenceNumber,
    pub digest: Digest,
}

/// How an object input is held by the transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectArg {
    /// Immutable or address-owned object (tag 0)
    ImmOrOwned(ObjectRef),
    /// Shared object (tag 1)
    Shared {
        object_id: ObjectId,
        initial_shared_version: SequenceNumber,
        mutable: bool,
    },
    /// Object being received by another object (tag 2)
    Receiving(ObjectRef),
}

impl ObjectArg {
    pub fn object_id(&self) -> &ObjectId {
        match self {
            ObjectArg::ImmOrOwned(r) | ObjectArg::Receiving(r) => &r.object_id,
            ObjectArg::Shared { object_id, .. } => object_id,
        }
    }
}

/// A transaction input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallArg {
    /// BCS bytes of a pure value; its type is known only to the callee (tag 0)
    Pure(Vec<u8>),
    /// An object reference (tag 1)
    Object(ObjectArg),
}

impl CallArg {
    pub fn is_pure(&self) -> bool {
        matches!(self, CallArg::Pure(_))
    }
}

/// A command argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Argument {
    /// The gas coin (tag 0)
    GasCoin,
    /// Input by position (tag 1)
    Input(u16),
    /// Result of an earlier command (tag 2)
    Result(u16),
    /// One value of an earlier command's tuple result (tag 3)
    NestedResult(u16, u16),
}

/// Move type tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeTag {
    Bool,
    U8,
    U64,
    U128,
    Address,
    Signer,
    Vector(Box<TypeTag>),
    Struct(Box<StructTag>),
    U16,
    U32,
    U256,
}

/// Fully qualified Move struct type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructTag {
    pub address: SuiAddress,
    pub module: String,
    pub name: String,
    pub type_params: Vec<TypeTag>,
}

/// Call of a Move function
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgrammableMoveCall {
    pub package: ObjectId,
    pub module: String,
    pub function: String,
    pub type_arguments: Vec<TypeTag>,
    pub arguments: Vec<Argument>,
}

/// A programmable transaction command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    MoveCall(Box<ProgrammableMoveCall>),
    TransferObjects(Vec<Argument>, Argument),
    SplitCoins(Argument, Vec<Argument>),
    MergeCoins(Argument, Vec<Argument>),
    Publish(Vec<Vec<u8>>, Vec<ObjectId>),
    MakeMoveVec(Option<TypeTag>, Vec<Argument>),
    Upgrade(Vec<Vec<u8>>, Vec<ObjectId>, ObjectId, Argument),
}

/// Inputs plus the commands that consume them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgrammableTransaction {
    pub inputs: Vec<CallArg>,
    pub commands: Vec<Command>,
}

/// Which coins pay for the transaction, and how much
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GasData {
    pub payment: Vec<ObjectRef>,
    pub owner: SuiAddress,
    pub price: u64,
    pub budget: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TransactionExpiration {
    #[default]
    None,
    Epoch(u64),
}

/// Unsigned transaction (`TransactionData::V1` with a programmable kind)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionData {
    pub kind: ProgrammableTransaction,
    pub sender: SuiAddress,
    pub gas_data: GasData,
    pub expiration: TransactionExpiration,
}

/// Arguments of `sensor_storage::store_sensor_data`, in call order
///
/// Temperature, humidity and pH are in hundredths (25.5 °C = 2550); ec is raw
/// µS/cm. `location` may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SensorFields {
    pub temperature: u64,
    pub humidity: u64,
    pub ec: u64,
    pub ph: u64,
    pub device_id: String,
    pub sensor_type: String,
    #[serde(default)]
    pub location: String,
}

/// Structured input of the transaction assembler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionParams {
    pub package_id: ObjectId,
    pub module_name: String,
    pub function_name: String,
    pub sender: SuiAddress,
    pub gas_coin: ObjectRef,
    pub gas_price: u64,
    pub gas_budget: u64,
    pub fields: SensorFields,
}

/// A single reading injected into an existing transaction template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SensorReading {
    pub temperature: u64,
    pub humidity: u64,
    pub ec: u64,
    pub ph: u64,
    /// Unix timestamp in seconds
    pub timestamp: u64,
}

impl SensorReading {
    /// The five Pure payloads, each a u64 in 8 little-endian bytes, in the
    /// order temperature, humidity, ec, ph, timestamp
    pub fn pure_payloads(&self) -> [[u8; 8]; 5] {
        [
            self.temperature.to_le_bytes(),
            self.humidity.to_le_bytes(),
            self.ec.to_le_bytes(),
            self.ph.to_le_bytes(),
            self.timestamp.to_le_bytes(),
        ]
    }
}
