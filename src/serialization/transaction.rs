//! Sui `TransactionData` serialization/deserialization
//!
//! Layout of `TransactionData::V1` (all integers little-endian, lengths ULEB128):
//! - Version tag (1 byte, 0x00)
//! - Kind tag (1 byte, 0x00 = ProgrammableTransaction)
//! - Input count, then each `CallArg`:
//!   - Pure: tag 0x00, length-prefixed bytes
//!   - Object: tag 0x01, then `ObjectArg`:
//!     - ImmOrOwned (0x00) / Receiving (0x02): id (32), version (8), digest (0x20 + 32)
//!     - Shared (0x01): id (32), initial shared version (8), mutable (1)
//! - Command count, then each command by tag
//! - Sender (32 bytes)
//! - Gas data: payment refs, owner (32), price (8), budget (8)
//! - Expiration: 0x00 = None, 0x01 + epoch (8)
//!
//! Must match the validator's BCS decoding exactly; any deviation changes the
//! signed digest.

use super::reader::BcsReader;
use super::writer::BcsWriter;
use crate::config::WriterConfig;
use crate::constants::*;
use crate::error::{BcsError, Result};
use crate::types::*;

// ---------------------------------------------------------------------------
// Object references
// ---------------------------------------------------------------------------

pub fn encode_object_ref(writer: &mut BcsWriter, object_ref: &ObjectRef) -> Result<()> {
    writer.write_fixed_bytes(&object_ref.object_id)?;
    writer.write_u64(object_ref.version)?;
    writer.write_bytes(&object_ref.digest)
}

pub fn read_object_ref(reader: &mut BcsReader<'_>) -> Result<ObjectRef> {
    let object_id = reader.read_fixed::<32>()?;
    let version = reader.read_u64()?;
    let digest_bytes = reader.read_byte_vec()?;
    if digest_bytes.len() != DIGEST_LENGTH {
        return Err(BcsError::invalid("object digest must be 32 bytes"));
    }
    let mut digest = [0u8; DIGEST_LENGTH];
    digest.copy_from_slice(digest_bytes);
    Ok(ObjectRef {
        object_id,
        version,
        digest,
    })
}

pub fn encode_object_arg(writer: &mut BcsWriter, arg: &ObjectArg) -> Result<()> {
    match arg {
        ObjectArg::ImmOrOwned(object_ref) => {
            writer.write_u8(OBJECT_ARG_IMM_OR_OWNED)?;
            encode_object_ref(writer, object_ref)
        }
        ObjectArg::Shared {
            object_id,
            initial_shared_version,
            mutable,
        } => {
            writer.write_u8(OBJECT_ARG_SHARED)?;
            writer.write_fixed_bytes(object_id)?;
            writer.write_u64(*initial_shared_version)?;
            writer.write_bool(*mutable)
        }
        ObjectArg::Receiving(object_ref) => {
            writer.write_u8(OBJECT_ARG_RECEIVING)?;
            encode_object_ref(writer, object_ref)
        }
    }
}

pub fn read_object_arg(reader: &mut BcsReader<'_>) -> Result<ObjectArg> {
    match reader.read_u8()? {
        OBJECT_ARG_IMM_OR_OWNED => Ok(ObjectArg::ImmOrOwned(read_object_ref(reader)?)),
        OBJECT_ARG_SHARED => {
            let object_id = reader.read_fixed::<32>()?;
            let initial_shared_version = reader.read_u64()?;
            let mutable = reader.read_bool()?;
            Ok(ObjectArg::Shared {
                object_id,
                initial_shared_version,
                mutable,
            })
        }
        OBJECT_ARG_RECEIVING => Ok(ObjectArg::Receiving(read_object_ref(reader)?)),
        _ => Err(BcsError::invalid("unknown object argument variant")),
    }
}

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

pub fn encode_call_arg(writer: &mut BcsWriter, arg: &CallArg) -> Result<()> {
    match arg {
        CallArg::Pure(bytes) => {
            writer.write_u8(CALL_ARG_PURE)?;
            writer.write_bytes(bytes)
        }
        CallArg::Object(object_arg) => {
            writer.write_u8(CALL_ARG_OBJECT)?;
            encode_object_arg(writer, object_arg)
        }
    }
}

pub fn read_call_arg(reader: &mut BcsReader<'_>) -> Result<CallArg> {
    match reader.read_u8()? {
        CALL_ARG_PURE => Ok(CallArg::Pure(reader.read_byte_vec()?.to_vec())),
        CALL_ARG_OBJECT => Ok(CallArg::Object(read_object_arg(reader)?)),
        _ => Err(BcsError::invalid("unknown input variant")),
    }
}

/// Decode one input from the start of `data`
///
/// Returns the decoded input and the exact number of bytes it occupies, so a
/// caller can re-emit the original span without re-encoding it.
///
/// # Examples
///
/// ```
/// use sui_sensor_tx::serialization::transaction::decode_call_arg;
/// use sui_sensor_tx::types::CallArg;
///
/// let (arg, consumed) = decode_call_arg(&[0x00, 0x02, 0xaa, 0xbb, 0xff]).unwrap();
/// assert_eq!(arg, CallArg::Pure(vec![0xaa, 0xbb]));
/// assert_eq!(consumed, 4);
/// ```
pub fn decode_call_arg(data: &[u8]) -> Result<(CallArg, usize)> {
    let mut reader = BcsReader::new(data);
    let arg = read_call_arg(&mut reader)?;
    Ok((arg, reader.position()))
}

// ---------------------------------------------------------------------------
// Arguments and type tags
// ---------------------------------------------------------------------------

pub fn encode_argument(writer: &mut BcsWriter, arg: &Argument) -> Result<()> {
    match *arg {
        Argument::GasCoin => writer.write_u8(ARGUMENT_GAS_COIN),
        Argument::Input(index) => {
            writer.write_u8(ARGUMENT_INPUT)?;
            writer.write_u16(index)
        }
        Argument::Result(index) => {
            writer.write_u8(ARGUMENT_RESULT)?;
            writer.write_u16(index)
        }
        Argument::NestedResult(command, index) => {
            writer.write_u8(ARGUMENT_NESTED_RESULT)?;
            writer.write_u16(command)?;
            writer.write_u16(index)
        }
    }
}

pub fn read_argument(reader: &mut BcsReader<'_>) -> Result<Argument> {
    match reader.read_u8()? {
        ARGUMENT_GAS_COIN => Ok(Argument::GasCoin),
        ARGUMENT_INPUT => Ok(Argument::Input(reader.read_u16()?)),
        ARGUMENT_RESULT => Ok(Argument::Result(reader.read_u16()?)),
        ARGUMENT_NESTED_RESULT => {
            let command = reader.read_u16()?;
            let index = reader.read_u16()?;
            Ok(Argument::NestedResult(command, index))
        }
        _ => Err(BcsError::invalid("unknown argument variant")),
    }
}

fn encode_arguments(writer: &mut BcsWriter, args: &[Argument]) -> Result<()> {
    writer.write_vec_length(args.len())?;
    args.iter().try_for_each(|arg| encode_argument(writer, arg))
}

fn read_arguments(reader: &mut BcsReader<'_>) -> Result<Vec<Argument>> {
    let count = read_count(reader)?;
    (0..count).map(|_| read_argument(reader)).collect()
}

pub fn encode_type_tag(writer: &mut BcsWriter, tag: &TypeTag) -> Result<()> {
    match tag {
        TypeTag::Bool => writer.write_u8(TYPE_TAG_BOOL),
        TypeTag::U8 => writer.write_u8(TYPE_TAG_U8),
        TypeTag::U64 => writer.write_u8(TYPE_TAG_U64),
        TypeTag::U128 => writer.write_u8(TYPE_TAG_U128),
        TypeTag::Address => writer.write_u8(TYPE_TAG_ADDRESS),
        TypeTag::Signer => writer.write_u8(TYPE_TAG_SIGNER),
        TypeTag::Vector(inner) => {
            writer.write_u8(TYPE_TAG_VECTOR)?;
            encode_type_tag(writer, inner)
        }
        TypeTag::Struct(st) => {
            writer.write_u8(TYPE_TAG_STRUCT)?;
            writer.write_fixed_bytes(&st.address)?;
            writer.write_str(&st.module)?;
            writer.write_str(&st.name)?;
            writer.write_vec_length(st.type_params.len())?;
            st.type_params
                .iter()
                .try_for_each(|param| encode_type_tag(writer, param))
        }
        TypeTag::U16 => writer.write_u8(TYPE_TAG_U16),
        TypeTag::U32 => writer.write_u8(TYPE_TAG_U32),
        TypeTag::U256 => writer.write_u8(TYPE_TAG_U256),
    }
}

pub fn read_type_tag(reader: &mut BcsReader<'_>) -> Result<TypeTag> {
    read_type_tag_at_depth(reader, 0)
}

fn read_type_tag_at_depth(reader: &mut BcsReader<'_>, depth: usize) -> Result<TypeTag> {
    if depth > MAX_TYPE_TAG_DEPTH {
        return Err(BcsError::invalid("type tag nesting too deep"));
    }
    let tag = match reader.read_u8()? {
        TYPE_TAG_BOOL => TypeTag::Bool,
        TYPE_TAG_U8 => TypeTag::U8,
        TYPE_TAG_U64 => TypeTag::U64,
        TYPE_TAG_U128 => TypeTag::U128,
        TYPE_TAG_ADDRESS => TypeTag::Address,
        TYPE_TAG_SIGNER => TypeTag::Signer,
        TYPE_TAG_VECTOR => TypeTag::Vector(Box::new(read_type_tag_at_depth(reader, depth + 1)?)),
        TYPE_TAG_STRUCT => {
            let address = reader.read_fixed::<32>()?;
            let module = reader.read_str()?.to_owned();
            let name = reader.read_str()?.to_owned();
            let count = read_count(reader)?;
            let type_params = (0..count)
                .map(|_| read_type_tag_at_depth(reader, depth + 1))
                .collect::<Result<Vec<_>>>()?;
            TypeTag::Struct(Box::new(StructTag {
                address,
                module,
                name,
                type_params,
            }))
        }
        TYPE_TAG_U16 => TypeTag::U16,
        TYPE_TAG_U32 => TypeTag::U32,
        TYPE_TAG_U256 => TypeTag::U256,
        _ => return Err(BcsError::invalid("unknown type tag")),
    };
    Ok(tag)
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn encode_modules(writer: &mut BcsWriter, modules: &[Vec<u8>]) -> Result<()> {
    writer.write_vec_length(modules.len())?;
    modules.iter().try_for_each(|m| writer.write_bytes(m))
}

fn encode_object_ids(writer: &mut BcsWriter, ids: &[ObjectId]) -> Result<()> {
    writer.write_vec_length(ids.len())?;
    ids.iter().try_for_each(|id| writer.write_fixed_bytes(id))
}

pub fn encode_command(writer: &mut BcsWriter, command: &Command) -> Result<()> {
    match command {
        Command::MoveCall(call) => {
            writer.write_u8(COMMAND_MOVE_CALL)?;
            writer.write_fixed_bytes(&call.package)?;
            writer.write_str(&call.module)?;
            writer.write_str(&call.function)?;
            writer.write_vec_length(call.type_arguments.len())?;
            call.type_arguments
                .iter()
                .try_for_each(|t| encode_type_tag(writer, t))?;
            encode_arguments(writer, &call.arguments)
        }
        Command::TransferObjects(objects, recipient) => {
            writer.write_u8(COMMAND_TRANSFER_OBJECTS)?;
            encode_arguments(writer, objects)?;
            encode_argument(writer, recipient)
        }
        Command::SplitCoins(coin, amounts) => {
            writer.write_u8(COMMAND_SPLIT_COINS)?;
            encode_argument(writer, coin)?;
            encode_arguments(writer, amounts)
        }
        Command::MergeCoins(target, sources) => {
            writer.write_u8(COMMAND_MERGE_COINS)?;
            encode_argument(writer, target)?;
            encode_arguments(writer, sources)
        }
        Command::Publish(modules, dependencies) => {
            writer.write_u8(COMMAND_PUBLISH)?;
            encode_modules(writer, modules)?;
            encode_object_ids(writer, dependencies)
        }
        Command::MakeMoveVec(element_type, elements) => {
            writer.write_u8(COMMAND_MAKE_MOVE_VEC)?;
            match element_type {
                Some(tag) => {
                    writer.write_option_some()?;
                    encode_type_tag(writer, tag)?;
                }
                None => writer.write_option_none()?,
            }
            encode_arguments(writer, elements)
        }
        Command::Upgrade(modules, dependencies, package, ticket) => {
            writer.write_u8(COMMAND_UPGRADE)?;
            encode_modules(writer, modules)?;
            encode_object_ids(writer, dependencies)?;
            writer.write_fixed_bytes(package)?;
            encode_argument(writer, ticket)
        }
    }
}

fn read_modules(reader: &mut BcsReader<'_>) -> Result<Vec<Vec<u8>>> {
    let count = read_count(reader)?;
    (0..count)
        .map(|_| reader.read_byte_vec().map(<[u8]>::to_vec))
        .collect()
}

fn read_object_ids(reader: &mut BcsReader<'_>) -> Result<Vec<ObjectId>> {
    let count = read_count(reader)?;
    (0..count).map(|_| reader.read_fixed::<32>()).collect()
}

pub fn read_command(reader: &mut BcsReader<'_>) -> Result<Command> {
    match reader.read_u8()? {
        COMMAND_MOVE_CALL => {
            let package = reader.read_fixed::<32>()?;
            let module = reader.read_str()?.to_owned();
            let function = reader.read_str()?.to_owned();
            let type_count = read_count(reader)?;
            let type_arguments = (0..type_count)
                .map(|_| read_type_tag(reader))
                .collect::<Result<Vec<_>>>()?;
            let arguments = read_arguments(reader)?;
            Ok(Command::MoveCall(Box::new(ProgrammableMoveCall {
                package,
                module,
                function,
                type_arguments,
                arguments,
            })))
        }
        COMMAND_TRANSFER_OBJECTS => {
            let objects = read_arguments(reader)?;
            let recipient = read_argument(reader)?;
            Ok(Command::TransferObjects(objects, recipient))
        }
        COMMAND_SPLIT_COINS => {
            let coin = read_argument(reader)?;
            let amounts = read_arguments(reader)?;
            Ok(Command::SplitCoins(coin, amounts))
        }
        COMMAND_MERGE_COINS => {
            let target = read_argument(reader)?;
            let sources = read_arguments(reader)?;
            Ok(Command::MergeCoins(target, sources))
        }
        COMMAND_PUBLISH => {
            let modules = read_modules(reader)?;
            let dependencies = read_object_ids(reader)?;
            Ok(Command::Publish(modules, dependencies))
        }
        COMMAND_MAKE_MOVE_VEC => {
            let element_type = if reader.read_option_tag()? {
                Some(read_type_tag(reader)?)
            } else {
                None
            };
            let elements = read_arguments(reader)?;
            Ok(Command::MakeMoveVec(element_type, elements))
        }
        COMMAND_UPGRADE => {
            let modules = read_modules(reader)?;
            let dependencies = read_object_ids(reader)?;
            let package = reader.read_fixed::<32>()?;
            let ticket = read_argument(reader)?;
            Ok(Command::Upgrade(modules, dependencies, package, ticket))
        }
        _ => Err(BcsError::invalid("unknown command variant")),
    }
}

// ---------------------------------------------------------------------------
// Transaction
// ---------------------------------------------------------------------------

/// Read a vector length that cannot possibly exceed the remaining input
///
/// Every element occupies at least one byte, so a larger count is truncated
/// input rather than a reason to allocate.
fn read_count(reader: &mut BcsReader<'_>) -> Result<usize> {
    let count = reader.read_vec_length()?;
    let remaining = reader.remaining();
    if count > remaining {
        return Err(BcsError::BufferUnderflow {
            needed: count,
            remaining,
        });
    }
    Ok(count)
}

pub fn encode_gas_data(writer: &mut BcsWriter, gas: &GasData) -> Result<()> {
    writer.write_vec_length(gas.payment.len())?;
    gas.payment
        .iter()
        .try_for_each(|coin| encode_object_ref(writer, coin))?;
    writer.write_fixed_bytes(&gas.owner)?;
    writer.write_u64(gas.price)?;
    writer.write_u64(gas.budget)
}

pub fn read_gas_data(reader: &mut BcsReader<'_>) -> Result<GasData> {
    let count = read_count(reader)?;
    let payment = (0..count)
        .map(|_| read_object_ref(reader))
        .collect::<Result<Vec<_>>>()?;
    let owner = reader.read_fixed::<32>()?;
    let price = reader.read_u64()?;
    let budget = reader.read_u64()?;
    Ok(GasData {
        payment,
        owner,
        price,
        budget,
    })
}

pub fn encode_expiration(writer: &mut BcsWriter, expiration: &TransactionExpiration) -> Result<()> {
    match expiration {
        TransactionExpiration::None => writer.write_u8(EXPIRATION_NONE),
        TransactionExpiration::Epoch(epoch) => {
            writer.write_u8(EXPIRATION_EPOCH)?;
            writer.write_u64(*epoch)
        }
    }
}

pub fn read_expiration(reader: &mut BcsReader<'_>) -> Result<TransactionExpiration> {
    match reader.read_u8()? {
        EXPIRATION_NONE => Ok(TransactionExpiration::None),
        EXPIRATION_EPOCH => Ok(TransactionExpiration::Epoch(reader.read_u64()?)),
        _ => Err(BcsError::invalid("unknown expiration variant")),
    }
}

/// Encode a full transaction into `writer`
pub fn encode_transaction_data(writer: &mut BcsWriter, tx: &TransactionData) -> Result<()> {
    writer.write_u8(TRANSACTION_DATA_V1)?;
    writer.write_u8(KIND_PROGRAMMABLE_TRANSACTION)?;

    writer.write_vec_length(tx.kind.inputs.len())?;
    for input in &tx.kind.inputs {
        encode_call_arg(writer, input)?;
    }

    writer.write_vec_length(tx.kind.commands.len())?;
    for command in &tx.kind.commands {
        encode_command(writer, command)?;
    }

    writer.write_fixed_bytes(&tx.sender)?;
    encode_gas_data(writer, &tx.gas_data)?;
    encode_expiration(writer, &tx.expiration)
}

/// Serialize a transaction with the default writer configuration
pub fn serialize_transaction_data(tx: &TransactionData) -> Result<Vec<u8>> {
    serialize_transaction_data_with(tx, &WriterConfig::default())
}

/// Serialize a transaction with explicit writer limits
pub fn serialize_transaction_data_with(
    tx: &TransactionData,
    config: &WriterConfig,
) -> Result<Vec<u8>> {
    let mut writer = BcsWriter::from_config(config)?;
    encode_transaction_data(&mut writer, tx)?;
    Ok(writer.into_bytes())
}

/// Deserialize a complete transaction
///
/// The input must be consumed exactly; trailing bytes are rejected.
pub fn deserialize_transaction_data(data: &[u8]) -> Result<TransactionData> {
    let mut reader = BcsReader::new(data);

    if reader.read_u8()? != TRANSACTION_DATA_V1 {
        return Err(BcsError::invalid("unsupported transaction data version"));
    }
    if reader.read_u8()? != KIND_PROGRAMMABLE_TRANSACTION {
        return Err(BcsError::invalid("unsupported transaction kind"));
    }

    let input_count = read_count(&mut reader)?;
    let inputs = (0..input_count)
        .map(|_| read_call_arg(&mut reader))
        .collect::<Result<Vec<_>>>()?;

    let command_count = read_count(&mut reader)?;
    let commands = (0..command_count)
        .map(|_| read_command(&mut reader))
        .collect::<Result<Vec<_>>>()?;

    let sender = reader.read_fixed::<32>()?;
    let gas_data = read_gas_data(&mut reader)?;
    let expiration = read_expiration(&mut reader)?;

    if reader.remaining() != 0 {
        return Err(BcsError::invalid("trailing bytes after transaction"));
    }

    Ok(TransactionData {
        kind: ProgrammableTransaction { inputs, commands },
        sender,
        gas_data,
        expiration,
    })
}
