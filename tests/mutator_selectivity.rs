//! Pure input rewriting must touch nothing but Pure payloads


use sui_sensor_tx::assembler::build_sensor_transaction;
use sui_sensor_tx::config::{CodecConfig, WriterConfig};
use sui_sensor_tx::mutator::{
    apply_sensor_reading, apply_sensor_reading_hex, replace_pure_inputs,
    replace_pure_inputs_with, replace_pure_inputs_with_summary,
};
use sui_sensor_tx::constants::{CLOCK_INITIAL_SHARED_VERSION, CLOCK_OBJECT_ID};
use sui_sensor_tx::serialization::transaction::read_call_arg;
use sui_sensor_tx::serialization::{deserialize_transaction_data, serialize_transaction_data};
use sui_sensor_tx::types::{
    Argument, CallArg, Command, GasData, ObjectArg, ObjectRef, ProgrammableMoveCall,
    ProgrammableTransaction, SensorReading, TransactionData, TransactionExpiration,
};
use sui_sensor_tx::{BcsError, BcsReader, BcsWriter};

use test_helpers::{gas_coin, pure_section_end, sensor_params, PACKAGE_ID, SENDER};

#[test]
fn test_everything_after_pure_inputs_is_bit_identical() {
    let params = sensor_params();
    let tx = build_sensor_transaction(&params).unwrap();
    let u64_payloads: Vec<[u8; 8]> = (1..=4u64).map(|v| (v * 1000).to_le_bytes()).collect();
    let refs: Vec<&[u8]> = u64_payloads.iter().map(|p| p.as_slice()).collect();

    let out = replace_pure_inputs(&tx, &refs).unwrap();

    // Same-length replacements: only the four u64 payloads differ
    assert_eq!(out.len(), tx.len());
    let end = pure_section_end(&params.fields);
    assert_eq!(&out[end..], &tx[end..], "clock, command and gas sections must be untouched");
    assert_eq!(&out[..3], &tx[..3]);

    let decoded = deserialize_transaction_data(&out).unwrap();
    for (i, expected) in u64_payloads.iter().enumerate() {
        assert_eq!(decoded.kind.inputs[i], CallArg::Pure(expected.to_vec()));
    }
    // String inputs beyond the replacements keep their original payloads
    let original = deserialize_transaction_data(&tx).unwrap();
    assert_eq!(decoded.kind.inputs[4..], original.kind.inputs[4..]);
}

#[test]
fn test_shared_object_span_is_copied_verbatim() {
    let tx = build_sensor_transaction(&sensor_params()).unwrap();
    let end = pure_section_end(&sensor_params().fields);
    let shared_span = &tx[end..end + 43];
    assert_eq!(&shared_span[..2], &[0x01, 0x01]);

    let payload: &[u8] = &[0xff; 3];
    let out = replace_pure_inputs(&tx, &[payload; 7]).unwrap();
    let needle = out
        .windows(shared_span.len())
        .position(|w| w == shared_span);
    assert!(needle.is_some(), "shared clock input must survive unchanged");
}

#[test]
fn test_owned_and_receiving_objects_preserved() {
    let object = ObjectRef {
        object_id: [0x44; 32],
        version: 99,
        digest: [0x55; 32],
    };
    let mut writer = BcsWriter::new(64).unwrap();
    writer.write_u8(0x00).unwrap();
    writer.write_u8(0x00).unwrap();
    writer.write_vec_length(4).unwrap();
    // Owned, Pure, Receiving, Pure
    writer.write_u8(0x01).unwrap();
    writer.write_u8(0x00).unwrap();
    writer.write_fixed_bytes(&object.object_id).unwrap();
    writer.write_u64(object.version).unwrap();
    writer.write_bytes(&object.digest).unwrap();
    writer.write_u8(0x00).unwrap();
    writer.write_bytes(&[0x01]).unwrap();
    writer.write_u8(0x01).unwrap();
    writer.write_u8(0x02).unwrap();
    writer.write_fixed_bytes(&object.object_id).unwrap();
    writer.write_u64(object.version).unwrap();
    writer.write_bytes(&object.digest).unwrap();
    writer.write_u8(0x00).unwrap();
    writer.write_bytes(&[0x02]).unwrap();
    writer.write_fixed_bytes(&[0xee; 5]).unwrap();
    let tx = writer.into_bytes();

    let (out, summary) =
        replace_pure_inputs_with_summary(&tx, &[&[0x0a], &[0x0b]], &WriterConfig::default())
            .unwrap();
    assert_eq!(summary.pure_inputs, 2);
    assert_eq!(summary.replaced, 2);
    assert_eq!(summary.object_inputs, 2);

    // Single-byte payload swaps: only those two bytes change
    let diffs: Vec<usize> = tx
        .iter()
        .zip(&out)
        .enumerate()
        .filter(|(_, (a, b))| a != b)
        .map(|(i, _)| i)
        .collect();
    assert_eq!(diffs.len(), 2);
    assert_eq!(&out[out.len() - 5..], &[0xee; 5]);

    let mut reader = BcsReader::new(&out[3..]);
    let arg = read_call_arg(&mut reader).unwrap();
    assert_eq!(arg, CallArg::Object(ObjectArg::ImmOrOwned(object)));
}

#[test]
fn test_fewer_replacements_keep_originals() {
    let tx = build_sensor_transaction(&sensor_params()).unwrap();
    let (out, summary) =
        replace_pure_inputs_with_summary(&tx, &[&[0; 8]], &WriterConfig::default()).unwrap();
    assert_eq!(summary.pure_inputs, 7);
    assert_eq!(summary.replaced, 1);
    assert_eq!(summary.preserved(), 6);
    assert_eq!(out.len(), tx.len());
    assert_eq!(&out[13..], &tx[13..]);
}

#[test]
fn test_surplus_replacements_ignored() {
    let tx = build_sensor_transaction(&sensor_params()).unwrap();
    let many = vec![&[0u8; 8][..]; 12];
    let out = replace_pure_inputs(&tx, &many).unwrap();
    let decoded = deserialize_transaction_data(&out).unwrap();
    assert_eq!(decoded.kind.inputs.len(), 8);
    assert!(decoded.kind.inputs[..7]
        .iter()
        .all(|arg| *arg == CallArg::Pure(vec![0; 8])));
    assert!(!decoded.kind.inputs[7].is_pure());
}

// Five u64 Pure inputs then the clock, as a firmware template with a timestamp slot
fn timestamped_template() -> Vec<u8> {
    let mut inputs: Vec<CallArg> = (0..5u64)
        .map(|v| CallArg::Pure(v.to_le_bytes().to_vec()))
        .collect();
    inputs.push(CallArg::Object(ObjectArg::Shared {
        object_id: CLOCK_OBJECT_ID,
        initial_shared_version: CLOCK_INITIAL_SHARED_VERSION,
        mutable: false,
    }));
    let tx = TransactionData {
        kind: ProgrammableTransaction {
            inputs,
            commands: vec![Command::MoveCall(Box::new(ProgrammableMoveCall {
                package: PACKAGE_ID,
                module: "sensor_storage".to_string(),
                function: "store_reading".to_string(),
                type_arguments: vec![],
                arguments: (0..6).map(Argument::Input).collect(),
            }))],
        },
        sender: SENDER,
        gas_data: GasData {
            payment: vec![gas_coin()],
            owner: SENDER,
            price: 1000,
            budget: 100_000_000,
        },
        expiration: TransactionExpiration::None,
    };
    serialize_transaction_data(&tx).unwrap()
}

#[test]
fn test_apply_sensor_reading_order() {
    let tx = timestamped_template();
    let reading = SensorReading {
        temperature: 2610,
        humidity: 5800,
        ec: 1400,
        ph: 690,
        timestamp: 1_760_000_000,
    };
    let out = apply_sensor_reading(&tx, &reading).unwrap();
    assert_eq!(out.len(), tx.len());
    let decoded = deserialize_transaction_data(&out).unwrap();

    let expected = [2610u64, 5800, 1400, 690, 1_760_000_000];
    for (i, value) in expected.iter().enumerate() {
        assert_eq!(
            decoded.kind.inputs[i],
            CallArg::Pure(value.to_le_bytes().to_vec()),
            "pure input {i}"
        );
    }
    match &decoded.kind.inputs[5] {
        CallArg::Object(obj) => assert_eq!(*obj.object_id(), CLOCK_OBJECT_ID),
        other => panic!("expected clock object, got {other:?}"),
    }
}

#[test]
fn test_apply_sensor_reading_timestamp_takes_fifth_pure_slot() {
    // The assembled layout has device_id as its fifth Pure input
    let params = sensor_params();
    let tx = build_sensor_transaction(&params).unwrap();
    let reading = SensorReading {
        timestamp: 1_760_000_000,
        ..Default::default()
    };
    let out = apply_sensor_reading(&tx, &reading).unwrap();
    let before = deserialize_transaction_data(&tx).unwrap();
    let after = deserialize_transaction_data(&out).unwrap();

    assert_eq!(
        after.kind.inputs[4],
        CallArg::Pure(1_760_000_000u64.to_le_bytes().to_vec())
    );
    assert_ne!(after.kind.inputs[4], before.kind.inputs[4]);
    assert_eq!(&after.kind.inputs[5..], &before.kind.inputs[5..]);
}

#[test]
fn test_apply_sensor_reading_hex_matches_bytes() {
    let tx = build_sensor_transaction(&sensor_params()).unwrap();
    let reading = SensorReading {
        temperature: 1,
        humidity: 2,
        ec: 3,
        ph: 4,
        timestamp: 5,
    };
    let from_bytes = apply_sensor_reading(&tx, &reading).unwrap();
    let from_hex = apply_sensor_reading_hex(
        &format!("0x{}", hex::encode(&tx)),
        &reading,
        &CodecConfig::default(),
    )
    .unwrap();
    assert_eq!(from_hex, hex::encode(from_bytes));
}

#[test]
fn test_writer_limit_aborts_rewrite() {
    let tx = build_sensor_transaction(&sensor_params()).unwrap();
    let config = WriterConfig {
        initial_capacity: 16,
        max_size: 64,
    };
    assert!(matches!(
        replace_pure_inputs_with(&tx, &[], &config),
        Err(BcsError::BufferTooSmall { .. })
    ));
}

#[test]
fn test_malformed_inputs_abort() {
    // Header only, declares one input
    assert!(matches!(
        replace_pure_inputs(&[0x00, 0x00, 0x01], &[]),
        Err(BcsError::BufferUnderflow { .. })
    ));
    // Unknown object variant
    assert!(matches!(
        replace_pure_inputs(&[0x00, 0x00, 0x01, 0x01, 0x07], &[]),
        Err(BcsError::InvalidInput(_))
    ));
    // Pure length runs past the end
    assert!(matches!(
        replace_pure_inputs(&[0x00, 0x00, 0x01, 0x00, 0x09, 0x01], &[&[1]]),
        Err(BcsError::BufferUnderflow { .. })
    ));
    // Empty input
    assert!(replace_pure_inputs(&[], &[]).is_err());
}
