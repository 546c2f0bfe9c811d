//! Property tests for the codec primitives and the Pure input mutator

use proptest::prelude::*;
use sui_sensor_tx::assembler::build_sensor_transaction;
use sui_sensor_tx::hex::{decode_hex, encode_hex};
use sui_sensor_tx::mutator::replace_pure_inputs;
use sui_sensor_tx::serialization::deserialize_transaction_data;
use sui_sensor_tx::serialization::uleb128::{decode_uleb128, encode_uleb128, uleb128_len};
use sui_sensor_tx::types::{CallArg, ObjectRef, SensorFields, TransactionParams};
use sui_sensor_tx::{BcsReader, BcsWriter};

fn arb_fields() -> impl Strategy<Value = SensorFields> {
    (
        any::<u64>(),
        any::<u64>(),
        any::<u64>(),
        any::<u64>(),
        "[a-z0-9-]{0,40}",
        "[a-z]{0,12}",
        ".{0,200}",
    )
        .prop_map(
            |(temperature, humidity, ec, ph, device_id, sensor_type, location)| SensorFields {
                temperature,
                humidity,
                ec,
                ph,
                device_id,
                sensor_type,
                location,
            },
        )
}

fn arb_params() -> impl Strategy<Value = TransactionParams> {
    (
        any::<[u8; 32]>(),
        any::<[u8; 32]>(),
        any::<[u8; 32]>(),
        any::<u64>(),
        any::<[u8; 32]>(),
        any::<u64>(),
        any::<u64>(),
        arb_fields(),
    )
        .prop_map(
            |(package_id, sender, gas_id, gas_version, gas_digest, price, budget, fields)| {
                TransactionParams {
                    package_id,
                    module_name: "sensor_storage".to_string(),
                    function_name: "store_sensor_data".to_string(),
                    sender,
                    gas_coin: ObjectRef {
                        object_id: gas_id,
                        version: gas_version,
                        digest: gas_digest,
                    },
                    gas_price: price,
                    gas_budget: budget,
                    fields,
                }
            },
        )
}

proptest! {
    #[test]
    fn prop_uleb128_round_trip(value in any::<u64>()) {
        let encoded = encode_uleb128(value);
        prop_assert_eq!(encoded.len(), uleb128_len(value));
        prop_assert_eq!(decode_uleb128(&encoded), Ok((value, encoded.len())));
        // Only the last byte lacks the continuation bit
        let last = encoded.len() - 1;
        prop_assert!(encoded[..last].iter().all(|b| b & 0x80 != 0));
        prop_assert_eq!(encoded[last] & 0x80, 0);
    }

    #[test]
    fn prop_primitive_round_trip(
        a in any::<u8>(),
        b in any::<u16>(),
        c in any::<u32>(),
        d in any::<u64>(),
        e in any::<u128>(),
        f in any::<[u8; 32]>(),
        g in any::<bool>(),
        s in ".{0,64}"
    ) {
        let mut writer = BcsWriter::new(8).unwrap();
        writer.write_u8(a).unwrap();
        writer.write_u16(b).unwrap();
        writer.write_u32(c).unwrap();
        writer.write_u64(d).unwrap();
        writer.write_u128(e).unwrap();
        writer.write_u256(&f).unwrap();
        writer.write_bool(g).unwrap();
        writer.write_str(&s).unwrap();
        let bytes = writer.into_bytes();

        let mut reader = BcsReader::new(&bytes);
        prop_assert_eq!(reader.read_u8().unwrap(), a);
        prop_assert_eq!(reader.read_u16().unwrap(), b);
        prop_assert_eq!(reader.read_u32().unwrap(), c);
        prop_assert_eq!(reader.read_u64().unwrap(), d);
        prop_assert_eq!(reader.read_u128().unwrap(), e);
        prop_assert_eq!(reader.read_u256().unwrap(), f);
        prop_assert_eq!(reader.read_bool().unwrap(), g);
        prop_assert_eq!(reader.read_str().unwrap(), s.as_str());
        prop_assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn prop_reader_cursor_never_passes_end(
        data in prop::collection::vec(any::<u8>(), 0..64),
        ops in prop::collection::vec(0u8..8, 0..32)
    ) {
        let mut reader = BcsReader::new(&data);
        for op in ops {
            let before = reader.position();
            let ok = match op {
                0 => reader.read_u8().is_ok(),
                1 => reader.read_u16().is_ok(),
                2 => reader.read_u32().is_ok(),
                3 => reader.read_u64().is_ok(),
                4 => reader.read_bool().is_ok(),
                5 => reader.read_uleb128().is_ok(),
                6 => reader.read_byte_vec().is_ok(),
                _ => reader.read_str().is_ok(),
            };
            prop_assert!(reader.position() <= data.len());
            if !ok {
                prop_assert_eq!(reader.position(), before);
            }
        }
    }

    #[test]
    fn prop_writer_invariant(
        chunks in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..40), 0..20),
        initial in 1usize..32,
        max_extra in 0usize..256
    ) {
        let max = initial + max_extra;
        let mut writer = BcsWriter::with_max_size(initial, max).unwrap();
        for chunk in &chunks {
            let before = writer.len();
            if writer.write_bytes(chunk).is_err() {
                prop_assert_eq!(writer.len(), before);
            }
            prop_assert!(writer.len() <= writer.capacity());
            prop_assert!(writer.capacity() <= max);
        }
    }

    #[test]
    fn prop_length_prefixed_round_trip(
        items in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..300), 0..8)
    ) {
        let mut writer = BcsWriter::new(16).unwrap();
        for item in &items {
            writer.write_bytes(item).unwrap();
        }
        let bytes = writer.into_bytes();
        let mut reader = BcsReader::new(&bytes);
        for item in &items {
            prop_assert_eq!(reader.read_byte_vec().unwrap(), &item[..]);
        }
        prop_assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn prop_hex_normalizes_to_lowercase(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
        let upper = format!("0X{}", hex::encode_upper(&bytes));
        let decoded = decode_hex(&upper).unwrap();
        prop_assert_eq!(&decoded, &bytes);
        prop_assert_eq!(encode_hex(&decoded), hex::encode(&bytes));
    }

    #[test]
    fn prop_assembled_transactions_decode(params in arb_params()) {
        let bytes = build_sensor_transaction(&params).unwrap();
        let decoded = deserialize_transaction_data(&bytes).unwrap();
        prop_assert_eq!(decoded.kind.inputs.len(), 8);
        prop_assert_eq!(decoded.sender, params.sender);
        prop_assert_eq!(decoded.gas_data.payment[0], params.gas_coin);
    }

    #[test]
    fn prop_mutator_changes_only_pure_inputs(
        params in arb_params(),
        payloads in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..24), 0..10)
    ) {
        let tx = build_sensor_transaction(&params).unwrap();
        let refs: Vec<&[u8]> = payloads.iter().map(|p| p.as_slice()).collect();
        let out = replace_pure_inputs(&tx, &refs).unwrap();

        let before = deserialize_transaction_data(&tx).unwrap();
        let after = deserialize_transaction_data(&out).unwrap();

        prop_assert_eq!(&after.kind.commands, &before.kind.commands);
        prop_assert_eq!(after.sender, before.sender);
        prop_assert_eq!(&after.gas_data, &before.gas_data);
        prop_assert_eq!(after.expiration, before.expiration);
        prop_assert_eq!(&after.kind.inputs[7], &before.kind.inputs[7]);

        for (i, (new, old)) in after.kind.inputs[..7].iter().zip(&before.kind.inputs[..7]).enumerate() {
            let expected = match payloads.get(i) {
                Some(p) => CallArg::Pure(p.clone()),
                None => old.clone(),
            };
            prop_assert_eq!(new, &expected);
        }
    }

    #[test]
    fn prop_mutator_never_panics(data in prop::collection::vec(any::<u8>(), 0..256)) {
        let _ = replace_pure_inputs(&data, &[&[1, 2, 3]]);
        let _ = deserialize_transaction_data(&data);
    }
}
