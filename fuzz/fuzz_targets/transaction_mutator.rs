#![no_main]
use libfuzzer_sys::fuzz_target;
use sui_sensor_tx::mutator::replace_pure_inputs;
use sui_sensor_tx::serialization::{deserialize_transaction_data, serialize_transaction_data};

fuzz_target!(|data: &[u8]| {
    // Split the input into a transaction and one replacement payload
    let split = data.first().map(|&b| b as usize).unwrap_or(0).min(data.len());
    let (payload, tx) = data.split_at(split);

    // Any transaction that decodes must survive a re-encode unchanged
    // (bytes may differ only where the source used non-minimal ULEB128)
    if let Ok(decoded) = deserialize_transaction_data(tx) {
        let encoded = serialize_transaction_data(&decoded).expect("re-encode decoded transaction");
        assert!(encoded.len() <= tx.len());
        assert_eq!(
            deserialize_transaction_data(&encoded).expect("re-encoded transaction decodes"),
            decoded
        );

        // Rewriting a valid transaction yields another valid transaction
        let rewritten = replace_pure_inputs(tx, &[payload]).expect("rewrite valid transaction");
        let after = deserialize_transaction_data(&rewritten).expect("rewritten transaction decodes");
        assert_eq!(after.kind.commands, decoded.kind.commands);
        assert_eq!(after.gas_data, decoded.gas_data);

        // No replacements: the rewrite is a byte copy
        assert_eq!(replace_pure_inputs(tx, &[]).expect("identity rewrite"), tx);
    } else {
        // Malformed input must fail cleanly, never panic
        let _ = replace_pure_inputs(tx, &[payload]);
    }
});
