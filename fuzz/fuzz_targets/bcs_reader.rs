#![no_main]
use libfuzzer_sys::fuzz_target;
use sui_sensor_tx::serialization::uleb128::{decode_uleb128, encode_uleb128};
use sui_sensor_tx::BcsReader;

fuzz_target!(|data: &[u8]| {
    // ULEB128: whatever decodes re-encodes to a prefix no longer than what was consumed
    if let Ok((value, consumed)) = decode_uleb128(data) {
        assert!(consumed <= 10);
        assert!(encode_uleb128(value).len() <= consumed);
    }

    // Drive the reader with the input as both opcodes and payload
    let mut reader = BcsReader::new(data);
    while reader.remaining() > 0 {
        let before = reader.position();
        let op = match reader.read_u8() {
            Ok(op) => op,
            Err(_) => break,
        };
        let mark = reader.position();
        let ok = match op % 6 {
            0 => reader.read_u64().is_ok(),
            1 => reader.read_bool().is_ok(),
            2 => reader.read_uleb128().is_ok(),
            3 => reader.read_byte_vec().is_ok(),
            4 => reader.read_str().is_ok(),
            _ => {
                let mut dest = [0u8; 16];
                reader.read_string(&mut dest).is_ok()
            }
        };
        assert!(reader.position() <= data.len());
        if !ok {
            assert_eq!(reader.position(), mark, "failed read moved the cursor");
            break;
        }
        assert!(reader.position() > before);
    }
});
