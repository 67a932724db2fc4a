#![no_main]

use binr_wire::varint::{MAX_VARINT_BYTES, decode_varint, is_last_byte};
use libfuzzer_sys::fuzz_target;

// Fuzz target: decode_varint LEB128 window transform.
//
// Catches bugs in:
// - Window validation (empty, over 10 bytes, early terminal byte)
// - Shift overflow in the tenth byte
fuzz_target!(|data: &[u8]| {
    if decode_varint(data).is_ok() {
        assert!(!data.is_empty() && data.len() <= MAX_VARINT_BYTES);
        assert!(is_last_byte(data[data.len() - 1]));
    }
});
