#![no_main]

use binr_wire::Endian;
use libfuzzer_sys::fuzz_target;

// Fuzz target: text window decoding.
//
// Arbitrary bytes never panic, and the decoded text never ends with the
// null padding that was stripped.
fuzz_target!(|data: &[u8]| {
    let utf8 = binr_wire::text::decode_utf8(data);
    assert!(!utf8.ends_with('\0'));

    for endian in [Endian::Little, Endian::Big] {
        match binr_wire::text::decode_utf16(data, endian) {
            Ok(text) => assert!(!text.ends_with('\0')),
            Err(_) => assert!(data.len() % 2 == 1),
        }
    }
});
