#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: binary16 decoding.
//
// Every bit pattern must decode; NaN exactly when the exponent is all ones
// with a non-zero mantissa, infinite when the mantissa is zero, and the
// sign bit must survive for everything else.
fuzz_target!(|data: [u8; 2]| {
    let bits = u16::from_le_bytes(data);
    let value = binr_wire::half::f16_to_f32(bits);

    let exponent = (bits >> 10) & 0x1F;
    let mantissa = bits & 0x3FF;
    assert_eq!(value.is_nan(), exponent == 0x1F && mantissa != 0);
    assert_eq!(value.is_infinite(), exponent == 0x1F && mantissa == 0);
    if !value.is_nan() {
        assert_eq!(value.is_sign_negative(), bits & 0x8000 != 0);
        assert!(value.abs() <= 65504.0 || value.is_infinite());
    }
});
