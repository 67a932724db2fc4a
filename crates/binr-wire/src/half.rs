//! IEEE-754 binary16 (half precision) decoding.
//!
//! There is no native `f16` on stable Rust, so the 16 raw bits are
//! taken apart by hand and rebuilt as an `f32`. Every binary16 value,
//! subnormals included, is exactly representable in `f32`, so the
//! conversion is lossless.
//!
//! ```text
//!   bit  15   14 ─── 10   9 ──────────── 0
//!       ┌────┬──────────┬──────────────────┐
//!       │ S  │ exponent │     mantissa     │
//!       │ 1  │  5 bits  │     10 bits      │
//!       └────┴──────────┴──────────────────┘
//!   bias = 15
//! ```
//!
//! | exponent | mantissa | value                              |
//! |----------|----------|------------------------------------|
//! | 0        | 0        | ±0                                 |
//! | 0        | m ≠ 0    | ±(m / 1024) · 2^-14   (subnormal)  |
//! | 1..=30   | m        | ±(1 + m / 1024) · 2^(e - 15)       |
//! | 31       | 0        | ±∞                                 |
//! | 31       | m ≠ 0    | NaN                                |

const SIGN_MASK: u16 = 0x8000;
const EXPONENT_MASK: u16 = 0x1F;
const MANTISSA_MASK: u16 = 0x03FF;
const EXPONENT_BIAS: i32 = 15;
const MANTISSA_SCALE: f32 = 1024.0;

/// Exponent field value reserved for infinities and NaN.
const EXPONENT_SPECIAL: u16 = 0x1F;

/// Decode the raw bits of a binary16 number into an `f32`.
#[must_use]
pub fn f16_to_f32(bits: u16) -> f32 {
    let sign = if bits & SIGN_MASK == 0 { 1.0 } else { -1.0 };
    let exponent = (bits >> 10) & EXPONENT_MASK;
    let mantissa = bits & MANTISSA_MASK;

    match (exponent, mantissa) {
        (0, 0) => sign * 0.0,
        (0, m) => sign * (f32::from(m) / MANTISSA_SCALE) * 2f32.powi(1 - EXPONENT_BIAS),
        (EXPONENT_SPECIAL, 0) => sign * f32::INFINITY,
        (EXPONENT_SPECIAL, _) => f32::NAN,
        (e, m) => {
            sign * (1.0 + f32::from(m) / MANTISSA_SCALE) * 2f32.powi(i32::from(e) - EXPONENT_BIAS)
        }
    }
}
