//! Fixed-width integer decoders.
//!
//! Unsigned values are the positional sum of their bytes in the declared
//! order; signed values are the two's-complement reinterpretation of the
//! same bits, which is exactly what `from_le_bytes`/`from_be_bytes`
//! produce for the signed primitive types.
//!
//! | Decoder    | Width | Output | Order  |
//! |------------|-------|--------|--------|
//! | `Int8`     | 1     | `i8`   | n/a    |
//! | `UInt8`    | 1     | `u8`   | n/a    |
//! | `LeInt16`  | 2     | `i16`  | little |
//! | `BeUInt32` | 4     | `u32`  | big    |
//! | `LeInt64`  | 8     | `i64`  | little |
//! | ...        |       |        |        |

use binr_wire::fixed::array;

use crate::decoder::{Decoder, Framing};
use crate::error::TypeError;

macro_rules! int_decoder {
    ($(#[$doc:meta])* $name:ident, $label:literal, $ty:ty, $from:ident) => {
        $(#[$doc])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
        pub struct $name;

        impl Decoder for $name {
            type Output = $ty;

            fn name(&self) -> &'static str {
                $label
            }

            fn framing(&self) -> Framing {
                Framing::Fixed(size_of::<$ty>())
            }

            fn decode(&self, window: &[u8]) -> Result<$ty, TypeError> {
                Ok(<$ty>::$from(array(window)?))
            }
        }
    };
}

int_decoder!(
    /// Signed 8-bit integer.
    Int8, "int8", i8, from_le_bytes
);
int_decoder!(
    /// Unsigned 8-bit integer.
    UInt8, "uint8", u8, from_le_bytes
);
int_decoder!(LeInt16, "leint16", i16, from_le_bytes);
int_decoder!(BeInt16, "beint16", i16, from_be_bytes);
int_decoder!(LeUInt16, "leuint16", u16, from_le_bytes);
int_decoder!(BeUInt16, "beuint16", u16, from_be_bytes);
int_decoder!(LeInt32, "leint32", i32, from_le_bytes);
int_decoder!(BeInt32, "beint32", i32, from_be_bytes);
int_decoder!(LeUInt32, "leuint32", u32, from_le_bytes);
int_decoder!(BeUInt32, "beuint32", u32, from_be_bytes);
int_decoder!(LeInt64, "leint64", i64, from_le_bytes);
int_decoder!(BeInt64, "beint64", i64, from_be_bytes);
int_decoder!(LeUInt64, "leuint64", u64, from_le_bytes);
int_decoder!(BeUInt64, "beuint64", u64, from_be_bytes);

#[cfg(test)]
mod tests {
    use super::*;
    use binr_wire::WireError;

    #[test]
    fn widths() {
        assert_eq!(Int8.framing(), Framing::Fixed(1));
        assert_eq!(BeUInt16.framing(), Framing::Fixed(2));
        assert_eq!(LeInt32.framing(), Framing::Fixed(4));
        assert_eq!(BeUInt64.framing(), Framing::Fixed(8));
    }

    #[test]
    fn all_ones_is_minus_one_or_max() {
        assert_eq!(Int8.decode(&[0xFF]).unwrap(), -1);
        assert_eq!(UInt8.decode(&[0xFF]).unwrap(), u8::MAX);
        assert_eq!(LeInt16.decode(&[0xFF; 2]).unwrap(), -1);
        assert_eq!(BeInt16.decode(&[0xFF; 2]).unwrap(), -1);
        assert_eq!(LeUInt16.decode(&[0xFF; 2]).unwrap(), u16::MAX);
        assert_eq!(BeUInt16.decode(&[0xFF; 2]).unwrap(), u16::MAX);
        assert_eq!(LeInt32.decode(&[0xFF; 4]).unwrap(), -1);
        assert_eq!(BeInt32.decode(&[0xFF; 4]).unwrap(), -1);
        assert_eq!(LeUInt32.decode(&[0xFF; 4]).unwrap(), u32::MAX);
        assert_eq!(BeUInt32.decode(&[0xFF; 4]).unwrap(), u32::MAX);
        assert_eq!(LeInt64.decode(&[0xFF; 8]).unwrap(), -1);
        assert_eq!(BeInt64.decode(&[0xFF; 8]).unwrap(), -1);
        assert_eq!(LeUInt64.decode(&[0xFF; 8]).unwrap(), u64::MAX);
        assert_eq!(BeUInt64.decode(&[0xFF; 8]).unwrap(), u64::MAX);
    }

    #[test]
    fn half_range_boundary() {
        // 0x8000 is the first value at or above half the range
        assert_eq!(LeInt16.decode(&[0x00, 0x80]).unwrap(), i16::MIN);
        assert_eq!(LeInt16.decode(&[0xFF, 0x7F]).unwrap(), i16::MAX);
        assert_eq!(BeInt32.decode(&[0x80, 0, 0, 0]).unwrap(), i32::MIN);
        assert_eq!(Int8.decode(&[0x80]).unwrap(), -128);
    }

    #[test]
    fn byte_order() {
        assert_eq!(LeUInt32.decode(&[0x78, 0x56, 0x34, 0x12]).unwrap(), 0x1234_5678);
        assert_eq!(BeUInt32.decode(&[0x12, 0x34, 0x56, 0x78]).unwrap(), 0x1234_5678);
    }

    #[test]
    fn wrong_window_is_rejected() {
        let err = LeInt32.decode(&[0x01, 0x02]).unwrap_err();
        assert!(matches!(
            err,
            TypeError::Wire(WireError::WindowLength { expected: 4, found: 2 })
        ));
    }
}
