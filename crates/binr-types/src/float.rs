use binr_wire::fixed::{Endian, array, u16_from};
use binr_wire::half::f16_to_f32;

use crate::decoder::{Decoder, Framing};
use crate::error::TypeError;

macro_rules! half_decoder {
    ($(#[$doc:meta])* $name:ident, $label:literal, $endian:expr) => {
        $(#[$doc])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
        pub struct $name;

        impl Decoder for $name {
            type Output = f32;

            fn name(&self) -> &'static str {
                $label
            }

            fn framing(&self) -> Framing {
                Framing::Fixed(2)
            }

            fn decode(&self, window: &[u8]) -> Result<f32, TypeError> {
                Ok(f16_to_f32(u16_from(window, $endian)?))
            }
        }
    };
}

macro_rules! float_decoder {
    ($name:ident, $label:literal, $ty:ty, $from:ident) => {
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

half_decoder!(
    /// IEEE-754 binary16, little-endian, widened losslessly to `f32`.
    LeFloat16, "lefloat16", Endian::Little
);
half_decoder!(
    /// IEEE-754 binary16, big-endian, widened losslessly to `f32`.
    BeFloat16, "befloat16", Endian::Big
);
float_decoder!(LeFloat32, "lefloat32", f32, from_le_bytes);
float_decoder!(BeFloat32, "befloat32", f32, from_be_bytes);
float_decoder!(LeFloat64, "lefloat64", f64, from_le_bytes);
float_decoder!(BeFloat64, "befloat64", f64, from_be_bytes);
