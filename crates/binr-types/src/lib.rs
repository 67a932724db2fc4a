#![warn(clippy::pedantic)]

pub mod error;
pub mod decoder;
pub mod int;
pub mod float;
pub mod block;
pub mod text;
pub mod varint;
pub mod value;
pub mod field_type;

pub use binr_wire::Endian;
pub use block::{ByteBlock, FixedBytes};
pub use decoder::{Decoder, Framing, Parameterized};
pub use error::TypeError;
pub use field_type::{AnyDecoder, FieldType};
pub use float::{BeFloat16, BeFloat32, BeFloat64, LeFloat16, LeFloat32, LeFloat64};
pub use int::{
    BeInt16, BeInt32, BeInt64, BeUInt16, BeUInt32, BeUInt64, Int8, LeInt16, LeInt32, LeInt64,
    LeUInt16, LeUInt32, LeUInt64, UInt8,
};
pub use text::{BeString16, FixedText, LeString16, String8, TextEncoding};
pub use value::Value;
pub use varint::Varint;
