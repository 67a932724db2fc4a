//! Runtime-selected decoders.
//!
//! [`FieldType`] names every entry of the catalogue, and [`AnyDecoder`]
//! is the tagged union of concrete decoders it resolves to. `AnyDecoder`
//! implements [`Decoder`] with `Output = Value`, so the reading context
//! and its combinators handle a decoder chosen from a string exactly like
//! a statically typed one.

use std::fmt;
use std::str::FromStr;

use crate::block::{ByteBlock, FixedBytes};
use crate::decoder::{Decoder, Framing, Parameterized};
use crate::error::TypeError;
use crate::float::{BeFloat16, BeFloat32, BeFloat64, LeFloat16, LeFloat32, LeFloat64};
use crate::int::{
    BeInt16, BeInt32, BeInt64, BeUInt16, BeUInt32, BeUInt64, Int8, LeInt16, LeInt32, LeInt64,
    LeUInt16, LeUInt32, LeUInt64, UInt8,
};
use crate::text::{BeString16, FixedText, LeString16, String8};
use crate::value::Value;
use crate::varint::Varint;

macro_rules! catalogue {
    ($($variant:ident => $name:literal),+ $(,)?) => {
        /// Every decoder in the catalogue, by name.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum FieldType {
            $($variant),+
        }

        impl FieldType {
            /// All catalogue entries in listing order.
            pub const ALL: &'static [FieldType] = &[$(Self::$variant),+];

            /// Catalogue name (`leint16`, `string8`, ...).
            #[must_use]
            pub fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name),+
                }
            }

            /// Look up a catalogue entry by name.
            ///
            /// # Errors
            ///
            /// Returns [`TypeError::UnknownType`] if no entry matches.
            pub fn from_name(name: &str) -> Result<Self, TypeError> {
                match name {
                    $($name => Ok(Self::$variant),)+
                    other => Err(TypeError::UnknownType { name: other.to_owned() }),
                }
            }
        }
    };
}

catalogue! {
    Int8 => "int8",
    UInt8 => "uint8",
    LeInt16 => "leint16",
    BeInt16 => "beint16",
    LeUInt16 => "leuint16",
    BeUInt16 => "beuint16",
    LeInt32 => "leint32",
    BeInt32 => "beint32",
    LeUInt32 => "leuint32",
    BeUInt32 => "beuint32",
    LeInt64 => "leint64",
    BeInt64 => "beint64",
    LeUInt64 => "leuint64",
    BeUInt64 => "beuint64",
    LeFloat16 => "lefloat16",
    BeFloat16 => "befloat16",
    LeFloat32 => "lefloat32",
    BeFloat32 => "befloat32",
    LeFloat64 => "lefloat64",
    BeFloat64 => "befloat64",
    Varint => "varint",
    Bytes => "bytes",
    String8 => "string8",
    LeString16 => "lestring16",
    BeString16 => "bestring16",
}

impl FieldType {
    /// Whether the decoder accepts a length argument.
    #[must_use]
    pub fn takes_length(self) -> bool {
        matches!(
            self,
            Self::Bytes | Self::String8 | Self::LeString16 | Self::BeString16
        )
    }

    /// Whether the decoder cannot be used without a length argument.
    #[must_use]
    pub fn requires_length(self) -> bool {
        self == Self::Bytes
    }

    /// Resolve to a concrete decoder, binding `length` when given.
    ///
    /// # Errors
    ///
    /// - [`TypeError::MissingArgument`] for `bytes` without a length.
    /// - [`TypeError::UnexpectedArgument`] for a length on a decoder that
    ///   takes none.
    /// - [`TypeError::InvalidArgument`] for a negative or overflowing
    ///   length.
    pub fn decoder(self, length: Option<i64>) -> Result<AnyDecoder, TypeError> {
        if length.is_some() && !self.takes_length() {
            return Err(TypeError::UnexpectedArgument { decoder: self.name() });
        }

        let decoder = match (self, length) {
            (Self::Int8, _) => AnyDecoder::Int8(Int8),
            (Self::UInt8, _) => AnyDecoder::UInt8(UInt8),
            (Self::LeInt16, _) => AnyDecoder::LeInt16(LeInt16),
            (Self::BeInt16, _) => AnyDecoder::BeInt16(BeInt16),
            (Self::LeUInt16, _) => AnyDecoder::LeUInt16(LeUInt16),
            (Self::BeUInt16, _) => AnyDecoder::BeUInt16(BeUInt16),
            (Self::LeInt32, _) => AnyDecoder::LeInt32(LeInt32),
            (Self::BeInt32, _) => AnyDecoder::BeInt32(BeInt32),
            (Self::LeUInt32, _) => AnyDecoder::LeUInt32(LeUInt32),
            (Self::BeUInt32, _) => AnyDecoder::BeUInt32(BeUInt32),
            (Self::LeInt64, _) => AnyDecoder::LeInt64(LeInt64),
            (Self::BeInt64, _) => AnyDecoder::BeInt64(BeInt64),
            (Self::LeUInt64, _) => AnyDecoder::LeUInt64(LeUInt64),
            (Self::BeUInt64, _) => AnyDecoder::BeUInt64(BeUInt64),
            (Self::LeFloat16, _) => AnyDecoder::LeFloat16(LeFloat16),
            (Self::BeFloat16, _) => AnyDecoder::BeFloat16(BeFloat16),
            (Self::LeFloat32, _) => AnyDecoder::LeFloat32(LeFloat32),
            (Self::BeFloat32, _) => AnyDecoder::BeFloat32(BeFloat32),
            (Self::LeFloat64, _) => AnyDecoder::LeFloat64(LeFloat64),
            (Self::BeFloat64, _) => AnyDecoder::BeFloat64(BeFloat64),
            (Self::Varint, _) => AnyDecoder::Varint(Varint),
            (Self::Bytes, None) => {
                return Err(TypeError::MissingArgument { decoder: self.name() });
            }
            (Self::Bytes, Some(len)) => AnyDecoder::Bytes(ByteBlock.bind(len)?),
            (Self::String8, None) => AnyDecoder::String8(String8),
            (Self::String8, Some(len)) => AnyDecoder::Text(String8.bind(len)?),
            (Self::LeString16, None) => AnyDecoder::LeString16(LeString16),
            (Self::LeString16, Some(len)) => AnyDecoder::Text(LeString16.bind(len)?),
            (Self::BeString16, None) => AnyDecoder::BeString16(BeString16),
            (Self::BeString16, Some(len)) => AnyDecoder::Text(BeString16.bind(len)?),
        };

        Ok(decoder)
    }
}

impl FromStr for FieldType {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

macro_rules! any_decoder {
    ($($variant:ident($inner:ty)),+ $(,)?) => {
        /// A concrete decoder selected at runtime.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum AnyDecoder {
            $($variant($inner)),+
        }

        impl Decoder for AnyDecoder {
            type Output = Value;

            fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant(d) => d.name()),+
                }
            }

            fn framing(&self) -> Framing {
                match self {
                    $(Self::$variant(d) => d.framing()),+
                }
            }

            fn ends_value(&self, unit: &[u8]) -> bool {
                match self {
                    $(Self::$variant(d) => d.ends_value(unit)),+
                }
            }

            fn decode(&self, window: &[u8]) -> Result<Value, TypeError> {
                match self {
                    $(Self::$variant(d) => d.decode(window).map(Value::from)),+
                }
            }
        }
    };
}

any_decoder! {
    Int8(Int8),
    UInt8(UInt8),
    LeInt16(LeInt16),
    BeInt16(BeInt16),
    LeUInt16(LeUInt16),
    BeUInt16(BeUInt16),
    LeInt32(LeInt32),
    BeInt32(BeInt32),
    LeUInt32(LeUInt32),
    BeUInt32(BeUInt32),
    LeInt64(LeInt64),
    BeInt64(BeInt64),
    LeUInt64(LeUInt64),
    BeUInt64(BeUInt64),
    LeFloat16(LeFloat16),
    BeFloat16(BeFloat16),
    LeFloat32(LeFloat32),
    BeFloat32(BeFloat32),
    LeFloat64(LeFloat64),
    BeFloat64(BeFloat64),
    Varint(Varint),
    Bytes(FixedBytes),
    String8(String8),
    LeString16(LeString16),
    BeString16(BeString16),
    Text(FixedText),
}
