use binr_wire::Endian;
use binr_wire::text::{UTF16_UNIT, decode_utf16, decode_utf8, is_null_unit};

use crate::decoder::{Decoder, Framing, Parameterized, byte_length};
use crate::error::TypeError;

/// Code-unit encoding of a text field.
///
/// ```text
/// ┌──────────────────┬──────┬───────────────┐
/// │ Encoding         │ Unit │ Terminator    │
/// ├──────────────────┼──────┼───────────────┤
/// │ Utf8             │ 1    │ 0x00          │
/// │ Utf16(Little)    │ 2    │ 0x00 0x00     │
/// │ Utf16(Big)       │ 2    │ 0x00 0x00     │
/// └──────────────────┴──────┴───────────────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextEncoding {
    Utf8,
    Utf16(Endian),
}

impl TextEncoding {
    /// Bytes per code unit.
    #[must_use]
    pub fn unit_size(self) -> usize {
        match self {
            Self::Utf8 => 1,
            Self::Utf16(_) => UTF16_UNIT,
        }
    }

    /// Catalogue name of the string decoder using this encoding.
    #[must_use]
    pub fn decoder_name(self) -> &'static str {
        match self {
            Self::Utf8 => "string8",
            Self::Utf16(Endian::Little) => "lestring16",
            Self::Utf16(Endian::Big) => "bestring16",
        }
    }

    /// Decode a window, stripping trailing null units.
    ///
    /// # Errors
    ///
    /// Returns [`TypeError::Wire`] if a UTF-16 window has odd length.
    pub fn decode(self, window: &[u8]) -> Result<String, TypeError> {
        match self {
            Self::Utf8 => Ok(decode_utf8(window)),
            Self::Utf16(endian) => Ok(decode_utf16(window, endian)?),
        }
    }

    fn delimited(self) -> Framing {
        Framing::Delimited {
            unit: self.unit_size(),
            max_units: None,
            eos_terminates: true,
        }
    }

    fn bind(self, units: i64) -> Result<FixedText, TypeError> {
        Ok(FixedText {
            encoding: self,
            len: byte_length(self.decoder_name(), units, self.unit_size())?,
        })
    }
}

macro_rules! string_decoder {
    ($(#[$doc:meta])* $name:ident, $encoding:expr) => {
        $(#[$doc])*
        ///
        /// Read bare, the decoder scans code units up to a null unit (which
        /// is consumed but not returned) or the end of the stream; a bare
        /// read with no bytes left yields an empty string. Bound to a
        /// length, it reads exactly that many code units.
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
        pub struct $name;

        impl $name {
            pub const ENCODING: TextEncoding = $encoding;
        }

        impl Decoder for $name {
            type Output = String;

            fn name(&self) -> &'static str {
                Self::ENCODING.decoder_name()
            }

            fn framing(&self) -> Framing {
                Self::ENCODING.delimited()
            }

            fn ends_value(&self, unit: &[u8]) -> bool {
                is_null_unit(unit)
            }

            fn decode(&self, window: &[u8]) -> Result<String, TypeError> {
                Self::ENCODING.decode(window)
            }
        }

        impl Parameterized for $name {
            /// Length in code units, not bytes.
            type Args = i64;
            type Bound = FixedText;

            fn bind(&self, units: i64) -> Result<FixedText, TypeError> {
                Self::ENCODING.bind(units)
            }
        }
    };
}

string_decoder!(
    /// 8-bit code unit text (UTF-8).
    String8,
    TextEncoding::Utf8
);
string_decoder!(
    /// 16-bit code unit text (UTF-16), little-endian units.
    LeString16,
    TextEncoding::Utf16(Endian::Little)
);
string_decoder!(
    /// 16-bit code unit text (UTF-16), big-endian units.
    BeString16,
    TextEncoding::Utf16(Endian::Big)
);

/// A text field of explicit length.
///
/// The length is authoritative: exactly `len` bytes are consumed, and
/// only null units at the end of that window are stripped. Text after an
/// inner null unit is part of the value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FixedText {
    pub encoding: TextEncoding,
    /// Length in bytes (code units × unit size).
    pub len: usize,
}

impl Decoder for FixedText {
    type Output = String;

    fn name(&self) -> &'static str {
        self.encoding.decoder_name()
    }

    fn framing(&self) -> Framing {
        Framing::Fixed(self.len)
    }

    fn decode(&self, window: &[u8]) -> Result<String, TypeError> {
        self.encoding.decode(window)
    }
}
