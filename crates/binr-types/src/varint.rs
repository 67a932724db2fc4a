use binr_wire::varint::{MAX_VARINT_BYTES, decode_varint, is_last_byte};

use crate::decoder::{Decoder, Framing};
use crate::error::TypeError;

/// Unsigned LEB128 varint, up to 10 bytes, decoded to `u64`.
///
/// Each byte's MSB says whether another byte follows, so the value is
/// read one byte at a time like a terminated string, except that the
/// final byte carries data and running out of stream is an error.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Varint;

impl Decoder for Varint {
    type Output = u64;

    fn name(&self) -> &'static str {
        "varint"
    }

    fn framing(&self) -> Framing {
        Framing::Delimited {
            unit: 1,
            max_units: Some(MAX_VARINT_BYTES),
            eos_terminates: false,
        }
    }

    fn ends_value(&self, unit: &[u8]) -> bool {
        unit.first().is_some_and(|&b| is_last_byte(b))
    }

    fn decode(&self, window: &[u8]) -> Result<u64, TypeError> {
        Ok(decode_varint(window)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_byte_detection() {
        assert!(Varint.ends_value(&[0x7F]));
        assert!(!Varint.ends_value(&[0x80]));
    }

    #[test]
    fn decode_window() {
        assert_eq!(Varint.decode(&[0xAC, 0x02]).unwrap(), 300);
        assert!(matches!(
            Varint.decode(&[0x80]),
            Err(TypeError::Wire(binr_wire::WireError::MalformedVarint { len: 1 }))
        ));
    }
}
