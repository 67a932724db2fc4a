use crate::decoder::{Decoder, Framing, Parameterized, byte_length};
use crate::error::TypeError;

/// Raw byte block of caller-supplied length (`bytes` in the catalogue).
///
/// Only usable once bound to a length:
///
/// ```text
///   ByteBlock.bind(4)?  →  FixedBytes { len: 4 }
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ByteBlock;

impl Parameterized for ByteBlock {
    type Args = i64;
    type Bound = FixedBytes;

    fn bind(&self, length: i64) -> Result<FixedBytes, TypeError> {
        Ok(FixedBytes {
            len: byte_length("bytes", length, 1)?,
        })
    }
}

/// A byte block of known length; returns the window verbatim.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FixedBytes {
    pub len: usize,
}

impl Decoder for FixedBytes {
    type Output = Vec<u8>;

    fn name(&self) -> &'static str {
        "bytes"
    }

    fn framing(&self) -> Framing {
        Framing::Fixed(self.len)
    }

    fn decode(&self, window: &[u8]) -> Result<Vec<u8>, TypeError> {
        Ok(window.to_vec())
    }
}
