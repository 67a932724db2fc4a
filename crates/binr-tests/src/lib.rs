//! Shared fixtures for the binr integration tests and benches.

use binr_decoder::{DecodeError, MemorySource, ReadingContext};
use binr_types::Decoder;

/// A record exercising every framing: fixed ints and floats, a length
/// prefixed block, an explicit-length string with a terminator inside
/// its window, bare strings in both widths, and varints.
///
/// ```text
/// offset  field        type              bytes
///      0  magic        bytes(4)          "BINR"
///      4  version      beuint16          0x0102
///      6  count        leuint16          3
///      8  points       lefloat16[count]  1.0  -2.0  65504
///     14  name         string8(8)        "probe\0\0\0"
///     22  comment      string8           "ok\0"
///     25  title        bestring16        "てすと!\0"
///     35  sizes        varint[2]         300  1
///     38  tail         leint64           -2
/// ```
#[must_use]
pub fn sample_record() -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"BINR");
    bytes.extend_from_slice(&0x0102u16.to_be_bytes());
    bytes.extend_from_slice(&3u16.to_le_bytes());
    bytes.extend_from_slice(&[0x00, 0x3C, 0x00, 0xC0, 0xFF, 0x7B]);
    bytes.extend_from_slice(b"probe\0\0\0");
    bytes.extend_from_slice(b"ok\0");
    for unit in "てすと!".encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    bytes.extend_from_slice(&[0x00, 0x00]);
    bytes.extend_from_slice(&[0xAC, 0x02, 0x01]);
    bytes.extend_from_slice(&(-2i64).to_le_bytes());
    bytes
}

/// Decode `count` values from `bytes` delivered in chunks of `chunk_size`.
///
/// # Errors
///
/// Whatever the reading context reports.
pub async fn read_chunked<D: Decoder>(
    bytes: &[u8],
    chunk_size: usize,
    decoder: &D,
    count: usize,
) -> Result<Vec<D::Output>, DecodeError> {
    let mut ctx = ReadingContext::new(MemorySource::split(bytes.to_vec(), chunk_size));
    ctx.read_array(decoder, count).await
}

/// Every chunk size worth trying for a payload of `len` bytes: one byte
/// at a time up to the whole payload in a single chunk.
pub fn chunk_sizes(len: usize) -> impl Iterator<Item = usize> {
    1..=len.max(1)
}
