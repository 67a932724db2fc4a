/// Errors raised by the pure byte transforms in this crate.
///
/// Every transform receives a complete window of bytes; these errors
/// only fire when that window has the wrong shape for the transform
/// (a caller bug or corrupt input), never because a stream ran dry.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// A fixed-width transform received a window of the wrong size.
    #[error("window length mismatch: expected {expected} bytes, found {found}")]
    WindowLength { expected: usize, found: usize },

    /// A UTF-16 window did not hold a whole number of code units.
    #[error("utf-16 window of {len} bytes is not a whole number of code units")]
    OddUtf16Length { len: usize },

    /// A varint window was not 1 to 10 bytes with the MSB clear on its
    /// last byte only.
    #[error("window of {len} bytes is not a single terminated varint")]
    MalformedVarint { len: usize },
}
