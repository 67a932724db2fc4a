use binr_types::TypeError;

/// Errors that can occur while reading values from a byte stream.
///
/// A read fails either because the stream could not supply the bytes
/// (end of stream, source failure), because the context was left in an
/// unusable state by an earlier failure, or because the decoder rejected
/// its arguments or bytes.
///
/// Error hierarchy:
///
/// ```text
///   DecodeError
///   ├── UnexpectedEndOfStream   ← source ended before the value was complete
///   ├── Source(io::Error)       ← the byte source failed producing a chunk
///   ├── Poisoned                ← context reused after a failed / dropped read
///   └── Type(TypeError)         ← from binr-types: bad argument, overlong
///                                 delimited value, malformed window
/// ```
///
/// `UnexpectedEndOfStream` and `Source` leave the context poisoned;
/// `Type` errors do not, because the cursor is still consistent.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
  /// The source ended with fewer bytes than the pending value needs.
  ///
  /// `offset` is the stream position where the value started, `needed`
  /// the number of bytes the value required (for delimited values, the
  /// bytes needed to finish the current unit) and `available` how many
  /// of them had been received.
  #[error(
    "unexpected end of stream at offset {offset}: needed {needed} bytes, {available} available"
  )]
  UnexpectedEndOfStream {
    offset: u64,
    needed: usize,
    available: usize,
  },

  /// The byte source failed while producing a chunk.
  ///
  /// The source's error is passed through unchanged.
  #[error("byte source failed: {0}")]
  Source(#[source] std::io::Error),

  /// The context cannot be used any more.
  ///
  /// Returned by every read after an `UnexpectedEndOfStream` or `Source`
  /// failure, and after a read future was dropped before completing: in
  /// both cases the partial carry-buffer state is undefined.
  #[error("reading context is poisoned by an earlier failed or cancelled read")]
  Poisoned,

  /// A decoder rejected its arguments or its bytes.
  #[error(transparent)]
  Type(#[from] TypeError),
}
