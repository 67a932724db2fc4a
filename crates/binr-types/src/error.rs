use binr_wire::WireError;

/// Errors raised while binding or applying a decoder.
///
/// These sit one level above [`WireError`]: they deal with decoder
/// arguments and catalogue lookups rather than the raw shape of a byte
/// window. A `TypeError` wraps a `WireError` when the failure comes from
/// the underlying transform.
///
/// # Error hierarchy
///
/// ```text
/// ┌──────────────────────────────────────────────────────────┐
/// │ TypeError (this crate)                                   │
/// │   ├── InvalidArgument for negative / overflowing lengths │
/// │   ├── MissingArgument when a length is mandatory         │
/// │   ├── UnexpectedArgument for fixed-width decoders        │
/// │   ├── ValueTooLong when a delimited scan hits its limit  │
/// │   ├── UnknownType for unrecognised catalogue names       │
/// │   └── wraps WireError for transform failures             │
/// └──────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, thiserror::Error)]
pub enum TypeError {
  /// A parameterized decoder was bound with an out-of-domain argument.
  ///
  /// Raised by [`Parameterized::bind`](crate::Parameterized::bind)
  /// before any byte is read, so the stream position is untouched.
  #[error("invalid argument {value} for {decoder}")]
  InvalidArgument { decoder: &'static str, value: i64 },

  /// A decoder that only exists in parameterized form was used without
  /// its argument (e.g. `bytes` without a length).
  #[error("{decoder} requires a length argument")]
  MissingArgument { decoder: &'static str },

  /// A fixed-width decoder was given an argument it does not take.
  #[error("{decoder} does not take an argument")]
  UnexpectedArgument { decoder: &'static str },

  /// A delimited scan read `limit` units without finding the end of the
  /// value.
  #[error("{decoder} value did not terminate within {limit} units")]
  ValueTooLong { decoder: &'static str, limit: usize },

  /// A catalogue name did not match any known decoder.
  #[error("unknown type name: {name:?}")]
  UnknownType { name: String },

  /// The byte transform rejected its window.
  #[error(transparent)]
  Wire(#[from] WireError),
}
