use crate::error::TypeError;

/// How a decoder's bytes are laid out in the stream.
///
/// The reading context uses this to decide how many bytes to assemble
/// before calling [`Decoder::decode`]:
///
/// ```text
/// ┌───────────┬──────────────────────────────────────────────────────┐
/// │ Framing   │ Context behaviour                                    │
/// ├───────────┼──────────────────────────────────────────────────────┤
/// │ Fixed(n)  │ Assemble exactly n bytes, then decode.               │
/// │ Delimited │ Read `unit` bytes at a time, asking `ends_value`     │
/// │           │ after each one, until it says stop (or the stream    │
/// │           │ ends, when `eos_terminates` allows it).              │
/// └───────────┴──────────────────────────────────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Framing {
    /// The value occupies exactly this many bytes.
    Fixed(usize),

    /// The value is a run of `unit`-byte units ended by a decoder-defined
    /// marker unit, which is consumed and passed to `decode` as the last
    /// unit of the window.
    Delimited {
        unit: usize,
        /// Upper bound on the number of units, if the encoding has one.
        max_units: Option<usize>,
        /// Whether end-of-stream on a unit boundary also ends the value.
        eos_terminates: bool,
    },
}

/// A stateless description of how to turn bytes into one typed value.
///
/// Implementations are plain values (mostly unit structs) and never
/// hold mutable state, so a single decoder can be shared across any
/// number of reading contexts.
pub trait Decoder {
    /// The decoded value type.
    type Output;

    /// Catalogue name, used in diagnostics.
    fn name(&self) -> &'static str;

    /// How many bytes the value occupies.
    fn framing(&self) -> Framing;

    /// For [`Framing::Delimited`] decoders: does `unit` end the value?
    fn ends_value(&self, _unit: &[u8]) -> bool {
        false
    }

    /// Turn a fully assembled window into a value.
    ///
    /// # Errors
    ///
    /// Returns a [`TypeError`] if the window cannot be decoded.
    fn decode(&self, window: &[u8]) -> Result<Self::Output, TypeError>;
}

/// A decoder that needs arguments before it can read anything.
///
/// Binding is a separate, I/O-free step so argument validation always
/// happens before a single byte is consumed:
///
/// ```text
///   ByteBlock.bind(3)?  →  FixedBytes { len: 3 }  →  ctx.read(&it)
/// ```
pub trait Parameterized {
    /// Arguments accepted by [`bind`](Self::bind).
    type Args;

    /// The concrete decoder produced by binding.
    type Bound: Decoder;

    /// Close over `args` and return a concrete decoder.
    ///
    /// # Errors
    ///
    /// Returns [`TypeError::InvalidArgument`] if an argument is out of
    /// domain.
    fn bind(&self, args: Self::Args) -> Result<Self::Bound, TypeError>;
}

/// Validate a length argument and convert it to a byte count.
///
/// `length` is counted in units of `unit_size` bytes. Negative lengths
/// and lengths whose byte size does not fit in `usize` are rejected.
pub(crate) fn byte_length(
    decoder: &'static str,
    length: i64,
    unit_size: usize,
) -> Result<usize, TypeError> {
    let invalid = || TypeError::InvalidArgument { decoder, value: length };
    let units = usize::try_from(length).map_err(|_| invalid())?;
    units.checked_mul(unit_size).ok_or_else(invalid)
}
