use crate::error::WireError;

/// Byte order of a multi-byte field.
///
/// ```text
///   value 0x1234 as two bytes
///   ┌────────┬──────────────┐
///   │ Little │ [0x34, 0x12] │
///   │ Big    │ [0x12, 0x34] │
///   └────────┴──────────────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Endian {
    Little,
    Big,
}

/// Copy a window into a fixed-size array.
///
/// Numeric decoders use this to hand their bytes to the standard
/// `from_le_bytes`/`from_be_bytes` constructors.
///
/// # Errors
///
/// Returns [`WireError::WindowLength`] if `window` is not exactly `N`
/// bytes long.
pub fn array<const N: usize>(window: &[u8]) -> Result<[u8; N], WireError> {
    window.try_into().map_err(|_| WireError::WindowLength {
        expected: N,
        found: window.len(),
    })
}

/// Read a 16-bit unsigned value in the given byte order.
///
/// # Errors
///
/// Returns [`WireError::WindowLength`] if `window` is not 2 bytes.
pub fn u16_from(window: &[u8], endian: Endian) -> Result<u16, WireError> {
    let raw = array::<2>(window)?;
    Ok(match endian {
        Endian::Little => u16::from_le_bytes(raw),
        Endian::Big => u16::from_be_bytes(raw),
    })
}
