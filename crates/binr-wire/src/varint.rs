use crate::error::WireError;

/// Maximum number of bytes a u64 varint can occupy.
/// ceil(64 / 7) = 10 bytes.
pub const MAX_VARINT_BYTES: usize = 10;

/// Returns `true` if `byte` is the final byte of a varint (MSB clear).
#[must_use]
pub fn is_last_byte(byte: u8) -> bool {
    byte & 0x80 == 0
}

/// Decode a window holding exactly one unsigned LEB128 varint.
///
/// | Value   | Window               |
/// |---------|----------------------|
/// | 0       | `[0x00]`             |
/// | 127     | `[0x7F]`             |
/// | 300     | `[0xAC, 0x02]`       |
/// | 16384   | `[0x80, 0x80, 0x01]` |
///
/// Data bits past the 64th are dropped.
///
/// # Errors
///
/// Returns [`WireError::MalformedVarint`] unless the window is 1 to 10
/// bytes long and only its last byte has the MSB clear.
pub fn decode_varint(window: &[u8]) -> Result<u64, WireError> {
    let well_formed = match window.split_last() {
        Some((&last, body)) => {
            window.len() <= MAX_VARINT_BYTES
                && is_last_byte(last)
                && !body.iter().any(|&b| is_last_byte(b))
        }
        None => false,
    };
    if !well_formed {
        return Err(WireError::MalformedVarint { len: window.len() });
    }

    Ok(window
        .iter()
        .rev()
        .fold(0u64, |acc, &byte| (acc << 7) | u64::from(byte & 0x7F)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_byte() {
        assert_eq!(decode_varint(&[0x00]).unwrap(), 0);
        assert_eq!(decode_varint(&[0x7F]).unwrap(), 127);
    }

    #[test]
    fn multi_byte() {
        assert_eq!(decode_varint(&[0x80, 0x01]).unwrap(), 128);
        assert_eq!(decode_varint(&[0xAC, 0x02]).unwrap(), 300);
        assert_eq!(decode_varint(&[0x80, 0x80, 0x01]).unwrap(), 16384);
    }

    #[test]
    fn ten_bytes_reach_u64_max() {
        let mut window = [0xFF; MAX_VARINT_BYTES];
        window[9] = 0x01;
        assert_eq!(decode_varint(&window).unwrap(), u64::MAX);

        // high bits of the tenth byte do not fit
        window[9] = 0x7F;
        assert_eq!(decode_varint(&window).unwrap(), u64::MAX);
    }

    #[test]
    fn rejects_malformed_windows() {
        let windows: [&[u8]; 4] = [&[], &[0x80], &[0x01, 0x01], &[0x80; 11]];
        for window in windows {
            assert!(
                matches!(decode_varint(window), Err(WireError::MalformedVarint { len }) if len == window.len()),
                "{window:02x?}"
            );
        }
    }
}
