use crate::error::WireError;
use crate::fixed::{Endian, u16_from};

/// Width in bytes of one UTF-16 code unit.
pub const UTF16_UNIT: usize = 2;

/// Decode an 8-bit-unit (UTF-8) text window.
///
/// Trailing `0x00` bytes are stripped, so both a terminated and an
/// unterminated buffer yield the same string. A null byte followed by
/// further text is kept. Malformed sequences are replaced with U+FFFD
/// rather than rejected.
#[must_use]
pub fn decode_utf8(window: &[u8]) -> String {
    let end = window.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    String::from_utf8_lossy(&window[..end]).into_owned()
}

/// Decode a 16-bit-unit (UTF-16) text window in the given byte order.
///
/// Trailing code units equal to zero are stripped. Only aligned units
/// count: a zero byte that belongs to a non-zero unit is never stripped.
/// Unpaired surrogates become U+FFFD.
///
/// # Errors
///
/// Returns [`WireError::OddUtf16Length`] if the window length is odd.
pub fn decode_utf16(window: &[u8], endian: Endian) -> Result<String, WireError> {
    if window.len() % UTF16_UNIT != 0 {
        return Err(WireError::OddUtf16Length { len: window.len() });
    }

    let mut units = window
        .chunks_exact(UTF16_UNIT)
        .map(|pair| u16_from(pair, endian))
        .collect::<Result<Vec<_>, _>>()?;
    while units.last() == Some(&0) {
        units.pop();
    }

    Ok(String::from_utf16_lossy(&units))
}

/// Returns `true` if `unit` is a null code unit (every byte zero).
#[must_use]
pub fn is_null_unit(unit: &[u8]) -> bool {
    unit.iter().all(|&b| b == 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "てすと!";

    fn utf16(s: &str, endian: Endian) -> Vec<u8> {
        s.encode_utf16()
            .flat_map(|u| match endian {
                Endian::Little => u.to_le_bytes(),
                Endian::Big => u.to_be_bytes(),
            })
            .collect()
    }

    #[test]
    fn utf8_without_terminator() {
        assert_eq!(decode_utf8(SAMPLE.as_bytes()), SAMPLE);
    }

    #[test]
    fn utf8_with_terminator() {
        let mut bytes = SAMPLE.as_bytes().to_vec();
        bytes.push(0);
        assert_eq!(decode_utf8(&bytes), SAMPLE);
    }

    #[test]
    fn utf8_trailing_padding_is_dropped() {
        assert_eq!(decode_utf8(b"ab\0\0\0"), "ab");
    }

    #[test]
    fn utf8_inner_null_is_kept() {
        assert_eq!(decode_utf8(b"ab\0cd"), "ab\0cd");
        assert_eq!(decode_utf8(b"ab\0cd\0"), "ab\0cd");
    }

    #[test]
    fn utf8_invalid_bytes_are_replaced() {
        assert_eq!(decode_utf8(&[0x61, 0xFF, 0x62]), "a\u{FFFD}b");
    }

    #[test]
    fn utf8_empty() {
        assert_eq!(decode_utf8(&[]), "");
        assert_eq!(decode_utf8(&[0]), "");
    }

    #[test]
    fn utf16_both_orders() {
        for endian in [Endian::Little, Endian::Big] {
            let bytes = utf16(SAMPLE, endian);
            assert_eq!(decode_utf16(&bytes, endian).unwrap(), SAMPLE);

            let mut terminated = bytes.clone();
            terminated.extend_from_slice(&[0, 0]);
            assert_eq!(decode_utf16(&terminated, endian).unwrap(), SAMPLE);
        }
    }

    #[test]
    fn utf16_zero_byte_inside_unit_is_not_a_terminator() {
        // 'A' = 0x0041 → LE [0x41, 0x00]
        assert_eq!(decode_utf16(&[0x41, 0x00, 0x42, 0x00], Endian::Little).unwrap(), "AB");
    }

    #[test]
    fn utf16_inner_null_is_kept() {
        let bytes = [0x41, 0x00, 0x00, 0x00, 0x42, 0x00, 0x00, 0x00];
        assert_eq!(decode_utf16(&bytes, Endian::Little).unwrap(), "A\0B");
        assert_eq!(decode_utf16(&[0, 0, 0, 0], Endian::Big).unwrap(), "");
    }

    #[test]
    fn utf16_surrogate_pair() {
        let bytes = utf16("😀", Endian::Big);
        assert_eq!(bytes.len(), 4);
        assert_eq!(decode_utf16(&bytes, Endian::Big).unwrap(), "😀");
    }

    #[test]
    fn utf16_odd_window() {
        let result = decode_utf16(&[0x41, 0x00, 0x42], Endian::Little);
        assert!(matches!(result, Err(WireError::OddUtf16Length { len: 3 })));
    }

    #[test]
    fn null_unit_detection() {
        assert!(is_null_unit(&[0]));
        assert!(is_null_unit(&[0, 0]));
        assert!(!is_null_unit(&[0, 1]));
        assert!(!is_null_unit(&[0x41]));
    }
}
