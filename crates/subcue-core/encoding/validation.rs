//! Structural UTF-8 scan
//!
//! Count the leading one bits of each lead byte and check that the announced
//! number of continuation bytes follow. Overlong forms, surrogates and code points past
//! U+10FFFF are not rejected, so this is looser than [`core::str::from_utf8`].

/// Check that every byte sequence in `bytes` has the shape of UTF-8
///
/// Returns `false` on a stray continuation byte, a lead byte announcing more
/// than four bytes, a missing continuation byte or input that ends inside a
/// sequence.
///
/// # Examples
///
/// ```rust
/// use subcue_core::encoding::is_structurally_utf8;
///
/// assert!(is_structurally_utf8("Grüße".as_bytes()));
/// assert!(!is_structurally_utf8(b"Gr\xFC\xDFe")); // Latin-1
/// ```
#[must_use]
pub fn is_structurally_utf8(bytes: &[u8]) -> bool {
    let mut rest = bytes;
    while let Some((&lead, tail)) = rest.split_first() {
        let width = lead.leading_ones() as usize;
        if width == 1 || width > 4 {
            return false;
        }

        rest = tail;
        for _ in 1..width {
            match rest.split_first() {
                Some((&next, tail)) if next & 0xC0 == 0x80 => rest = tail,
                _ => return false,
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_and_empty_pass() {
        assert!(is_structurally_utf8(b""));
        assert!(is_structurally_utf8(b"Hello, world!\n"));
    }

    #[test]
    fn multibyte_sequences_pass() {
        assert!(is_structurally_utf8("é".as_bytes()));
        assert!(is_structurally_utf8("世界".as_bytes()));
        assert!(is_structurally_utf8("🎵".as_bytes()));
    }

    #[test]
    fn stray_continuation_fails() {
        assert!(!is_structurally_utf8(&[0x80]));
        assert!(!is_structurally_utf8(&[b'a', 0xBF, b'b']));
    }

    #[test]
    fn lead_wider_than_four_fails() {
        assert!(!is_structurally_utf8(&[0xF8, 0x80, 0x80, 0x80, 0x80]));
        assert!(!is_structurally_utf8(&[0xFF]));
    }

    #[test]
    fn truncated_sequence_fails() {
        assert!(!is_structurally_utf8(&[0xE4, 0xB8]));
        assert!(!is_structurally_utf8(&[b'x', 0xC3]));
    }

    #[test]
    fn non_continuation_inside_sequence_fails() {
        assert!(!is_structurally_utf8(&[0xC3, b'a']));
        assert!(!is_structurally_utf8(&[0xE4, 0xB8, 0xC0]));
    }

    #[test]
    fn accepts_shapes_strict_utf8_rejects() {
        // Overlong encoding of '/'
        let overlong: &[u8] = &[0xC0, 0xAF];
        assert!(is_structurally_utf8(overlong));
        assert!(core::str::from_utf8(overlong).is_err());
        // UTF-16 surrogate half
        let surrogate: &[u8] = &[0xED, 0xA0, 0x80];
        assert!(is_structurally_utf8(surrogate));
        assert!(core::str::from_utf8(surrogate).is_err());
    }

    #[test]
    fn cp1251_text_fails() {
        // "Привет" in Windows-1251
        assert!(!is_structurally_utf8(&[0xCF, 0xF0, 0xE8, 0xE2, 0xE5, 0xF2]));
    }
}
