//! Byte order mark detection
//!
//! Only the UTF-8 signature matters here: a subtitle file that starts with
//! `EF BB BF` is UTF-8 regardless of what follows it.

/// UTF-8 byte order mark as it appears on disk
pub const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Check whether the first line of a file starts with the UTF-8 BOM
///
/// The line must hold at least the three signature bytes.
///
/// # Examples
///
/// ```rust
/// use subcue_core::encoding::has_utf8_bom;
///
/// assert!(has_utf8_bom(b"\xEF\xBB\xBF1"));
/// assert!(!has_utf8_bom(b"\xEF\xBB"));
/// assert!(!has_utf8_bom(b"1"));
/// ```
#[must_use]
pub fn has_utf8_bom(first_line: &[u8]) -> bool {
    first_line.starts_with(&UTF8_BOM)
}

/// Return the line without a leading UTF-8 BOM
#[must_use]
pub fn strip_utf8_bom(line: &[u8]) -> &[u8] {
    line.strip_prefix(&UTF8_BOM[..]).unwrap_or(line)
}
