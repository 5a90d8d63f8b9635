//! Timed text produced by the parsers

use encoding_rs::Encoding;
use std::borrow::Cow;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One cue: a time range and the text shown during it
///
/// Text is kept as the raw bytes read from the file, with lines joined by
/// `\n` and one trailing `\n` appended. Consumers use the trailing newline
/// when they merge overlapping cues. Whether the bytes are UTF-8 is only
/// known once the whole file has been read, see
/// [`ParseReport::detected_utf8`](crate::ParseReport::detected_utf8).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Interval {
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds, not checked against `start`
    pub end: f64,
    /// Cue text bytes
    pub text: Vec<u8>,
}

impl Interval {
    /// Create an interval from already assembled text
    #[must_use]
    pub const fn new(start: f64, end: f64, text: Vec<u8>) -> Self {
        Self { start, end, text }
    }

    /// Length of the interval in seconds, negative for inverted cues
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Text as UTF-8, replacing invalid sequences
    #[must_use]
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.text)
    }

    /// Decode the text with the verdict of the encoding detector
    ///
    /// When the file is not UTF-8 the bytes are read as `legacy`, the code
    /// page the caller expects for such files (usually
    /// [`encoding_rs::WINDOWS_1252`] or a locale-specific one).
    ///
    /// ```rust
    /// use subcue_core::{encoding_rs::WINDOWS_1251, Interval};
    ///
    /// let cue = Interval::new(0.0, 1.0, b"\xCF\xF0\xE8\xE2\xE5\xF2\n".to_vec());
    /// assert_eq!(cue.decode(false, WINDOWS_1251), "Привет\n");
    /// ```
    #[must_use]
    pub fn decode(&self, utf8: bool, legacy: &'static Encoding) -> Cow<'_, str> {
        if utf8 {
            self.text()
        } else {
            let (text, malformed) = legacy.decode_without_bom_handling(&self.text);
            if malformed {
                log::trace!("cue text is not valid {}", legacy.name());
            }
            text
        }
    }
}
