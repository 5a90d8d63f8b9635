//! Subtitle stream parsers
//!
//! Both parsers read a [`BufRead`] line by line, hand accepted cues to a
//! `FnMut(Interval)` sink as soon as they are complete, and return a
//! [`ParseReport`] once the stream is exhausted or parsing stops early.
//!
//! # Examples
//!
//! ```rust
//! use subcue_core::{parse_subtitles, ParseOptions, SubtitleFormat};
//!
//! let srt = "1\n00:00:00,500 --> 00:00:01,000\nHi\n";
//! let mut cues = Vec::new();
//! let report = parse_subtitles(
//!     srt.as_bytes(),
//!     SubtitleFormat::SubRip,
//!     &ParseOptions::default(),
//!     |cue| cues.push(cue),
//! );
//! assert_eq!(report.emitted, 1);
//! assert!(report.detected_utf8);
//! ```

mod session;
mod srt;
mod ssa;

pub use srt::parse_srt;
pub use ssa::parse_ssa;

use crate::{interval::Interval, options::ParseOptions, report::ParseReport};
use std::{fmt, io::BufRead, path::Path};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Grammar used to read a subtitle stream
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubtitleFormat {
    /// SubRip (`.srt`)
    SubRip,
    /// SubStation Alpha and Advanced SubStation Alpha (`.ssa`, `.ass`)
    Ssa,
}

impl SubtitleFormat {
    /// Pick a grammar from a file name
    ///
    /// `.srt` in any letter case selects SubRip. Every other name, including
    /// names without an extension, selects SubStation Alpha.
    ///
    /// ```rust
    /// # use subcue_core::SubtitleFormat;
    /// assert_eq!(SubtitleFormat::from_path("movie.SRT"), SubtitleFormat::SubRip);
    /// assert_eq!(SubtitleFormat::from_path("movie.ass"), SubtitleFormat::Ssa);
    /// assert_eq!(SubtitleFormat::from_path("movie.txt"), SubtitleFormat::Ssa);
    /// ```
    #[must_use]
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let is_srt = path
            .as_ref()
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("srt"));
        if is_srt {
            Self::SubRip
        } else {
            Self::Ssa
        }
    }
}

impl fmt::Display for SubtitleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SubRip => f.write_str("SubRip"),
            Self::Ssa => f.write_str("SubStation Alpha"),
        }
    }
}

/// Parse a stream with the parser for `format`
pub fn parse_subtitles<R, F>(
    reader: R,
    format: SubtitleFormat,
    options: &ParseOptions,
    sink: F,
) -> ParseReport
where
    R: BufRead,
    F: FnMut(Interval),
{
    match format {
        SubtitleFormat::SubRip => parse_srt(reader, sink),
        SubtitleFormat::Ssa => parse_ssa(reader, options, sink),
    }
}
