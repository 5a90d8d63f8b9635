//! Timestamp grammars for SubRip and SubStation Alpha
//!
//! Both grammars resolve to seconds as `f64`:
//! `hours * 3600 + minutes * 60 + seconds + fraction`.
//!
//! # Examples
//!
//! ```rust
//! use subcue_core::timecode::{parse_srt_timecode_line, parse_ssa_timestamp};
//!
//! let (start, end) = parse_srt_timecode_line(b"02:00:01,500 --> 02:00:03,000")?;
//! assert_eq!(start, 7201.5);
//! assert_eq!(end, 7203.0);
//!
//! assert_eq!(parse_ssa_timestamp(b"0:01:30.50")?, 90.5);
//! # Ok::<(), subcue_core::TimecodeError>(())
//! ```

use crate::errors::{Result, TimecodeError};

/// Largest number of fraction characters considered in an SSA timestamp
const MAX_FRACTION_DIGITS: usize = 9;

/// Byte cursor with the whitespace rules of a `scanf` integer conversion
struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    /// Unsigned decimal field, leading whitespace allowed
    fn number(&mut self, field: &'static str) -> Result<u32> {
        self.skip_whitespace();
        let start = self.pos;
        let mut value: u32 = 0;
        while let Some(digit) = self.peek().filter(u8::is_ascii_digit) {
            value = value
                .checked_mul(10)
                .and_then(|v| v.checked_add(u32::from(digit - b'0')))
                .ok_or(TimecodeError::OutOfRange {
                    field,
                    position: start,
                })?;
            self.pos += 1;
        }

        if self.pos == start {
            return Err(TimecodeError::MissingField {
                field,
                position: start,
            });
        }
        Ok(value)
    }

    fn separator(&mut self, expected: u8) -> Result<()> {
        if self.peek() == Some(expected) {
            self.pos += 1;
            Ok(())
        } else {
            Err(TimecodeError::MissingSeparator {
                expected: char::from(expected),
                position: self.pos,
            })
        }
    }

    fn arrow(&mut self) -> Result<()> {
        self.skip_whitespace();
        if self.bytes[self.pos..].starts_with(b"-->") {
            self.pos += 3;
            Ok(())
        } else {
            Err(TimecodeError::MissingArrow)
        }
    }

    /// `H:MM:SS` prefix shared by both grammars
    fn clock(&mut self) -> Result<(u32, u32, u32)> {
        let hours = self.number("hours")?;
        self.separator(b':')?;
        let minutes = self.number("minutes")?;
        self.separator(b':')?;
        let seconds = self.number("seconds")?;
        Ok((hours, minutes, seconds))
    }

    /// `HH:MM:SS,mmm`
    fn srt_timestamp(&mut self) -> Result<f64> {
        let (hours, minutes, seconds) = self.clock()?;
        self.separator(b',')?;
        let millis = self.number("milliseconds")?;
        Ok(to_seconds(hours, minutes, seconds, f64::from(millis) / 1000.0))
    }
}

/// Combine clock components into seconds
#[must_use]
pub fn to_seconds(hours: u32, minutes: u32, seconds: u32, fraction: f64) -> f64 {
    f64::from(hours) * 3600.0 + f64::from(minutes) * 60.0 + f64::from(seconds) + fraction
}

/// Parse a SubRip timing line `HH:MM:SS,mmm --> HH:MM:SS,mmm`
///
/// Text after the end timestamp (coordinates some encoders append) is
/// ignored. Components are not range checked, so `00:75:00,000` is read as
/// 75 minutes.
///
/// # Errors
///
/// Returns a [`TimecodeError`] unless all eight numeric fields are present
/// with their separators.
pub fn parse_srt_timecode_line(line: &[u8]) -> Result<(f64, f64)> {
    if line.iter().all(u8::is_ascii_whitespace) {
        return Err(TimecodeError::Empty);
    }

    let mut cursor = Cursor::new(line);
    let start = cursor.srt_timestamp()?;
    cursor.arrow()?;
    let end = cursor.srt_timestamp()?;
    Ok((start, end))
}

/// Parse a SubStation Alpha timestamp `H:MM:SS.cc`
///
/// The fraction token (up to nine characters after the dot) is a decimal
/// fraction of a second of its own length, so `5`, `50` and `500` all mean
/// half a second. Its value is the leading run of digits: `5x` is 5/100,
/// and a token with no leading digit counts as zero.
///
/// # Errors
///
/// Returns a [`TimecodeError`] when a clock component is missing, the dot is
/// absent, or nothing follows the dot.
pub fn parse_ssa_timestamp(field: &[u8]) -> Result<f64> {
    if field.iter().all(u8::is_ascii_whitespace) {
        return Err(TimecodeError::Empty);
    }

    let mut cursor = Cursor::new(field);
    let (hours, minutes, seconds) = cursor.clock()?;
    cursor.separator(b'.')?;
    cursor.skip_whitespace();

    let tail = &field[cursor.pos..];
    let token_len = tail
        .iter()
        .position(u8::is_ascii_whitespace)
        .unwrap_or(tail.len());
    let token = &tail[..token_len.min(MAX_FRACTION_DIGITS)];
    if token.is_empty() {
        return Err(TimecodeError::MissingFraction);
    }

    let numerator = token
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .fold(0u32, |acc, d| acc * 10 + u32::from(d - b'0'));
    let denominator = 10f64.powi(i32::try_from(token.len()).unwrap_or(9));

    Ok(to_seconds(
        hours,
        minutes,
        seconds,
        f64::from(numerator) / denominator,
    ))
}

/// Format seconds as a SubRip timestamp
///
/// Negative or non-finite input formats as zero.
///
/// ```rust
/// # use subcue_core::timecode::format_srt_timestamp;
/// assert_eq!(format_srt_timestamp(7201.5), "02:00:01,500");
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_srt_timestamp(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return String::from("00:00:00,000");
    }

    let total_millis = (seconds * 1000.0).round() as u64;
    let millis = total_millis % 1000;
    let total_seconds = total_millis / 1000;
    let secs = total_seconds % 60;
    let minutes = (total_seconds / 60) % 60;
    let hours = total_seconds / 3600;

    format!("{hours:02}:{minutes:02}:{secs:02},{millis:03}")
}
