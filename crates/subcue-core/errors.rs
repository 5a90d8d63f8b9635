//! Error types for timestamp parsing
//!
//! Parsers never surface these to the caller as failures. A malformed
//! timecode ends the parse early and the message lands in the report.

use thiserror::Error;

/// Reasons a timestamp could not be read
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimecodeError {
    /// Nothing but whitespace where a timestamp was required
    #[error("empty timestamp")]
    Empty,

    /// A numeric component was missing or not made of digits
    #[error("expected {field} at byte {position}")]
    MissingField { field: &'static str, position: usize },

    /// A numeric component does not fit the supported range
    #[error("{field} out of range at byte {position}")]
    OutOfRange { field: &'static str, position: usize },

    /// A separator character was not where the grammar puts it
    #[error("expected '{expected}' at byte {position}")]
    MissingSeparator { expected: char, position: usize },

    /// SubRip start and end were not joined by `-->`
    #[error("missing '-->' between start and end")]
    MissingArrow,

    /// SubStation Alpha timestamp had no fractional seconds after the dot
    #[error("missing fractional seconds")]
    MissingFraction,
}

/// Result alias for timestamp parsing
pub type Result<T> = core::result::Result<T, TimecodeError>;
