//! Outcome of parsing one subtitle stream

use crate::encoding::Utf8Evidence;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Why a parse ended before the end of the stream
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// A timing line or `Dialogue` timestamp could not be read
    MalformedTimecode(String),
    /// The underlying reader failed
    ReadError(String),
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedTimecode(msg) => write!(f, "malformed timecode: {msg}"),
            Self::ReadError(msg) => write!(f, "read error: {msg}"),
        }
    }
}

/// Where and why a parse stopped early
///
/// An early stop is not a failure: intervals delivered before it stand.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EarlyStop {
    /// 1-based line number of the offending line
    pub line: usize,
    /// What went wrong there
    pub reason: StopReason,
}

/// Summary of a completed parse
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseReport {
    /// Treat the interval text as UTF-8
    pub detected_utf8: bool,
    /// What the verdict rests on
    pub evidence: Utf8Evidence,
    /// Intervals handed to the sink
    pub emitted: usize,
    /// Cues that were read but dropped (empty text, skipped style)
    pub skipped: usize,
    /// Lines consumed from the stream
    pub lines: usize,
    /// Set when parsing ended before the stream did
    pub stop: Option<EarlyStop>,
}

impl ParseReport {
    /// Whether the whole stream was consumed
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.stop.is_none()
    }
}
