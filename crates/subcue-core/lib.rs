//! # subcue core
//!
//! Tolerant parsers for SubRip (`.srt`) and SubStation Alpha (`.ssa`/`.ass`)
//! subtitle files. Both turn a text stream into `(start, end, text)`
//! intervals for a playback overlay and sniff whether the text is UTF-8.
//!
//! ## Behavior on bad input
//!
//! - Unknown lines are skipped
//! - A malformed timecode ends the parse early, keeping every cue already
//!   delivered, and the parse still counts as a success
//! - Encoding is never an error: the report carries a best-effort verdict
//!
//! ## Quick Start
//!
//! ```rust
//! use subcue_core::{parse_subtitles, ParseOptions, SubtitleFormat};
//!
//! let srt = "1\n00:00:01,000 --> 00:00:02,000\nHello\n\n\
//!            2\n00:00:03,000 --> 00:00:04,000\nWorld\n";
//!
//! let mut cues = Vec::new();
//! let report = parse_subtitles(
//!     srt.as_bytes(),
//!     SubtitleFormat::SubRip,
//!     &ParseOptions::default(),
//!     |cue| cues.push(cue),
//! );
//!
//! assert_eq!(report.emitted, 2);
//! assert!(report.detected_utf8);
//! assert_eq!(cues[1].text(), "World\n");
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(clippy::all)]
#![deny(unsafe_code)]

pub mod encoding;
pub mod errors;
pub mod interval;
pub mod options;
pub mod parser;
pub mod report;
pub mod timecode;

pub use encoding::{EncodingDetector, Utf8Evidence};
pub use encoding_rs;
pub use errors::TimecodeError;
pub use interval::Interval;
pub use options::{ParseOptions, SsaLayout};
pub use parser::{parse_srt, parse_ssa, parse_subtitles, SubtitleFormat};
pub use report::{EarlyStop, ParseReport, StopReason};

/// Crate version for runtime compatibility checks
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
