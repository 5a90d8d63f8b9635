//! # subcue io
//!
//! Filesystem front end for [`subcue_core`]: open a subtitle file and pick
//! its parser by extension, or find the subtitle file that sits next to a
//! video.
//!
//! ```rust,no_run
//! use subcue_io::{open_matching_subtitles_file, ProbeOptions};
//!
//! let mut cues = Vec::new();
//! let matched = open_matching_subtitles_file(
//!     "/films/movie.mkv",
//!     &ProbeOptions::default(),
//!     |cue| cues.push(cue),
//! )?;
//! println!("{}: {} cues, utf8={}", matched.path.display(), cues.len(), matched.report.detected_utf8);
//! # Ok::<(), subcue_io::OpenError>(())
//! ```

#![deny(unsafe_code)]

pub mod dispatch;
pub mod errors;
pub mod path;

pub use dispatch::{
    open_matching_subtitles_file, open_subtitles_file, open_with_format, Candidate,
    MatchedSubtitles, ProbeOptions,
};
pub use errors::{OpenError, Result};
