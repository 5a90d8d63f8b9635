//! Open subtitle files and route them to the right parser
//!
//! Two entry points:
//!
//! - [`open_subtitles_file`] reads a subtitle file directly. `.srt` goes to
//!   the SubRip parser, every other name to the SubStation Alpha parser.
//! - [`open_matching_subtitles_file`] takes a video path and tries the
//!   sibling `.srt`, `.ass` and `.ssa` files in that order.
//!
//! The file handle lives for the duration of the call only.

use crate::{
    errors::{OpenError, Result},
    path::with_extension,
};
use std::{
    fs::File,
    io::{self, BufReader},
    path::{Path, PathBuf},
};
use subcue_core::{parse_subtitles, Interval, ParseOptions, ParseReport, SubtitleFormat};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A sibling file to look for next to a video
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Extension without the dot
    pub extension: String,
    /// Parser used when the file exists
    pub format: SubtitleFormat,
}

impl Candidate {
    /// Create a candidate for `extension` parsed as `format`
    pub fn new(extension: impl Into<String>, format: SubtitleFormat) -> Self {
        Self {
            extension: extension.into(),
            format,
        }
    }
}

/// Settings for locating and parsing the subtitles of a video
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOptions {
    /// Sibling files to try, in order
    pub candidates: Vec<Candidate>,
    /// Options handed to the parser
    pub parse: ParseOptions,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self {
            candidates: vec![
                Candidate::new("srt", SubtitleFormat::SubRip),
                Candidate::new("ass", SubtitleFormat::Ssa),
                Candidate::new("ssa", SubtitleFormat::Ssa),
            ],
            parse: ParseOptions::default(),
        }
    }
}

/// The subtitle file that matched a video, and how parsing it went
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct MatchedSubtitles {
    /// Path of the subtitle file that was parsed
    pub path: PathBuf,
    /// Parser that read it
    pub format: SubtitleFormat,
    /// Parse summary
    pub report: ParseReport,
}

/// Open `path` for reading, refusing directories
fn open_reader(path: &Path) -> Result<BufReader<File>> {
    let io_error = |source| OpenError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(io_error)?;
    if file.metadata().map_err(io_error)?.is_dir() {
        return Err(io_error(io::Error::other("is a directory")));
    }
    Ok(BufReader::new(file))
}

/// Parse `path` with an explicitly chosen grammar
///
/// # Errors
///
/// Returns [`OpenError::Io`] when the file cannot be opened. The sink is not
/// called in that case.
pub fn open_with_format<P, F>(
    path: P,
    format: SubtitleFormat,
    options: &ParseOptions,
    sink: F,
) -> Result<ParseReport>
where
    P: AsRef<Path>,
    F: FnMut(Interval),
{
    let path = path.as_ref();
    let reader = open_reader(path)?;
    log::debug!("parsing {} as {format}", path.display());

    let report = parse_subtitles(reader, format, options, sink);
    if let Some(stop) = &report.stop {
        log::warn!(
            "{}: stopped at line {}: {}",
            path.display(),
            stop.line,
            stop.reason
        );
    }
    Ok(report)
}

/// Parse a subtitle file, choosing the grammar from its extension
///
/// `.srt` (any case) is read as SubRip. Anything else is read as
/// SubStation Alpha without checking for `.ass` or `.ssa`.
///
/// # Errors
///
/// Returns [`OpenError::Io`] when the file cannot be opened.
pub fn open_subtitles_file<P, F>(path: P, options: &ParseOptions, sink: F) -> Result<ParseReport>
where
    P: AsRef<Path>,
    F: FnMut(Interval),
{
    let path = path.as_ref();
    open_with_format(path, SubtitleFormat::from_path(path), options, sink)
}

/// Find and parse the subtitle file that belongs to a video
///
/// Each candidate extension replaces the video's extension in turn. The
/// first candidate that opens is parsed and returned; later candidates are
/// not looked at, even if that file holds no cues.
///
/// # Errors
///
/// Returns [`OpenError::NoMatchingSubtitles`] when no candidate could be
/// opened. The sink is not called in that case.
pub fn open_matching_subtitles_file<P, F>(
    video: P,
    probe: &ProbeOptions,
    sink: F,
) -> Result<MatchedSubtitles>
where
    P: AsRef<Path>,
    F: FnMut(Interval),
{
    let video = video.as_ref();
    let mut tried = Vec::with_capacity(probe.candidates.len());

    for candidate in &probe.candidates {
        let path = with_extension(video, &candidate.extension);
        match open_reader(&path) {
            Ok(reader) => {
                log::debug!("matched {} for {}", path.display(), video.display());
                let report = parse_subtitles(reader, candidate.format, &probe.parse, sink);
                return Ok(MatchedSubtitles {
                    path,
                    format: candidate.format,
                    report,
                });
            }
            Err(err) => {
                log::debug!("{err}");
                tried.push(path);
            }
        }
    }

    Err(OpenError::NoMatchingSubtitles {
        video: video.to_path_buf(),
        tried,
    })
}
