//! Errors surfaced when a subtitle file cannot be opened

use std::{io, path::PathBuf};
use thiserror::Error;

/// Failure to open any subtitle file
///
/// Anything that goes wrong after a file is open is reported through
/// [`ParseReport`](subcue_core::ParseReport) instead.
#[derive(Error, Debug)]
pub enum OpenError {
    /// The file is missing, unreadable or not a regular file
    #[error("cannot open {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// None of the sibling candidates of a video file could be opened
    #[error("no subtitle file found for {} ({} candidates tried)", video.display(), tried.len())]
    NoMatchingSubtitles { video: PathBuf, tried: Vec<PathBuf> },
}

impl OpenError {
    /// Whether the error means the file simply is not there
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Io { source, .. } => source.kind() == io::ErrorKind::NotFound,
            Self::NoMatchingSubtitles { .. } => true,
        }
    }
}

/// Result alias for file-level operations
pub type Result<T> = std::result::Result<T, OpenError>;
