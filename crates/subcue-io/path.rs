//! Path helpers for locating subtitle files

use std::path::{Path, PathBuf};

/// Swap the final extension of `path` for `ext`, or append it
///
/// `ext` is given without the leading dot.
///
/// ```rust
/// # use std::path::Path;
/// # use subcue_io::path::with_extension;
/// assert_eq!(with_extension(Path::new("/films/movie.mkv"), "srt"), Path::new("/films/movie.srt"));
/// assert_eq!(with_extension(Path::new("movie"), "ass"), Path::new("movie.ass"));
/// ```
#[must_use]
pub fn with_extension(path: &Path, ext: &str) -> PathBuf {
    path.with_extension(ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swaps_only_last_extension() {
        assert_eq!(
            with_extension(Path::new("show.s01e01.mkv"), "srt"),
            PathBuf::from("show.s01e01.srt")
        );
    }
}
