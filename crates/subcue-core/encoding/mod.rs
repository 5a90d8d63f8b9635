//! Text encoding detection for subtitle files
//!
//! Subtitle files rarely declare their encoding. A file is treated as UTF-8
//! when its first line starts with the UTF-8 BOM, or when every piece of cue
//! text passes a structural UTF-8 scan. Anything else is left to the caller
//! to decode with a legacy code page.
//!
//! # Examples
//!
//! ```rust
//! use subcue_core::encoding::{EncodingDetector, Utf8Evidence};
//!
//! let mut detector = EncodingDetector::new();
//! detector.observe_first_line(b"1");
//! detector.observe_payload("Hello\n".as_bytes());
//! assert_eq!(detector.evidence(), Utf8Evidence::Heuristic);
//! ```

mod bom;
mod detector;
mod validation;

pub use bom::{has_utf8_bom, strip_utf8_bom, UTF8_BOM};
pub use detector::{EncodingDetector, Utf8Evidence};
pub use validation::is_structurally_utf8;
