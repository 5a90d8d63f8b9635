//! Per-file UTF-8 verdict
//!
//! The detector sees the first raw line of a file and then only the payload
//! text of accepted cues. Structure lines (`[Events]`, `Format:`, cue indices)
//! never count as evidence.

use super::{has_utf8_bom, is_structurally_utf8};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Why a file was classified the way it was
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Utf8Evidence {
    /// The first line started with the UTF-8 byte order mark
    Bom,
    /// No BOM, and every payload passed the structural scan
    Heuristic,
    /// No BOM, and at least one payload failed the structural scan
    NotUtf8,
}

impl Utf8Evidence {
    /// Collapse the evidence into the boolean the renderer needs
    #[must_use]
    pub const fn is_utf8(self) -> bool {
        !matches!(self, Self::NotUtf8)
    }
}

/// Accumulates encoding evidence while a file is parsed
///
/// Once a payload fails the scan, later payloads are not examined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodingDetector {
    bom: bool,
    auto_detected: bool,
}

impl Default for EncodingDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl EncodingDetector {
    /// Start with no BOM seen and the heuristic still optimistic
    #[must_use]
    pub const fn new() -> Self {
        Self {
            bom: false,
            auto_detected: true,
        }
    }

    /// Record the BOM state of the first line of the file
    pub fn observe_first_line(&mut self, line: &[u8]) {
        self.bom = has_utf8_bom(line);
    }

    /// Run the structural scan over text that is about to be surfaced
    pub fn observe_payload(&mut self, text: &[u8]) {
        if self.bom || !self.auto_detected {
            return;
        }

        self.auto_detected = is_structurally_utf8(text);
        if !self.auto_detected {
            log::debug!("payload failed UTF-8 scan, treating file as legacy encoding");
        }
    }

    /// Whether the first line carried a BOM
    #[must_use]
    pub const fn saw_bom(&self) -> bool {
        self.bom
    }

    /// Final classification
    #[must_use]
    pub const fn evidence(&self) -> Utf8Evidence {
        if self.bom {
            Utf8Evidence::Bom
        } else if self.auto_detected {
            Utf8Evidence::Heuristic
        } else {
            Utf8Evidence::NotUtf8
        }
    }
}
