//! Parser configuration
//!
//! Defaults reproduce the classic behavior: fixed SubStation Alpha field
//! positions and karaoke cues styled `OP_kar` dropped.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Style name whose cues are karaoke timing helpers, not dialogue
pub const KARAOKE_STYLE: &str = "OP_kar";

/// How `Dialogue:` fields are located
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SsaLayout {
    /// Default `[Events]` layout: start, end and style at positions 1, 2
    /// and 3, text after the ninth comma. The file's `Format:` line is
    /// ignored.
    #[default]
    Fixed,
    /// Locate `Start`, `End`, `Style` and `Text` from the `Format:` line of
    /// the `[Events]` section. Lines before any `Format:` use the fixed
    /// layout.
    Declared,
}

/// Options shared by both parsers
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Field layout for SubStation Alpha dialogue
    pub ssa_layout: SsaLayout,
    /// SubStation Alpha styles whose cues are never emitted
    pub skip_styles: Vec<String>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            ssa_layout: SsaLayout::Fixed,
            skip_styles: vec![KARAOKE_STYLE.to_string()],
        }
    }
}

impl ParseOptions {
    /// Set the SubStation Alpha field layout
    #[must_use]
    pub fn with_ssa_layout(mut self, layout: SsaLayout) -> Self {
        self.ssa_layout = layout;
        self
    }

    /// Replace the list of skipped styles
    #[must_use]
    pub fn with_skip_styles<I, S>(mut self, styles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skip_styles = styles.into_iter().map(Into::into).collect();
        self
    }

    /// Whether cues of this style are dropped
    ///
    /// Compared byte for byte, without trimming.
    #[must_use]
    pub fn skips_style(&self, style: &[u8]) -> bool {
        self.skip_styles.iter().any(|s| s.as_bytes() == style)
    }
}
