//! Common style and formatting types.
//!
//! This module provides the property types shared by style definitions,
//! effective styles, and document runs and paragraphs.

// Submodule declarations
pub mod color;
pub mod font;
pub mod paragraph;

// Re-exports
pub use color::RGBColor;
pub use font::FontProperties;
pub use paragraph::{Alignment, ParagraphProperties};

use serde::{Deserialize, Serialize};

/// The combined font and paragraph properties of one style layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleProperties {
    pub font: FontProperties,
    pub paragraph: ParagraphProperties,
}

impl StyleProperties {
    #[inline]
    pub fn new(font: FontProperties, paragraph: ParagraphProperties) -> Self {
        Self { font, paragraph }
    }

    /// Fill inherited fields of both property groups from `parent`.
    pub fn inherit_from(&mut self, parent: &StyleProperties) -> usize {
        self.font.inherit_from(&parent.font) + self.paragraph.inherit_from(&parent.paragraph)
    }
}
