//! Character-level formatting.
use super::color::RGBColor;
use serde::{Deserialize, Serialize};

/// Font properties of a style or a run.
///
/// Every field is optional: `None` means "inherited". The toggles (`bold`,
/// `italic`, `underline`) are tri-state, so `Some(false)` is an explicit
/// override that switches the property off and is distinct from `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontProperties {
    /// Font family name
    pub family: Option<String>,
    /// Size in points
    pub size: Option<f64>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
    /// Text color
    pub color: Option<RGBColor>,
}

impl FontProperties {
    /// Create an empty set of properties (everything inherited).
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_family(mut self, family: impl Into<String>) -> Self {
        self.family = Some(family.into());
        self
    }

    /// Set the size in points. Non-positive sizes are ignored.
    #[inline]
    pub fn with_size(mut self, points: f64) -> Self {
        if points > 0.0 {
            self.size = Some(points);
        }
        self
    }

    #[inline]
    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = Some(bold);
        self
    }

    #[inline]
    pub fn with_italic(mut self, italic: bool) -> Self {
        self.italic = Some(italic);
        self
    }

    #[inline]
    pub fn with_underline(mut self, underline: bool) -> Self {
        self.underline = Some(underline);
        self
    }

    #[inline]
    pub fn with_color(mut self, color: RGBColor) -> Self {
        self.color = Some(color);
        self
    }

    /// Fill every inherited field from `parent`, keeping fields already set.
    ///
    /// Returns the number of fields that were filled.
    pub fn inherit_from(&mut self, parent: &FontProperties) -> usize {
        let mut filled = 0;
        filled += fill(&mut self.family, &parent.family);
        filled += fill(&mut self.size, &parent.size);
        filled += fill(&mut self.bold, &parent.bold);
        filled += fill(&mut self.italic, &parent.italic);
        filled += fill(&mut self.underline, &parent.underline);
        filled += fill(&mut self.color, &parent.color);
        filled
    }

    /// Whether no field is set.
    pub fn is_empty(&self) -> bool {
        self.family.is_none()
            && self.size.is_none()
            && self.bold.is_none()
            && self.italic.is_none()
            && self.underline.is_none()
            && self.color.is_none()
    }
}

/// Copy `parent` into `slot` when `slot` is unset.
#[inline]
pub(crate) fn fill<T: Clone>(slot: &mut Option<T>, parent: &Option<T>) -> usize {
    match (slot.is_none(), parent) {
        (true, Some(value)) => {
            *slot = Some(value.clone());
            1
        },
        _ => 0,
    }
}
