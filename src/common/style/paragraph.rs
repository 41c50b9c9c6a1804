//! Paragraph-level formatting.
use super::font::fill;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Paragraph alignment options.
///
/// An unset alignment (`Option::None` on [`ParagraphProperties::alignment`])
/// means the value is inherited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    Center,
    Right,
    Justify,
}

impl Alignment {
    /// Convert the alignment to its WordprocessingML `jc` value.
    #[inline]
    pub const fn to_xml(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
            Self::Justify => "both",
        }
    }

    /// Parse alignment from a `jc` value.
    ///
    /// Returns `None` if the value is not recognized.
    pub fn from_xml(s: &str) -> Option<Self> {
        match s {
            "left" | "start" => Some(Self::Left),
            "center" => Some(Self::Center),
            "right" | "end" => Some(Self::Right),
            "both" | "distribute" | "justify" => Some(Self::Justify),
            _ => None,
        }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => write!(f, "Left"),
            Self::Center => write!(f, "Center"),
            Self::Right => write!(f, "Right"),
            Self::Justify => write!(f, "Justify"),
        }
    }
}

/// Paragraph properties of a style or a paragraph.
///
/// Spacing and indentation are in points; `line_spacing` is a multiple of
/// single spacing (1.0 = single).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParagraphProperties {
    pub alignment: Option<Alignment>,
    pub spacing_before: Option<f64>,
    pub spacing_after: Option<f64>,
    pub line_spacing: Option<f64>,
    pub indentation: Option<f64>,
}

impl ParagraphProperties {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    /// Set spacing before and after, in points. Negative values are ignored.
    pub fn with_spacing(mut self, before: f64, after: f64) -> Self {
        if before >= 0.0 {
            self.spacing_before = Some(before);
        }
        if after >= 0.0 {
            self.spacing_after = Some(after);
        }
        self
    }

    /// Set line spacing as a multiple. Non-positive values are ignored.
    pub fn with_line_spacing(mut self, multiple: f64) -> Self {
        if multiple > 0.0 {
            self.line_spacing = Some(multiple);
        }
        self
    }

    /// Set the left indentation in points. Negative values are ignored.
    pub fn with_indentation(mut self, points: f64) -> Self {
        if points >= 0.0 {
            self.indentation = Some(points);
        }
        self
    }

    /// Fill every inherited field from `parent`, keeping fields already set.
    pub fn inherit_from(&mut self, parent: &ParagraphProperties) -> usize {
        let mut filled = 0;
        filled += fill(&mut self.alignment, &parent.alignment);
        filled += fill(&mut self.spacing_before, &parent.spacing_before);
        filled += fill(&mut self.spacing_after, &parent.spacing_after);
        filled += fill(&mut self.line_spacing, &parent.line_spacing);
        filled += fill(&mut self.indentation, &parent.indentation);
        filled
    }

    pub fn is_empty(&self) -> bool {
        self.alignment.is_none()
            && self.spacing_before.is_none()
            && self.spacing_after.is_none()
            && self.line_spacing.is_none()
            && self.indentation.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alignment_xml() {
        assert_eq!(Alignment::from_xml("both"), Some(Alignment::Justify));
        assert_eq!(Alignment::Justify.to_xml(), "both");
        assert_eq!(Alignment::from_xml("start"), Some(Alignment::Left));
        assert_eq!(Alignment::from_xml("mediumKashida"), None);
    }

    #[test]
    fn test_builder_rejects_out_of_range() {
        let props = ParagraphProperties::new()
            .with_spacing(-1.0, 6.0)
            .with_line_spacing(0.0)
            .with_indentation(-2.0);
        assert_eq!(props.spacing_before, None);
        assert_eq!(props.spacing_after, Some(6.0));
        assert_eq!(props.line_spacing, None);
        assert_eq!(props.indentation, None);
    }

    #[test]
    fn test_inherit_from() {
        let mut child = ParagraphProperties::new().with_alignment(Alignment::Right);
        let parent = ParagraphProperties::new()
            .with_alignment(Alignment::Center)
            .with_spacing(12.0, 6.0);
        assert_eq!(child.inherit_from(&parent), 2);
        assert_eq!(child.alignment, Some(Alignment::Right));
        assert_eq!(child.spacing_before, Some(12.0));
    }
}
