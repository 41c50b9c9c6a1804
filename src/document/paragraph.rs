//! Paragraph and run nodes.
use crate::common::{FontProperties, ParagraphProperties};
use serde::{Deserialize, Serialize};

/// Ordered or unordered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    /// Ordered list (numbered)
    Ordered,
    /// Unordered list (bulleted)
    Unordered,
}

/// A reference into the source document's numbering definitions.
///
/// Kept so a saved document still points at its original list numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListRef {
    pub num_id: u32,
    pub level: u8,
}

/// A paragraph: an ordered sequence of runs plus paragraph-level metadata.
///
/// `style` holds the identifier of the paragraph style. The formatting
/// applicator overwrites it; the LaTeX converter reads it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Paragraph {
    /// Paragraph style identifier
    pub style: Option<String>,
    /// Explicit paragraph properties
    pub properties: ParagraphProperties,
    /// Outline level (0 = top), when the source marks the paragraph as a heading
    pub outline_level: Option<u8>,
    /// List kind, when the source attaches real list numbering
    pub numbering: Option<ListKind>,
    pub list_ref: Option<ListRef>,
    pub runs: Vec<Run>,
}

impl Paragraph {
    /// Create an empty paragraph.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a paragraph holding a single unformatted run.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            runs: vec![Run::new(text)],
            ..Self::default()
        }
    }

    #[inline]
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    #[inline]
    pub fn with_run(mut self, run: Run) -> Self {
        self.runs.push(run);
        self
    }

    #[inline]
    pub fn with_numbering(mut self, kind: ListKind) -> Self {
        self.numbering = Some(kind);
        self
    }

    #[inline]
    pub fn with_outline_level(mut self, level: u8) -> Self {
        self.outline_level = Some(level);
        self
    }

    /// Get the text content of the paragraph.
    ///
    /// Concatenates the text of all runs.
    pub fn text(&self) -> String {
        let capacity = self.runs.iter().map(|r| r.text.len()).sum();
        let mut text = String::with_capacity(capacity);
        for run in &self.runs {
            text.push_str(&run.text);
        }
        text
    }

    /// Whether the paragraph has no visible text.
    pub fn is_blank(&self) -> bool {
        self.runs.iter().all(|r| r.text.trim().is_empty())
    }
}

/// A run: a stretch of text with one set of explicit font overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Run {
    pub text: String,
    /// Explicit overrides; unset fields are inherited from the paragraph style
    pub font: FontProperties,
}

impl Run {
    #[inline]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font: FontProperties::default(),
        }
    }

    #[inline]
    pub fn with_font(mut self, font: FontProperties) -> Self {
        self.font = font;
        self
    }

    #[inline]
    pub fn bold(&self) -> bool {
        self.font.bold.unwrap_or(false)
    }

    #[inline]
    pub fn italic(&self) -> bool {
        self.font.italic.unwrap_or(false)
    }

    #[inline]
    pub fn underline(&self) -> bool {
        self.font.underline.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_concatenates_runs() {
        let para = Paragraph::new()
            .with_run(Run::new("Hello, "))
            .with_run(Run::new("world"));
        assert_eq!(para.text(), "Hello, world");
        assert!(!para.is_blank());
    }

    #[test]
    fn test_blank_paragraph() {
        assert!(Paragraph::new().is_blank());
        assert!(Paragraph::from_text("  \t ").is_blank());
    }
}
