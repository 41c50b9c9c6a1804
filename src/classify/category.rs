//! Content categories and the units they are assigned to.
use crate::document::{CellLocation, ListKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Deepest heading level a category can carry.
pub const MAX_HEADING_LEVEL: u8 = 6;

/// A heading level in `1..=6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct HeadingLevel(u8);

impl HeadingLevel {
    /// Clamp `level` into `1..=6`.
    #[inline]
    pub fn new(level: usize) -> Self {
        Self(level.clamp(1, MAX_HEADING_LEVEL as usize) as u8)
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for HeadingLevel {
    type Error = String;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        if (1..=MAX_HEADING_LEVEL).contains(&level) {
            Ok(Self(level))
        } else {
            Err(format!("heading level must be between 1 and {MAX_HEADING_LEVEL}, got {level}"))
        }
    }
}

impl From<HeadingLevel> for u8 {
    fn from(level: HeadingLevel) -> Self {
        level.0
    }
}

/// The semantic role of a unit of content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentCategory {
    Title,
    Heading(HeadingLevel),
    BodyText,
    ListItem(ListKind),
    Quote,
    Unknown,
}

impl ContentCategory {
    /// Number of distinct categories.
    pub const COUNT: usize = 12;

    /// Every category, in [`ContentCategory::index`] order.
    pub const ALL: [ContentCategory; Self::COUNT] = [
        Self::Title,
        Self::Heading(HeadingLevel(1)),
        Self::Heading(HeadingLevel(2)),
        Self::Heading(HeadingLevel(3)),
        Self::Heading(HeadingLevel(4)),
        Self::Heading(HeadingLevel(5)),
        Self::Heading(HeadingLevel(6)),
        Self::BodyText,
        Self::ListItem(ListKind::Ordered),
        Self::ListItem(ListKind::Unordered),
        Self::Quote,
        Self::Unknown,
    ];

    /// Shorthand for a heading category; `level` is clamped into `1..=6`.
    #[inline]
    pub fn heading(level: usize) -> Self {
        Self::Heading(HeadingLevel::new(level))
    }

    /// Dense index of this category into [`ContentCategory::ALL`].
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Self::Title => 0,
            Self::Heading(level) => level.0 as usize,
            Self::BodyText => 7,
            Self::ListItem(ListKind::Ordered) => 8,
            Self::ListItem(ListKind::Unordered) => 9,
            Self::Quote => 10,
            Self::Unknown => 11,
        }
    }

    /// The heading level, if this is a heading.
    #[inline]
    pub fn heading_level(self) -> Option<u8> {
        match self {
            Self::Heading(level) => Some(level.get()),
            _ => None,
        }
    }
}

impl fmt::Display for ContentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Title => write!(f, "Title"),
            Self::Heading(level) => write!(f, "Heading {}", level.get()),
            Self::BodyText => write!(f, "Body Text"),
            Self::ListItem(ListKind::Ordered) => write!(f, "Ordered List Item"),
            Self::ListItem(ListKind::Unordered) => write!(f, "Unordered List Item"),
            Self::Quote => write!(f, "Quote"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

/// One classifiable chunk of content: a paragraph's text and where it sits.
///
/// The text is normalized on construction, so two units whose text differs
/// only in whitespace share a cache entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentUnit {
    /// Normalized text
    pub text: String,
    /// Position in document order
    pub index: usize,
    /// Enclosing table cell, if any
    pub location: Option<CellLocation>,
}

impl ContentUnit {
    pub fn new(text: &str, index: usize) -> Self {
        Self {
            text: normalize_text(text),
            index,
            location: None,
        }
    }

    #[inline]
    pub fn with_location(mut self, location: Option<CellLocation>) -> Self {
        self.location = location;
        self
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Trim and collapse every run of whitespace into a single space.
///
/// Letter case is left alone: it carries meaning for the classifier.
pub fn normalize_text(text: &str) -> String {
    let mut normalized = String::with_capacity(text.len());
    for word in text.split_whitespace() {
        if !normalized.is_empty() {
            normalized.push(' ');
        }
        normalized.push_str(word);
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_matches_all() {
        for (i, category) in ContentCategory::ALL.iter().enumerate() {
            assert_eq!(category.index(), i);
        }
    }

    #[test]
    fn test_heading_level_is_clamped() {
        assert_eq!(ContentCategory::heading(0).heading_level(), Some(1));
        assert_eq!(ContentCategory::heading(9).heading_level(), Some(6));
        assert!(HeadingLevel::try_from(7).is_err());
    }

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text("  1.\tIntroduction \n"), "1. Introduction");
        assert_eq!(normalize_text("a\u{a0}\u{a0}b"), "a b");
        assert_eq!(normalize_text(" \t "), "");
    }
}
