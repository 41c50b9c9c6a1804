//! Style definitions as extracted from a template document.
use crate::common::{FontProperties, ParagraphProperties, StyleProperties};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Specifies the type of a style.
///
/// Corresponds to the WordprocessingML `w:type` attribute of `<w:style>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleKind {
    /// Paragraph style.
    #[default]
    Paragraph,
    /// Character style.
    Character,
    /// Table style.
    Table,
    /// Numbering style.
    Numbering,
}

impl StyleKind {
    /// Convert the style kind to its XML attribute value.
    #[inline]
    pub const fn to_xml(self) -> &'static str {
        match self {
            Self::Paragraph => "paragraph",
            Self::Character => "character",
            Self::Table => "table",
            Self::Numbering => "numbering",
        }
    }

    /// Parse style kind from XML attribute value.
    ///
    /// Returns `None` if the value is not recognized.
    #[inline]
    pub fn from_xml(s: &str) -> Option<Self> {
        match s {
            "paragraph" => Some(Self::Paragraph),
            "character" => Some(Self::Character),
            "table" => Some(Self::Table),
            "numbering" => Some(Self::Numbering),
            _ => None,
        }
    }
}

impl fmt::Display for StyleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Paragraph => write!(f, "Paragraph"),
            Self::Character => write!(f, "Character"),
            Self::Table => write!(f, "Table"),
            Self::Numbering => write!(f, "Numbering"),
        }
    }
}

/// A single style definition.
///
/// `id` is the unique identifier that paragraphs reference (the `styleId` of
/// a .docx style); `name` is the display name shown in the UI. `based_on` is
/// a weak reference by id: it may point nowhere, or form a cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleDefinition {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub kind: StyleKind,
    #[serde(default)]
    pub based_on: Option<String>,
    /// Whether this is the default style for its kind
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub properties: StyleProperties,
}

impl StyleDefinition {
    /// Create a style with no properties.
    pub fn new(id: impl Into<String>, kind: StyleKind) -> Self {
        Self {
            id: id.into(),
            name: None,
            kind,
            based_on: None,
            is_default: false,
            properties: StyleProperties::default(),
        }
    }

    /// Create a paragraph style whose display name equals its id.
    pub fn paragraph(id: impl Into<String>) -> Self {
        let id = id.into();
        Self::new(id.clone(), StyleKind::Paragraph).with_name(id)
    }

    #[inline]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[inline]
    pub fn based_on(mut self, parent: impl Into<String>) -> Self {
        self.based_on = Some(parent.into());
        self
    }

    #[inline]
    pub fn as_default(mut self) -> Self {
        self.is_default = true;
        self
    }

    #[inline]
    pub fn with_font(mut self, font: FontProperties) -> Self {
        self.properties.font = font;
        self
    }

    #[inline]
    pub fn with_paragraph(mut self, paragraph: ParagraphProperties) -> Self {
        self.properties.paragraph = paragraph;
        self
    }

    /// The display name, or the id when no name is defined.
    #[inline]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

/// The raw style table of a document, in definition order.
///
/// `defaults` holds the document-wide defaults that sit below every style,
/// including `Normal`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleSheet {
    pub definitions: Vec<StyleDefinition>,
    pub defaults: StyleProperties,
}

impl StyleSheet {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a sheet from definitions with empty defaults.
    pub fn from_definitions(definitions: impl IntoIterator<Item = StyleDefinition>) -> Self {
        Self {
            definitions: definitions.into_iter().collect(),
            defaults: StyleProperties::default(),
        }
    }

    #[inline]
    pub fn push(&mut self, definition: StyleDefinition) {
        self.definitions.push(definition);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
