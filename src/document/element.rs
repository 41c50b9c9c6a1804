//! Document element types for representing ordered content.

use super::{Paragraph, Table};
use serde::{Deserialize, Serialize};

/// A block-level element: a paragraph or a table.
///
/// Elements are kept in document order, which both the formatting
/// applicator and the LaTeX converter rely on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentElement {
    /// A paragraph element (boxed to keep the enum small)
    Paragraph(Box<Paragraph>),
    /// A table element
    Table(Box<Table>),
}

impl DocumentElement {
    /// Check if this element is a paragraph.
    #[inline]
    pub fn is_paragraph(&self) -> bool {
        matches!(self, DocumentElement::Paragraph(_))
    }

    /// Check if this element is a table.
    #[inline]
    pub fn is_table(&self) -> bool {
        matches!(self, DocumentElement::Table(_))
    }

    /// Get a reference to the paragraph, if this is a paragraph element.
    #[inline]
    pub fn as_paragraph(&self) -> Option<&Paragraph> {
        match self {
            DocumentElement::Paragraph(p) => Some(p),
            _ => None,
        }
    }

    /// Get a reference to the table, if this is a table element.
    #[inline]
    pub fn as_table(&self) -> Option<&Table> {
        match self {
            DocumentElement::Table(t) => Some(t.as_ref()),
            _ => None,
        }
    }
}

impl From<Paragraph> for DocumentElement {
    fn from(para: Paragraph) -> Self {
        DocumentElement::Paragraph(Box::new(para))
    }
}

impl From<Table> for DocumentElement {
    fn from(table: Table) -> Self {
        DocumentElement::Table(Box::new(table))
    }
}
