//! The document tree shared by the formatting and LaTeX pipelines.
//!
//! A [`Document`] is an ordered sequence of block elements (paragraphs and
//! tables). Paragraphs hold runs; tables hold rows of cells, which hold
//! paragraphs again. The tree also carries the style table it was parsed
//! with, so a document can serve as a formatting template.
//!
//! # Example
//!
//! ```rust
//! use restyle::document::{Document, Paragraph, Run, Table};
//!
//! let mut doc = Document::new();
//! doc.push(Paragraph::from_text("1. Introduction"));
//! doc.push(Table::from_text(vec![vec!["a", "b"], vec!["c", "d"]]));
//!
//! assert_eq!(doc.paragraph_count(), 5);
//! assert!(doc.validate().is_ok());
//! ```
mod element;
mod paragraph;
mod table;

pub use element::DocumentElement;
pub use paragraph::{ListKind, ListRef, Paragraph, Run};
pub use table::{Cell, Row, Table};

use crate::common::{Error, Result};
use crate::styles::StyleSheet;
use serde::{Deserialize, Serialize};

/// A parsed document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Document {
    /// Block elements in document order
    pub elements: Vec<DocumentElement>,
    /// The style table the document was parsed with
    pub styles: StyleSheet,
}

/// Where a paragraph sits inside a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellLocation {
    /// Index of the table among the document's elements
    pub table: usize,
    pub row: usize,
    pub cell: usize,
}

impl Document {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_styles(mut self, styles: StyleSheet) -> Self {
        self.styles = styles;
        self
    }

    /// Append a block element.
    pub fn push(&mut self, element: impl Into<DocumentElement>) {
        self.elements.push(element.into());
    }

    /// Iterate over top-level paragraphs, skipping tables.
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.elements.iter().filter_map(DocumentElement::as_paragraph)
    }

    /// Iterate over tables.
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.elements.iter().filter_map(DocumentElement::as_table)
    }

    /// Visit every paragraph in document order, including those in table
    /// cells, along with the cell location when there is one.
    pub fn for_each_paragraph<F>(&self, mut f: F)
    where
        F: FnMut(&Paragraph, Option<CellLocation>),
    {
        for (index, element) in self.elements.iter().enumerate() {
            match element {
                DocumentElement::Paragraph(para) => f(para, None),
                DocumentElement::Table(table) => {
                    for (r, row) in table.rows.iter().enumerate() {
                        for (c, cell) in row.cells.iter().enumerate() {
                            let location = CellLocation { table: index, row: r, cell: c };
                            for para in &cell.paragraphs {
                                f(para, Some(location));
                            }
                        }
                    }
                },
            }
        }
    }

    /// Mutable counterpart of [`Document::for_each_paragraph`].
    pub fn for_each_paragraph_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut Paragraph, Option<CellLocation>),
    {
        for (index, element) in self.elements.iter_mut().enumerate() {
            match element {
                DocumentElement::Paragraph(para) => f(para, None),
                DocumentElement::Table(table) => {
                    for (r, row) in table.rows.iter_mut().enumerate() {
                        for (c, cell) in row.cells.iter_mut().enumerate() {
                            let location = CellLocation { table: index, row: r, cell: c };
                            for para in &mut cell.paragraphs {
                                f(para, Some(location));
                            }
                        }
                    }
                },
            }
        }
    }

    /// Count paragraphs, including those inside table cells.
    pub fn paragraph_count(&self) -> usize {
        let mut count = 0;
        self.for_each_paragraph(|_, _| count += 1);
        count
    }

    /// Extract all text, one paragraph per line.
    pub fn text(&self) -> String {
        let mut lines = Vec::new();
        self.for_each_paragraph(|para, _| lines.push(para.text()));
        lines.join("\n")
    }

    /// Check the structural fields every consumer relies on.
    ///
    /// A table must have at least one row and every row at least one cell.
    /// Content itself is never rejected.
    pub fn validate(&self) -> Result<()> {
        for (index, table) in self
            .elements
            .iter()
            .enumerate()
            .filter_map(|(i, e)| e.as_table().map(|t| (i, t)))
        {
            if table.rows.is_empty() {
                return Err(Error::parse(format!("table at element {index} has no rows")));
            }
            if let Some(row) = table.rows.iter().position(|row| row.cells.is_empty()) {
                return Err(Error::parse(format!(
                    "row {row} of table at element {index} has no cells"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Document {
        let mut doc = Document::new();
        doc.push(Paragraph::from_text("Title"));
        doc.push(Table::from_text(vec![vec!["a", "b"], vec!["c"]]));
        doc.push(Paragraph::from_text("Body"));
        doc
    }

    #[test]
    fn test_paragraph_walk_order() {
        let doc = sample();
        let mut seen = Vec::new();
        doc.for_each_paragraph(|p, loc| seen.push((p.text(), loc.map(|l| (l.row, l.cell)))));
        assert_eq!(
            seen,
            vec![
                ("Title".to_string(), None),
                ("a".to_string(), Some((0, 0))),
                ("b".to_string(), Some((0, 1))),
                ("c".to_string(), Some((1, 0))),
                ("Body".to_string(), None),
            ]
        );
        assert_eq!(doc.paragraphs().count(), 2);
        assert_eq!(doc.tables().count(), 1);
    }

    #[test]
    fn test_validate_rejects_empty_table() {
        let mut doc = sample();
        doc.push(Table::new());
        let err = doc.validate().unwrap_err();
        assert!(err.is_parse_error());
        assert!(err.to_string().contains("element 3"));
    }

    #[test]
    fn test_validate_rejects_empty_row() {
        let mut doc = Document::new();
        doc.push(Table {
            rows: vec![Row::default()],
            ..Table::default()
        });
        assert!(doc.validate().is_err());
    }

    #[test]
    fn test_text() {
        assert_eq!(sample().text(), "Title\na\nb\nc\nBody");
    }
}
