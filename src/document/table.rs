//! Table nodes.
use super::Paragraph;
use serde::{Deserialize, Serialize};

/// A table: rows of cells, each cell holding paragraphs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Table {
    /// Table style identifier
    pub style: Option<String>,
    pub rows: Vec<Row>,
}

impl Table {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table of single-paragraph cells from plain strings.
    pub fn from_text<R, C, S>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            style: None,
            rows: rows
                .into_iter()
                .map(|cells| Row {
                    cells: cells.into_iter().map(|s| Cell::from_text(s)).collect(),
                })
                .collect(),
        }
    }

    /// Get the number of rows in the table.
    #[inline]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns: the widest row wins.
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(|row| row.cells.len()).max().unwrap_or(0)
    }
}

/// A table row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Row {
    pub cells: Vec<Cell>,
}

/// A table cell.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cell {
    pub paragraphs: Vec<Paragraph>,
}

impl Cell {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            paragraphs: vec![Paragraph::from_text(text)],
        }
    }

    /// Get the visible text of the cell, paragraphs joined by newlines.
    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(Paragraph::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
