//! What the applicator did to a document.
use crate::classify::ContentCategory;
use crate::document::CellLocation;

/// The style assigned to one paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleAssignment {
    /// Position of the paragraph in document order
    pub index: usize,
    /// Enclosing table cell, if any
    pub location: Option<CellLocation>,
    pub category: ContentCategory,
    pub style_id: String,
    /// The category had no template style and got `Normal`
    pub fallback: bool,
}

/// Per-paragraph record of a formatting pass, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatReport {
    pub assignments: Vec<StyleAssignment>,
}

impl FormatReport {
    #[inline]
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Number of paragraphs whose category fell back to `Normal`.
    pub fn fallback_count(&self) -> usize {
        self.assignments.iter().filter(|a| a.fallback).count()
    }

    /// Paragraph count per category, skipping categories never assigned.
    pub fn category_counts(&self) -> Vec<(ContentCategory, usize)> {
        let mut counts = [0usize; ContentCategory::COUNT];
        for assignment in &self.assignments {
            counts[assignment.category.index()] += 1;
        }
        ContentCategory::ALL
            .into_iter()
            .zip(counts)
            .filter(|(_, count)| *count > 0)
            .collect()
    }

    /// Assigned style ids, in document order.
    pub fn style_ids(&self) -> impl Iterator<Item = &str> {
        self.assignments.iter().map(|a| a.style_id.as_str())
    }
}
