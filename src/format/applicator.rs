//! The formatting applicator.
use super::config::FormatOptions;
use super::report::{FormatReport, StyleAssignment};
use crate::classify::{Classifier, ContentUnit};
use crate::document::{CellLocation, Document, Paragraph};
use crate::styles::{StyleMapping, StyleRegistry};

/// Assigns template styles to a document's paragraphs.
///
/// Each paragraph, including those inside table cells, is classified, mapped
/// to a style id, and given that id. Font and paragraph properties left
/// unset on the paragraph or its runs are then filled from the style's
/// effective properties; explicit values are never overwritten.
#[derive(Debug)]
pub struct FormattingApplicator<'a> {
    registry: &'a StyleRegistry,
    mapping: &'a StyleMapping,
    classifier: &'a Classifier,
    verbose: bool,
    fill_paragraph_properties: bool,
}

impl<'a> FormattingApplicator<'a> {
    pub fn new(
        registry: &'a StyleRegistry,
        mapping: &'a StyleMapping,
        classifier: &'a Classifier,
    ) -> Self {
        Self {
            registry,
            mapping,
            classifier,
            verbose: false,
            fill_paragraph_properties: true,
        }
    }

    pub fn with_options(mut self, options: &FormatOptions) -> Self {
        self.verbose = options.verbose;
        self.fill_paragraph_properties = options.fill_paragraph_properties;
        self
    }

    /// Format every paragraph of `document` in place, in document order.
    pub fn apply(&self, document: &mut Document) -> FormatReport {
        let mut report = FormatReport {
            assignments: Vec::with_capacity(document.paragraph_count()),
        };
        let mut index = 0;
        document.for_each_paragraph_mut(|paragraph, location| {
            report
                .assignments
                .push(self.apply_paragraph(paragraph, index, location));
            index += 1;
        });

        if self.verbose {
            log::info!(
                "formatted {} paragraphs ({} fell back to {})",
                report.len(),
                report.fallback_count(),
                self.registry.normal().id
            );
        }
        report
    }

    /// Classify and format a single paragraph.
    pub fn apply_paragraph(
        &self,
        paragraph: &mut Paragraph,
        index: usize,
        location: Option<CellLocation>,
    ) -> StyleAssignment {
        let unit = ContentUnit::new(&paragraph.text(), index).with_location(location);
        let category = self.classifier.classify_unit(&unit);
        let style_id = self.mapping.style_for(category);
        let fallback = self.mapping.is_fallback(category);
        let effective = self.registry.effective(style_id);

        let mut filled = 0;
        for run in &mut paragraph.runs {
            filled += run.font.inherit_from(effective.font());
        }
        if self.fill_paragraph_properties {
            filled += paragraph.properties.inherit_from(effective.paragraph());
        }
        paragraph.style = Some(style_id.to_string());

        if self.verbose {
            log::debug!("paragraph {index}: {category} -> {style_id} ({filled} properties filled)");
            if fallback {
                log::debug!("paragraph {index}: no template style for {category}");
            }
        }

        StyleAssignment {
            index,
            location,
            category,
            style_id: style_id.to_string(),
            fallback,
        }
    }
}
