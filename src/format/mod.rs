//! Transfer of template formatting onto target documents.
//!
//! [`apply_formatting`] is the one-call entry point: it builds a
//! [`StyleRegistry`] from the template, resolves the category-to-style
//! [`StyleMapping`] once, and runs a [`FormattingApplicator`] over the target.
//! [`format_batch`] does the same for many targets in parallel, sharing the
//! registry, the mapping and the classification cache.
//!
//! # Examples
//!
//! ```
//! use restyle::document::{Document, Paragraph};
//! use restyle::format::apply_formatting;
//! use restyle::styles::{StyleDefinition, StyleKind, StyleSheet};
//!
//! let template = Document::new().with_styles(StyleSheet::from_definitions([
//!     StyleDefinition::paragraph("Normal"),
//!     StyleDefinition::new("Heading1", StyleKind::Paragraph).with_name("heading 1"),
//! ]));
//! let mut target = Document::new();
//! target.push(Paragraph::from_text("1. Introduction"));
//! target.push(Paragraph::from_text("This report covers the first quarter."));
//!
//! let formatted = apply_formatting(&template, target)?;
//! let styles: Vec<_> = formatted.report.style_ids().collect();
//! assert_eq!(styles, ["Heading1", "Normal"]);
//! # Ok::<(), restyle::common::Error>(())
//! ```

mod applicator;
mod config;
mod report;

pub use applicator::FormattingApplicator;
pub use config::FormatOptions;
pub use report::{FormatReport, StyleAssignment};

use crate::classify::Classifier;
use crate::common::Result;
use crate::document::Document;
use crate::styles::{StyleMapping, StyleRegistry, StyleSheet};
use rayon::prelude::*;

/// A formatted document and the record of what was assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct FormattedDocument {
    pub document: Document,
    pub report: FormatReport,
}

/// Apply `template`'s styles to `target` with default options.
pub fn apply_formatting(template: &Document, target: Document) -> Result<FormattedDocument> {
    apply_formatting_with_options(template, target, &FormatOptions::default())
}

/// Apply `template`'s styles to `target`.
///
/// Both documents are validated first; on error nothing is returned, so a
/// partially formatted document is never observable. A template whose styles
/// cannot be used degrades to a registry holding only `Normal`.
pub fn apply_formatting_with_options(
    template: &Document,
    target: Document,
    options: &FormatOptions,
) -> Result<FormattedDocument> {
    template.validate()?;
    target.validate()?;

    let context = FormatContext::new(template, options);
    Ok(context.format(target))
}

/// Format many targets against one template, in parallel.
///
/// Results are in input order; an invalid target fails on its own without
/// affecting the others.
pub fn format_batch(
    template: &Document,
    targets: Vec<Document>,
    options: &FormatOptions,
) -> Result<Vec<Result<FormattedDocument>>> {
    template.validate()?;
    let context = FormatContext::new(template, options);
    Ok(targets
        .into_par_iter()
        .map(|target| {
            target.validate()?;
            Ok(context.format(target))
        })
        .collect())
}

/// Everything derived from the template, built once per call.
struct FormatContext<'o> {
    registry: StyleRegistry,
    mapping: StyleMapping,
    classifier: Classifier,
    sheet: StyleSheet,
    options: &'o FormatOptions,
}

impl<'o> FormatContext<'o> {
    fn new(template: &Document, options: &'o FormatOptions) -> Self {
        let registry = StyleRegistry::build_or_default(&template.styles);
        let mapping = StyleMapping::resolve(&registry);
        let classifier = Classifier::for_options(&options.classifier);

        if options.verbose {
            log::info!(
                "template registry has {} styles ({} cyclic)",
                registry.len(),
                registry.cyclic_styles().count()
            );
            for (category, style) in mapping.iter() {
                log::info!("{category} -> {style}");
            }
        }

        let sheet = registry.to_style_sheet();
        Self {
            registry,
            mapping,
            classifier,
            sheet,
            options,
        }
    }

    fn format(&self, mut document: Document) -> FormattedDocument {
        let report = FormattingApplicator::new(&self.registry, &self.mapping, &self.classifier)
            .with_options(self.options)
            .apply(&mut document);
        document.styles = self.sheet.clone();
        FormattedDocument { document, report }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::ClassifierOptions;
    use crate::document::{Paragraph, Table};
    use crate::styles::{StyleDefinition, StyleKind};

    fn template() -> Document {
        Document::new().with_styles(StyleSheet::from_definitions([
            StyleDefinition::paragraph("Normal"),
            StyleDefinition::new("Heading1", StyleKind::Paragraph).with_name("heading 1"),
            StyleDefinition::new("ListParagraph", StyleKind::Paragraph).with_name("List Paragraph"),
        ]))
    }

    fn target() -> Document {
        let mut doc = Document::new();
        doc.push(Paragraph::from_text("1. Introduction"));
        doc.push(Paragraph::from_text("- first point"));
        doc.push(Paragraph::from_text("A long sentence of ordinary body text."));
        doc
    }

    #[test]
    fn test_output_carries_template_styles() {
        let formatted = apply_formatting(&template(), target()).unwrap();
        assert_eq!(formatted.document.styles.len(), 3);
        let styles: Vec<_> = formatted.report.style_ids().collect();
        assert_eq!(styles, ["Heading1", "ListParagraph", "Normal"]);
    }

    #[test]
    fn test_formatting_is_idempotent() {
        let template = template();
        let once = apply_formatting(&template, target()).unwrap();
        let twice = apply_formatting(&template, once.document.clone()).unwrap();
        assert_eq!(once.document, twice.document);
        assert_eq!(once.report, twice.report);
    }

    #[test]
    fn test_empty_template_degrades_to_normal() {
        let formatted = apply_formatting(&Document::new(), target()).unwrap();
        assert!(formatted.report.style_ids().all(|id| id == "Normal"));
        assert_eq!(formatted.report.fallback_count(), 2);
        assert_eq!(formatted.document.styles.len(), 1);
    }

    #[test]
    fn test_invalid_target_is_rejected() {
        let mut bad = target();
        bad.push(Table::new());
        assert!(apply_formatting(&template(), bad).unwrap_err().is_parse_error());
    }

    #[test]
    fn test_batch_matches_sequential() {
        let template = template();
        let options = FormatOptions::new().with_classifier(ClassifierOptions::default().with_cache_capacity(16));
        let mut targets: Vec<_> = (0..8).map(|_| target()).collect();
        targets.push({
            let mut bad = target();
            bad.push(Table::new());
            bad
        });
        let results = format_batch(&template, targets, &options).unwrap();
        assert_eq!(results.len(), 9);
        let sequential = apply_formatting_with_options(&template, target(), &options).unwrap();
        for result in &results[..8] {
            assert_eq!(result.as_ref().unwrap(), &sequential);
        }
        assert!(results[8].is_err());
    }
}
