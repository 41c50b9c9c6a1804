//! Restyle - transfer formatting from a Word template onto other documents
//!
//! Restyle reads a template document's style definitions, classifies every
//! paragraph of a target document by its content (title, heading, body text,
//! list item, quote) and assigns it the template style for that category.
//! The same document tree can also be projected into a compilable LaTeX file.
//!
//! # Features
//!
//! - **Style registry**: template styles with cycle-safe `basedOn` resolution
//! - **Content classifier**: text heuristics behind a shared, bounded LRU cache
//! - **Formatting applicator**: category to style assignment with fallbacks
//! - **LaTeX converter**: sections, lists, quotes, tables and run emphasis
//! - **DOCX I/O**: read and write Word packages, keeping unrelated parts
//!
//! # Example - Formatting a document with a template
//!
//! ```no_run
//! use restyle::FormatOptions;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let report = restyle::apply_formatting_files(
//!     "template.docx",
//!     "draft.docx",
//!     "formatted.docx",
//!     &FormatOptions::default(),
//! )?;
//! println!("{} paragraphs restyled, {} fell back to Normal", report.len(), report.fallback_count());
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Converting a document to LaTeX
//!
//! ```no_run
//! use restyle::LatexOptions;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let latex = restyle::convert_file_to_latex("report.docx", &LatexOptions::default())?;
//! std::fs::write("report.tex", latex)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Working with document trees
//!
//! ```
//! use restyle::document::{Document, Paragraph};
//! use restyle::styles::{StyleDefinition, StyleSheet};
//!
//! # fn main() -> Result<(), restyle::Error> {
//! let template = Document::new().with_styles(StyleSheet::from_definitions([
//!     StyleDefinition::paragraph("Normal"),
//!     StyleDefinition::paragraph("Quote"),
//! ]));
//! let mut target = Document::new();
//! target.push(Paragraph::from_text("\"Simplicity is prerequisite for reliability.\""));
//!
//! let formatted = restyle::apply_formatting(&template, target)?;
//! assert_eq!(formatted.report.style_ids().next(), Some("Quote"));
//! # Ok(())
//! # }
//! ```

/// Content classification
///
/// Assigns each paragraph a [`classify::ContentCategory`] from its text, with
/// results memoized in a process-wide LRU cache.
pub mod classify;

/// Common types shared by all modules: errors, style properties and units
pub mod common;

/// YAML configuration
pub mod config;

/// The document tree: paragraphs, runs and tables
pub mod document;

/// Transfer of template formatting onto target documents
pub mod format;

/// LaTeX conversion
pub mod latex;

/// OOXML (.docx) reading and writing
pub mod ooxml;

/// Template style definitions, resolution and category mapping
pub mod styles;

// Re-export commonly used types for convenience
pub use common::{Error, Result};
pub use config::RestyleConfig;
pub use document::Document;
pub use format::{
    FormatOptions, FormatReport, FormattedDocument, apply_formatting, apply_formatting_with_options, format_batch,
};
pub use latex::{LatexOptions, ToLatex, convert_to_latex, convert_to_latex_with_options};
pub use styles::{StyleMapping, StyleRegistry};

use ooxml::docx::Package;
use std::path::Path;

/// Format the .docx at `target` with the styles of the .docx at `template`
/// and write the result to `output`.
///
/// The template's styles part is copied into the output, so every style the
/// formatted paragraphs reference is defined there. Parts of the target the
/// document tree does not model (headers, images, settings) are kept.
pub fn apply_formatting_files<T, D, O>(
    template: T,
    target: D,
    output: O,
    options: &FormatOptions,
) -> Result<FormatReport>
where
    T: AsRef<Path>,
    D: AsRef<Path>,
    O: AsRef<Path>,
{
    let template_pkg = Package::open(template.as_ref())?;
    let template_doc = template_pkg.document()?;
    let target_pkg = Package::open(target.as_ref())?;
    let target_doc = target_pkg.document()?;

    let formatted = apply_formatting_with_options(&template_doc, target_doc, options)?;
    target_pkg
        .with_document(&formatted.document, Some(&template_pkg))?
        .save(output.as_ref())?;

    log::info!(
        "formatted {} paragraphs of {} into {} ({} fallbacks)",
        formatted.report.len(),
        target.as_ref().display(),
        output.as_ref().display(),
        formatted.report.fallback_count()
    );
    Ok(formatted.report)
}

/// Read the .docx at `path` and convert it to a LaTeX source file.
pub fn convert_file_to_latex<P: AsRef<Path>>(path: P, options: &LatexOptions) -> Result<String> {
    let document = Package::open(path.as_ref())?.document()?;
    convert_to_latex_with_options(&document, options)
}
