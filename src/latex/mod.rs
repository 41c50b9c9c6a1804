//! Conversion of document trees to LaTeX source.
//!
//! The converter walks a [`crate::document::Document`] in order and emits a
//! complete, compilable LaTeX file:
//!
//! - the first title becomes `\title{...}` with `\maketitle`;
//! - headings become `\section` through `\subparagraph`, clamped to
//!   [`LatexOptions::max_section_depth`];
//! - consecutive list items share one `itemize` or `enumerate` environment;
//! - quotes use the `quote` environment and tables become `tabular`;
//! - bold, italic and underline runs nest as `\textbf{\textit{\underline{}}}`.
//!
//! Paragraph roles come from structural metadata when the source has it
//! (list numbering, outline levels, well-known style names) and from the
//! content classifier otherwise. All text passes through [`escape_latex`].
//!
//! # Examples
//!
//! ```rust
//! use restyle::document::{Document, Paragraph};
//! use restyle::latex::ToLatex;
//!
//! # fn main() -> Result<(), restyle::Error> {
//! let mut doc = Document::new();
//! doc.push(Paragraph::from_text("1. Introduction"));
//! doc.push(Paragraph::from_text("- first"));
//! doc.push(Paragraph::from_text("- second"));
//!
//! let latex = doc.to_latex()?;
//! assert!(latex.contains("\\section{Introduction}"));
//! assert_eq!(latex.matches("\\begin{itemize}").count(), 1);
//! assert!(latex.ends_with("\\end{document}\n"));
//! # Ok(())
//! # }
//! ```

mod config;
mod document;
mod escape;
mod traits;
mod writer;

pub use config::{LatexOptions, MAX_SECTION_DEPTH};
pub use escape::{escape_latex, is_reserved, unescape_latex};
pub use traits::ToLatex;

use crate::common::Result;
use crate::document::Document;

/// Convert a document to a complete LaTeX source file.
pub fn convert_to_latex(document: &Document) -> Result<String> {
    convert_to_latex_with_options(document, &LatexOptions::default())
}

/// Convert a document to a complete LaTeX source file with custom options.
///
/// The document is validated first.
pub fn convert_to_latex_with_options(document: &Document, options: &LatexOptions) -> Result<String> {
    document.validate()?;
    document.to_latex_with_options(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::FontProperties;
    use crate::document::{ListKind, Paragraph, Run, Table};

    fn convert(doc: &Document) -> String {
        convert_to_latex(doc).unwrap()
    }

    #[test]
    fn test_document_skeleton() {
        let latex = convert(&Document::new());
        assert!(latex.starts_with("\\documentclass{article}\n"));
        assert!(latex.contains("\\usepackage[utf8]{inputenc}"));
        assert!(latex.contains("\\begin{document}"));
        assert!(latex.ends_with("\\end{document}\n"));
        assert!(!latex.contains("\\maketitle"));
    }

    #[test]
    fn test_first_title_only() {
        let mut doc = Document::new();
        doc.push(Paragraph::from_text("ANNUAL REPORT"));
        doc.push(Paragraph::from_text("Body text follows here."));
        doc.push(Paragraph::from_text("SECOND TITLE"));
        let latex = convert(&doc);
        assert!(latex.contains("\\title{ANNUAL REPORT}"));
        assert!(latex.contains("\\maketitle"));
        assert!(latex.contains("\\section{SECOND TITLE}"));
    }

    #[test]
    fn test_escaping_in_body() {
        let mut doc = Document::new();
        doc.push(Paragraph::from_text("Revenue grew 50% & costs fell by $3_000."));
        let latex = convert(&doc);
        assert!(latex.contains(r"Revenue grew 50\% \& costs fell by \$3\_000."));
    }

    #[test]
    fn test_lists_are_grouped() {
        let mut doc = Document::new();
        doc.push(Paragraph::from_text("- apples"));
        doc.push(Paragraph::from_text("- pears"));
        doc.push(Paragraph::new());
        doc.push(Paragraph::from_text("- plums"));
        doc.push(Paragraph::from_text("Body text between the lists."));
        doc.push(Paragraph::from_text("Step one").with_numbering(ListKind::Ordered));
        doc.push(Paragraph::from_text("Step two").with_numbering(ListKind::Ordered));
        let latex = convert(&doc);
        assert_eq!(latex.matches("\\begin{itemize}").count(), 1);
        assert_eq!(latex.matches("\\end{itemize}").count(), 1);
        assert_eq!(latex.matches("\\begin{enumerate}").count(), 1);
        assert_eq!(latex.matches("\\item").count(), 5);
        assert!(latex.contains("\\item apples\n"));
        assert!(latex.contains("\\item Step one\n"));
        assert!(latex.find("\\end{enumerate}") < latex.find("\\end{document}"));
    }

    #[test]
    fn test_body_paragraph_splits_a_list() {
        let mut doc = Document::new();
        for item in ["- one", "- two", "- three"] {
            doc.push(Paragraph::from_text(item));
        }
        doc.push(Paragraph::from_text("An interruption, written as prose."));
        for item in ["- four", "- five"] {
            doc.push(Paragraph::from_text(item));
        }
        let latex = convert(&doc);
        assert_eq!(latex.matches("\\begin{itemize}").count(), 2);
        assert_eq!(latex.matches("\\end{itemize}").count(), 2);
        assert_eq!(latex.matches("\\item").count(), 5);
        let prose = latex.find("An interruption").unwrap();
        let first_end = latex.find("\\end{itemize}").unwrap();
        let second_begin = latex.rfind("\\begin{itemize}").unwrap();
        assert!(first_end < prose && prose < second_begin);
    }

    #[test]
    fn test_list_kind_change_starts_new_environment() {
        let mut doc = Document::new();
        doc.push(Paragraph::from_text("- bullet"));
        doc.push(Paragraph::from_text("(1) numbered"));
        let latex = convert(&doc);
        let end_itemize = latex.find("\\end{itemize}").unwrap();
        let begin_enumerate = latex.find("\\begin{enumerate}").unwrap();
        assert!(end_itemize < begin_enumerate);
    }

    #[test]
    fn test_section_depth_is_clamped() {
        let mut doc = Document::new();
        doc.push(Paragraph::from_text("Deep").with_style("Heading5"));
        assert!(convert(&doc).contains("\\subsubsection{Deep}"));

        let options = LatexOptions::new().with_max_section_depth(5);
        let latex = convert_to_latex_with_options(&doc, &options).unwrap();
        assert!(latex.contains("\\subparagraph{Deep}"));
    }

    #[test]
    fn test_normalized_hierarchy() {
        let mut doc = Document::new();
        doc.push(Paragraph::from_text("Top").with_outline_level(0));
        doc.push(Paragraph::from_text("Skipped").with_outline_level(2));
        let options = LatexOptions::new().with_normalized_hierarchy(true);
        let latex = convert_to_latex_with_options(&doc, &options).unwrap();
        assert!(latex.contains("\\section{Top}"));
        assert!(latex.contains("\\subsection{Skipped}"));
        assert!(convert(&doc).contains("\\subsubsection{Skipped}"));
    }

    #[test]
    fn test_quote_environment() {
        let mut doc = Document::new();
        doc.push(Paragraph::from_text("“Stay hungry, stay foolish,” he said."));
        assert!(convert(&doc).contains("\\begin{quote}\n“Stay hungry, stay foolish,” he said.\n\\end{quote}"));
    }

    #[test]
    fn test_emphasis_in_paragraph() {
        let para = Paragraph::new()
            .with_run(Run::new("This is "))
            .with_run(Run::new("important").with_font(FontProperties::new().with_bold(true)))
            .with_run(Run::new(" text."));
        assert_eq!(para.to_latex().unwrap(), "This is \\textbf{important} text.");
    }

    #[test]
    fn test_table_is_padded() {
        let table = Table::from_text(vec![vec!["a", "b", "c"], vec!["d"]]);
        let latex = table.to_latex().unwrap();
        assert!(latex.starts_with("\\begin{tabular}{|l|l|l|}"));
        assert!(latex.contains("a & b & c \\\\"));
        assert!(latex.contains("d &  &  \\\\"));
        assert!(latex.ends_with("\\end{tabular}"));
    }

    #[test]
    fn test_table_closes_open_list() {
        let mut doc = Document::new();
        doc.push(Paragraph::from_text("- item"));
        doc.push(Table::from_text([["x"]]));
        let latex = convert(&doc);
        assert!(latex.find("\\end{itemize}") < latex.find("\\begin{tabular}"));
    }

    #[test]
    fn test_special_characters_in_table_cells() {
        let table = Table::from_text([["100%", "a_b"]]);
        assert!(table.to_latex().unwrap().contains(r"100\% & a\_b \\"));
    }
}
