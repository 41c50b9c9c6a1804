//! End-to-end LaTeX conversion of .docx packages.
mod common;

use common::{BULLET_NUMBERING, TEMPLATE_STYLES, docx, list_para, para, styled_para, table, write};
use restyle::{LatexOptions, convert_file_to_latex};

fn report_body() -> String {
    let bold_run = r#"<w:p><w:r><w:t xml:space="preserve">Costs &amp; 50% margin, </w:t></w:r><w:r><w:rPr><w:b/></w:rPr><w:t>audited</w:t></w:r></w:p>"#;
    [
        styled_para("Title", "Quarterly Review"),
        styled_para("Heading1", "Overview"),
        bold_run.to_string(),
        list_para(1, "First point"),
        list_para(1, "Second point"),
        para(""),
        list_para(2, "Step one"),
        styled_para("Heading2", "Details"),
        table(&[&["Region", "Total"], &["North", "12"]]),
    ]
    .concat()
}

#[test]
fn test_convert_docx() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(
        &dir,
        "report.docx",
        &docx(&report_body(), Some(TEMPLATE_STYLES), Some(BULLET_NUMBERING)),
    );

    let latex = convert_file_to_latex(&input, &LatexOptions::default()).unwrap();

    assert!(latex.starts_with("\\documentclass{article}\n"));
    assert!(latex.contains("\\title{Quarterly Review}"));
    assert!(latex.contains("\\maketitle"));
    assert!(latex.contains("\\section{Overview}"));
    assert!(latex.contains("\\subsection{Details}"));
    assert!(latex.contains("Costs \\& 50\\% margin, \\textbf{audited}"));

    // Word numbering decides the list kind; the blank paragraph does not split the list
    assert_eq!(latex.matches("\\begin{itemize}").count(), 1);
    assert!(latex.contains("  \\item First point\n  \\item Second point\n\\end{itemize}"));
    assert!(latex.contains("\\begin{enumerate}\n  \\item Step one\n\\end{enumerate}"));

    assert!(latex.contains("\\begin{tabular}{|l|l|}"));
    assert!(latex.contains("Region & Total \\\\"));
    assert!(latex.contains("North & 12 \\\\"));
    assert!(latex.ends_with("\\end{document}\n"));
}

#[test]
fn test_convert_without_styles() {
    let dir = tempfile::tempdir().unwrap();
    let body = [para("1. Scope"), para("- alpha"), para("- beta")].concat();
    let input = write(&dir, "plain.docx", &docx(&body, None, None));

    let options = LatexOptions::default().with_styles(false).with_document_class("report");
    let latex = convert_file_to_latex(&input, &options).unwrap();
    assert!(latex.starts_with("\\documentclass{report}\n"));
    assert!(latex.contains("\\section{Scope}"));
    assert!(latex.contains("\\begin{itemize}\n  \\item alpha\n  \\item beta\n\\end{itemize}"));
}

#[test]
fn test_missing_file() {
    assert!(convert_file_to_latex("/nonexistent/input.docx", &LatexOptions::default()).is_err());
}
