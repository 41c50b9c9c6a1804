//! End-to-end formatting of .docx packages.
mod common;

use common::{TEMPLATE_STYLES, docx, para, table, write};
use restyle::classify::ContentCategory;
use restyle::ooxml::docx::Package;
use restyle::{FormatOptions, apply_formatting_files};

fn target_body() -> String {
    [
        para("ANNUAL REPORT"),
        para("1. Introduction"),
        para("This report covers the results of the first quarter."),
        para("- Revenue grew"),
        para("2.1 Regional Results"),
        para("\"Growth is a habit.\""),
        table(&[&["q1 total", "40 units."]]),
    ]
    .concat()
}

fn paragraph_styles(pkg: &Package) -> Vec<String> {
    let doc = pkg.document().unwrap();
    let mut styles = Vec::new();
    doc.for_each_paragraph(|para, _| styles.push(para.style.clone().unwrap_or_default()));
    styles
}

#[test]
fn test_format_with_template() {
    let dir = tempfile::tempdir().unwrap();
    let template = write(&dir, "template.docx", &docx(&para("x"), Some(TEMPLATE_STYLES), None));
    let target = write(&dir, "target.docx", &docx(&target_body(), None, None));
    let output = dir.path().join("out.docx");

    let report = apply_formatting_files(&template, &target, &output, &FormatOptions::default()).unwrap();
    assert_eq!(report.len(), 8);
    assert_eq!(report.assignments[0].category, ContentCategory::Title);
    assert_eq!(report.assignments[4].category, ContentCategory::heading(2));

    let out = Package::open(&output).unwrap();
    assert_eq!(
        paragraph_styles(&out),
        [
            "Title",
            "Heading1",
            "Normal",
            "ListParagraph",
            "Heading2",
            "Quote",
            "Normal",
            "Normal"
        ]
    );
    // Every referenced style is defined in the copied styles part
    assert_eq!(out.part("word/styles.xml"), Some(TEMPLATE_STYLES.as_bytes()));

    let doc = out.document().unwrap();
    let heading = doc.paragraphs().nth(1).unwrap();
    assert!(heading.runs[0].bold());
    assert_eq!(heading.runs[0].font.size, Some(16.0));
    assert_eq!(heading.runs[0].font.family.as_deref(), Some("Calibri"));
    assert_eq!(heading.text(), "1. Introduction");

    // Section properties of the target survive
    let main = String::from_utf8(out.part("word/document.xml").unwrap().to_vec()).unwrap();
    assert!(main.contains(r#"<w:pgSz w:w="11906" w:h="16838"/>"#));
}

#[test]
fn test_formatting_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let template = write(&dir, "template.docx", &docx(&para("x"), Some(TEMPLATE_STYLES), None));
    let target = write(&dir, "target.docx", &docx(&target_body(), None, None));
    let first = dir.path().join("first.docx");
    let second = dir.path().join("second.docx");

    let report1 = apply_formatting_files(&template, &target, &first, &FormatOptions::default()).unwrap();
    let report2 = apply_formatting_files(&template, &first, &second, &FormatOptions::default()).unwrap();

    let ids1: Vec<_> = report1.style_ids().collect();
    let ids2: Vec<_> = report2.style_ids().collect();
    assert_eq!(ids1, ids2);
    assert_eq!(
        Package::open(&first).unwrap().document().unwrap(),
        Package::open(&second).unwrap().document().unwrap()
    );
}

#[test]
fn test_template_without_styles_falls_back_to_normal() {
    let dir = tempfile::tempdir().unwrap();
    let template = write(&dir, "template.docx", &docx(&para("x"), None, None));
    let target = write(&dir, "target.docx", &docx(&target_body(), None, None));
    let output = dir.path().join("out.docx");

    let report = apply_formatting_files(&template, &target, &output, &FormatOptions::default()).unwrap();
    // Only body text finds its style; the rest fall back
    assert_eq!(report.fallback_count(), 5);

    let out = Package::open(&output).unwrap();
    assert!(paragraph_styles(&out).iter().all(|style| style == "Normal"));
    let styles = out.styles().unwrap().unwrap();
    assert_eq!(styles.definitions[0].id, "Normal");
}

#[test]
fn test_target_styles_are_replaced() {
    let own_styles = r#"<?xml version="1.0" encoding="UTF-8"?><w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:style w:type="paragraph" w:styleId="Fancy"><w:name w:val="Fancy"/></w:style></w:styles>"#;
    let dir = tempfile::tempdir().unwrap();
    let template = write(&dir, "template.docx", &docx(&para("x"), Some(TEMPLATE_STYLES), None));
    let target = write(&dir, "target.docx", &docx(&para("1. Scope"), Some(own_styles), None));
    let output = dir.path().join("out.docx");

    apply_formatting_files(&template, &target, &output, &FormatOptions::default()).unwrap();
    let out = Package::open(&output).unwrap();
    assert_eq!(paragraph_styles(&out), ["Heading1"]);
    let styles = out.styles().unwrap().unwrap();
    assert!(styles.definitions.iter().all(|style| style.id != "Fancy"));
}

#[test]
fn test_invalid_target_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let template = write(&dir, "template.docx", &docx(&para("x"), Some(TEMPLATE_STYLES), None));
    let target = write(&dir, "target.docx", b"this is not a zip archive");
    let output = dir.path().join("out.docx");

    let err = apply_formatting_files(&template, &target, &output, &FormatOptions::default()).unwrap_err();
    assert!(err.is_parse_error());
    assert!(!output.exists());
}
