//! Serializing a [`Document`] body back into a main document part.
use super::properties::{write_paragraph_properties, write_run_properties};
use super::reader::BodyFrame;
use crate::document::{Document, DocumentElement, Paragraph, Run, Table};
use crate::ooxml::error::Result;
use quick_xml::escape::escape;
use std::fmt::Write as FmtWrite;

const DEFAULT_ROOT: &str = concat!(
    r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" "#,
    r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#
);

/// Write the main document part for `document`.
///
/// `frame` restores the original root tag (and so every namespace the
/// section properties may reference) and the trailing section properties.
pub(crate) fn write_document_xml(document: &Document, frame: &BodyFrame) -> Result<String> {
    let mut xml = String::with_capacity(1024 + document.elements.len() * 256);
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push('\n');
    xml.push_str(frame.root.as_deref().unwrap_or(DEFAULT_ROOT));
    xml.push_str("<w:body>");

    for element in &document.elements {
        match element {
            DocumentElement::Paragraph(para) => write_paragraph(para, &mut xml)?,
            DocumentElement::Table(table) => write_table(table, &mut xml)?,
        }
    }

    if let Some(section) = &frame.section {
        xml.push_str(section);
    }
    xml.push_str("</w:body></w:document>");
    Ok(xml)
}

fn write_paragraph(para: &Paragraph, xml: &mut String) -> Result<()> {
    xml.push_str("<w:p>");

    let mut ppr = String::new();
    if let Some(style) = &para.style {
        write!(ppr, "<w:pStyle w:val=\"{}\"/>", escape(style.as_str()))?;
    }
    if let Some(list) = &para.list_ref {
        write!(
            ppr,
            "<w:numPr><w:ilvl w:val=\"{}\"/><w:numId w:val=\"{}\"/></w:numPr>",
            list.level, list.num_id
        )?;
    }
    write_paragraph_properties(&para.properties, &mut ppr)?;
    if let Some(level) = para.outline_level {
        write!(ppr, "<w:outlineLvl w:val=\"{level}\"/>")?;
    }
    if !ppr.is_empty() {
        xml.push_str("<w:pPr>");
        xml.push_str(&ppr);
        xml.push_str("</w:pPr>");
    }

    for run in &para.runs {
        write_run(run, xml)?;
    }
    xml.push_str("</w:p>");
    Ok(())
}

fn write_run(run: &Run, xml: &mut String) -> Result<()> {
    if run.text.is_empty() {
        return Ok(());
    }
    xml.push_str("<w:r>");
    if !run.font.is_empty() {
        xml.push_str("<w:rPr>");
        write_run_properties(&run.font, xml)?;
        xml.push_str("</w:rPr>");
    }

    // Tabs and line breaks are elements of their own
    let mut segment = String::new();
    let flush = |segment: &mut String, xml: &mut String| {
        if !segment.is_empty() {
            xml.push_str("<w:t xml:space=\"preserve\">");
            xml.push_str(&escape(segment.as_str()));
            xml.push_str("</w:t>");
            segment.clear();
        }
    };
    for ch in run.text.chars() {
        match ch {
            '\t' => {
                flush(&mut segment, xml);
                xml.push_str("<w:tab/>");
            },
            '\n' => {
                flush(&mut segment, xml);
                xml.push_str("<w:br/>");
            },
            '\r' => {},
            ch => segment.push(ch),
        }
    }
    flush(&mut segment, xml);

    xml.push_str("</w:r>");
    Ok(())
}

fn write_table(table: &Table, xml: &mut String) -> Result<()> {
    let columns = table.column_count();
    xml.push_str("<w:tbl><w:tblPr>");
    if let Some(style) = &table.style {
        write!(xml, "<w:tblStyle w:val=\"{}\"/>", escape(style.as_str()))?;
    }
    xml.push_str("<w:tblW w:w=\"0\" w:type=\"auto\"/></w:tblPr><w:tblGrid>");
    for _ in 0..columns {
        xml.push_str("<w:gridCol/>");
    }
    xml.push_str("</w:tblGrid>");

    for row in &table.rows {
        xml.push_str("<w:tr>");
        for cell in &row.cells {
            xml.push_str("<w:tc><w:tcPr><w:tcW w:w=\"0\" w:type=\"auto\"/></w:tcPr>");
            // A cell must end with a paragraph
            if cell.paragraphs.is_empty() {
                xml.push_str("<w:p/>");
            }
            for para in &cell.paragraphs {
                write_paragraph(para, xml)?;
            }
            xml.push_str("</w:tc>");
        }
        xml.push_str("</w:tr>");
    }
    xml.push_str("</w:tbl>");
    Ok(())
}
