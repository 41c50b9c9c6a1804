//! The styles part (`word/styles.xml`).
//!
//! Reads every `<w:style>` (id, display name, type, `basedOn`, default flag
//! and the run and paragraph properties the registry resolves) plus the
//! `<w:docDefaults>` that sit beneath all styles.
use super::properties::{
    apply_paragraph_property, apply_run_property, attr, write_paragraph_properties,
    write_run_properties,
};
use crate::common::StyleProperties;
use crate::ooxml::error::Result;
use crate::styles::{StyleDefinition, StyleKind, StyleSheet};
use quick_xml::Reader;
use quick_xml::encoding::Decoder;
use quick_xml::escape::escape;
use quick_xml::events::{BytesStart, Event};
use std::fmt::Write as FmtWrite;

/// Property containers whose contents describe something other than the
/// style's own run and paragraph formatting.
const SKIPPED: &[&[u8]] = &[
    b"tblPr",
    b"trPr",
    b"tcPr",
    b"tblStylePr",
    b"rPrChange",
    b"pPrChange",
    b"numPr",
    b"tabs",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Container {
    None,
    Run,
    Paragraph,
}

#[derive(Default)]
struct StylesParser {
    sheet: StyleSheet,
    current: Option<StyleDefinition>,
    in_defaults: bool,
    container: Option<Container>,
    skip_depth: usize,
}

impl StylesParser {
    fn properties(&mut self) -> Option<&mut StyleProperties> {
        match &mut self.current {
            Some(style) => Some(&mut style.properties),
            None if self.in_defaults => Some(&mut self.sheet.defaults),
            None => None,
        }
    }

    fn start(&mut self, e: &BytesStart, decoder: Decoder, is_empty: bool) {
        let local = e.local_name();
        let name = local.as_ref();
        if SKIPPED.contains(&name) {
            if !is_empty {
                self.skip_depth = 1;
            }
            return;
        }
        match name {
            b"docDefaults" => self.in_defaults = !is_empty,
            b"style" => {
                let kind = attr(e, decoder, b"type")
                    .and_then(|v| StyleKind::from_xml(&v))
                    .unwrap_or_default();
                let mut style = StyleDefinition::new(attr(e, decoder, b"styleId").unwrap_or_default(), kind);
                style.is_default = matches!(attr(e, decoder, b"default").as_deref(), Some("1" | "true" | "on"));
                if is_empty {
                    self.finish_style(style);
                } else {
                    self.current = Some(style);
                }
            },
            b"rPr" if !is_empty => self.container = Some(Container::Run),
            b"pPr" if !is_empty => self.container = Some(Container::Paragraph),
            b"name" => {
                if let Some(style) = &mut self.current {
                    style.name = attr(e, decoder, b"val");
                }
            },
            b"basedOn" => {
                if let Some(style) = &mut self.current {
                    style.based_on = attr(e, decoder, b"val").filter(|v| !v.is_empty());
                }
            },
            _ => {
                let container = self.container.unwrap_or(Container::None);
                let Some(properties) = self.properties() else {
                    return;
                };
                match container {
                    Container::Run => {
                        apply_run_property(name, e, decoder, &mut properties.font);
                    },
                    Container::Paragraph => {
                        apply_paragraph_property(name, e, decoder, &mut properties.paragraph);
                    },
                    Container::None => {},
                }
            },
        }
    }

    fn end(&mut self, name: &[u8]) {
        match name {
            b"docDefaults" => self.in_defaults = false,
            b"style" => {
                if let Some(style) = self.current.take() {
                    self.finish_style(style);
                }
            },
            b"rPr" | b"pPr" => self.container = None,
            _ => {},
        }
    }

    fn finish_style(&mut self, style: StyleDefinition) {
        if style.id.is_empty() {
            log::debug!("skipping style without a styleId");
            return;
        }
        self.sheet.push(style);
    }
}

/// Parse a styles part into a [`StyleSheet`].
pub(crate) fn parse_styles(xml: &[u8]) -> Result<StyleSheet> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);
    let mut parser = StylesParser::default();
    let mut buf = Vec::with_capacity(1024);

    loop {
        let event = reader.read_event_into(&mut buf)?;
        if parser.skip_depth > 0 {
            match event {
                Event::Start(_) => parser.skip_depth += 1,
                Event::End(_) => parser.skip_depth -= 1,
                Event::Eof => break,
                _ => {},
            }
            buf.clear();
            continue;
        }
        match event {
            Event::Start(e) => parser.start(&e, reader.decoder(), false),
            Event::Empty(e) => parser.start(&e, reader.decoder(), true),
            Event::End(e) => parser.end(e.local_name().as_ref()),
            Event::Eof => break,
            _ => {},
        }
        buf.clear();
    }

    Ok(parser.sheet)
}

/// Serialize a style sheet as a minimal styles part.
///
/// Used when no template styles part is available to copy verbatim.
pub(crate) fn write_styles_xml(sheet: &StyleSheet) -> Result<String> {
    let mut xml = String::with_capacity(512 + sheet.len() * 256);
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push('\n');
    xml.push_str(r#"<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">"#);

    let defaults = &sheet.defaults;
    if !defaults.font.is_empty() || !defaults.paragraph.is_empty() {
        xml.push_str("<w:docDefaults>");
        if !defaults.font.is_empty() {
            xml.push_str("<w:rPrDefault><w:rPr>");
            write_run_properties(&defaults.font, &mut xml)?;
            xml.push_str("</w:rPr></w:rPrDefault>");
        }
        if !defaults.paragraph.is_empty() {
            xml.push_str("<w:pPrDefault><w:pPr>");
            write_paragraph_properties(&defaults.paragraph, &mut xml)?;
            xml.push_str("</w:pPr></w:pPrDefault>");
        }
        xml.push_str("</w:docDefaults>");
    }

    for style in &sheet.definitions {
        write!(
            xml,
            "<w:style w:type=\"{}\" w:styleId=\"{}\"",
            style.kind.to_xml(),
            escape(style.id.as_str())
        )?;
        if style.is_default {
            xml.push_str(" w:default=\"1\"");
        }
        xml.push('>');
        write!(xml, "<w:name w:val=\"{}\"/>", escape(style.display_name()))?;
        if let Some(parent) = &style.based_on {
            write!(xml, "<w:basedOn w:val=\"{}\"/>", escape(parent.as_str()))?;
        }
        if !style.properties.paragraph.is_empty() {
            xml.push_str("<w:pPr>");
            write_paragraph_properties(&style.properties.paragraph, &mut xml)?;
            xml.push_str("</w:pPr>");
        }
        if !style.properties.font.is_empty() {
            xml.push_str("<w:rPr>");
            write_run_properties(&style.properties.font, &mut xml)?;
            xml.push_str("</w:rPr>");
        }
        xml.push_str("</w:style>");
    }

    xml.push_str("</w:styles>");
    Ok(xml)
}
