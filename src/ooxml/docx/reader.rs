//! Reading the main document part (`word/document.xml`) into a
//! [`crate::document::Document`] body.
//!
//! The body is streamed once. Paragraphs and tables become document
//! elements; runs keep their text and direct formatting; paragraph style,
//! outline level and list numbering are kept as metadata. Tables nested in a
//! cell are flattened into that cell's paragraphs.
//!
//! Content the document model cannot represent (drawings, text boxes,
//! equations, tracked deletions) is skipped.
use super::numbering::Numbering;
use super::properties::{apply_paragraph_property, apply_run_property, attr};
use crate::document::{Cell, DocumentElement, ListRef, Paragraph, Row, Run, Table};
use crate::ooxml::error::{OoxmlError, Result};
use quick_xml::Reader;
use quick_xml::encoding::Decoder;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesStart, Event};

/// Elements skipped with everything inside them.
const SKIPPED: &[&[u8]] = &[
    b"AlternateContent",
    b"drawing",
    b"pict",
    b"object",
    b"txbxContent",
    b"oMath",
    b"oMathPara",
    b"del",
    b"moveFrom",
    b"rPrChange",
    b"pPrChange",
    b"sectPrChange",
    b"tblPrEx",
];

/// Parts of the main document part the body model does not hold, kept so a
/// rewritten part can restore them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct BodyFrame {
    /// The raw `<w:document ...>` start tag, with its namespace declarations
    pub root: Option<String>,
    /// The raw body-level `<w:sectPr>` element
    pub section: Option<String>,
}

#[derive(Debug)]
pub(crate) struct ParsedBody {
    pub elements: Vec<DocumentElement>,
    pub frame: BodyFrame,
}

#[derive(Default)]
struct TableBuilder {
    table: Table,
    row: Option<Row>,
    cell: Option<Cell>,
}

/// Re-serializes the events of one element verbatim.
struct Capture {
    xml: String,
    depth: usize,
}

impl Capture {
    /// Record `event`; returns true once the captured element is closed.
    fn record(&mut self, event: &Event) -> Result<bool> {
        match event {
            Event::Start(e) => {
                self.xml.push('<');
                self.xml.push_str(utf8(e)?);
                self.xml.push('>');
                self.depth += 1;
            },
            Event::Empty(e) => {
                self.xml.push('<');
                self.xml.push_str(utf8(e)?);
                self.xml.push_str("/>");
            },
            Event::End(e) => {
                self.xml.push_str("</");
                self.xml.push_str(utf8(e)?);
                self.xml.push('>');
                self.depth -= 1;
            },
            Event::Text(e) => self.xml.push_str(utf8(e)?),
            Event::GeneralRef(e) => {
                self.xml.push('&');
                self.xml.push_str(utf8(e)?);
                self.xml.push(';');
            },
            _ => {},
        }
        Ok(self.depth == 0)
    }
}

fn utf8(bytes: &[u8]) -> Result<&str> {
    std::str::from_utf8(bytes).map_err(|e| OoxmlError::InvalidFormat(e.to_string()))
}

struct BodyParser<'n> {
    numbering: &'n Numbering,
    elements: Vec<DocumentElement>,
    tables: Vec<TableBuilder>,
    paragraph: Option<Paragraph>,
    run: Option<Run>,
    /// Pending `w:numPr` of the open paragraph
    num_id: Option<u32>,
    level: u8,
    in_ppr: bool,
    in_rpr: bool,
    in_text: bool,
    skip_depth: usize,
    capture: Option<Capture>,
    frame: BodyFrame,
}

impl<'n> BodyParser<'n> {
    fn new(numbering: &'n Numbering) -> Self {
        Self {
            numbering,
            elements: Vec::new(),
            tables: Vec::new(),
            paragraph: None,
            run: None,
            num_id: None,
            level: 0,
            in_ppr: false,
            in_rpr: false,
            in_text: false,
            skip_depth: 0,
            capture: None,
            frame: BodyFrame::default(),
        }
    }

    fn handle(&mut self, event: Event, decoder: Decoder) -> Result<()> {
        if let Some(capture) = &mut self.capture {
            if capture.record(&event)? {
                self.frame.section = self.capture.take().map(|c| c.xml);
            }
            return Ok(());
        }
        if self.skip_depth > 0 {
            match event {
                Event::Start(_) => self.skip_depth += 1,
                Event::End(_) => self.skip_depth -= 1,
                _ => {},
            }
            return Ok(());
        }

        match event {
            Event::Start(e) => self.start(&e, decoder, false)?,
            Event::Empty(e) => self.start(&e, decoder, true)?,
            Event::End(e) => self.end(e.local_name().as_ref()),
            Event::Text(e) => {
                if self.in_text {
                    let text = utf8(&e)?;
                    if let Some(run) = &mut self.run {
                        run.text.push_str(text);
                    }
                }
            },
            Event::CData(e) => {
                if self.in_text {
                    let text = utf8(&e)?;
                    if let Some(run) = &mut self.run {
                        run.text.push_str(text);
                    }
                }
            },
            Event::GeneralRef(e) => {
                if self.in_text
                    && let Some(run) = &mut self.run
                {
                    if let Some(ch) = e.resolve_char_ref().map_err(|e| OoxmlError::Xml(e.to_string()))? {
                        run.text.push(ch);
                    } else if let Some(resolved) = resolve_predefined_entity(utf8(&e)?) {
                        run.text.push_str(resolved);
                    } else {
                        log::debug!("dropping unknown entity &{};", utf8(&e)?);
                    }
                }
            },
            _ => {},
        }
        Ok(())
    }

    fn start(&mut self, e: &BytesStart, decoder: Decoder, is_empty: bool) -> Result<()> {
        let local = e.local_name();
        let name = local.as_ref();
        if SKIPPED.contains(&name) {
            if !is_empty {
                self.skip_depth = 1;
            }
            return Ok(());
        }

        match name {
            b"document" if self.frame.root.is_none() => {
                self.frame.root = Some(format!("<{}>", utf8(e)?));
            },
            b"sectPr" => {
                let body_level = self.paragraph.is_none() && self.tables.is_empty();
                if body_level && is_empty {
                    self.frame.section = Some(format!("<{}/>", utf8(e)?));
                } else if body_level {
                    self.capture = Some(Capture {
                        xml: format!("<{}>", utf8(e)?),
                        depth: 1,
                    });
                } else if !is_empty {
                    // Section breaks carried inside a paragraph
                    self.skip_depth = 1;
                }
            },
            b"tbl" if !is_empty => self.tables.push(TableBuilder::default()),
            b"tblStyle" => {
                if let Some(builder) = self.tables.last_mut() {
                    builder.table.style = attr(e, decoder, b"val");
                }
            },
            b"tr" => {
                if let Some(builder) = self.tables.last_mut() {
                    builder.row = Some(Row::default());
                }
                if is_empty {
                    self.end(b"tr");
                }
            },
            b"tc" => {
                if let Some(builder) = self.tables.last_mut() {
                    builder.cell = Some(Cell::default());
                }
                if is_empty {
                    self.end(b"tc");
                }
            },
            b"p" => {
                self.paragraph = Some(Paragraph::new());
                self.num_id = None;
                self.level = 0;
                if is_empty {
                    self.end(b"p");
                }
            },
            b"pPr" if !is_empty && self.paragraph.is_some() => self.in_ppr = true,
            b"r" if !is_empty && self.paragraph.is_some() => self.run = Some(Run::default()),
            b"rPr" if !is_empty => self.in_rpr = true,
            b"t" if !is_empty && self.run.is_some() => self.in_text = true,
            b"tab" | b"br" | b"cr" if !self.in_ppr && !self.in_rpr => {
                if let Some(run) = &mut self.run {
                    run.text.push(if name == b"tab" { '\t' } else { '\n' });
                }
            },
            _ => self.property(name, e, decoder),
        }
        Ok(())
    }

    fn property(&mut self, name: &[u8], e: &BytesStart, decoder: Decoder) {
        if self.in_rpr {
            if let Some(run) = &mut self.run {
                apply_run_property(name, e, decoder, &mut run.font);
            }
            return;
        }
        if !self.in_ppr {
            return;
        }
        let Some(paragraph) = &mut self.paragraph else {
            return;
        };
        match name {
            b"pStyle" => paragraph.style = attr(e, decoder, b"val"),
            b"outlineLvl" => {
                // Level 9 marks body text
                paragraph.outline_level = attr(e, decoder, b"val")
                    .and_then(|v| v.parse::<u8>().ok())
                    .filter(|level| *level < 9);
            },
            b"numId" => self.num_id = attr(e, decoder, b"val").and_then(|v| v.parse().ok()),
            b"ilvl" => {
                self.level = attr(e, decoder, b"val")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(0);
            },
            _ => {
                apply_paragraph_property(name, e, decoder, &mut paragraph.properties);
            },
        }
    }

    fn end(&mut self, name: &[u8]) {
        match name {
            b"t" => self.in_text = false,
            b"rPr" => self.in_rpr = false,
            b"pPr" => self.in_ppr = false,
            b"r" => {
                if let Some(run) = self.run.take()
                    && !run.text.is_empty()
                    && let Some(paragraph) = &mut self.paragraph
                {
                    paragraph.runs.push(run);
                }
            },
            b"p" => self.finish_paragraph(),
            b"tc" => {
                if let Some(builder) = self.tables.last_mut()
                    && let Some(cell) = builder.cell.take()
                    && let Some(row) = &mut builder.row
                {
                    row.cells.push(cell);
                }
            },
            b"tr" => {
                if let Some(builder) = self.tables.last_mut()
                    && let Some(row) = builder.row.take()
                    && !row.cells.is_empty()
                {
                    builder.table.rows.push(row);
                }
            },
            b"tbl" => self.finish_table(),
            _ => {},
        }
    }

    fn finish_paragraph(&mut self) {
        let Some(mut paragraph) = self.paragraph.take() else {
            return;
        };
        self.in_ppr = false;
        if let Some(num_id) = self.num_id.take().filter(|id| *id != 0) {
            paragraph.list_ref = Some(ListRef {
                num_id,
                level: self.level,
            });
            paragraph.numbering = self.numbering.kind(num_id, self.level);
        }

        match self.tables.last_mut() {
            Some(builder) => match &mut builder.cell {
                Some(cell) => cell.paragraphs.push(paragraph),
                None => log::debug!("dropping paragraph outside a table cell"),
            },
            None => self.elements.push(paragraph.into()),
        }
    }

    fn finish_table(&mut self) {
        let Some(builder) = self.tables.pop() else {
            return;
        };
        let table = builder.table;
        if table.rows.is_empty() {
            log::debug!("dropping table without rows");
            return;
        }
        match self.tables.last_mut() {
            Some(parent) => {
                if let Some(cell) = &mut parent.cell {
                    let paragraphs = table
                        .rows
                        .into_iter()
                        .flat_map(|row| row.cells)
                        .flat_map(|cell| cell.paragraphs);
                    cell.paragraphs.extend(paragraphs);
                }
            },
            None => self.elements.push(table.into()),
        }
    }
}

/// Parse the main document part.
pub(crate) fn parse_document(xml: &[u8], numbering: &Numbering) -> Result<ParsedBody> {
    // Whitespace inside <w:t> is content, so text is never trimmed
    let mut reader = Reader::from_reader(xml);
    let mut parser = BodyParser::new(numbering);
    let mut buf = Vec::with_capacity(4096);

    loop {
        let event = reader.read_event_into(&mut buf)?;
        if matches!(event, Event::Eof) {
            break;
        }
        parser.handle(event, reader.decoder())?;
        buf.clear();
    }

    if parser.paragraph.is_some() || !parser.tables.is_empty() {
        return Err(OoxmlError::InvalidFormat(
            "document body ended inside an open paragraph or table".to_string(),
        ));
    }

    Ok(ParsedBody {
        elements: parser.elements,
        frame: parser.frame,
    })
}
