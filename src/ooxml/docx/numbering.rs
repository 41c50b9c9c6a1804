//! The numbering part (`word/numbering.xml`).
//!
//! Only as much is read as is needed to tell bulleted lists from numbered
//! ones: each abstract definition's per-level `numFmt`, and which abstract
//! definition each `numId` instance uses.
use super::properties::attr;
use crate::document::ListKind;
use crate::ooxml::error::Result;
use quick_xml::Reader;
use quick_xml::events::Event;
use std::collections::HashMap;

/// List kinds of the numbering instances in a document.
#[derive(Debug, Clone, Default)]
pub struct Numbering {
    /// (abstractNumId, level) -> kind
    levels: HashMap<(u32, u8), ListKind>,
    /// numId -> abstractNumId
    instances: HashMap<u32, u32>,
}

impl Numbering {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a numbering part.
    pub(crate) fn parse(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(true);

        let mut numbering = Self::default();
        let mut abstract_id: Option<u32> = None;
        let mut level: Option<u8> = None;
        let mut num_id: Option<u32> = None;
        let mut buf = Vec::with_capacity(1024);

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) | Event::Empty(e) => {
                    let decoder = reader.decoder();
                    match e.local_name().as_ref() {
                        b"abstractNum" => {
                            abstract_id = attr(&e, decoder, b"abstractNumId").and_then(|v| v.parse().ok());
                        },
                        b"lvl" if abstract_id.is_some() => {
                            level = attr(&e, decoder, b"ilvl").and_then(|v| v.parse().ok());
                        },
                        b"numFmt" => {
                            if let (Some(abstract_id), Some(level)) = (abstract_id, level) {
                                let kind = match attr(&e, decoder, b"val").as_deref() {
                                    Some("bullet") => ListKind::Unordered,
                                    _ => ListKind::Ordered,
                                };
                                numbering.levels.insert((abstract_id, level), kind);
                            }
                        },
                        b"num" => {
                            num_id = attr(&e, decoder, b"numId").and_then(|v| v.parse().ok());
                        },
                        b"abstractNumId" => {
                            if let Some(id) = num_id
                                && let Some(target) = attr(&e, decoder, b"val").and_then(|v| v.parse().ok())
                            {
                                numbering.instances.insert(id, target);
                            }
                        },
                        _ => {},
                    }
                },
                Event::End(e) => match e.local_name().as_ref() {
                    b"abstractNum" => abstract_id = None,
                    b"lvl" => level = None,
                    b"num" => num_id = None,
                    _ => {},
                },
                Event::Eof => break,
                _ => {},
            }
            buf.clear();
        }

        Ok(numbering)
    }

    /// The list kind of numbering instance `num_id` at `level`.
    ///
    /// `numId` 0 means "no numbering"; unknown instances yield `None`.
    pub fn kind(&self, num_id: u32, level: u8) -> Option<ListKind> {
        if num_id == 0 {
            return None;
        }
        let abstract_id = self.instances.get(&num_id)?;
        self.levels
            .get(&(*abstract_id, level))
            .or_else(|| self.levels.get(&(*abstract_id, 0)))
            .copied()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}
