//! The `.docx` container: a ZIP archive of XML parts.
//!
//! Parts are held in memory, in archive order, so a package can be read,
//! have its main document part and styles part replaced, and be written back
//! with every other part (images, headers, settings, themes) untouched.
use super::numbering::Numbering;
use super::reader::{BodyFrame, parse_document};
use super::styles::{parse_styles, write_styles_xml};
use super::writer::write_document_xml;
use crate::document::Document;
use crate::ooxml::error::{OoxmlError, Result};
use crate::styles::StyleSheet;
use indexmap::IndexMap;
use quick_xml::Reader;
use quick_xml::events::Event;
use std::fmt::Write as FmtWrite;
use std::io::{Cursor, Read, Seek, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

const CONTENT_TYPES_PART: &str = "[Content_Types].xml";
const PACKAGE_RELS_PART: &str = "_rels/.rels";
const DEFAULT_MAIN_PART: &str = "word/document.xml";

mod rel_type {
    pub const OFFICE_DOCUMENT: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
    pub const STYLES: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";
    pub const NUMBERING: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering";
}

mod content_type {
    pub const WML_DOCUMENT_MAIN: &str =
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml";
    pub const WML_TEMPLATE_MAIN: &str =
        "application/vnd.openxmlformats-officedocument.wordprocessingml.template.main+xml";
    pub const WML_MACRO_ENABLED_MAIN: &str = "application/vnd.ms-word.document.macroEnabled.main+xml";
    pub const WML_STYLES: &str =
        "application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml";
}

/// One `<Relationship>` of a relationships part.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Relationship {
    id: String,
    rel_type: String,
    target: String,
    external: bool,
}

/// A Word (.docx) package.
///
/// # Examples
///
/// ```rust,no_run
/// use restyle::ooxml::docx::Package;
///
/// let pkg = Package::open("report.docx")?;
/// let doc = pkg.document()?;
/// println!("{} paragraphs", doc.paragraph_count());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Package {
    parts: IndexMap<String, Vec<u8>>,
}

impl Package {
    /// Open a .docx package from a file path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    /// Read a package from bytes in memory.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_reader(Cursor::new(bytes))
    }

    /// Read a package from any seekable reader.
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut archive = ZipArchive::new(reader)?;
        let mut parts = IndexMap::with_capacity(archive.len());
        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            if file.is_dir() {
                continue;
            }
            let name = file.name().trim_start_matches('/').to_string();
            let mut data = Vec::with_capacity(usize::try_from(file.size()).unwrap_or(0).min(1 << 24));
            // A bad deflate stream or checksum is a broken container, not an I/O fault
            file.read_to_end(&mut data)
                .map_err(|e| OoxmlError::Zip(format!("cannot read {name}: {e}")))?;
            parts.insert(name, data);
        }

        let package = Self { parts };
        let main = package.main_document_part()?;
        if !package.parts.contains_key(&main) {
            return Err(OoxmlError::PartNotFound(main));
        }
        package.check_main_content_type(&main)?;
        Ok(package)
    }

    /// Get a part's bytes by name (no leading slash).
    #[inline]
    pub fn part(&self, name: &str) -> Option<&[u8]> {
        self.parts.get(name).map(Vec::as_slice)
    }

    /// Names of all parts, in archive order.
    pub fn part_names(&self) -> impl Iterator<Item = &str> {
        self.parts.keys().map(String::as_str)
    }

    /// Insert or replace a part.
    pub fn set_part(&mut self, name: impl Into<String>, data: Vec<u8>) {
        self.parts.insert(name.into(), data);
    }

    /// Name of the main document part, from the package relationships.
    pub fn main_document_part(&self) -> Result<String> {
        let rels = self.relationships_of("")?;
        Ok(rels
            .into_iter()
            .find(|rel| rel.rel_type == rel_type::OFFICE_DOCUMENT && !rel.external)
            .map(|rel| resolve_target("", &rel.target))
            .unwrap_or_else(|| DEFAULT_MAIN_PART.to_string()))
    }

    /// Parse the main document part, its numbering and its styles.
    ///
    /// A missing styles part yields an empty style sheet; a malformed one is
    /// an error, as is a malformed document part.
    pub fn document(&self) -> Result<Document> {
        let main = self.main_document_part()?;
        let xml = self
            .part(&main)
            .ok_or_else(|| OoxmlError::PartNotFound(main.clone()))?;

        let numbering = match self.related_part(&main, rel_type::NUMBERING)? {
            Some(name) => match self.part(&name) {
                Some(data) => Numbering::parse(data)?,
                None => Numbering::default(),
            },
            None => Numbering::default(),
        };
        let styles = self.styles()?.unwrap_or_else(|| {
            log::warn!("{main} has no styles part");
            StyleSheet::default()
        });

        let body = parse_document(xml, &numbering)?;
        log::debug!(
            "parsed {main}: {} block elements, {} styles",
            body.elements.len(),
            styles.len()
        );
        Ok(Document {
            elements: body.elements,
            styles,
        })
    }

    /// Parse the styles part, if the package has one.
    pub fn styles(&self) -> Result<Option<StyleSheet>> {
        match self.styles_part()? {
            Some((_, data)) => Ok(Some(parse_styles(data)?)),
            None => Ok(None),
        }
    }

    /// Name and bytes of the styles part.
    fn styles_part(&self) -> Result<Option<(String, &[u8])>> {
        let main = self.main_document_part()?;
        Ok(self
            .related_part(&main, rel_type::STYLES)?
            .and_then(|name| self.part(&name).map(|data| (name, data))))
    }

    /// Replace the main document part with `document`.
    ///
    /// Styles come from `styles_from`'s styles part, copied byte for byte,
    /// when given; otherwise from `document.styles`. Section properties and
    /// namespace declarations of the current main part are kept.
    pub fn with_document(mut self, document: &Document, styles_from: Option<&Package>) -> Result<Self> {
        let main = self.main_document_part()?;
        let frame = match self.part(&main) {
            Some(xml) => parse_document(xml, &Numbering::default())?.frame,
            None => BodyFrame::default(),
        };
        let xml = write_document_xml(document, &frame)?;
        self.set_part(main.clone(), xml.into_bytes());

        let template_styles = match styles_from {
            Some(template) => template.styles_part()?.map(|(_, data)| data.to_vec()),
            None => None,
        };
        let styles = match template_styles {
            Some(data) => Some(data),
            None if !document.styles.is_empty() => Some(write_styles_xml(&document.styles)?.into_bytes()),
            None => None,
        };
        if let Some(styles) = styles {
            let existing = self.styles_part()?.map(|(name, _)| name);
            let name = match existing {
                Some(name) => name,
                None => self.register_styles_part(&main)?,
            };
            self.set_part(name, styles);
        }
        Ok(self)
    }

    /// Add a styles part next to `main`: a content type override and a
    /// relationship from the main part. Returns the new part's name.
    fn register_styles_part(&mut self, main: &str) -> Result<String> {
        let dir = parent_dir(main);
        let name = if dir.is_empty() {
            "styles.xml".to_string()
        } else {
            format!("{dir}/styles.xml")
        };

        let mut types = self
            .part(CONTENT_TYPES_PART)
            .map(|data| String::from_utf8_lossy(data).into_owned())
            .ok_or_else(|| OoxmlError::PartNotFound(CONTENT_TYPES_PART.to_string()))?;
        if !types.contains(&format!("PartName=\"/{name}\"")) {
            let insert_at = types
                .rfind("</Types>")
                .ok_or_else(|| OoxmlError::InvalidFormat("content types part has no </Types>".to_string()))?;
            types.insert_str(
                insert_at,
                &format!(
                    "<Override PartName=\"/{name}\" ContentType=\"{}\"/>",
                    content_type::WML_STYLES
                ),
            );
            self.set_part(CONTENT_TYPES_PART, types.into_bytes());
        }

        let rels_name = rels_part_for(main);
        let existing = self.relationships_of(main)?;
        let id = (existing.len() + 1..)
            .map(|n| format!("rId{n}"))
            .find(|id| existing.iter().all(|rel| &rel.id != id))
            .unwrap_or_else(|| "rIdStyles".to_string());
        let mut rels = self
            .part(&rels_name)
            .map(|data| String::from_utf8_lossy(data).into_owned())
            .unwrap_or_else(|| {
                concat!(
                    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
                    "\n",
                    r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"></Relationships>"#
                )
                .to_string()
            });
        let insert_at = rels
            .rfind("</Relationships>")
            .ok_or_else(|| OoxmlError::InvalidFormat(format!("{rels_name} has no </Relationships>")))?;
        let mut relationship = String::new();
        write!(
            relationship,
            "<Relationship Id=\"{id}\" Type=\"{}\" Target=\"styles.xml\"/>",
            rel_type::STYLES
        )?;
        rels.insert_str(insert_at, &relationship);
        self.set_part(rels_name, rels.into_bytes());

        log::debug!("registered new styles part {name} as {id}");
        Ok(name)
    }

    /// Serialize the package to bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        for (name, data) in &self.parts {
            writer.start_file(name.as_str(), options)?;
            writer.write_all(data)?;
        }
        Ok(writer.finish()?.into_inner())
    }

    /// Write the package to a file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.to_bytes()?)?;
        Ok(())
    }

    /// The part that `source` relates to with `rel_type`, resolved to a
    /// part name.
    fn related_part(&self, source: &str, rel_type: &str) -> Result<Option<String>> {
        Ok(self
            .relationships_of(source)?
            .into_iter()
            .find(|rel| rel.rel_type == rel_type && !rel.external)
            .map(|rel| resolve_target(parent_dir(source), &rel.target)))
    }

    /// Relationships of part `source`; the empty name means the package.
    fn relationships_of(&self, source: &str) -> Result<Vec<Relationship>> {
        let name = if source.is_empty() {
            PACKAGE_RELS_PART.to_string()
        } else {
            rels_part_for(source)
        };
        match self.part(&name) {
            Some(data) => parse_relationships(data),
            None => Ok(Vec::new()),
        }
    }

    fn check_main_content_type(&self, main: &str) -> Result<()> {
        let Some(types) = self.part(CONTENT_TYPES_PART) else {
            return Ok(());
        };
        let Some(found) = override_content_type(types, main)? else {
            return Ok(());
        };
        match found.as_str() {
            content_type::WML_DOCUMENT_MAIN
            | content_type::WML_TEMPLATE_MAIN
            | content_type::WML_MACRO_ENABLED_MAIN => Ok(()),
            _ => Err(OoxmlError::InvalidContentType {
                expected: content_type::WML_DOCUMENT_MAIN.to_string(),
                got: found,
            }),
        }
    }
}

fn parse_relationships(xml: &[u8]) -> Result<Vec<Relationship>> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);
    let mut rels = Vec::new();
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"Relationship" => {
                let decoder = reader.decoder();
                let mut rel = Relationship {
                    id: String::new(),
                    rel_type: String::new(),
                    target: String::new(),
                    external: false,
                };
                for attr in e.attributes() {
                    let attr = attr?;
                    let value = attr.decode_and_unescape_value(decoder)?.into_owned();
                    match attr.key.as_ref() {
                        b"Id" => rel.id = value,
                        b"Type" => rel.rel_type = value,
                        b"Target" => rel.target = value,
                        b"TargetMode" => rel.external = value == "External",
                        _ => {},
                    }
                }
                rels.push(rel);
            },
            Event::Eof => break,
            _ => {},
        }
        buf.clear();
    }
    Ok(rels)
}

/// The override content type declared for part `name`.
fn override_content_type(xml: &[u8], name: &str) -> Result<Option<String>> {
    let wanted = format!("/{name}");
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"Override" => {
                let decoder = reader.decoder();
                let mut part_name = None;
                let mut content_type = None;
                for attr in e.attributes() {
                    let attr = attr?;
                    match attr.key.as_ref() {
                        b"PartName" => part_name = Some(attr.decode_and_unescape_value(decoder)?.into_owned()),
                        b"ContentType" => {
                            content_type = Some(attr.decode_and_unescape_value(decoder)?.into_owned())
                        },
                        _ => {},
                    }
                }
                if part_name.is_some_and(|p| p.eq_ignore_ascii_case(&wanted)) {
                    return Ok(content_type);
                }
            },
            Event::Eof => return Ok(None),
            _ => {},
        }
        buf.clear();
    }
}

fn parent_dir(part: &str) -> &str {
    part.rfind('/').map_or("", |i| &part[..i])
}

/// `word/document.xml` -> `word/_rels/document.xml.rels`
fn rels_part_for(part: &str) -> String {
    let dir = parent_dir(part);
    let file = part.get(dir.len()..).unwrap_or(part).trim_start_matches('/');
    if dir.is_empty() {
        format!("_rels/{file}.rels")
    } else {
        format!("{dir}/_rels/{file}.rels")
    }
}

/// Resolve a relationship target against the source part's directory.
fn resolve_target(base_dir: &str, target: &str) -> String {
    if let Some(absolute) = target.strip_prefix('/') {
        return absolute.to_string();
    }
    let mut segments: Vec<&str> = base_dir.split('/').filter(|s| !s.is_empty()).collect();
    for segment in target.split('/') {
        match segment {
            "" | "." => {},
            ".." => {
                segments.pop();
            },
            segment => segments.push(segment),
        }
    }
    segments.join("/")
}
