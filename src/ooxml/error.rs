//! Errors raised while reading or writing a .docx package.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, OoxmlError>;

/// Failure inside the package layer, before a document tree exists.
#[derive(Error, Debug)]
pub enum OoxmlError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed part XML
    #[error("malformed XML: {0}")]
    Xml(String),

    /// The file is not a readable ZIP container
    #[error("broken ZIP container: {0}")]
    Zip(String),

    /// A part named by a relationship or required by the format is absent
    #[error("missing part {0}")]
    PartNotFound(String),

    /// The main part is not a WordprocessingML document
    #[error("main part has content type {got}, expected {expected}")]
    InvalidContentType { expected: String, got: String },

    /// Well-formed XML with a structure Word would reject
    #[error("invalid document structure: {0}")]
    InvalidFormat(String),
}

impl From<quick_xml::Error> for OoxmlError {
    fn from(err: quick_xml::Error) -> Self {
        Self::Xml(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for OoxmlError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Self::Xml(format!("bad attribute: {err}"))
    }
}

impl From<zip::result::ZipError> for OoxmlError {
    fn from(err: zip::result::ZipError) -> Self {
        Self::Zip(err.to_string())
    }
}

// Only reachable through `write!` into a String
impl From<std::fmt::Error> for OoxmlError {
    fn from(err: std::fmt::Error) -> Self {
        Self::Xml(format!("formatting failed: {err}"))
    }
}
