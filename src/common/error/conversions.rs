//! Error conversion implementations.
//!
//! This module contains From trait implementations to convert from internal
//! error types to the unified Error type.
use super::types::Error;

impl From<crate::ooxml::error::OoxmlError> for Error {
    fn from(err: crate::ooxml::error::OoxmlError) -> Self {
        use crate::ooxml::error::OoxmlError;

        match err {
            OoxmlError::Io(e) => Error::Io(e),
            OoxmlError::Xml(s) => Error::XmlError(s),
            OoxmlError::Zip(s) => Error::ZipError(s),
            OoxmlError::PartNotFound(s) => Error::ParseError(format!("part not found: {s}")),
            OoxmlError::InvalidContentType { expected, got } => {
                Error::ParseError(format!("not a Word document: expected {expected}, got {got}"))
            },
            OoxmlError::InvalidFormat(s) => Error::ParseError(s),
        }
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::XmlError(err.to_string())
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::ZipError(err.to_string())
    }
}

impl From<std::fmt::Error> for Error {
    fn from(err: std::fmt::Error) -> Self {
        Error::Other(err.to_string())
    }
}
