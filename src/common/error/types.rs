//! Unified error types for restyle.
//!
//! Only structural failures that prevent building a document tree are fatal.
//! Everything downstream of parsing degrades to a documented fallback instead
//! of returning an error.
use thiserror::Error;

/// Main error type for restyle operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The input could not be turned into a document tree
    #[error("Parse error: {0}")]
    ParseError(String),

    /// XML parsing error
    #[error("XML error: {0}")]
    XmlError(String),

    /// ZIP archive error
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// Style registry could not be built from the template
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Invalid configuration
    #[error("Config error: {0}")]
    Config(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// Failures while building a style registry.
///
/// These never reach callers of [`crate::apply_formatting`]: the registry
/// builder degrades to a synthetic registry holding only `Normal`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The template defines no styles at all
    #[error("template document defines no styles")]
    NoStyles,

    /// Two definitions share one identifier
    #[error("duplicate style identifier: {0}")]
    DuplicateStyle(String),
}

/// Result type for restyle operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Shorthand for a [`Error::ParseError`].
    pub(crate) fn parse(msg: impl Into<String>) -> Self {
        Error::ParseError(msg.into())
    }

    /// Whether this error was raised at the parse boundary.
    #[inline]
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Error::ParseError(_) | Error::XmlError(_) | Error::ZipError(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_error_converts() {
        let err: Error = RegistryError::NoStyles.into();
        assert!(matches!(err, Error::Registry(RegistryError::NoStyles)));
        assert!(!err.is_parse_error());
    }

    #[test]
    fn test_parse_error_display() {
        let err = Error::parse("missing body");
        assert_eq!(err.to_string(), "Parse error: missing body");
        assert!(err.is_parse_error());
    }
}
