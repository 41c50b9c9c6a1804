//! YAML configuration for the `restyle` binary and library callers.
//!
//! Every key is optional; missing keys take their defaults.
//!
//! ```yaml
//! format:
//!   verbose: true
//!   fill_paragraph_properties: false
//!   classifier:
//!     title_max_words: 6
//! latex:
//!   document_class: report
//!   max_section_depth: 4
//!   normalize_hierarchy: true
//! ```
use crate::classify::{ClassifierOptions, MAX_HEADING_LEVEL};
use crate::common::{Error, Result};
use crate::format::FormatOptions;
use crate::latex::{LatexOptions, MAX_SECTION_DEPTH};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Options for both pipelines, as loaded from a configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RestyleConfig {
    pub format: FormatOptions,
    pub latex: LatexOptions,
}

impl RestyleConfig {
    /// Parse and validate a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self =
            serde_saphyr::from_str(yaml).map_err(|e| Error::Config(format!("invalid YAML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a YAML configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {e}", path.display())))?;
        log::debug!("loaded configuration from {}", path.display());
        Self::from_yaml_str(&yaml)
    }

    /// Serialize back to YAML.
    pub fn to_yaml_string(&self) -> Result<String> {
        serde_saphyr::to_string(self).map_err(|e| Error::Config(format!("cannot serialize configuration: {e}")))
    }

    /// Reject values the builders would have clamped.
    pub fn validate(&self) -> Result<()> {
        validate_classifier("format.classifier", &self.format.classifier)?;
        validate_classifier("latex.classifier", &self.latex.classifier)?;
        if !(1..=MAX_SECTION_DEPTH).contains(&self.latex.max_section_depth) {
            return Err(Error::Config(format!(
                "latex.max_section_depth must be between 1 and {MAX_SECTION_DEPTH}, got {}",
                self.latex.max_section_depth
            )));
        }
        if self.latex.document_class.trim().is_empty() {
            return Err(Error::Config("latex.document_class must not be empty".to_string()));
        }
        Ok(())
    }
}

fn validate_classifier(key: &str, options: &ClassifierOptions) -> Result<()> {
    if !(1..=MAX_HEADING_LEVEL).contains(&options.max_heading_level) {
        return Err(Error::Config(format!(
            "{key}.max_heading_level must be between 1 and {MAX_HEADING_LEVEL}, got {}",
            options.max_heading_level
        )));
    }
    if options.cache_capacity == 0 {
        return Err(Error::Config(format!("{key}.cache_capacity must be positive")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_is_default() {
        assert_eq!(RestyleConfig::from_yaml_str("").unwrap(), RestyleConfig::default());
        assert_eq!(RestyleConfig::from_yaml_str("  \n").unwrap(), RestyleConfig::default());
    }

    #[test]
    fn test_partial_config() {
        let config = RestyleConfig::from_yaml_str(
            "format:\n  verbose: true\n  classifier:\n    title_max_words: 6\nlatex:\n  document_class: report\n  max_section_depth: 4\n",
        )
        .unwrap();
        assert!(config.format.verbose);
        assert!(config.format.fill_paragraph_properties);
        assert_eq!(config.format.classifier.title_max_words, 6);
        assert_eq!(config.format.classifier.heading_max_words, 12);
        assert_eq!(config.latex.document_class, "report");
        assert_eq!(config.latex.max_section_depth, 4);
        assert!(config.latex.include_styles);
    }

    #[test]
    fn test_out_of_range_values() {
        let err = RestyleConfig::from_yaml_str("latex:\n  max_section_depth: 9\n").unwrap_err();
        assert!(matches!(err, Error::Config(msg) if msg.contains("max_section_depth")));

        let err = RestyleConfig::from_yaml_str("format:\n  classifier:\n    max_heading_level: 0\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_malformed_yaml() {
        let err = RestyleConfig::from_yaml_str("format: [unclosed").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "latex:\n  include_styles: false").unwrap();
        let config = RestyleConfig::load(file.path()).unwrap();
        assert!(!config.latex.include_styles);

        assert!(RestyleConfig::load("/nonexistent/restyle.yaml").is_err());
    }

    #[test]
    fn test_yaml_round_trip() {
        let mut config = RestyleConfig::default();
        config.latex.normalize_hierarchy = true;
        let yaml = config.to_yaml_string().unwrap();
        assert_eq!(RestyleConfig::from_yaml_str(&yaml).unwrap(), config);
    }
}
