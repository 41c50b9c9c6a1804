//! Configuration for transferring template formatting onto a document.
use crate::classify::ClassifierOptions;
use serde::{Deserialize, Serialize};

/// Options for [`crate::format::apply_formatting_with_options`].
///
/// # Examples
///
/// ```rust
/// use restyle::format::FormatOptions;
///
/// let options = FormatOptions::new()
///     .with_verbose(true)
///     .with_paragraph_properties(false);
/// assert!(options.verbose);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    /// Emit informational and per-paragraph diagnostic events
    pub verbose: bool,
    /// Also fill unset paragraph properties (alignment, spacing, indentation)
    /// from the effective style
    pub fill_paragraph_properties: bool,
    /// Options for the content classifier
    pub classifier: ClassifierOptions,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            verbose: false,
            fill_paragraph_properties: true,
            classifier: ClassifierOptions::default(),
        }
    }
}

impl FormatOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    #[inline]
    pub fn with_paragraph_properties(mut self, fill: bool) -> Self {
        self.fill_paragraph_properties = fill;
        self
    }

    #[inline]
    pub fn with_classifier(mut self, classifier: ClassifierOptions) -> Self {
        self.classifier = classifier;
        self
    }
}
