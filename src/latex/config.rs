//! Configuration for LaTeX conversion.
use crate::classify::ClassifierOptions;
use serde::{Deserialize, Serialize};

/// Deepest sectioning command available (`\subparagraph`).
pub const MAX_SECTION_DEPTH: usize = 5;

/// Configuration options for LaTeX conversion.
///
/// # Examples
///
/// ```rust
/// use restyle::latex::LatexOptions;
///
/// let options = LatexOptions::new()
///     .with_styles(false)
///     .with_max_section_depth(2)
///     .with_normalized_hierarchy(true);
/// assert_eq!(options.max_section_depth, 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatexOptions {
    /// Whether to render bold, italic and underline runs
    pub include_styles: bool,
    /// Argument of `\documentclass`
    pub document_class: String,
    /// Deepest sectioning level emitted; deeper headings are clamped
    pub max_section_depth: usize,
    /// Never let a heading sit more than one level below its predecessor
    pub normalize_hierarchy: bool,
    /// Emit informational events while converting
    pub verbose: bool,
    /// Options for classifying paragraphs that carry no style metadata
    pub classifier: ClassifierOptions,
}

impl Default for LatexOptions {
    fn default() -> Self {
        Self {
            include_styles: true,
            document_class: "article".to_string(),
            max_section_depth: 3,
            normalize_hierarchy: false,
            verbose: false,
            classifier: ClassifierOptions::default(),
        }
    }
}

impl LatexOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to include text styles.
    #[inline]
    pub fn with_styles(mut self, include: bool) -> Self {
        self.include_styles = include;
        self
    }

    #[inline]
    pub fn with_document_class(mut self, class: impl Into<String>) -> Self {
        self.document_class = class.into();
        self
    }

    /// Set the deepest sectioning level, clamped into `1..=5`.
    #[inline]
    pub fn with_max_section_depth(mut self, depth: usize) -> Self {
        self.max_section_depth = depth.clamp(1, MAX_SECTION_DEPTH);
        self
    }

    #[inline]
    pub fn with_normalized_hierarchy(mut self, normalize: bool) -> Self {
        self.normalize_hierarchy = normalize;
        self
    }

    #[inline]
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    #[inline]
    pub fn with_classifier(mut self, classifier: ClassifierOptions) -> Self {
        self.classifier = classifier;
        self
    }
}
