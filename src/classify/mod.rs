//! Content classification.
//!
//! A [`Classifier`] assigns each unit of content a [`ContentCategory`] from
//! its text alone. Results are memoized in a [`ClassificationCache`], keyed by
//! the whitespace-normalized text, so repeated paragraphs (across one
//! document or many) are classified once.
//!
//! # Examples
//!
//! ```
//! use restyle::classify::{Classifier, ClassifierOptions, ContentCategory};
//!
//! let classifier = Classifier::new(ClassifierOptions::default());
//! assert_eq!(classifier.classify("1. Introduction"), ContentCategory::heading(1));
//! assert_eq!(classifier.classify("ANNUAL REPORT"), ContentCategory::Title);
//! assert_eq!(classifier.cache().len(), 2);
//! ```

pub mod cache;
pub mod category;
pub mod config;
pub mod heuristics;

pub use cache::{CacheStats, ClassificationCache, DEFAULT_CACHE_CAPACITY};
pub use category::{ContentCategory, ContentUnit, HeadingLevel, MAX_HEADING_LEVEL, normalize_text};
pub use config::ClassifierOptions;
pub use heuristics::classify_text;

use std::sync::Arc;

/// Classifies content units, memoizing results.
///
/// Cheap to clone: clones share one cache.
#[derive(Debug, Clone)]
pub struct Classifier {
    options: ClassifierOptions,
    cache: Arc<ClassificationCache>,
}

impl Classifier {
    /// Create a classifier with its own cache of `options.cache_capacity`.
    pub fn new(options: ClassifierOptions) -> Self {
        let cache = Arc::new(ClassificationCache::new(options.cache_capacity));
        Self { options, cache }
    }

    /// Create a classifier backed by an existing cache.
    ///
    /// Every classifier sharing a cache must use the same options, or cached
    /// categories would leak between configurations.
    pub fn with_cache(options: ClassifierOptions, cache: Arc<ClassificationCache>) -> Self {
        Self { options, cache }
    }

    /// A classifier with default options backed by the process-wide cache.
    pub fn shared() -> Self {
        Self::with_cache(ClassifierOptions::default(), ClassificationCache::shared())
    }

    /// The shared classifier when `options` are the defaults, otherwise a
    /// classifier with its own cache.
    pub fn for_options(options: &ClassifierOptions) -> Self {
        if *options == ClassifierOptions::default() {
            Self::shared()
        } else {
            Self::new(options.clone())
        }
    }

    #[inline]
    pub fn options(&self) -> &ClassifierOptions {
        &self.options
    }

    #[inline]
    pub fn cache(&self) -> &Arc<ClassificationCache> {
        &self.cache
    }

    /// Classify raw text.
    pub fn classify(&self, text: &str) -> ContentCategory {
        self.classify_normalized(&normalize_text(text))
    }

    /// Classify a content unit; its text is already normalized.
    pub fn classify_unit(&self, unit: &ContentUnit) -> ContentCategory {
        self.classify_normalized(&unit.text)
    }

    fn classify_normalized(&self, key: &str) -> ContentCategory {
        if key.is_empty() {
            return ContentCategory::Unknown;
        }
        if let Some(category) = self.cache.get(key) {
            return category;
        }
        let category = heuristics::classify_normalized(key, &self.options);
        self.cache.insert(key.to_owned(), category);
        category
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(ClassifierOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ListKind;
    use proptest::prelude::*;

    #[test]
    fn test_cache_is_keyed_by_normalized_text() {
        let classifier = Classifier::default();
        let first = classifier.classify("  - apples ");
        let second = classifier.classify("-\tapples");
        assert_eq!(first, ContentCategory::ListItem(ListKind::Unordered));
        assert_eq!(first, second);
        assert_eq!(classifier.cache().len(), 1);
        assert_eq!(classifier.cache().stats().hits, 1);
    }

    #[test]
    fn test_empty_text_is_not_cached() {
        let classifier = Classifier::default();
        assert_eq!(classifier.classify(" "), ContentCategory::Unknown);
        assert!(classifier.cache().is_empty());
    }

    #[test]
    fn test_classify_unit() {
        let classifier = Classifier::default();
        let unit = ContentUnit::new("1.  Introduction", 0);
        assert_eq!(unit.text, "1. Introduction");
        assert_eq!(classifier.classify_unit(&unit), ContentCategory::heading(1));
    }

    #[test]
    fn test_clones_share_cache() {
        let classifier = Classifier::default();
        let clone = classifier.clone();
        clone.classify("Body text goes here.");
        assert_eq!(classifier.cache().len(), 1);
    }

    #[test]
    fn test_for_options() {
        let custom = ClassifierOptions::default().with_title_max_words(2);
        let classifier = Classifier::for_options(&custom);
        assert!(!Arc::ptr_eq(classifier.cache(), &ClassificationCache::shared()));
        assert_eq!(classifier.classify("TWO WORDS HERE"), ContentCategory::heading(2));
        let shared = Classifier::for_options(&ClassifierOptions::default());
        assert!(Arc::ptr_eq(shared.cache(), &ClassificationCache::shared()));
    }

    #[test]
    fn test_threads_agree() {
        let classifier = Classifier::new(ClassifierOptions::default().with_cache_capacity(8));
        let texts = ["1. Introduction", "- item", "Plain body text here.", "SUMMARY"];
        let expected: Vec<_> = texts.iter().map(|t| classify_text(t, classifier.options())).collect();
        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    for _ in 0..200 {
                        for (text, want) in texts.iter().zip(&expected) {
                            assert_eq!(classifier.classify(text), *want);
                        }
                    }
                });
            }
        });
    }

    proptest! {
        #[test]
        fn prop_classification_is_deterministic(text in "\\PC{0,60}") {
            let classifier = Classifier::default();
            let first = classifier.classify(&text);
            let cached = classifier.classify(&text);
            let fresh = classify_text(&text, &ClassifierOptions::default());
            prop_assert_eq!(first, cached);
            prop_assert_eq!(first, fresh);
        }

        #[test]
        fn prop_whitespace_does_not_change_category(words in prop::collection::vec("[A-Za-z0-9.:]{1,8}", 1..8)) {
            let classifier = Classifier::default();
            let tight = words.join(" ");
            let loose = format!("  {}\t", words.join("   "));
            prop_assert_eq!(classifier.classify(&tight), classifier.classify(&loose));
        }
    }
}
