//! Tuning knobs for the content classifier.
use super::cache::DEFAULT_CACHE_CAPACITY;
use super::category::MAX_HEADING_LEVEL;
use serde::{Deserialize, Serialize};

/// Options for [`crate::classify::Classifier`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierOptions {
    /// Maximum words for all-caps text to count as a title
    pub title_max_words: usize,

    /// Maximum words for title-case text, or text after a section marker,
    /// to count as a heading
    pub heading_max_words: usize,

    /// Deepest heading level the classifier will assign
    pub max_heading_level: u8,

    /// Capacity of a classifier-owned cache
    pub cache_capacity: usize,
}

impl Default for ClassifierOptions {
    fn default() -> Self {
        Self {
            title_max_words: 8,
            heading_max_words: 12,
            max_heading_level: MAX_HEADING_LEVEL,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl ClassifierOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title_max_words(mut self, words: usize) -> Self {
        self.title_max_words = words;
        self
    }

    pub fn with_heading_max_words(mut self, words: usize) -> Self {
        self.heading_max_words = words;
        self
    }

    /// Limit assigned heading levels; clamped into `1..=6`.
    pub fn with_max_heading_level(mut self, level: u8) -> Self {
        self.max_heading_level = level.clamp(1, MAX_HEADING_LEVEL);
        self
    }

    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity.max(1);
        self
    }
}
