//! Text heuristics that assign a [`ContentCategory`] to plain text.
//!
//! Rules are tried in a fixed order and the first match wins:
//!
//! 1. Empty text is [`ContentCategory::Unknown`].
//! 2. A section marker (`1.`, `2)`, `IV.`, `1.2.3`) followed by heading-like
//!    text is a heading. Nested numbering sets the level.
//! 3. A bullet marker (`•`, `-`, `*`) is an unordered list item.
//! 4. An enumeration marker (`1.`, `(2)`, `a)`) is an ordered list item.
//! 5. Short all-caps text is a title.
//! 6. Short title-case text without terminal punctuation is a level 2
//!    heading.
//! 7. Text opening with a quotation mark is a quote.
//! 8. Anything else is body text.
//!
//! Every function here is pure: the same text and options always yield the
//! same category.

use super::category::{ContentCategory, MAX_HEADING_LEVEL, normalize_text};
use super::config::ClassifierOptions;
use crate::document::ListKind;
use once_cell::sync::Lazy;
use regex::Regex;

static NESTED_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+(?:\.\d+)+)\.?\s+").unwrap());
static NUMERIC_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+[.)]\s+").unwrap());
static ROMAN_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[IVXivx]+[.)]\s+").unwrap());
static BULLET_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[•\-*]\s+").unwrap());
static ORDERED_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:\d+[.)]|\(\d+\)|[A-Za-z][.)]|\([A-Za-z]\))\s+").unwrap());

const QUOTE_OPENERS: &[char] = &['"', '\'', '“', '‘', '«', '„'];

/// Minor words that may stay lowercase inside title-case text.
const MINOR_WORDS: &[&str] = &[
    "a", "an", "and", "as", "at", "but", "by", "for", "from", "in", "nor", "of", "on", "or", "the",
    "to", "with",
];

/// Classify `text` after normalizing its whitespace.
pub fn classify_text(text: &str, options: &ClassifierOptions) -> ContentCategory {
    classify_normalized(&normalize_text(text), options)
}

/// Classify text that is already normalized.
pub(crate) fn classify_normalized(text: &str, options: &ClassifierOptions) -> ContentCategory {
    if text.is_empty() {
        return ContentCategory::Unknown;
    }

    let max_level = usize::from(options.max_heading_level.clamp(1, MAX_HEADING_LEVEL));

    if let Some((depth, rest)) = section_marker(text)
        && is_heading_like(rest, options.heading_max_words)
    {
        return ContentCategory::heading(depth.min(max_level));
    }

    if BULLET_MARKER.is_match(text) {
        return ContentCategory::ListItem(ListKind::Unordered);
    }
    if ORDERED_MARKER.is_match(text) {
        return ContentCategory::ListItem(ListKind::Ordered);
    }

    let words = word_count(text);
    if words <= options.title_max_words && is_all_caps(text) {
        return ContentCategory::Title;
    }
    if words <= options.heading_max_words && !ends_with_terminal(text, true) && is_title_case(text)
    {
        return ContentCategory::heading(2.min(max_level));
    }

    if text.starts_with(QUOTE_OPENERS) {
        return ContentCategory::Quote;
    }

    ContentCategory::BodyText
}

/// Byte length of a leading section or list marker in raw `text`, including
/// any whitespace around it.
///
/// Used to strip markers the output format renders on its own.
pub fn marker_len(text: &str) -> Option<usize> {
    let trimmed = text.trim_start();
    let leading = text.len() - trimmed.len();
    [
        &*NESTED_MARKER,
        &*NUMERIC_MARKER,
        &*ROMAN_MARKER,
        &*BULLET_MARKER,
        &*ORDERED_MARKER,
    ]
    .into_iter()
    .find_map(|pattern| pattern.find(trimmed))
    .map(|m| leading + m.end())
}

/// Byte length of a leading section marker (`1.`, `IV)`, `2.3`) in raw
/// `text`, including surrounding whitespace.
///
/// Unlike [`marker_len`], letter enumerators such as `J.` never count, so
/// initials at the start of a heading survive.
pub fn section_marker_len(text: &str) -> Option<usize> {
    let trimmed = text.trim_start();
    section_marker(trimmed).map(|(_, rest)| text.len() - rest.len())
}

/// Split a section marker off `text`, returning the heading depth it implies
/// and the remaining text.
fn section_marker(text: &str) -> Option<(usize, &str)> {
    if let Some(caps) = NESTED_MARKER.captures(text) {
        let depth = caps.get(1).map_or(1, |m| m.as_str().split('.').count());
        let end = caps.get(0).map_or(0, |m| m.end());
        return Some((depth, &text[end..]));
    }
    NUMERIC_MARKER
        .find(text)
        .or_else(|| ROMAN_MARKER.find(text))
        .map(|m| (1, &text[m.end()..]))
}

/// Text after a section marker reads as a heading when it introduces
/// something (ends with a colon) or is short and unpunctuated.
fn is_heading_like(rest: &str, max_words: usize) -> bool {
    if rest.is_empty() {
        return false;
    }
    rest.ends_with(':') || (!ends_with_terminal(rest, false) && word_count(rest) <= max_words)
}

fn ends_with_terminal(text: &str, include_colon: bool) -> bool {
    match text.chars().next_back() {
        Some('.' | '!' | '?' | ';' | ',') => true,
        Some(':') => include_colon,
        _ => false,
    }
}

#[inline]
fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

fn is_all_caps(text: &str) -> bool {
    text.chars().any(char::is_uppercase) && !text.chars().any(char::is_lowercase)
}

/// Every word starts with an uppercase letter, except minor words after the
/// first. Words without letters are ignored.
fn is_title_case(text: &str) -> bool {
    let mut seen_word = false;
    for (position, word) in text.split_whitespace().enumerate() {
        let Some(first) = word.chars().find(|c| c.is_alphabetic()) else {
            continue;
        };
        seen_word = true;
        if first.is_uppercase() {
            continue;
        }
        let bare = word.trim_matches(|c: char| !c.is_alphanumeric());
        if position == 0 || !MINOR_WORDS.contains(&bare) {
            return false;
        }
    }
    seen_word
}
