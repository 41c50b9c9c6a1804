//! Escaping of LaTeX reserved characters.
//!
//! Escaping is a single pass over the input through a static table, so a
//! replacement is never itself re-escaped (escaping `\` to `\textbackslash{}`
//! must not turn its braces into `\{` and `\}`).
use phf::phf_map;
use std::borrow::Cow;

/// Replacement text for each LaTeX reserved character.
static LATEX_ESCAPES: phf::Map<char, &'static str> = phf_map! {
    '#' => "\\#",
    '$' => "\\$",
    '%' => "\\%",
    '&' => "\\&",
    '_' => "\\_",
    '{' => "\\{",
    '}' => "\\}",
    '~' => "\\textasciitilde{}",
    '^' => "\\textasciicircum{}",
    '\\' => "\\textbackslash{}",
};

/// Escape sequences spelled as a command, mapped back to their character.
const NAMED_ESCAPES: &[(&str, char)] = &[
    ("textasciitilde{}", '~'),
    ("textasciicircum{}", '^'),
    ("textbackslash{}", '\\'),
];

/// Whether `c` must be escaped in LaTeX text.
#[inline]
pub fn is_reserved(c: char) -> bool {
    LATEX_ESCAPES.contains_key(&c)
}

/// Escape every reserved character in `text`.
///
/// Borrows the input when nothing needs escaping.
pub fn escape_latex(text: &str) -> Cow<'_, str> {
    if !text.chars().any(is_reserved) {
        return Cow::Borrowed(text);
    }
    let mut escaped = String::with_capacity(text.len() + text.len() / 4);
    for c in text.chars() {
        match LATEX_ESCAPES.get(&c) {
            Some(replacement) => escaped.push_str(replacement),
            None => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// Reverse [`escape_latex`].
///
/// Returns `None` if `text` contains a bare reserved character or an escape
/// sequence [`escape_latex`] would never produce.
pub fn unescape_latex(text: &str) -> Option<String> {
    let mut unescaped = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(c) = rest.chars().next() {
        rest = &rest[c.len_utf8()..];
        if c != '\\' {
            if is_reserved(c) {
                return None;
            }
            unescaped.push(c);
            continue;
        }
        match rest.chars().next() {
            Some(next @ ('#' | '$' | '%' | '&' | '_' | '{' | '}')) => {
                unescaped.push(next);
                rest = &rest[1..];
            },
            _ => {
                let (command, original) = NAMED_ESCAPES
                    .iter()
                    .find(|(command, _)| rest.starts_with(command))?;
                unescaped.push(*original);
                rest = &rest[command.len()..];
            },
        }
    }
    Some(unescaped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_escape_reserved_characters() {
        assert_eq!(escape_latex("50% of $X_1$"), r"50\% of \$X\_1\$");
        assert_eq!(escape_latex("a & b # c"), r"a \& b \# c");
        assert_eq!(escape_latex("{x}"), r"\{x\}");
        assert_eq!(escape_latex("~^"), r"\textasciitilde{}\textasciicircum{}");
    }

    #[test]
    fn test_backslash_is_escaped_once() {
        assert_eq!(escape_latex(r"C:\temp"), r"C:\textbackslash{}temp");
    }

    #[test]
    fn test_plain_text_is_borrowed() {
        assert!(matches!(escape_latex("plain text"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_unescape_rejects_bare_reserved() {
        assert_eq!(unescape_latex("50%"), None);
        assert_eq!(unescape_latex(r"\unknown"), None);
        assert_eq!(unescape_latex(r"50\%").as_deref(), Some("50%"));
    }

    proptest! {
        #[test]
        fn prop_escape_round_trips(text in "[a-z #$%&_{}~^\\\\]{0,40}") {
            let escaped = escape_latex(&text);
            prop_assert_eq!(unescape_latex(&escaped), Some(text));
        }

        #[test]
        fn prop_escaped_text_has_no_bare_reserved(text in "\\PC{0,40}") {
            prop_assert!(unescape_latex(&escape_latex(&text)).is_some());
        }
    }
}
