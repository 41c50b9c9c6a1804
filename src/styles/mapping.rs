//! Resolution of content categories to template styles.
use super::registry::StyleRegistry;
use crate::classify::ContentCategory;
use smallvec::{SmallVec, smallvec};
use std::borrow::Cow;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct MappingTarget {
    style_id: String,
    fallback: bool,
}

/// A total mapping from every [`ContentCategory`] to a style id in one
/// registry.
///
/// Built once per template; lookups are an array index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleMapping {
    targets: [MappingTarget; ContentCategory::COUNT],
}

impl StyleMapping {
    /// Map every category to the first alias the registry defines as a
    /// paragraph style, falling back to `Normal`.
    pub fn resolve(registry: &StyleRegistry) -> Self {
        let normal = registry.normal().id.as_str();
        let targets = ContentCategory::ALL.map(|category| {
            let found = aliases(category)
                .iter()
                .find_map(|alias| registry.find_paragraph_style(alias));
            match found {
                Some(style) => MappingTarget {
                    style_id: style.id.clone(),
                    fallback: false,
                },
                None => {
                    log::debug!("no template style for {category}; using {normal}");
                    MappingTarget {
                        style_id: normal.to_string(),
                        fallback: true,
                    }
                },
            }
        });
        Self { targets }
    }

    /// The style id for `category`.
    #[inline]
    pub fn style_for(&self, category: ContentCategory) -> &str {
        &self.targets[category.index()].style_id
    }

    /// Whether `category` had no matching template style.
    #[inline]
    pub fn is_fallback(&self, category: ContentCategory) -> bool {
        self.targets[category.index()].fallback
    }

    /// Number of categories that fell back to `Normal`.
    pub fn fallback_count(&self) -> usize {
        self.targets.iter().filter(|target| target.fallback).count()
    }

    /// Every category with its style id, in [`ContentCategory::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (ContentCategory, &str)> {
        ContentCategory::ALL
            .into_iter()
            .zip(self.targets.iter().map(|target| target.style_id.as_str()))
    }
}

/// Candidate style names for `category`, most preferred first.
///
/// Matched case-insensitively against both display names and ids, so
/// `"Heading 1"` finds Word's built-in `heading 1` and `"Heading1"` its id.
pub fn aliases(category: ContentCategory) -> SmallVec<[Cow<'static, str>; 4]> {
    match category {
        ContentCategory::Title => smallvec![Cow::Borrowed("Title"), Cow::Borrowed("Heading 1")],
        ContentCategory::Heading(level) => {
            let level = level.get();
            let mut names: SmallVec<[Cow<'static, str>; 4]> = smallvec![
                Cow::Owned(format!("Heading {level}")),
                Cow::Owned(format!("Heading{level}")),
            ];
            if level == 1 {
                names.push(Cow::Borrowed("Title"));
            }
            names
        },
        ContentCategory::BodyText => smallvec![
            Cow::Borrowed("Normal"),
            Cow::Borrowed("Body Text"),
            Cow::Borrowed("Default"),
        ],
        ContentCategory::ListItem(_) => smallvec![
            Cow::Borrowed("List Paragraph"),
            Cow::Borrowed("List Bullet"),
            Cow::Borrowed("List Number"),
        ],
        ContentCategory::Quote => smallvec![Cow::Borrowed("Quote"), Cow::Borrowed("Intense Quote")],
        ContentCategory::Unknown => smallvec![Cow::Borrowed("Normal")],
    }
}
