//! Style registry: a lookup table of effective styles.
//!
//! The registry is built once from a template's [`StyleSheet`] and is
//! read-only afterwards. Every style's effective properties are resolved at
//! build time by walking its `basedOn` chain up to the root, then layering
//! `Normal` and the document defaults beneath it.
//!
//! # Cycles
//!
//! A `basedOn` chain that revisits a style is a cycle. Resolution is bounded
//! by the number of styles, so a cycle never hangs the builder: the offending
//! style keeps only its own properties (plus `Normal` and the defaults) and
//! is reported through [`StyleRegistry::cyclic_styles`].

use super::definition::{StyleDefinition, StyleKind, StyleSheet};
use crate::common::{FontProperties, ParagraphProperties, RegistryError, StyleProperties};
use fixedbitset::FixedBitSet;
use smallvec::{SmallVec, smallvec};
use std::collections::HashMap;

/// Identifier of the baseline paragraph style.
pub const NORMAL_STYLE_ID: &str = "Normal";

/// The fully inherited properties of one style.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveStyle {
    id: String,
    properties: StyleProperties,
    cyclic: bool,
}

impl EffectiveStyle {
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn properties(&self) -> &StyleProperties {
        &self.properties
    }

    #[inline]
    pub fn font(&self) -> &FontProperties {
        &self.properties.font
    }

    #[inline]
    pub fn paragraph(&self) -> &ParagraphProperties {
        &self.properties.paragraph
    }

    /// Whether this style's `basedOn` chain loops back on itself.
    #[inline]
    pub fn is_cyclic(&self) -> bool {
        self.cyclic
    }
}

/// Read-only mapping from style identifiers to definitions and effective
/// styles.
///
/// Always contains a `Normal` paragraph style: the template's own, its
/// default paragraph style, or a synthetic empty one.
#[derive(Debug, Clone)]
pub struct StyleRegistry {
    styles: Vec<StyleDefinition>,
    effective: Vec<EffectiveStyle>,
    by_id: HashMap<String, usize>,
    /// Lowercased names and ids, for case-insensitive lookup
    by_key: HashMap<String, usize>,
    defaults: StyleProperties,
    normal: usize,
    synthetic_normal: bool,
}

impl StyleRegistry {
    /// Build a registry from a template's style sheet.
    ///
    /// Duplicate identifiers keep the first definition. Fails only when the
    /// sheet defines no styles at all.
    pub fn build(sheet: &StyleSheet) -> Result<Self, RegistryError> {
        if sheet.is_empty() {
            return Err(RegistryError::NoStyles);
        }
        Ok(Self::assemble(&sheet.definitions, &sheet.defaults))
    }

    /// Build a registry, degrading to [`StyleRegistry::synthetic`] on failure.
    pub fn build_or_default(sheet: &StyleSheet) -> Self {
        match Self::build(sheet) {
            Ok(registry) => registry,
            Err(e) => {
                log::warn!("{e}; using a registry with only a default Normal style");
                Self::assemble(&[], &sheet.defaults)
            },
        }
    }

    /// A registry holding nothing but a synthetic, empty `Normal` style.
    pub fn synthetic() -> Self {
        Self::assemble(&[], &StyleProperties::default())
    }

    fn assemble(definitions: &[StyleDefinition], defaults: &StyleProperties) -> Self {
        let mut styles = Vec::with_capacity(definitions.len() + 1);
        let mut by_id = HashMap::with_capacity(definitions.len() + 1);

        for definition in definitions {
            if by_id.contains_key(&definition.id) {
                log::warn!("{}", RegistryError::DuplicateStyle(definition.id.clone()));
                continue;
            }
            by_id.insert(definition.id.clone(), styles.len());
            styles.push(definition.clone());
        }

        let mut synthetic_normal = false;
        let normal = match find_normal(&styles, &by_id) {
            Some(index) => index,
            None => {
                log::debug!("no Normal style defined; adding a synthetic one");
                synthetic_normal = true;
                let index = styles.len();
                let id = if by_id.contains_key(NORMAL_STYLE_ID) {
                    // The id is taken by a non-paragraph style
                    format!("{NORMAL_STYLE_ID}Paragraph")
                } else {
                    NORMAL_STYLE_ID.to_string()
                };
                by_id.insert(id.clone(), index);
                styles.push(StyleDefinition::new(id, StyleKind::Paragraph).with_name(NORMAL_STYLE_ID));
                index
            },
        };

        let mut by_key = HashMap::with_capacity(styles.len() * 2);
        for (index, style) in styles.iter().enumerate() {
            if let Some(name) = &style.name {
                by_key.entry(lookup_key(name)).or_insert(index);
            }
        }
        for (index, style) in styles.iter().enumerate() {
            by_key.entry(lookup_key(&style.id)).or_insert(index);
        }

        let mut registry = Self {
            styles,
            effective: Vec::new(),
            by_id,
            by_key,
            defaults: defaults.clone(),
            normal,
            synthetic_normal,
        };

        let normal_style = registry.resolve(normal, None);
        let effective = (0..registry.styles.len())
            .map(|index| {
                if index == normal {
                    normal_style.clone()
                } else {
                    registry.resolve(index, Some(&normal_style.properties))
                }
            })
            .collect();
        registry.effective = effective;
        registry
    }

    /// Compute the effective style of `styles[index]`.
    fn resolve(&self, index: usize, normal: Option<&StyleProperties>) -> EffectiveStyle {
        let style = &self.styles[index];
        let mut chain: SmallVec<[usize; 8]> = smallvec![index];
        let mut visited = FixedBitSet::with_capacity(self.styles.len());
        visited.insert(index);

        let mut cyclic = false;
        let mut current = index;
        while let Some(parent_id) = self.styles[current].based_on.as_deref() {
            let Some(&parent) = self.by_id.get(parent_id) else {
                log::debug!(
                    "style '{}' is based on unknown style '{parent_id}'",
                    self.styles[current].id
                );
                break;
            };
            if visited.contains(parent) {
                cyclic = true;
                break;
            }
            visited.insert(parent);
            chain.push(parent);
            current = parent;
        }

        let mut properties = style.properties.clone();
        if cyclic {
            log::warn!(
                "style '{}' has a cyclic basedOn chain; ignoring its inheritance",
                style.id
            );
        } else {
            for &ancestor in &chain[1..] {
                properties.inherit_from(&self.styles[ancestor].properties);
            }
        }
        if let Some(normal) = normal {
            properties.inherit_from(normal);
        }
        properties.inherit_from(&self.defaults);

        EffectiveStyle {
            id: style.id.clone(),
            properties,
            cyclic,
        }
    }

    /// Number of styles, including a synthetic `Normal`.
    #[inline]
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Look up a definition by exact identifier.
    #[inline]
    pub fn get(&self, id: &str) -> Option<&StyleDefinition> {
        self.by_id.get(id).map(|&index| &self.styles[index])
    }

    /// Look up a definition by identifier or display name, ignoring case.
    pub fn find(&self, name_or_id: &str) -> Option<&StyleDefinition> {
        self.by_id
            .get(name_or_id)
            .or_else(|| self.by_key.get(&lookup_key(name_or_id)))
            .map(|&index| &self.styles[index])
    }

    /// Like [`StyleRegistry::find`], restricted to paragraph styles.
    ///
    /// A character or table style holding the id or name does not hide a
    /// paragraph style that matches by name or id.
    pub fn find_paragraph_style(&self, name_or_id: &str) -> Option<&StyleDefinition> {
        let is_paragraph = |style: &&StyleDefinition| style.kind == StyleKind::Paragraph;
        if let Some(style) = self.find(name_or_id).filter(is_paragraph) {
            return Some(style);
        }
        let key = lookup_key(name_or_id);
        let paragraphs = || self.styles.iter().filter(is_paragraph);
        paragraphs()
            .find(|style| style.name.as_deref().is_some_and(|name| lookup_key(name) == key))
            .or_else(|| paragraphs().find(|style| lookup_key(&style.id) == key))
    }

    /// The effective style for `id`, or that of `Normal` when `id` is unknown.
    pub fn effective(&self, id: &str) -> &EffectiveStyle {
        let index = self.by_id.get(id).copied().unwrap_or(self.normal);
        &self.effective[index]
    }

    /// The `Normal` paragraph style.
    #[inline]
    pub fn normal(&self) -> &StyleDefinition {
        &self.styles[self.normal]
    }

    /// Whether `Normal` was synthesized because the template lacked one.
    #[inline]
    pub fn has_synthetic_normal(&self) -> bool {
        self.synthetic_normal
    }

    /// Identifiers of the styles whose `basedOn` chain is cyclic.
    pub fn cyclic_styles(&self) -> impl Iterator<Item = &str> {
        self.effective
            .iter()
            .filter(|style| style.cyclic)
            .map(|style| style.id.as_str())
    }

    /// All definitions in template order.
    pub fn iter(&self) -> impl Iterator<Item = &StyleDefinition> {
        self.styles.iter()
    }

    /// The deduplicated definitions (and defaults) as a style sheet.
    ///
    /// Formatted documents carry this sheet, so every style id the
    /// applicator assigns is defined in the output.
    pub fn to_style_sheet(&self) -> StyleSheet {
        StyleSheet {
            definitions: self.styles.clone(),
            defaults: self.defaults.clone(),
        }
    }
}

impl Default for StyleRegistry {
    fn default() -> Self {
        Self::synthetic()
    }
}

fn find_normal(styles: &[StyleDefinition], by_id: &HashMap<String, usize>) -> Option<usize> {
    let is_paragraph = |index: &usize| styles[*index].kind == StyleKind::Paragraph;
    by_id
        .get(NORMAL_STYLE_ID)
        .copied()
        .filter(is_paragraph)
        .or_else(|| {
            styles.iter().position(|style| {
                style.kind == StyleKind::Paragraph
                    && style
                        .name
                        .as_deref()
                        .is_some_and(|name| name.eq_ignore_ascii_case(NORMAL_STYLE_ID))
            })
        })
        .or_else(|| {
            styles
                .iter()
                .position(|style| style.kind == StyleKind::Paragraph && style.is_default)
        })
}

#[inline]
fn lookup_key(name: &str) -> String {
    name.trim().to_lowercase()
}
