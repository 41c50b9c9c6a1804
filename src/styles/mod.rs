//! Template styles: definitions, the resolved registry, and the mapping from
//! content categories to style ids.
//!
//! # Examples
//!
//! ```
//! use restyle::classify::ContentCategory;
//! use restyle::common::FontProperties;
//! use restyle::styles::{StyleDefinition, StyleKind, StyleMapping, StyleRegistry, StyleSheet};
//!
//! let sheet = StyleSheet::from_definitions([
//!     StyleDefinition::paragraph("Normal").with_font(FontProperties::new().with_family("Calibri")),
//!     StyleDefinition::new("Heading1", StyleKind::Paragraph)
//!         .with_name("heading 1")
//!         .based_on("Normal")
//!         .with_font(FontProperties::new().with_size(16.0)),
//! ]);
//! let registry = StyleRegistry::build(&sheet)?;
//! assert_eq!(registry.effective("Heading1").font().family.as_deref(), Some("Calibri"));
//!
//! let mapping = StyleMapping::resolve(&registry);
//! assert_eq!(mapping.style_for(ContentCategory::heading(1)), "Heading1");
//! # Ok::<(), restyle::common::RegistryError>(())
//! ```

mod definition;
mod mapping;
mod registry;

pub use definition::{StyleDefinition, StyleKind, StyleSheet};
pub use mapping::{StyleMapping, aliases};
pub use registry::{EffectiveStyle, NORMAL_STYLE_ID, StyleRegistry};
