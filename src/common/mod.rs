//! Common types, traits, and utilities shared across the crate.
//!
//! This module provides the error type, style property types and unit
//! conversions used by both the formatting and the LaTeX pipelines.

// Submodule declarations
pub mod error;
pub mod style;
pub mod unit;

// Re-exports for convenience
pub use error::{Error, RegistryError, Result};
pub use style::{Alignment, FontProperties, ParagraphProperties, RGBColor, StyleProperties};
