//! Unified error types for restyle.
//!
//! This module provides a single error type covering parsing, package I/O,
//! registry construction and configuration.

// Submodule declarations
pub mod conversions;
pub mod types;

// Re-exports
pub use types::{Error, RegistryError, Result};
