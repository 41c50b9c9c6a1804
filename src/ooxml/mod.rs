//! Office Open XML (OOXML) support.
//!
//! Only WordprocessingML packages (.docx) are handled: reading them into the
//! document tree, and writing a formatted tree back into the package it
//! came from.
pub mod docx;
pub mod error;

pub use docx::Package;
pub use error::{OoxmlError, Result};
