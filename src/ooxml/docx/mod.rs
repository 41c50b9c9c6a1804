/// Word (.docx) document support.
///
/// This module reads a .docx package into the crate's [`crate::document`]
/// tree and writes a formatted tree back, keeping every part it does not
/// understand.
///
/// # Architecture
///
/// - `Package`: the ZIP container and its parts
/// - `reader` / `writer`: the main document part (`word/document.xml`)
/// - `styles`: the styles part (`word/styles.xml`)
/// - `numbering`: list kinds from the numbering part
/// - `properties`: run and paragraph properties shared by both parts
///
/// # Example
///
/// ```rust,no_run
/// use restyle::ooxml::docx::Package;
///
/// let pkg = Package::open("document.docx")?;
/// let doc = pkg.document()?;
/// println!("{}", doc.text());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub mod numbering;
pub mod package;
mod properties;
mod reader;
mod styles;
mod writer;

pub use numbering::Numbering;
pub use package::Package;
