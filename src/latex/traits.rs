//! Core trait for LaTeX conversion.
use super::config::LatexOptions;
use crate::common::Result;

/// Types that can be rendered as LaTeX.
///
/// A [`crate::document::Document`] renders as a complete, compilable source
/// file; paragraphs, runs and tables render as body fragments.
///
/// # Examples
///
/// ```rust
/// use restyle::document::Paragraph;
/// use restyle::latex::ToLatex;
///
/// # fn main() -> Result<(), restyle::Error> {
/// let para = Paragraph::from_text("Costs rose 5% in Q3 & Q4.");
/// assert_eq!(para.to_latex()?, r"Costs rose 5\% in Q3 \& Q4.");
/// # Ok(())
/// # }
/// ```
pub trait ToLatex {
    /// Convert this item to LaTeX with default options.
    fn to_latex(&self) -> Result<String> {
        self.to_latex_with_options(&LatexOptions::default())
    }

    /// Convert this item to LaTeX with custom options.
    fn to_latex_with_options(&self, options: &LatexOptions) -> Result<String>;
}
