//! ToLatex implementations for document types.
use super::config::LatexOptions;
use super::traits::ToLatex;
use super::writer::LatexWriter;
use crate::common::Result;
use crate::document::{Document, Paragraph, Run, Table};

impl ToLatex for Document {
    fn to_latex_with_options(&self, options: &LatexOptions) -> Result<String> {
        let mut writer = LatexWriter::new(options.clone());
        for element in &self.elements {
            writer.write_element(element)?;
        }
        writer.finish_document()
    }
}

impl ToLatex for Paragraph {
    fn to_latex_with_options(&self, options: &LatexOptions) -> Result<String> {
        let mut writer = LatexWriter::new(options.clone());
        writer.write_paragraph(self)?;
        Ok(writer.finish_fragment())
    }
}

impl ToLatex for Run {
    fn to_latex_with_options(&self, options: &LatexOptions) -> Result<String> {
        let mut writer = LatexWriter::new(options.clone());
        writer.write_run(self);
        Ok(writer.finish_fragment())
    }
}

impl ToLatex for Table {
    fn to_latex_with_options(&self, options: &LatexOptions) -> Result<String> {
        let mut writer = LatexWriter::new(options.clone());
        writer.write_table(self)?;
        Ok(writer.finish_fragment())
    }
}
