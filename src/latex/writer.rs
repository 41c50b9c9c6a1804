use super::config::{LatexOptions, MAX_SECTION_DEPTH};
use super::escape::escape_latex;
use crate::classify::{ContentCategory, heuristics};
use crate::common::Result;
use crate::document::{Cell, DocumentElement, ListKind, Paragraph, Run, Table};
use std::fmt::Write as _;

/// Packages every generated document loads, as `(options, name)`.
const PACKAGES: &[(&str, &str)] = &[
    ("utf8", "inputenc"),
    ("T1", "fontenc"),
    ("", "lmodern"),
    ("", "array"),
];

/// Sectioning commands by depth, `\section` first.
const SECTION_COMMANDS: [&str; MAX_SECTION_DEPTH] = [
    "section",
    "subsection",
    "subsubsection",
    "paragraph",
    "subparagraph",
];

/// How one paragraph is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Block {
    Title,
    /// Heading level, with the byte length of a section marker to strip
    Heading(usize, usize),
    /// List item, with the byte length of a textual marker to strip
    ListItem(ListKind, usize),
    Quote,
    Body,
    Empty,
}

/// Low-level writer for LaTeX generation.
///
/// Paragraphs are written in order; consecutive list items of one kind share
/// a single list environment, which stays open until a non-list paragraph,
/// a table, or the end of the document.
pub(crate) struct LatexWriter {
    /// The body buffer
    buffer: String,
    options: LatexOptions,
    /// Text of the first title paragraph, rendered in the preamble
    title: Option<String>,
    open_list: Option<ListKind>,
    /// Depth of the last sectioning command, 0 before the first
    section_depth: usize,
    /// Inside a tabular cell, where line breaks would end the row
    in_table: bool,
    headings: usize,
    list_items: usize,
    tables: usize,
}

impl LatexWriter {
    pub fn new(options: LatexOptions) -> Self {
        Self {
            buffer: String::with_capacity(4096),
            options,
            title: None,
            open_list: None,
            section_depth: 0,
            in_table: false,
            headings: 0,
            list_items: 0,
            tables: 0,
        }
    }

    pub fn write_element(&mut self, element: &DocumentElement) -> Result<()> {
        match element {
            DocumentElement::Paragraph(para) => self.write_paragraph(para),
            DocumentElement::Table(table) => self.write_table(table),
        }
    }

    pub fn write_paragraph(&mut self, para: &Paragraph) -> Result<()> {
        let text = para.text();
        match self.block_for(para, &text) {
            Block::Empty => {},
            Block::Title if self.title.is_none() => {
                self.close_list();
                self.title = Some(escape_latex(&single_line(&text)).into_owned());
            },
            Block::Title => self.write_heading(1, &text, 0)?,
            Block::Heading(level, skip) => self.write_heading(level, &text, skip)?,
            Block::ListItem(kind, skip) => self.write_list_item(kind, &para.runs, skip),
            Block::Quote => {
                self.close_list();
                self.buffer.push_str("\\begin{quote}\n");
                self.write_runs(&para.runs, 0);
                self.buffer.push_str("\n\\end{quote}\n\n");
            },
            Block::Body => {
                self.close_list();
                self.write_runs(&para.runs, 0);
                self.buffer.push_str("\n\n");
            },
        }
        Ok(())
    }

    /// Decide how to render `para`.
    ///
    /// Structural metadata (real list numbering, an outline level, a
    /// recognized style) is trusted first; text heuristics only decide
    /// paragraphs that carry none.
    fn block_for(&self, para: &Paragraph, text: &str) -> Block {
        if para.is_blank() {
            return Block::Empty;
        }
        if let Some(kind) = para.numbering {
            return Block::ListItem(kind, 0);
        }
        if let Some(level) = para.outline_level {
            return Block::Heading(usize::from(level) + 1, 0);
        }
        if let Some(block) = para.style.as_deref().and_then(block_for_style) {
            return match block {
                Block::ListItem(kind, _) => Block::ListItem(kind, 0),
                block => block,
            };
        }

        match heuristics::classify_text(text, &self.options.classifier) {
            ContentCategory::Title => Block::Title,
            ContentCategory::Heading(level) => Block::Heading(
                usize::from(level.get()),
                heuristics::section_marker_len(text).unwrap_or(0),
            ),
            ContentCategory::ListItem(kind) => {
                Block::ListItem(kind, heuristics::marker_len(text).unwrap_or(0))
            },
            ContentCategory::Quote => Block::Quote,
            ContentCategory::BodyText => Block::Body,
            ContentCategory::Unknown => Block::Empty,
        }
    }

    fn write_heading(&mut self, level: usize, text: &str, skip: usize) -> Result<()> {
        self.close_list();
        let max = self.options.max_section_depth.clamp(1, MAX_SECTION_DEPTH);
        let mut depth = level.clamp(1, max);
        if self.options.normalize_hierarchy {
            depth = depth.min(self.section_depth + 1);
        }
        self.section_depth = depth;
        self.headings += 1;

        let content = single_line(text.get(skip..).unwrap_or(text));
        writeln!(
            self.buffer,
            "\\{}{{{}}}\n",
            SECTION_COMMANDS[depth - 1],
            escape_latex(&content)
        )?;
        Ok(())
    }

    fn write_list_item(&mut self, kind: ListKind, runs: &[Run], skip: usize) {
        if self.open_list != Some(kind) {
            self.close_list();
            self.buffer.push_str(match kind {
                ListKind::Ordered => "\\begin{enumerate}\n",
                ListKind::Unordered => "\\begin{itemize}\n",
            });
            self.open_list = Some(kind);
        }
        self.list_items += 1;
        self.buffer.push_str("  \\item ");
        self.write_runs(runs, skip);
        self.buffer.push('\n');
    }

    fn close_list(&mut self) {
        if let Some(kind) = self.open_list.take() {
            self.buffer.push_str(match kind {
                ListKind::Ordered => "\\end{enumerate}\n\n",
                ListKind::Unordered => "\\end{itemize}\n\n",
            });
        }
    }

    /// Write `runs`, dropping the first `skip` bytes of their joined text.
    fn write_runs(&mut self, runs: &[Run], mut skip: usize) {
        for run in runs {
            if skip >= run.text.len() {
                skip -= run.text.len();
                continue;
            }
            let text = run.text.get(skip..).unwrap_or_default();
            skip = 0;
            self.write_styled(run, text);
        }
    }

    pub fn write_run(&mut self, run: &Run) {
        self.write_styled(run, &run.text);
    }

    fn write_styled(&mut self, run: &Run, text: &str) {
        if text.is_empty() {
            return;
        }
        let styled = self.options.include_styles && !text.trim().is_empty();
        let wrappers: [(&str, bool); 3] = [
            ("\\textbf{", styled && run.bold()),
            ("\\textit{", styled && run.italic()),
            ("\\underline{", styled && run.underline()),
        ];
        for (open, enabled) in wrappers {
            if enabled {
                self.buffer.push_str(open);
            }
        }
        self.write_text(text);
        for (_, enabled) in wrappers {
            if enabled {
                self.buffer.push('}');
            }
        }
    }

    fn write_text(&mut self, text: &str) {
        for (i, line) in text.split('\n').enumerate() {
            if i > 0 {
                self.buffer
                    .push_str(if self.in_table { " " } else { "\\newline " });
            }
            let line = line.replace('\t', " ");
            self.buffer.push_str(&escape_latex(&line));
        }
    }

    pub fn write_table(&mut self, table: &Table) -> Result<()> {
        self.close_list();
        let columns = table.column_count();
        if columns == 0 {
            return Ok(());
        }
        self.tables += 1;

        writeln!(self.buffer, "\\begin{{tabular}}{{|{}}}", "l|".repeat(columns))?;
        self.buffer.push_str("\\hline\n");
        self.in_table = true;
        for row in &table.rows {
            for column in 0..columns {
                if column > 0 {
                    self.buffer.push_str(" & ");
                }
                if let Some(cell) = row.cells.get(column) {
                    self.write_cell(cell);
                }
            }
            self.buffer.push_str(" \\\\\n\\hline\n");
        }
        self.in_table = false;
        self.buffer.push_str("\\end{tabular}\n\n");
        Ok(())
    }

    fn write_cell(&mut self, cell: &Cell) {
        let mut first = true;
        for para in cell.paragraphs.iter().filter(|p| !p.is_blank()) {
            if !first {
                self.buffer.push(' ');
            }
            first = false;
            self.write_runs(&para.runs, 0);
        }
    }

    /// The body written so far, as a fragment.
    pub fn finish_fragment(mut self) -> String {
        self.close_list();
        let trimmed = self.buffer.trim_end().len();
        self.buffer.truncate(trimmed);
        self.buffer
    }

    /// Wrap the body in a preamble and `document` environment.
    pub fn finish_document(mut self) -> Result<String> {
        self.close_list();
        let mut output = String::with_capacity(self.buffer.len() + 512);
        writeln!(output, "\\documentclass{{{}}}", self.options.document_class)?;
        for (options, package) in PACKAGES {
            if options.is_empty() {
                writeln!(output, "\\usepackage{{{package}}}")?;
            } else {
                writeln!(output, "\\usepackage[{options}]{{{package}}}")?;
            }
        }
        if let Some(title) = &self.title {
            writeln!(output, "\n\\title{{{title}}}\n\\date{{}}")?;
        }
        output.push_str("\n\\begin{document}\n\n");
        if self.title.is_some() {
            output.push_str("\\maketitle\n\n");
        }
        output.push_str(&self.buffer);
        output.push_str("\\end{document}\n");

        if self.options.verbose {
            log::info!(
                "LaTeX output: {} headings, {} list items, {} tables, {} bytes",
                self.headings,
                self.list_items,
                self.tables,
                output.len()
            );
        }
        Ok(output)
    }
}

/// Map a well-known style id or name to a block, ignoring case and spaces.
fn block_for_style(style: &str) -> Option<Block> {
    let key: String = style
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();
    match key.as_str() {
        "title" => Some(Block::Title),
        "listbullet" | "listparagraph" => Some(Block::ListItem(ListKind::Unordered, 0)),
        "listnumber" => Some(Block::ListItem(ListKind::Ordered, 0)),
        "quote" | "intensequote" => Some(Block::Quote),
        _ => key
            .strip_prefix("heading")
            .and_then(|level| level.parse::<usize>().ok())
            .filter(|level| *level >= 1)
            .map(|level| Block::Heading(level, 0)),
    }
}

/// Collapse line breaks and tabs for command arguments, where a blank line
/// would end the paragraph mid-argument.
fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
