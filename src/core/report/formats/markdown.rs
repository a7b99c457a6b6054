//! Markdown report generator
//!
//! Renders each page as Markdown tables separated by horizontal rules. Group
//! rows become bold single-cell rows.

use crate::core::report::{Block, Document, ReportGenerator, Row, Table};
use crate::core::report::document::{LABEL_HEADER, VALUE_HEADER};
use std::error::Error;
use std::fmt::Write;
use std::fs;
use std::path::Path;

/// Embedded Markdown report template
const MARKDOWN_TEMPLATE: &str = include_str!("../templates/report.md");

/// Markdown report generator
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Create a new Markdown reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Render the report using template substitution
    #[allow(clippy::unused_self)]
    fn render_template(&self, doc: &Document) -> String {
        let mut output = MARKDOWN_TEMPLATE.to_string();
        output = output.replace("{{title}}", &doc.title);
        output = output.replace("{{body}}", &Self::generate_body(doc));
        output = output.replace("{{footer}}", doc.footer().unwrap_or_default());
        output
    }

    /// Everything between title and footer
    fn generate_body(doc: &Document) -> String {
        let mut body = String::new();
        for (index, page) in doc.pages.iter().enumerate() {
            if index > 0 {
                body.push_str("\n---\n\n");
            }
            for block in &page.blocks {
                match block {
                    // title and footer are placed by the template
                    Block::Title(_) | Block::Footer(_) => {}
                    Block::Subtitle(text) => {
                        let _ = writeln!(body, "_{text}_\n");
                    }
                    Block::Notice(text) => {
                        let _ = writeln!(body, "> {text}\n");
                    }
                    Block::Heading(text) => {
                        let _ = writeln!(body, "## {text}\n");
                    }
                    Block::Table(table) => body.push_str(&Self::generate_table(table)),
                }
            }
        }
        body
    }

    /// `| Medida | Valor |` table
    fn generate_table(table: &Table) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "| {LABEL_HEADER} | {VALUE_HEADER} |");
        out.push_str("|---|---|\n");
        for row in &table.rows {
            match row {
                Row::Group(title) => {
                    let _ = writeln!(out, "| **{}** | |", escape_cell(title));
                }
                Row::Entry { label, value } => {
                    let _ = writeln!(out, "| {} | {} |", escape_cell(label), escape_cell(value));
                }
            }
        }
        out.push('\n');
        out
    }
}

/// Keep user text from breaking table syntax
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for MarkdownReporter {
    fn generate(&self, doc: &Document, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let report_content = self.render(doc)?;
        fs::write(output_path, report_content)?;
        Ok(())
    }

    fn render(&self, doc: &Document) -> Result<String, Box<dyn Error>> {
        Ok(self.render_template(doc))
    }
}
