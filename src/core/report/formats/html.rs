//! HTML report generator
//!
//! Renders the document through an askama template. The output is
//! self-contained (inline CSS) and breaks pages where the document does, so
//! printing it or piping it through Chrome keeps the layout.

use crate::core::report::document::{LABEL_HEADER, VALUE_HEADER};
use crate::core::report::{Block, Document, ReportGenerator, Row};
use askama::Template;
use std::error::Error;
use std::fs;
use std::path::Path;

struct HtmlRow {
    group: bool,
    label: String,
    value: String,
}

struct HtmlBlock {
    kind: &'static str,
    text: String,
    rows: Vec<HtmlRow>,
}

struct HtmlPage {
    blocks: Vec<HtmlBlock>,
}

#[derive(Template)]
#[template(path = "report.html")]
struct ReportTemplate<'a> {
    title: &'a str,
    label_header: &'a str,
    value_header: &'a str,
    pages: Vec<HtmlPage>,
}

impl HtmlBlock {
    fn text(kind: &'static str, text: &str) -> Self {
        Self {
            kind,
            text: text.to_string(),
            rows: Vec::new(),
        }
    }

    fn from_block(block: &Block) -> Self {
        match block {
            Block::Title(t) => Self::text("title", t),
            Block::Subtitle(t) => Self::text("subtitle", t),
            Block::Notice(t) => Self::text("notice", t),
            Block::Heading(t) => Self::text("heading", t),
            Block::Footer(t) => Self::text("footer", t),
            Block::Table(table) => Self {
                kind: "table",
                text: String::new(),
                rows: table
                    .rows
                    .iter()
                    .map(|row| match row {
                        Row::Group(title) => HtmlRow {
                            group: true,
                            label: title.clone(),
                            value: String::new(),
                        },
                        Row::Entry { label, value } => HtmlRow {
                            group: false,
                            label: label.clone(),
                            value: value.clone(),
                        },
                    })
                    .collect(),
            },
        }
    }
}

/// HTML report generator
pub struct HtmlReporter;

impl HtmlReporter {
    /// Create a new HTML reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for HtmlReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for HtmlReporter {
    fn generate(&self, doc: &Document, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let report_content = self.render(doc)?;
        fs::write(output_path, report_content)?;
        Ok(())
    }

    fn render(&self, doc: &Document) -> Result<String, Box<dyn Error>> {
        let template = ReportTemplate {
            title: &doc.title,
            label_header: LABEL_HEADER,
            value_header: VALUE_HEADER,
            pages: doc
                .pages
                .iter()
                .map(|page| HtmlPage {
                    blocks: page.blocks.iter().map(HtmlBlock::from_block).collect(),
                })
                .collect(),
        };
        Ok(template.render()?)
    }
}
