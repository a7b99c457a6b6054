//! Report generation for student evolution
//!
//! Builders lay out a format-neutral [`Document`] (history or detail); the
//! generators in [`formats`] write it as Markdown, HTML or PDF.

pub mod detail;
pub mod document;
pub mod formats;
pub mod history;

use chrono::NaiveDate;
use std::error::Error;
use std::path::{Path, PathBuf};

pub use detail::build_detail;
pub use document::{Block, Document, Page, PageCursor, Row, Table, MISSING_VALUE};
pub use formats::{HtmlReporter, MarkdownReporter, PdfReporter, ReportFormat};
pub use history::{HistoryReport, EMPTY_NOTICE};

/// Default page height (A4, millimetres)
pub const DEFAULT_PAGE_HEIGHT: f32 = 297.0;

/// `Gerado em: dd/mm/yyyy`
#[must_use]
pub fn generated_on_label(today: NaiveDate) -> String {
    format!("Gerado em: {}", today.format("%d/%m/%Y"))
}

/// Output path for `doc` under `dir`
#[must_use]
pub fn output_path(dir: &Path, doc: &Document, format: ReportFormat) -> PathBuf {
    dir.join(format!("{}.{}", doc.file_stem, format.extension()))
}

/// Generator for a specific output format
pub trait ReportGenerator {
    /// Write `doc` to `output_path`
    ///
    /// # Errors
    /// Returns an error if rendering or writing fails
    fn generate(&self, doc: &Document, output_path: &Path) -> Result<(), Box<dyn Error>>;

    /// Render `doc` as text
    ///
    /// # Errors
    /// Returns an error if rendering fails
    fn render(&self, doc: &Document) -> Result<String, Box<dyn Error>>;
}

/// Generator for `format`
#[must_use]
pub fn generator_for(format: ReportFormat, pdf_converter: Option<&str>) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Markdown => Box::new(MarkdownReporter::new()),
        ReportFormat::Html => Box::new(HtmlReporter::new()),
        ReportFormat::Pdf => Box::new(
            pdf_converter.map_or_else(PdfReporter::new, PdfReporter::with_converter),
        ),
    }
}
