//! PDF report generator via HTML-to-PDF conversion
//!
//! Writes the HTML report to a temporary file and prints it to PDF with
//! headless Chrome/Chromium (or a converter given on the command line).

use super::html::HtmlReporter;
use crate::core::report::{Document, ReportGenerator};
use std::error::Error;
use std::path::Path;
use std::process::{Command, Stdio};

/// PDF report generator using HTML-to-PDF conversion
pub struct PdfReporter {
    /// Optional custom PDF converter command
    converter: Option<String>,
}

impl PdfReporter {
    /// Create a new PDF reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { converter: None }
    }

    /// Create a PDF reporter with a custom converter
    #[must_use]
    pub fn with_converter(converter: &str) -> Self {
        Self {
            converter: Some(converter.to_owned()),
        }
    }

    /// Detect available Chrome/Chromium browser
    fn detect_chrome() -> Option<String> {
        let candidates = [
            "google-chrome",
            "chrome",
            "chromium",
            "chromium-browser",
            "google-chrome-stable",
            "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
            "C:\\Program Files\\Google\\Chrome\\Application\\chrome.exe",
            "C:\\Program Files (x86)\\Google\\Chrome\\Application\\chrome.exe",
        ];

        candidates
            .into_iter()
            .find(|candidate| {
                Command::new(candidate)
                    .arg("--version")
                    .output()
                    .is_ok_and(|out| out.status.success())
            })
            .map(str::to_owned)
    }

    /// Print `html_path` to `pdf_path` with a Chrome-compatible binary
    fn html_to_pdf_chrome(
        chrome_cmd: &str,
        html_path: &Path,
        pdf_path: &Path,
    ) -> Result<(), Box<dyn Error>> {
        logger::debug!("Converting {} with {chrome_cmd}", html_path.display());
        let status = Command::new(chrome_cmd)
            .arg("--headless=new")
            .arg("--disable-gpu")
            .arg("--no-sandbox")
            .arg("--no-pdf-header-footer")
            .arg(format!("--print-to-pdf={}", pdf_path.display()))
            .arg(format!("file://{}", html_path.canonicalize()?.display()))
            .stderr(Stdio::null())
            .stdout(Stdio::null())
            .status()?;

        if !status.success() {
            return Err("Chrome PDF conversion failed".into());
        }
        Ok(())
    }

    /// Convert HTML report to PDF
    fn convert_html_to_pdf(&self, html_path: &Path, pdf_path: &Path) -> Result<(), Box<dyn Error>> {
        if let Some(converter) = &self.converter {
            return Self::html_to_pdf_chrome(converter, html_path, pdf_path);
        }
        if let Some(chrome) = Self::detect_chrome() {
            return Self::html_to_pdf_chrome(&chrome, html_path, pdf_path);
        }

        Err("PDF conversion failed: Chrome/Chromium not found.\n\
            \n\
            Install Chrome or Chromium, pass --pdf-converter /path/to/chrome,\n\
            or export with --format html and print from a browser.\n"
            .into())
    }
}

impl Default for PdfReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for PdfReporter {
    fn generate(&self, doc: &Document, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let html_path = std::env::temp_dir().join(format!(
            "gymevo_{}_{}.html",
            doc.file_stem,
            std::process::id()
        ));
        HtmlReporter::new().generate(doc, &html_path)?;

        let result = self.convert_html_to_pdf(&html_path, output_path);
        let _ = std::fs::remove_file(&html_path);
        result
    }

    /// PDF output is binary; the text form is the intermediate HTML
    fn render(&self, doc: &Document) -> Result<String, Box<dyn Error>> {
        HtmlReporter::new().render(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::report::Page;

    #[test]
    fn test_missing_converter_reports_error_and_cleans_up() {
        let doc = Document {
            title: "t".into(),
            file_stem: "pdf_cleanup_probe".into(),
            pages: vec![Page::default()],
        };
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.pdf");
        let reporter = PdfReporter::with_converter("/nonexistent/gymevo-chrome");

        assert!(reporter.generate(&doc, &out).is_err());
        assert!(!out.exists());
        let leftover = std::env::temp_dir().join(format!(
            "gymevo_pdf_cleanup_probe_{}.html",
            std::process::id()
        ));
        assert!(!leftover.exists());
    }
}
