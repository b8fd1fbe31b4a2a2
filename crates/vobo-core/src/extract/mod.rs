//! Document text extraction.
//!
//! Converts raw DOCX/PDF bytes into a single text string by walking an
//! ordered fallback chain per format: structured DOCX reader → raw
//! zip/XML fallback for DOCX, text-layer extraction → OCR for PDF. Each
//! backend sits behind a capability trait with a runtime availability
//! flag, so a missing tool degrades the chain instead of breaking it.
//! Every stage failure is converted into a report entry; [`TextExtractor::extract`]
//! never returns an error.

mod docx;
mod ocr;
mod pdf;

pub use docx::DocxDocumentReader;
pub use ocr::{TesseractEngine, ToolStatus};
pub use pdf::PdfTextLayerReader;

use tracing::debug;

use crate::error::ExtractError;
use crate::models::config::VoboConfig;

/// Supported document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Docx,
    Pdf,
}

impl DocumentFormat {
    /// Map a file extension to a format. Comparison is case-insensitive.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "docx" => Some(Self::Docx),
            "pdf" => Some(Self::Pdf),
            _ => None,
        }
    }
}

/// Ordered diagnostics describing one extraction run.
///
/// Append-only while the extraction is in flight; surfaced to the caller
/// with the text and then discarded. Entries are also mirrored on the
/// logging layer at debug level.
#[derive(Debug, Clone, Default)]
pub struct ExtractionReport {
    entries: Vec<String>,
}

impl ExtractionReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, entry: impl Into<String>) {
        let entry = entry.into();
        debug!("{entry}");
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Text plus diagnostics produced by one extraction run.
#[derive(Debug, Clone)]
pub struct ExtractedDocument {
    /// Raw extracted text; blank when every method failed.
    pub text: String,
    /// Ordered diagnostics for the run.
    pub report: ExtractionReport,
}

impl ExtractedDocument {
    /// Whether the run produced any usable text.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Structured DOCX reading capability.
pub trait DocxReader: Send + Sync {
    /// Whether this backend can run in the current environment.
    fn is_available(&self) -> bool {
        true
    }

    /// Flatten the document body to plain text: paragraphs in document
    /// order, then each table row as cell values joined by `" | "`.
    fn read(&self, bytes: &[u8]) -> Result<String, ExtractError>;
}

/// Layout-aware PDF text extraction capability.
pub trait PdfTextReader: Send + Sync {
    /// Whether this backend can run in the current environment.
    fn is_available(&self) -> bool {
        true
    }

    /// Text-layer text for every page, in page order. A page without a
    /// text layer contributes an empty string, not an error.
    fn read_pages(&self, bytes: &[u8]) -> Result<Vec<String>, ExtractError>;
}

/// OCR capability: page rasterization plus text recognition.
pub trait OcrEngine: Send + Sync {
    /// Whether the OCR toolchain is present.
    fn is_available(&self) -> bool;

    /// Rasterize every page and recognize its text, in page order.
    fn recognize_pages(&self, bytes: &[u8]) -> Result<Vec<String>, ExtractError>;
}

/// Fallback-chain driver over the capability backends.
///
/// Owns one backend per capability; the builder substitutes alternatives
/// (including test stubs). Extraction itself is infallible: failures
/// degrade to an empty result with an explanatory report.
pub struct TextExtractor {
    docx: Box<dyn DocxReader>,
    pdf: Box<dyn PdfTextReader>,
    ocr: Box<dyn OcrEngine>,
}

impl TextExtractor {
    /// Extractor with the production backends and default settings.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Extractor with production backends configured from `config`.
    pub fn from_config(config: &VoboConfig) -> Self {
        Self::builder()
            .with_ocr_engine(Box::new(TesseractEngine::new(&config.ocr)))
            .build()
    }

    pub fn builder() -> TextExtractorBuilder {
        TextExtractorBuilder::default()
    }

    /// Extract text from raw document bytes.
    ///
    /// Never fails: unsupported extensions and total extraction failure
    /// both come back as blank text with the reason in the report.
    pub fn extract(&self, bytes: &[u8], extension: &str) -> ExtractedDocument {
        let mut report = ExtractionReport::new();

        let text = match DocumentFormat::from_extension(extension) {
            Some(DocumentFormat::Docx) => self.extract_docx(bytes, &mut report),
            Some(DocumentFormat::Pdf) => self.extract_pdf(bytes, &mut report),
            None => {
                report.push(format!("unsupported extension: {extension}"));
                String::new()
            }
        };

        ExtractedDocument { text, report }
    }

    fn extract_docx(&self, bytes: &[u8], report: &mut ExtractionReport) -> String {
        let primary = if self.docx.is_available() {
            match self.docx.read(bytes) {
                Ok(text) => Some(text),
                Err(e) => {
                    report.push(e.to_string());
                    None
                }
            }
        } else {
            report.push("structured DOCX reader unavailable");
            None
        };

        let (text, via) = match primary {
            Some(text) => (text, "structured reader"),
            None => match docx::read_flat_xml(bytes) {
                Ok(text) => (text, "zip/XML fallback"),
                Err(e) => {
                    report.push(e.to_string());
                    (String::new(), "no reader")
                }
            },
        };

        report.push(format!("DOCX read via {via}"));
        if text.trim().is_empty() {
            report.push("no text could be extracted from the DOCX");
        }
        text
    }

    fn extract_pdf(&self, bytes: &[u8], report: &mut ExtractionReport) -> String {
        // Both capability entries are pushed up front, for every PDF;
        // only recognition itself waits for a blank text layer.
        let pdf_available = self.pdf.is_available();
        if pdf_available {
            report.push("attempting PDF text-layer extraction");
        } else {
            report.push("PDF text-layer reader unavailable");
        }

        let ocr_available = self.ocr.is_available();
        if ocr_available {
            report.push("OCR available (pdftoppm + tesseract)");
        } else {
            report.push("OCR unavailable (pdftoppm or tesseract not on PATH)");
        }

        let mut text = String::new();
        if pdf_available {
            match self.pdf.read_pages(bytes) {
                Ok(pages) => text = pages.join("\n"),
                Err(e) => report.push(e.to_string()),
            }
        }

        if text.trim().is_empty() && ocr_available {
            match self.ocr.recognize_pages(bytes) {
                Ok(pages) => text = pages.join("\n"),
                Err(e) => {
                    report.push(e.to_string());
                    text = String::new();
                }
            }
        }

        if text.trim().is_empty() {
            report.push("no text could be extracted (text layer and OCR both failed)");
        } else {
            report.push("text extracted (text layer or OCR)");
        }
        text
    }
}

impl Default for TextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for [`TextExtractor`], substituting capability backends.
#[derive(Default)]
pub struct TextExtractorBuilder {
    docx: Option<Box<dyn DocxReader>>,
    pdf: Option<Box<dyn PdfTextReader>>,
    ocr: Option<Box<dyn OcrEngine>>,
}

impl TextExtractorBuilder {
    pub fn with_docx_reader(mut self, reader: Box<dyn DocxReader>) -> Self {
        self.docx = Some(reader);
        self
    }

    pub fn with_pdf_reader(mut self, reader: Box<dyn PdfTextReader>) -> Self {
        self.pdf = Some(reader);
        self
    }

    pub fn with_ocr_engine(mut self, engine: Box<dyn OcrEngine>) -> Self {
        self.ocr = Some(engine);
        self
    }

    pub fn build(self) -> TextExtractor {
        TextExtractor {
            docx: self.docx.unwrap_or_else(|| Box::new(DocxDocumentReader::new())),
            pdf: self.pdf.unwrap_or_else(|| Box::new(PdfTextLayerReader::new())),
            ocr: self.ocr.unwrap_or_else(|| Box::new(TesseractEngine::with_defaults())),
        }
    }
}
