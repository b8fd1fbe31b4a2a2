//! Core library for procurement request intake.
//!
//! This crate provides:
//! - DOCX/PDF text extraction with ordered fallbacks (structured reader,
//!   zip/XML strip, PDF text layer, external OCR)
//! - Whitespace normalization shared by parsing and display
//! - Field parsing for signed request documents (dates, labeled values,
//!   estimated amounts)
//! - The persisted V°B° register of processed requests (CSV)

pub mod error;
pub mod extract;
pub mod fields;
pub mod models;
pub mod register;
pub mod text;

pub use error::{ExtractError, RegisterError, Result, VoboError};
pub use extract::{
    DocumentFormat, DocxReader, ExtractedDocument, ExtractionReport, OcrEngine, PdfTextReader,
    TextExtractor,
};
pub use fields::{FieldParser, extract_fields};
pub use models::config::VoboConfig;
pub use models::record::{RegisterRecord, RequestFields, RequestStatus};
pub use register::Register;
pub use text::normalize_text;
