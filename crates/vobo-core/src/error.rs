//! Error types for the vobo-core library.

use thiserror::Error;

/// Main error type for the vobo library.
#[derive(Error, Debug)]
pub enum VoboError {
    /// Text extraction error.
    #[error("extraction error: {0}")]
    Extract(#[from] ExtractError),

    /// Register storage error.
    #[error("register error: {0}")]
    Register(#[from] RegisterError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised by individual extraction stages.
///
/// The extraction chain consumes these into report entries; they never
/// escape [`crate::extract::TextExtractor::extract`]. Backends used on
/// their own return them directly.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// The structured DOCX reader failed to parse the document.
    #[error("failed to read DOCX: {0}")]
    Docx(String),

    /// The raw-XML fallback failed to open the DOCX package.
    #[error("failed to read DOCX package: {0}")]
    Package(String),

    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Pdf(String),

    /// The PDF is encrypted with a real password and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// An OCR tool invocation failed.
    #[error("OCR failed: {0}")]
    Ocr(String),

    /// I/O error while staging files for an external tool.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to the persisted request register.
#[derive(Error, Debug)]
pub enum RegisterError {
    /// I/O error reading or writing the register file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The register file does not parse as the expected CSV shape.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type for the vobo library.
pub type Result<T> = std::result::Result<T, VoboError>;
