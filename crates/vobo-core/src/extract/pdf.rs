//! PDF text-layer reading using lopdf and pdf-extract.

use lopdf::Document;
use tracing::debug;

use super::PdfTextReader;
use crate::error::ExtractError;

/// Layout-aware reader over the embedded PDF text layer.
///
/// lopdf validates the file up front (encryption, page count) and
/// pdf-extract walks the content streams page by page. Scanned PDFs
/// parse fine here but come back as blank pages; the caller decides
/// whether to hand those to OCR.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextLayerReader;

impl PdfTextLayerReader {
    pub fn new() -> Self {
        Self
    }
}

impl PdfTextReader for PdfTextLayerReader {
    fn read_pages(&self, bytes: &[u8]) -> Result<Vec<String>, ExtractError> {
        let mut doc = Document::load_mem(bytes).map_err(|e| ExtractError::Pdf(e.to_string()))?;

        // PDFs encrypted with an empty password are readable; anything
        // else is a hard stop.
        let decrypted;
        let data: &[u8] = if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(ExtractError::Encrypted);
            }
            debug!("decrypted PDF with empty password");

            let mut buf = Vec::new();
            doc.save_to(&mut buf)
                .map_err(|e| ExtractError::Pdf(format!("failed to save decrypted PDF: {e}")))?;
            decrypted = buf;
            &decrypted
        } else {
            bytes
        };

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(ExtractError::NoPages);
        }
        debug!("loaded PDF with {page_count} pages");

        pdf_extract::extract_text_from_mem_by_pages(data)
            .map_err(|e| ExtractError::Pdf(e.to_string()))
    }
}
