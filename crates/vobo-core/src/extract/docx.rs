//! DOCX text reading.
//!
//! Primary path walks the parsed document model with `docx-rs`:
//! body paragraphs in document order, then every table flattened to one
//! line per row with cell values joined by `" | "`. The fallback path
//! ignores the document model entirely and strips markup from the raw
//! `word/document.xml` inside the zip package, which survives files the
//! structured parser rejects.

use std::io::{Cursor, Read};

use docx_rs::{
    DocumentChild, Paragraph, ParagraphChild, RunChild, Table, TableCell, TableCellContent,
    TableChild, TableRowChild, read_docx,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use super::DocxReader;
use crate::error::ExtractError;

lazy_static! {
    /// Any XML tag, after paragraph ends were mapped to newlines.
    static ref XML_TAG: Regex = Regex::new(r"<[^>]+>").unwrap();
    /// Whitespace runs that end in a newline.
    static ref PADDED_NEWLINE: Regex = Regex::new(r"\s+\n").unwrap();
}

/// DOCX reader over the parsed `docx-rs` document model.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocxDocumentReader;

impl DocxDocumentReader {
    pub fn new() -> Self {
        Self
    }
}

impl DocxReader for DocxDocumentReader {
    fn read(&self, bytes: &[u8]) -> Result<String, ExtractError> {
        let docx = read_docx(bytes).map_err(|e| ExtractError::Docx(e.to_string()))?;

        let mut paragraphs = Vec::new();
        let mut table_lines = Vec::new();
        for child in &docx.document.children {
            match child {
                DocumentChild::Paragraph(paragraph) => {
                    paragraphs.push(paragraph_text(paragraph));
                }
                DocumentChild::Table(table) => table_lines.extend(table_rows(table)),
                _ => {}
            }
        }
        debug!(
            paragraphs = paragraphs.len(),
            table_rows = table_lines.len(),
            "walked DOCX body"
        );

        paragraphs.extend(table_lines);
        Ok(paragraphs.join("\n"))
    }
}

fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut out = String::new();
    for child in &paragraph.children {
        if let ParagraphChild::Run(run) = child {
            for run_child in &run.children {
                match run_child {
                    RunChild::Text(text) => out.push_str(&text.text),
                    RunChild::Tab(_) => out.push('\t'),
                    RunChild::Break(_) => out.push('\n'),
                    _ => {}
                }
            }
        }
    }
    out
}

fn table_rows(table: &Table) -> Vec<String> {
    let mut rows = Vec::new();
    for TableChild::TableRow(row) in &table.rows {
        let cells: Vec<String> = row
            .cells
            .iter()
            .map(|TableRowChild::TableCell(cell)| cell_text(cell))
            .collect();
        rows.push(cells.join(" | "));
    }
    rows
}

fn cell_text(cell: &TableCell) -> String {
    let mut parts = Vec::new();
    for content in &cell.children {
        if let TableCellContent::Paragraph(paragraph) = content {
            parts.push(paragraph_text(paragraph));
        }
    }
    parts.join("\n").trim().to_string()
}

/// Strip text out of the raw `word/document.xml`, without parsing the
/// document model. Paragraph ends become newlines, every other tag is
/// dropped. Byte sequences that are not valid UTF-8 are replaced rather
/// than rejected.
pub(super) fn read_flat_xml(bytes: &[u8]) -> Result<String, ExtractError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| ExtractError::Package(e.to_string()))?;
    let mut entry = archive
        .by_name("word/document.xml")
        .map_err(|e| ExtractError::Package(e.to_string()))?;

    let mut raw = Vec::new();
    entry.read_to_end(&mut raw)?;
    let xml = String::from_utf8_lossy(&raw);

    let text = xml.replace("</w:p>", "\n");
    let text = XML_TAG.replace_all(&text, "");
    let text = PADDED_NEWLINE.replace_all(&text, "\n");
    Ok(text.into_owned())
}
