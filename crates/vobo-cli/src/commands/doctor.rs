//! Doctor command - check extraction capabilities on this host.

use clap::Args;
use console::style;

use vobo_core::extract::{DocxDocumentReader, PdfTextLayerReader, TesseractEngine};
use vobo_core::{DocxReader, OcrEngine, PdfTextReader};

/// Arguments for the doctor command.
#[derive(Args)]
pub struct DoctorArgs {}

pub fn run(_args: DoctorArgs) -> anyhow::Result<()> {
    println!("{}", style("Extraction capabilities").bold());
    print_capability(
        "DOCX structured reader",
        DocxDocumentReader::new().is_available(),
    );
    print_capability("DOCX zip/XML fallback", true);
    print_capability("PDF text layer", PdfTextLayerReader::new().is_available());

    let ocr = TesseractEngine::with_defaults();
    print_capability("OCR for scanned PDFs", ocr.is_available());

    println!();
    println!("{}", style("External tools").bold());
    for tool in TesseractEngine::tool_status() {
        match tool.path {
            Some(path) => println!(
                "  {} {:<10} {}",
                style("✓").green(),
                tool.name,
                path.display()
            ),
            None => println!(
                "  {} {:<10} not found on PATH",
                style("✗").red(),
                tool.name
            ),
        }
    }

    if !ocr.is_available() {
        println!();
        println!(
            "{} install poppler-utils and tesseract (with spa language data) to process scanned PDFs",
            style("ℹ").blue()
        );
    }

    Ok(())
}

fn print_capability(name: &str, available: bool) {
    let marker = if available {
        style("✓").green()
    } else {
        style("✗").red()
    };
    println!("  {} {}", marker, name);
}
