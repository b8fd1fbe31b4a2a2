//! OCR over external tools.
//!
//! No OCR stack is linked in; pages are rasterized with poppler's
//! `pdftoppm` and recognized with `tesseract`, both found on PATH at
//! runtime. Hosts without the tools simply report the capability as
//! unavailable.

use std::path::PathBuf;
use std::process::Command;

use tracing::debug;
use which::which;

use super::OcrEngine;
use crate::error::ExtractError;
use crate::models::config::OcrConfig;

const RASTERIZER: &str = "pdftoppm";
const RECOGNIZER: &str = "tesseract";

/// Availability of one external OCR tool.
#[derive(Debug, Clone)]
pub struct ToolStatus {
    pub name: &'static str,
    pub path: Option<PathBuf>,
}

/// OCR engine shelling out to `pdftoppm` and `tesseract`.
pub struct TesseractEngine {
    dpi: u32,
    languages: String,
}

impl TesseractEngine {
    pub fn new(config: &OcrConfig) -> Self {
        Self {
            dpi: config.dpi,
            languages: config.languages.clone(),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(&OcrConfig::default())
    }

    /// Probe PATH for both external tools. Used by diagnostics.
    pub fn tool_status() -> Vec<ToolStatus> {
        [RASTERIZER, RECOGNIZER]
            .into_iter()
            .map(|name| ToolStatus {
                name,
                path: which(name).ok(),
            })
            .collect()
    }
}

impl OcrEngine for TesseractEngine {
    fn is_available(&self) -> bool {
        which(RASTERIZER).is_ok() && which(RECOGNIZER).is_ok()
    }

    fn recognize_pages(&self, bytes: &[u8]) -> Result<Vec<String>, ExtractError> {
        let dir = tempfile::tempdir()?;
        let pdf_path = dir.path().join("input.pdf");
        std::fs::write(&pdf_path, bytes)?;

        let prefix = dir.path().join("page");
        let output = Command::new(RASTERIZER)
            .arg("-png")
            .arg("-r")
            .arg(self.dpi.to_string())
            .arg(&pdf_path)
            .arg(&prefix)
            .output()?;
        if !output.status.success() {
            return Err(ExtractError::Ocr(format!(
                "{RASTERIZER} exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        // pdftoppm zero-pads page numbers, so a path sort is page order.
        let mut images: Vec<PathBuf> = std::fs::read_dir(dir.path())?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "png"))
            .collect();
        images.sort();
        if images.is_empty() {
            return Err(ExtractError::Ocr(format!(
                "{RASTERIZER} produced no page images"
            )));
        }
        debug!("rasterized {} pages at {} dpi", images.len(), self.dpi);

        let mut pages = Vec::with_capacity(images.len());
        for image in &images {
            let output = Command::new(RECOGNIZER)
                .arg(image)
                .arg("stdout")
                .arg("-l")
                .arg(&self.languages)
                .output()?;
            if !output.status.success() {
                return Err(ExtractError::Ocr(format!(
                    "{RECOGNIZER} exited with {}: {}",
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                )));
            }
            pages.push(String::from_utf8_lossy(&output.stdout).into_owned());
        }
        Ok(pages)
    }
}

impl Default for TesseractEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_engine_settings() {
        let engine = TesseractEngine::with_defaults();
        assert_eq!(engine.dpi, 300);
        assert_eq!(engine.languages, "spa+eng");
    }

    #[test]
    fn test_engine_honors_config() {
        let config = OcrConfig {
            dpi: 150,
            languages: "spa".to_string(),
        };
        let engine = TesseractEngine::new(&config);
        assert_eq!(engine.dpi, 150);
        assert_eq!(engine.languages, "spa");
    }

    #[test]
    fn test_tool_status_covers_both_tools() {
        let status = TesseractEngine::tool_status();
        let names: Vec<&str> = status.iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["pdftoppm", "tesseract"]);
    }
}
