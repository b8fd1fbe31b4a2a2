//! Configuration structures for the intake pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for the vobo pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VoboConfig {
    /// OCR fallback configuration.
    pub ocr: OcrConfig,

    /// Field extraction configuration.
    pub fields: FieldConfig,

    /// Register storage configuration.
    pub register: RegisterConfig,
}

impl Default for VoboConfig {
    fn default() -> Self {
        Self {
            ocr: OcrConfig::default(),
            fields: FieldConfig::default(),
            register: RegisterConfig::default(),
        }
    }
}

/// OCR fallback configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// DPI for rasterizing PDF pages before recognition.
    pub dpi: u32,

    /// Tesseract language set.
    pub languages: String,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            dpi: 300,
            languages: "spa+eng".to_string(),
        }
    }
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Maximum length of a captured field value, in characters.
    pub max_value_length: usize,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            max_value_length: 400,
        }
    }
}

/// Register storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegisterConfig {
    /// Path of the register CSV file.
    pub path: PathBuf,
}

impl Default for RegisterConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/registro_solicitudes.csv"),
        }
    }
}

impl VoboConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = VoboConfig::default();
        assert_eq!(config.ocr.dpi, 300);
        assert_eq!(config.ocr.languages, "spa+eng");
        assert_eq!(config.fields.max_value_length, 400);
        assert_eq!(
            config.register.path,
            PathBuf::from("data/registro_solicitudes.csv")
        );
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: VoboConfig = serde_json::from_str(r#"{"ocr": {"dpi": 150}}"#).unwrap();
        assert_eq!(config.ocr.dpi, 150);
        assert_eq!(config.ocr.languages, "spa+eng");
        assert_eq!(config.fields.max_value_length, 400);
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = VoboConfig::default();
        config.ocr.dpi = 150;
        config.register.path = PathBuf::from("otra/ruta.csv");
        config.save(&path).unwrap();

        let loaded = VoboConfig::from_file(&path).unwrap();
        assert_eq!(loaded.ocr.dpi, 150);
        assert_eq!(loaded.register.path, PathBuf::from("otra/ruta.csv"));
        assert_eq!(loaded.fields.max_value_length, 400);
    }
}
