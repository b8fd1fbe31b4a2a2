//! Persisted request register.
//!
//! A plain CSV file with Spanish headers, one row per processed request.
//! Every mutation loads the whole table, applies the change, and writes
//! everything back with the header row. Registers stay small (hundreds
//! of rows), so the rewrite keeps the file consistent without any
//! locking or append bookkeeping.

use std::fs;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, WriterBuilder};
use tracing::{debug, info};

use crate::error::RegisterError;
use crate::models::record::RegisterRecord;

pub type Result<T> = std::result::Result<T, RegisterError>;

/// Handle to the register file. Opening never touches the filesystem;
/// a register that does not exist yet reads as empty.
pub struct Register {
    path: PathBuf,
}

impl Register {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All records currently on disk.
    pub fn load(&self) -> Result<Vec<RegisterRecord>> {
        if !self.path.exists() {
            debug!("register {} does not exist yet", self.path.display());
            return Ok(Vec::new());
        }

        let mut reader = ReaderBuilder::new().from_path(&self.path)?;
        let mut records = Vec::new();
        for row in reader.deserialize() {
            records.push(row?);
        }
        debug!("loaded {} register rows", records.len());
        Ok(records)
    }

    /// Append one record and persist the whole table. Returns the new
    /// row count.
    pub fn append(&self, record: RegisterRecord) -> Result<usize> {
        let mut records = self.load()?;
        records.push(record);
        self.save(&records)?;
        Ok(records.len())
    }

    /// Persist `records` as the full register content, creating parent
    /// directories on first write.
    pub fn save(&self, records: &[RegisterRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .from_path(&self.path)?;
        writer.write_record(RegisterRecord::CSV_HEADERS)?;
        for record in records {
            writer.serialize(record)?;
        }
        writer.flush()?;
        info!(
            "register saved: {} rows at {}",
            records.len(),
            self.path.display()
        );
        Ok(())
    }

    /// The register rendered as CSV text, header row included. An empty
    /// or missing register exports as just the header.
    pub fn export(&self) -> Result<String> {
        let records = self.load()?;

        let mut writer = WriterBuilder::new().has_headers(false).from_writer(vec![]);
        writer.write_record(RegisterRecord::CSV_HEADERS)?;
        for record in &records {
            writer.serialize(record)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| RegisterError::Io(e.into_error()))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
