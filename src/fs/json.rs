//! JSON file operations with schema validation
//!
//! Provides functions to read and write JSON files with serde validation.

use std::fs;
use std::io::Write;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::{DealsheetError, Result};
use crate::schemas::{Config, WorkbookFile};

/// Read and deserialize a JSON file.
///
/// # Errors
/// * `FileNotFound` - If the file does not exist
/// * `InvalidJson` - If the file contains invalid JSON or does not match the schema
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            DealsheetError::FileNotFound(path.display().to_string())
        } else {
            DealsheetError::Io(e)
        }
    })?;

    serde_json::from_str(&content).map_err(|e| {
        DealsheetError::InvalidJson(format!("Invalid JSON in file {}: {}", path.display(), e))
    })
}

/// Write a value to a JSON file with pretty formatting.
///
/// Uses atomic write (write to temp file, then rename) to avoid partial writes.
pub fn write_json<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(data)
        .map_err(|e| DealsheetError::InvalidJson(e.to_string()))?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let temp_path = path.with_extension("json.tmp");
    let mut file = fs::File::create(&temp_path)?;
    file.write_all(content.as_bytes())?;
    file.write_all(b"\n")?;
    file.sync_all()?;
    drop(file);

    fs::rename(&temp_path, path)?;

    Ok(())
}

/// Read a config file, or the defaults when there is none.
///
/// The loaded layout is validated before it is returned.
pub fn read_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(Config::default());
    }
    let config: Config = read_json(path)?;
    config.validate()?;
    Ok(config)
}

/// Read a workbook file
pub fn read_workbook(path: &Path) -> Result<WorkbookFile> {
    read_json(path)
}

/// Write a workbook file
pub fn write_workbook(path: &Path, workbook: &WorkbookFile) -> Result<()> {
    write_json(path, workbook)
}
