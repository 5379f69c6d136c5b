//! Workbook file schema - the persisted table

use serde::{Deserialize, Serialize};

use super::{BundleDescriptor, CellValue};

/// On-disk form of a sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkbookFile {
    /// Schema version for forward compatibility
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Data rows; row `i` sits at sheet position `first_data_row + i`
    #[serde(default)]
    pub rows: Vec<Vec<CellValue>>,

    /// Stored bundle descriptors
    #[serde(default)]
    pub bundles: Vec<BundleDescriptor>,

    /// RFC 3339 timestamp of the last write
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

fn default_schema_version() -> u32 {
    1
}

impl WorkbookFile {
    pub fn new(rows: Vec<Vec<CellValue>>) -> Self {
        WorkbookFile {
            schema_version: 1,
            rows,
            bundles: Vec::new(),
            updated_at: None,
        }
    }

    /// Return a copy stamped with the current time
    pub fn touched(mut self) -> Self {
        self.updated_at = Some(chrono::Utc::now().to_rfc3339());
        self
    }
}
