//! Config schema - Table layout and workflow settings

use serde::{Deserialize, Serialize};

use super::FieldMap;
use crate::errors::Result;

/// Main configuration for dealsheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Schema version for forward compatibility
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Absolute column that index 0 of a row array represents
    #[serde(default = "default_start_col")]
    pub start_col: u32,

    /// Sheet position of the first data row (rows above are headers)
    #[serde(default = "default_first_data_row")]
    pub first_data_row: u32,

    /// Deal type used when the caller does not specify one
    #[serde(default)]
    pub telekom_deal: bool,

    /// How long to wait for the exclusive section before giving up
    #[serde(default = "default_lock_timeout_ms")]
    pub lock_timeout_ms: u64,

    /// Named field to absolute column map
    #[serde(default)]
    pub fields: FieldMap,
}

/// Highest row position a sheet can address
pub const MAX_SHEET_ROWS: u32 = 1_048_576;

fn default_schema_version() -> u32 {
    1
}

fn default_start_col() -> u32 {
    1
}

fn default_first_data_row() -> u32 {
    2
}

fn default_lock_timeout_ms() -> u64 {
    30_000
}

impl Default for Config {
    fn default() -> Self {
        Config {
            schema_version: 1,
            start_col: 1,
            first_data_row: 2,
            telekom_deal: false,
            lock_timeout_ms: 30_000,
            fields: FieldMap::default(),
        }
    }
}

impl Config {
    /// Width every row array must have under this layout
    pub fn row_width(&self) -> usize {
        self.fields.row_width(self.start_col)
    }

    pub fn lock_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.lock_timeout_ms)
    }

    pub fn validate(&self) -> Result<()> {
        if self.first_data_row == 0 {
            return Err(crate::errors::DealsheetError::ConfigError(
                "first_data_row is 1-based and must be at least 1".to_string(),
            ));
        }
        if self.first_data_row > MAX_SHEET_ROWS {
            return Err(crate::errors::DealsheetError::ConfigError(format!(
                "first_data_row {} is beyond the last sheet row {}",
                self.first_data_row, MAX_SHEET_ROWS
            )));
        }
        self.fields.validate(self.start_col)
    }
}
