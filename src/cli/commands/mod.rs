//! CLI command implementations
//!
//! Each command opens the workbook, runs one workflow inside the exclusive
//! section, writes the workbook back if it changed and prints the result.

pub mod bundles;
pub mod correct;
pub mod edit;
pub mod recalc;
pub mod reconcile;
pub mod status;

use std::path::PathBuf;

use serde::Serialize;

use crate::cli::GlobalArgs;
use crate::config::load_config;
use crate::errors::{DealsheetError, Result};
use crate::fs::{read_workbook, write_workbook};
use crate::schemas::Config;
use crate::sheet::{Sheet, Workbook};

/// An opened workbook plus the settings it was opened with
pub struct Session {
    pub config: Config,
    pub workbook: Workbook,
    path: PathBuf,
    json: bool,
}

impl Session {
    /// Load config and workbook for the given global options
    ///
    /// # Errors
    /// * `FileNotFound` - If the workbook file does not exist
    /// * `ConfigError` / `MalformedRow` - If layout and rows disagree
    pub fn open(args: &GlobalArgs) -> Result<Self> {
        let config = load_config(args.config.as_deref(), &args.workbook, args.telekom)?;
        let sheet = Sheet::from_file(&config, read_workbook(&args.workbook)?)?;
        tracing::debug!(
            path = %args.workbook.display(),
            rows = sheet.len(),
            telekom = config.telekom_deal,
            "workbook opened"
        );
        Ok(Session {
            workbook: Workbook::new(sheet, config.lock_timeout()),
            config,
            path: args.workbook.clone(),
            json: args.json,
        })
    }

    /// Persist the sheet back to the workbook file
    pub fn save(&self, sheet: &Sheet) -> Result<()> {
        write_workbook(&self.path, &sheet.to_file())?;
        tracing::debug!(path = %self.path.display(), "workbook saved");
        Ok(())
    }

    /// Print `value` as JSON, or the text rendering otherwise
    pub fn emit<T: Serialize>(&self, value: &T, text: impl FnOnce() -> String) -> Result<()> {
        if self.json {
            let rendered = serde_json::to_string_pretty(value)
                .map_err(|e| DealsheetError::wrap(e, "Failed to render output"))?;
            println!("{}", rendered);
        } else {
            println!("{}", text());
        }
        Ok(())
    }
}
