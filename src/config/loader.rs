//! Configuration loading with defaults

use std::path::{Path, PathBuf};

use crate::errors::Result;
use crate::fs;
use crate::schemas::Config;

/// Config file looked up next to the workbook when none is given
pub const DEFAULT_CONFIG_FILE: &str = "dealsheet.json";

/// Load configuration, falling back to defaults.
///
/// With an explicit path that file is used. Otherwise `dealsheet.json` in
/// the workbook's directory is read if present. `telekom_override` replaces
/// the configured deal type when set.
pub fn load_config(
    explicit: Option<&Path>,
    workbook: &Path,
    telekom_override: bool,
) -> Result<Config> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => workbook
            .parent()
            .map(|dir| dir.join(DEFAULT_CONFIG_FILE))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE)),
    };

    let mut config = fs::read_config(&path)?;
    if telekom_override {
        config.telekom_deal = true;
    }
    Ok(config)
}
