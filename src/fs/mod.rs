//! File system utilities for dealsheet
//!
//! JSON persistence of workbooks and configuration.

mod json;

pub use json::{read_config, read_json, read_workbook, write_json, write_workbook};
