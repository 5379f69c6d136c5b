//! Schema types for dealsheet
//!
//! Everything that crosses the boundary between the sheet and the status
//! engine is defined here and serializes to the workbook JSON format.

mod bundle;
mod config;
mod field;
mod row;
mod status;
mod value;
mod workbook;

pub use bundle::{BundleDescriptor, BundleIssue, BundleReport, BundleVerdict};
pub use config::Config;
pub use field::{Field, FieldMap, KEY_FIELDS};
pub use row::SheetRow;
pub use status::{ApproverAction, RowStatus, StatusOutcome, STATUS_VOCABULARY};
pub use value::CellValue;
pub use workbook::WorkbookFile;
