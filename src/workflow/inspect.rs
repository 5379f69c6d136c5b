//! Read-only view of one row

use serde::Serialize;

use crate::domain::{is_row_complete, missing_required_fields, validate_bundle};
use crate::errors::Result;
use crate::schemas::{BundleDescriptor, BundleVerdict, Config, Field, RowStatus};
use crate::sheet::{BundleStore, RowSource};

/// Status, completeness and bundle membership of a row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowSummary {
    pub position: u32,
    pub model: String,
    pub status: RowStatus,
    pub complete: bool,
    pub missing_fields: Vec<Field>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bundle_id: Option<String>,
    /// Descriptor stored for this row by the last reconcile
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descriptor: Option<BundleDescriptor>,
    /// Live validation of the row's bundle
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bundle: Option<BundleVerdict>,
}

/// Summarize a row without changing anything
pub fn inspect_row<S>(sheet: &S, config: &Config, position: u32) -> Result<RowSummary>
where
    S: RowSource + BundleStore,
{
    let row = sheet.row(position)?;
    let (fields, start_col) = (&config.fields, config.start_col);
    let bundle_id = row.bundle_id(fields, start_col);

    let bundle = match &bundle_id {
        Some(id) => Some(validate_bundle(&sheet.rows()?, id, fields, start_col)),
        None => None,
    };

    Ok(RowSummary {
        position,
        model: row.get(fields, Field::Model, start_col).as_display(),
        status: RowStatus::from_cell(row.get(fields, Field::Status, start_col)),
        complete: is_row_complete(&row.values, fields, start_col, config.telekom_deal),
        missing_fields: missing_required_fields(&row.values, fields, start_col, config.telekom_deal),
        descriptor: sheet.descriptor_for_row(position),
        bundle_id,
        bundle,
    })
}
