//! Sheet row - one line item at a known position

use serde::{Deserialize, Serialize};

use super::{CellValue, Field, FieldMap};

/// A row's values together with the sheet position they were read from.
///
/// The position is a snapshot fact: inserting, deleting or moving rows
/// changes it, so callers pass it explicitly with every read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetRow {
    /// 1-based sheet position
    pub position: u32,

    /// Cell values, index 0 at the layout's start column
    pub values: Vec<CellValue>,
}

impl SheetRow {
    pub fn new(position: u32, values: Vec<CellValue>) -> Self {
        SheetRow { position, values }
    }

    pub fn get<'a>(&'a self, fields: &FieldMap, field: Field, start_col: u32) -> &'a CellValue {
        fields.value(&self.values, field, start_col)
    }

    /// Trimmed bundle identifier, or None when the row is not bundled.
    ///
    /// The raw cell text is used, so a numeric `0` is an identifier.
    pub fn bundle_id(&self, fields: &FieldMap, start_col: u32) -> Option<String> {
        let id = self.get(fields, Field::BundleId, start_col).to_string();
        let id = id.trim();
        if id.is_empty() {
            None
        } else {
            Some(id.to_string())
        }
    }
}
