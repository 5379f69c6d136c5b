//! Named fields and their column layout

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::CellValue;
use crate::errors::{DealsheetError, Result};

/// A named field of a line-item row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Model,
    SalesAskPrice,
    Quantity,
    Term,
    EpCapex,
    TelekomCapex,
    Status,
    BundleId,
    ApproverAction,
    ApproverComments,
}

/// Fields whose change forces a status re-evaluation.
///
/// Independent of the deal type: both capex fields are always watched.
pub const KEY_FIELDS: [Field; 6] = [
    Field::Model,
    Field::SalesAskPrice,
    Field::Quantity,
    Field::Term,
    Field::EpCapex,
    Field::TelekomCapex,
];

const ALL_FIELDS: [Field; 10] = [
    Field::Model,
    Field::SalesAskPrice,
    Field::Quantity,
    Field::Term,
    Field::EpCapex,
    Field::TelekomCapex,
    Field::Status,
    Field::BundleId,
    Field::ApproverAction,
    Field::ApproverComments,
];

impl Field {
    /// Column header as shown in the sheet
    pub fn label(&self) -> &'static str {
        match self {
            Field::Model => "Model",
            Field::SalesAskPrice => "Sales Ask Price",
            Field::Quantity => "Quantity",
            Field::Term => "Term",
            Field::EpCapex => "EP Capex",
            Field::TelekomCapex => "Telekom Capex",
            Field::Status => "Status",
            Field::BundleId => "Bundle Identifier",
            Field::ApproverAction => "Approver Action",
            Field::ApproverComments => "Approver Comments",
        }
    }

    fn key(&self) -> &'static str {
        match self {
            Field::Model => "model",
            Field::SalesAskPrice => "sales_ask_price",
            Field::Quantity => "quantity",
            Field::Term => "term",
            Field::EpCapex => "ep_capex",
            Field::TelekomCapex => "telekom_capex",
            Field::Status => "status",
            Field::BundleId => "bundle_id",
            Field::ApproverAction => "approver_action",
            Field::ApproverComments => "approver_comments",
        }
    }

    pub fn all() -> &'static [Field] {
        &ALL_FIELDS
    }

    pub fn is_key_field(&self) -> bool {
        KEY_FIELDS.contains(self)
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for Field {
    type Err = String;

    /// Accepts `sales_ask_price`, `sales-ask-price` or the header label.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        ALL_FIELDS
            .iter()
            .copied()
            .find(|field| {
                field.key() == wanted
                    || field.label().to_ascii_lowercase().replace(' ', "_") == wanted
            })
            .ok_or_else(|| format!("Unknown field: {}", s))
    }
}

static EMPTY_CELL: CellValue = CellValue::Empty;

/// Absolute (1-based) column of every named field.
///
/// Supplied once per table instance. Row arrays handed to the engine start at
/// some `start_col`, so offsets are always computed relative to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldMap {
    pub model: u32,
    pub bundle_id: u32,
    pub quantity: u32,
    pub term: u32,
    pub sales_ask_price: u32,
    pub ep_capex: u32,
    pub telekom_capex: u32,
    pub status: u32,
    pub approver_action: u32,
    pub approver_comments: u32,
}

impl Default for FieldMap {
    fn default() -> Self {
        FieldMap {
            model: 2,
            bundle_id: 3,
            quantity: 4,
            term: 5,
            sales_ask_price: 6,
            ep_capex: 7,
            telekom_capex: 8,
            status: 9,
            approver_action: 10,
            approver_comments: 11,
        }
    }
}

impl FieldMap {
    pub fn column(&self, field: Field) -> u32 {
        match field {
            Field::Model => self.model,
            Field::SalesAskPrice => self.sales_ask_price,
            Field::Quantity => self.quantity,
            Field::Term => self.term,
            Field::EpCapex => self.ep_capex,
            Field::TelekomCapex => self.telekom_capex,
            Field::Status => self.status,
            Field::BundleId => self.bundle_id,
            Field::ApproverAction => self.approver_action,
            Field::ApproverComments => self.approver_comments,
        }
    }

    /// Array offset of a field in a row that starts at `start_col`.
    ///
    /// None when the field's column lies before the row's first column.
    pub fn offset(&self, field: Field, start_col: u32) -> Option<usize> {
        self.column(field)
            .checked_sub(start_col)
            .map(|offset| offset as usize)
    }

    /// Value of a field in a row. Missing cells read as empty.
    pub fn value<'a>(&self, row: &'a [CellValue], field: Field, start_col: u32) -> &'a CellValue {
        self.offset(field, start_col)
            .and_then(|offset| row.get(offset))
            .unwrap_or(&EMPTY_CELL)
    }

    /// Number of cells a row must have to hold every field.
    pub fn row_width(&self, start_col: u32) -> usize {
        ALL_FIELDS
            .iter()
            .filter_map(|field| self.offset(*field, start_col))
            .max()
            .map(|max| max + 1)
            .unwrap_or(0)
    }

    /// Reject layouts with shared columns or columns before `start_col`.
    pub fn validate(&self, start_col: u32) -> Result<()> {
        if start_col == 0 {
            return Err(DealsheetError::ConfigError(
                "start_col is 1-based and must be at least 1".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for field in ALL_FIELDS {
            let column = self.column(field);
            if column < start_col {
                return Err(DealsheetError::ConfigError(format!(
                    "{} is mapped to column {} which is before start column {}",
                    field, column, start_col
                )));
            }
            if !seen.insert(column) {
                return Err(DealsheetError::ConfigError(format!(
                    "column {} is mapped to more than one field (including {})",
                    column, field
                )));
            }
        }
        Ok(())
    }
}
