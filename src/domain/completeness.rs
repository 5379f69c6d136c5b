//! Row completeness validation

use crate::schemas::{CellValue, Field, FieldMap};

/// Fields a row must carry before it can go to approval.
///
/// The capex column depends on the deal type.
pub fn required_fields(telekom_deal: bool) -> [Field; 5] {
    let capex = if telekom_deal {
        Field::TelekomCapex
    } else {
        Field::EpCapex
    };
    [
        Field::Model,
        Field::SalesAskPrice,
        Field::Quantity,
        Field::Term,
        capex,
    ]
}

fn is_present(field: Field, value: &CellValue) -> bool {
    if !value.is_truthy() {
        return false;
    }
    match field {
        Field::Model => true,
        // Numeric fields must be strictly positive; unparseable text counts as 0
        _ => value.to_number() > 0.0,
    }
}

/// Check whether every required field of a row is present and valid.
///
/// # Arguments
/// * `row` - Row values, index 0 at `start_col`
/// * `fields` - Named field to absolute column map
/// * `start_col` - Absolute column of `row[0]`
/// * `telekom_deal` - Selects Telekom Capex instead of EP Capex
pub fn is_row_complete(
    row: &[CellValue],
    fields: &FieldMap,
    start_col: u32,
    telekom_deal: bool,
) -> bool {
    required_fields(telekom_deal)
        .iter()
        .all(|field| is_present(*field, fields.value(row, *field, start_col)))
}

/// Required fields that are absent or not positive, in check order
pub fn missing_required_fields(
    row: &[CellValue],
    fields: &FieldMap,
    start_col: u32,
    telekom_deal: bool,
) -> Vec<Field> {
    required_fields(telekom_deal)
        .into_iter()
        .filter(|field| !is_present(*field, fields.value(row, *field, start_col)))
        .collect()
}
