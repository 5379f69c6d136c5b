//! Key-field change detection

use crate::schemas::{CellValue, Field, FieldMap, KEY_FIELDS};

fn differs(
    current: &[CellValue],
    original: &[CellValue],
    fields: &FieldMap,
    field: Field,
    start_col: u32,
) -> bool {
    fields.value(current, field, start_col).as_display()
        != fields.value(original, field, start_col).as_display()
}

/// Whether any key field differs between the current and original row.
///
/// Values are compared by their string form, so `24` and `"24"` are equal and
/// so are every flavour of empty.
pub fn was_key_field_edited(
    current: &[CellValue],
    original: &[CellValue],
    fields: &FieldMap,
    start_col: u32,
) -> bool {
    KEY_FIELDS
        .iter()
        .any(|field| differs(current, original, fields, *field, start_col))
}

/// The key fields that changed
pub fn edited_key_fields(
    current: &[CellValue],
    original: &[CellValue],
    fields: &FieldMap,
    start_col: u32,
) -> Vec<Field> {
    KEY_FIELDS
        .iter()
        .copied()
        .filter(|field| differs(current, original, fields, *field, start_col))
        .collect()
}
