//! Sheet builders shared by workflow tests

use crate::schemas::{CellValue, Config, Field};
use crate::sheet::{Sheet, TableWriter};

/// Build a sheet with the default layout; entry `i` fills row `2 + i`
pub fn sheet_with(rows: &[Vec<(Field, CellValue)>]) -> Sheet {
    let config = Config::default();
    let blank = vec![CellValue::Empty; config.row_width()];
    let mut sheet = Sheet::new(&config, vec![blank; rows.len()]).unwrap();
    for (i, cells) in rows.iter().enumerate() {
        for (field, value) in cells.iter() {
            sheet.write_cell(2 + i as u32, *field, value.clone()).unwrap();
        }
    }
    sheet
}

/// Cells of a complete line item
pub fn complete_item(model: &str, term: i32, quantity: i32) -> Vec<(Field, CellValue)> {
    vec![
        (Field::Model, model.into()),
        (Field::SalesAskPrice, 50.into()),
        (Field::Quantity, quantity.into()),
        (Field::Term, term.into()),
        (Field::EpCapex, 1000.into()),
    ]
}
