//! In-memory sheet

use crate::errors::{DealsheetError, Result};
use crate::schemas::{BundleDescriptor, CellValue, Config, Field, FieldMap, SheetRow, WorkbookFile};

use super::traits::{BundleStore, RowSource, TableWriter};

/// A table of line-item rows plus its bundle descriptors
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    fields: FieldMap,
    start_col: u32,
    first_data_row: u32,
    width: usize,
    rows: Vec<Vec<CellValue>>,
    bundles: Vec<BundleDescriptor>,
}

impl Sheet {
    /// Create a sheet over `rows` using the layout in `config`.
    ///
    /// # Errors
    /// * `ConfigError` - If the layout is invalid
    /// * `MalformedRow` - If any row does not match the layout width
    pub fn new(config: &Config, rows: Vec<Vec<CellValue>>) -> Result<Self> {
        config.validate()?;
        let sheet = Sheet {
            fields: config.fields.clone(),
            start_col: config.start_col,
            first_data_row: config.first_data_row,
            width: config.row_width(),
            rows,
            bundles: Vec::new(),
        };
        for index in 0..sheet.rows.len() {
            sheet.check_shape(index)?;
        }
        Ok(sheet)
    }

    /// Load a sheet from its file form
    pub fn from_file(config: &Config, file: WorkbookFile) -> Result<Self> {
        let mut sheet = Sheet::new(config, file.rows)?;
        for descriptor in file.bundles {
            sheet.set_descriptor(descriptor)?;
        }
        Ok(sheet)
    }

    /// File form of the sheet
    pub fn to_file(&self) -> WorkbookFile {
        WorkbookFile {
            schema_version: 1,
            rows: self.rows.clone(),
            bundles: self.bundles.clone(),
            updated_at: None,
        }
        .touched()
    }

    /// Append an empty row and return its position
    pub fn push_blank_row(&mut self) -> u32 {
        self.rows.push(vec![CellValue::Empty; self.width]);
        self.position_of(self.rows.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Value of one field at a position
    pub fn value(&self, position: u32, field: Field) -> Result<CellValue> {
        let index = self.index_of(position)?;
        Ok(self.fields.value(&self.rows[index], field, self.start_col).clone())
    }

    fn position_of(&self, index: usize) -> u32 {
        self.first_data_row.saturating_add(index as u32)
    }

    fn index_of(&self, position: u32) -> Result<usize> {
        position
            .checked_sub(self.first_data_row)
            .map(|index| index as usize)
            .filter(|index| *index < self.rows.len())
            .ok_or(DealsheetError::RowNotFound(position))
    }

    fn check_shape(&self, index: usize) -> Result<()> {
        let found = self.rows[index].len();
        if found != self.width {
            return Err(DealsheetError::MalformedRow {
                row: self.position_of(index),
                message: format!("expected {} cells, found {}", self.width, found),
            });
        }
        Ok(())
    }
}

impl RowSource for Sheet {
    fn rows(&self) -> Result<Vec<SheetRow>> {
        (0..self.rows.len())
            .map(|index| {
                self.check_shape(index)?;
                Ok(SheetRow::new(self.position_of(index), self.rows[index].clone()))
            })
            .collect()
    }

    fn row(&self, position: u32) -> Result<SheetRow> {
        let index = self.index_of(position)?;
        self.check_shape(index)?;
        Ok(SheetRow::new(position, self.rows[index].clone()))
    }
}

impl TableWriter for Sheet {
    fn write_cell(&mut self, position: u32, field: Field, value: CellValue) -> Result<()> {
        let index = self.index_of(position)?;
        let offset = self
            .fields
            .offset(field, self.start_col)
            .filter(|offset| *offset < self.width)
            .ok_or_else(|| {
                DealsheetError::ConfigError(format!("{} has no column in this layout", field))
            })?;
        self.rows[index][offset] = value;
        Ok(())
    }

    fn clear_row(&mut self, position: u32) -> Result<()> {
        let index = self.index_of(position)?;
        self.rows[index] = vec![CellValue::Empty; self.width];
        Ok(())
    }

    fn move_row(&mut self, from: u32, to: u32) -> Result<()> {
        let from_index = self.index_of(from)?;
        let to_index = self.index_of(to)?;
        let row = self.rows.remove(from_index);
        self.rows.insert(to_index, row);
        Ok(())
    }
}

impl BundleStore for Sheet {
    fn remove_all_descriptors(&mut self) -> Result<()> {
        self.bundles.clear();
        Ok(())
    }

    fn set_descriptor(&mut self, descriptor: BundleDescriptor) -> Result<()> {
        self.bundles.retain(|existing| {
            existing.end_row < descriptor.start_row || existing.start_row > descriptor.end_row
        });
        self.bundles.push(descriptor);
        self.bundles.sort_by_key(|d| d.start_row);
        Ok(())
    }

    fn descriptor_for_row(&self, position: u32) -> Option<BundleDescriptor> {
        self.bundles.iter().find(|d| d.contains(position)).cloned()
    }

    fn descriptors(&self) -> Vec<BundleDescriptor> {
        self.bundles.clone()
    }
}
