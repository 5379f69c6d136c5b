//! Interfaces between the engines and the table that holds the rows

use crate::errors::Result;
use crate::schemas::{BundleDescriptor, CellValue, Field, SheetRow};

/// Read access to row snapshots
pub trait RowSource {
    /// Every data row, in position order, as one consistent snapshot
    fn rows(&self) -> Result<Vec<SheetRow>>;

    /// A single row
    fn row(&self, position: u32) -> Result<SheetRow>;
}

/// Write access to the table
pub trait TableWriter {
    fn write_cell(&mut self, position: u32, field: Field, value: CellValue) -> Result<()>;

    /// Wipe every field of a row, status included
    fn clear_row(&mut self, position: u32) -> Result<()>;

    /// Remove the row at `from` and reinsert it so it ends up at `to`.
    ///
    /// Rows in between shift by one to close the hole.
    fn move_row(&mut self, from: u32, to: u32) -> Result<()>;
}

/// Bundle descriptors keyed by row position.
///
/// Last write wins; the reconciler always rebuilds the whole set.
pub trait BundleStore {
    fn remove_all_descriptors(&mut self) -> Result<()>;

    /// Store a descriptor over its row range, replacing anything overlapping it
    fn set_descriptor(&mut self, descriptor: BundleDescriptor) -> Result<()>;

    fn descriptor_for_row(&self, position: u32) -> Option<BundleDescriptor>;

    /// All stored descriptors ordered by start row
    fn descriptors(&self) -> Vec<BundleDescriptor>;
}
