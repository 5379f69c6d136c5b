//! Sheet collaborators
//!
//! The status engine and the bundle engine only see rows through the traits
//! defined here. [`Sheet`] is the in-memory table behind the CLI, and
//! [`Workbook`] guards it with an exclusive section.

mod memory;
mod traits;
mod workbook;

pub use memory::Sheet;
pub use traits::{BundleStore, RowSource, TableWriter};
pub use workbook::Workbook;
