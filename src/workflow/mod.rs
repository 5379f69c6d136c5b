//! Workflows over the sheet collaborators
//!
//! Each workflow is a read-modify-write sequence. Callers run them inside
//! [`crate::sheet::Workbook::exclusive`].

mod corrections;
mod edit;
mod inspect;
mod recalc;
mod reconcile;

#[cfg(test)]
pub(crate) mod test_support;

use serde::Serialize;

use crate::schemas::RowStatus;

pub use corrections::{apply_correction, dissolve_bundle, fix_gaps, CorrectionReport};
pub use edit::{handle_edit, EditReport};
pub use inspect::{inspect_row, RowSummary};
pub use recalc::{recalculate_all, RecalcReport};
pub use reconcile::rebuild_bundle_metadata;

/// A status written back to a row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusChange {
    pub position: u32,
    pub from: RowStatus,
    pub to: RowStatus,
}
