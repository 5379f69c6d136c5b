//! Bundle metadata reconciliation
//!
//! Rebuilds the full set of bundle descriptors from a row snapshot. The
//! result replaces whatever was stored before; nothing is patched in place.

use serde::Serialize;

use crate::schemas::{BundleDescriptor, BundleReport, FieldMap, SheetRow};

use super::bundles::find_all_bundles;

/// Outcome of a reconcile pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    /// Descriptors of every valid bundle, ordered by start row
    pub descriptors: Vec<BundleDescriptor>,

    /// Groups that failed validation and got no descriptor
    pub invalid: Vec<BundleReport>,
}

/// Split every bundle group into descriptors (valid) and reports (invalid)
pub fn reconcile_report(rows: &[SheetRow], fields: &FieldMap, start_col: u32) -> ReconcileReport {
    let (valid, invalid): (Vec<BundleReport>, Vec<BundleReport>) =
        find_all_bundles(rows, fields, start_col)
            .into_iter()
            .partition(|report| report.is_valid);

    ReconcileReport {
        descriptors: valid.iter().filter_map(BundleReport::descriptor).collect(),
        invalid,
    }
}

/// The authoritative descriptor set for a row snapshot.
///
/// Only bundles that pass both contiguity and homogeneity get a descriptor.
pub fn reconcile_all_bundles(
    rows: &[SheetRow],
    fields: &FieldMap,
    start_col: u32,
) -> Vec<BundleDescriptor> {
    reconcile_report(rows, fields, start_col).descriptors
}
