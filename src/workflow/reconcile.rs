//! Full rebuild of stored bundle metadata

use crate::domain::{reconcile_report, ReconcileReport};
use crate::errors::{ReconcilePhase, Result};
use crate::schemas::Config;
use crate::sheet::{BundleStore, RowSource};

/// Replace every stored bundle descriptor with a fresh scan of the table.
///
/// Stored descriptors are discarded first, then the rows are scanned and
/// only valid bundles are written back. If any write fails the store is
/// emptied again so it never holds a partial set.
///
/// # Errors
/// * `Reconcile` - Collaborator failure, tagged with the phase it happened in
pub fn rebuild_bundle_metadata<S>(sheet: &mut S, config: &Config) -> Result<ReconcileReport>
where
    S: RowSource + BundleStore,
{
    sheet
        .remove_all_descriptors()
        .map_err(|e| e.in_phase(ReconcilePhase::Clear))?;

    let rows = sheet.rows().map_err(|e| e.in_phase(ReconcilePhase::Scan))?;
    let report = reconcile_report(&rows, &config.fields, config.start_col);

    for descriptor in &report.descriptors {
        if let Err(e) = sheet.set_descriptor(descriptor.clone()) {
            if let Err(cleanup) = sheet.remove_all_descriptors() {
                tracing::warn!(
                    error = %cleanup,
                    "could not empty bundle store after failed write, stored set may be partial"
                );
            }
            return Err(e.in_phase(ReconcilePhase::Write));
        }
    }

    for invalid in &report.invalid {
        let issues: Vec<String> = invalid.issues.iter().map(|i| i.to_string()).collect();
        tracing::warn!(
            bundle_id = %invalid.bundle_id,
            start_row = invalid.start_row,
            end_row = invalid.end_row,
            "invalid bundle: {}",
            issues.join("; ")
        );
    }
    tracing::info!(
        valid = report.descriptors.len(),
        invalid = report.invalid.len(),
        "bundle metadata rebuilt"
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::DealsheetError;
    use crate::schemas::{BundleDescriptor, CellValue, Field, SheetRow};
    use crate::sheet::Sheet;
    use crate::workflow::test_support::sheet_with;

    /// Sheet whose scan or descriptor writes can be made to fail
    struct FlakySheet {
        inner: Sheet,
        fail_scan: bool,
        fail_writes_after: Option<usize>,
        fail_cleanup: bool,
        writes: usize,
    }

    impl RowSource for FlakySheet {
        fn rows(&self) -> Result<Vec<SheetRow>> {
            if self.fail_scan {
                return Err(DealsheetError::FileNotFound("book.json".into()));
            }
            self.inner.rows()
        }

        fn row(&self, position: u32) -> Result<SheetRow> {
            self.inner.row(position)
        }
    }

    impl BundleStore for FlakySheet {
        fn remove_all_descriptors(&mut self) -> Result<()> {
            if self.fail_cleanup && self.writes > 0 {
                return Err(DealsheetError::Io(std::io::Error::other("store locked")));
            }
            self.inner.remove_all_descriptors()
        }

        fn set_descriptor(&mut self, descriptor: BundleDescriptor) -> Result<()> {
            if self.fail_writes_after == Some(self.writes) {
                return Err(DealsheetError::Io(std::io::Error::other("disk full")));
            }
            self.writes += 1;
            self.inner.set_descriptor(descriptor)
        }

        fn descriptor_for_row(&self, position: u32) -> Option<BundleDescriptor> {
            self.inner.descriptor_for_row(position)
        }

        fn descriptors(&self) -> Vec<BundleDescriptor> {
            self.inner.descriptors()
        }
    }

    fn bundled_sheet() -> Sheet {
        sheet_with(&[
            vec![(Field::BundleId, "a".into()), (Field::Term, 24.into())],
            vec![(Field::BundleId, "a".into()), (Field::Term, 24.into())],
            vec![(Field::BundleId, "b".into()), (Field::Term, 12.into())],
            vec![(Field::BundleId, "b".into()), (Field::Term, 12.into())],
            vec![(Field::BundleId, "c".into()), (Field::Term, 12.into())],
            vec![(Field::BundleId, CellValue::Empty)],
            vec![(Field::BundleId, "c".into()), (Field::Term, 12.into())],
        ])
    }

    #[test]
    fn test_rebuild_replaces_stale_descriptors() {
        let mut sheet = bundled_sheet();
        sheet
            .set_descriptor(BundleDescriptor {
                bundle_id: "stale".into(),
                start_row: 20,
                end_row: 22,
            })
            .unwrap();

        let report = rebuild_bundle_metadata(&mut sheet, &Config::default()).unwrap();

        let ids: Vec<String> = sheet.descriptors().into_iter().map(|d| d.bundle_id).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(report.invalid.len(), 1);
        assert_eq!(report.invalid[0].bundle_id, "c");
    }

    #[test]
    fn test_rebuild_twice_is_stable() {
        let mut sheet = bundled_sheet();
        let first = rebuild_bundle_metadata(&mut sheet, &Config::default()).unwrap();
        let stored = sheet.descriptors();
        let second = rebuild_bundle_metadata(&mut sheet, &Config::default()).unwrap();
        assert_eq!(first, second);
        assert_eq!(stored, sheet.descriptors());
    }

    #[test]
    fn test_scan_failure_leaves_store_empty() {
        let mut inner = bundled_sheet();
        rebuild_bundle_metadata(&mut inner, &Config::default()).unwrap();
        let mut sheet = FlakySheet {
            inner,
            fail_scan: true,
            fail_writes_after: None,
            fail_cleanup: false,
            writes: 0,
        };

        let err = rebuild_bundle_metadata(&mut sheet, &Config::default()).unwrap_err();
        assert!(matches!(
            err,
            DealsheetError::Reconcile {
                phase: ReconcilePhase::Scan,
                ..
            }
        ));
        assert!(sheet.descriptors().is_empty());
    }

    #[test]
    fn test_write_failure_never_leaves_partial_set() {
        let mut sheet = FlakySheet {
            inner: bundled_sheet(),
            fail_scan: false,
            fail_writes_after: Some(1),
            fail_cleanup: false,
            writes: 0,
        };

        let err = rebuild_bundle_metadata(&mut sheet, &Config::default()).unwrap_err();
        assert!(err.to_string().contains("during write"));
        assert!(sheet.descriptors().is_empty());
    }

    #[test]
    fn test_failed_cleanup_still_reports_write_error() {
        let mut sheet = FlakySheet {
            inner: bundled_sheet(),
            fail_scan: false,
            fail_writes_after: Some(1),
            fail_cleanup: true,
            writes: 0,
        };

        let err = rebuild_bundle_metadata(&mut sheet, &Config::default()).unwrap_err();
        assert!(matches!(
            err,
            DealsheetError::Reconcile {
                phase: ReconcilePhase::Write,
                ..
            }
        ));
        assert!(err.to_string().contains("disk full"));
        assert_eq!(sheet.descriptors().len(), 1);
    }
}
