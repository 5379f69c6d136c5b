//! Reconcile command - Rebuild all stored bundle metadata

use crate::cli::GlobalArgs;
use crate::domain::ReconcileReport;
use crate::errors::Result;
use crate::workflow::rebuild_bundle_metadata;

use super::Session;

pub async fn run(args: &GlobalArgs) -> Result<()> {
    let session = Session::open(args)?;

    let report = {
        let mut sheet = session.workbook.exclusive().await?;
        let report = rebuild_bundle_metadata(&mut *sheet, &session.config)?;
        session.save(&sheet)?;
        report
    };

    session.emit(&report, || render(&report))
}

pub(crate) fn render(report: &ReconcileReport) -> String {
    let mut lines = vec![format!(
        "{} valid bundles, {} invalid",
        report.descriptors.len(),
        report.invalid.len()
    )];
    for descriptor in &report.descriptors {
        lines.push(format!(
            "  {}  rows {}-{}",
            descriptor.bundle_id, descriptor.start_row, descriptor.end_row
        ));
    }
    for invalid in &report.invalid {
        lines.push(format!(
            "  {}  rows {}-{}  INVALID",
            invalid.bundle_id, invalid.start_row, invalid.end_row
        ));
    }
    lines.join("\n")
}
