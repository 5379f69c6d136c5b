//! Recalc command - Recompute every row's status

use crate::cli::GlobalArgs;
use crate::domain::TransitionOptions;
use crate::errors::Result;
use crate::workflow::{recalculate_all, RecalcReport};

use super::Session;

pub async fn run(args: &GlobalArgs, force_revision: bool) -> Result<()> {
    let session = Session::open(args)?;
    let options = TransitionOptions {
        force_revision_of_finalized_items: force_revision,
    };

    let report = {
        let mut sheet = session.workbook.exclusive().await?;
        let report = recalculate_all(&mut *sheet, &session.config, &options)?;
        if !report.changes.is_empty() {
            session.save(&sheet)?;
        }
        report
    };

    session.emit(&report, || render(&report))
}

fn render(report: &RecalcReport) -> String {
    let mut lines = vec![format!(
        "Recalculated {} rows, {} changed",
        report.rows_scanned,
        report.changes.len()
    )];
    for change in &report.changes {
        lines.push(format!(
            "  Row {}: {} -> {}",
            change.position,
            change.from.display_or_blank(),
            change.to.display_or_blank()
        ));
    }
    lines.join("\n")
}
