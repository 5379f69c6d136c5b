//! Bulk status recalculation

use serde::Serialize;

use crate::domain::{compute_new_status, TransitionOptions};
use crate::errors::Result;
use crate::schemas::{Config, Field, RowStatus, StatusOutcome};
use crate::sheet::{RowSource, TableWriter};

use super::StatusChange;

/// Result of a recalculation pass
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecalcReport {
    pub rows_scanned: usize,
    pub changes: Vec<StatusChange>,
}

/// Recompute the status of every row from its current data.
///
/// Each row is its own original, so only completeness and the forced
/// revision option can move a status.
pub fn recalculate_all<S>(
    sheet: &mut S,
    config: &Config,
    options: &TransitionOptions,
) -> Result<RecalcReport>
where
    S: RowSource + TableWriter,
{
    let rows = sheet.rows()?;
    let mut report = RecalcReport {
        rows_scanned: rows.len(),
        changes: Vec::new(),
    };

    for row in &rows {
        let stored = RowStatus::from_cell(row.get(&config.fields, Field::Status, config.start_col));
        let outcome = compute_new_status(
            &row.values,
            &row.values,
            config.telekom_deal,
            options,
            config.start_col,
            &config.fields,
        );
        // Identical snapshots never remove Model, so Clear cannot occur here
        let StatusOutcome::Set(status) = outcome else {
            continue;
        };
        if status == stored {
            continue;
        }
        sheet.write_cell(row.position, Field::Status, status.to_cell())?;
        report.changes.push(StatusChange {
            position: row.position,
            from: stored,
            to: status,
        });
    }

    tracing::info!(
        scanned = report.rows_scanned,
        changed = report.changes.len(),
        forced = options.force_revision_of_finalized_items,
        "statuses recalculated"
    );
    Ok(report)
}
