//! Structural corrections of a named bundle
//!
//! Every correction is a read-modify-write sequence that finishes with a full
//! bundle metadata rebuild. Run them inside the workbook's exclusive section.

use serde::Serialize;

use crate::domain::{compute_new_status, ReconcileReport, TransitionOptions};
use crate::errors::{DealsheetError, Result};
use crate::schemas::{CellValue, Config, Field, RowStatus, SheetRow, StatusOutcome};
use crate::sheet::{BundleStore, RowSource, TableWriter};

use super::reconcile::rebuild_bundle_metadata;
use super::StatusChange;

/// What a correction did
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrectionReport {
    pub bundle_id: String,
    /// Member positions after the correction
    pub rows: Vec<u32>,
    pub status_changes: Vec<StatusChange>,
    pub reconcile: ReconcileReport,
}

/// Rows carrying the bundle identifier, in position order
fn members_of(rows: Vec<SheetRow>, bundle_id: &str, config: &Config) -> Result<Vec<SheetRow>> {
    let target = bundle_id.trim();
    let members: Vec<SheetRow> = rows
        .into_iter()
        .filter(|row| row.bundle_id(&config.fields, config.start_col).as_deref() == Some(target))
        .collect();
    if members.is_empty() {
        return Err(DealsheetError::BundleNotFound(target.to_string()));
    }
    Ok(members)
}

fn correction_failed(
    bundle_id: &str,
    start_row: u32,
    end_row: u32,
    error: DealsheetError,
) -> DealsheetError {
    DealsheetError::Correction {
        bundle_id: bundle_id.trim().to_string(),
        start_row,
        end_row,
        message: error.to_string(),
    }
}

fn span(members: &[SheetRow]) -> (u32, u32) {
    let start = members.first().map(|row| row.position).unwrap_or_default();
    let end = members.last().map(|row| row.position).unwrap_or(start);
    (start, end)
}

/// Force Term and Quantity on every member of a bundle.
///
/// Member statuses are recomputed against their pre-correction snapshot, so
/// finalized rows whose values actually changed become `Revised by AE`.
///
/// # Errors
/// * `BundleNotFound` - No row carries the identifier
/// * `Correction` - A member write failed; carries the attempted range
pub fn apply_correction<S>(
    sheet: &mut S,
    config: &Config,
    bundle_id: &str,
    term: CellValue,
    quantity: CellValue,
) -> Result<CorrectionReport>
where
    S: RowSource + TableWriter + BundleStore,
{
    let members = members_of(sheet.rows()?, bundle_id, config)?;
    let (start_row, end_row) = span(&members);
    let (fields, start_col) = (&config.fields, config.start_col);
    let mut status_changes = Vec::new();

    for original in &members {
        let mut current = original.values.clone();
        for (field, value) in [(Field::Term, &term), (Field::Quantity, &quantity)] {
            if let Some(offset) = fields.offset(field, start_col) {
                if let Some(cell) = current.get_mut(offset) {
                    *cell = value.clone();
                }
            }
            sheet
                .write_cell(original.position, field, value.clone())
                .map_err(|e| correction_failed(bundle_id, start_row, end_row, e))?;
        }

        let from = RowStatus::from_cell(original.get(fields, Field::Status, start_col));
        let outcome = compute_new_status(
            &current,
            &original.values,
            config.telekom_deal,
            &TransitionOptions::default(),
            start_col,
            fields,
        );
        if let StatusOutcome::Set(to) = outcome {
            if to != from {
                sheet
                    .write_cell(original.position, Field::Status, to.to_cell())
                    .map_err(|e| correction_failed(bundle_id, start_row, end_row, e))?;
                status_changes.push(StatusChange {
                    position: original.position,
                    from,
                    to,
                });
            }
        }
    }

    tracing::info!(
        bundle_id = %bundle_id.trim(),
        members = members.len(),
        term = %term,
        quantity = %quantity,
        "bundle values corrected"
    );

    let reconcile = rebuild_bundle_metadata(sheet, config)?;
    Ok(CorrectionReport {
        bundle_id: bundle_id.trim().to_string(),
        rows: members.iter().map(|row| row.position).collect(),
        status_changes,
        reconcile,
    })
}

/// Move a bundle's members so they sit directly below the first member.
///
/// The first member is the anchor and never moves. Each later member is
/// moved up to the row after its predecessor; rows it passes shift down.
///
/// # Errors
/// * `BundleNotFound` - No row carries the identifier
/// * `Correction` - A move failed; earlier moves are not rolled back
pub fn fix_gaps<S>(sheet: &mut S, config: &Config, bundle_id: &str) -> Result<CorrectionReport>
where
    S: RowSource + TableWriter + BundleStore,
{
    let members = members_of(sheet.rows()?, bundle_id, config)?;
    let (anchor, end_row) = span(&members);
    let mut rows = Vec::with_capacity(members.len());

    for (k, member) in members.iter().enumerate() {
        let target = anchor + k as u32;
        if member.position != target {
            sheet
                .move_row(member.position, target)
                .map_err(|e| correction_failed(bundle_id, anchor, end_row, e))?;
            tracing::debug!(from = member.position, to = target, "bundle member moved");
        }
        rows.push(target);
    }

    tracing::info!(
        bundle_id = %bundle_id.trim(),
        start_row = anchor,
        end_row = anchor + members.len() as u32 - 1,
        "bundle gaps closed"
    );

    let reconcile = rebuild_bundle_metadata(sheet, config)?;
    Ok(CorrectionReport {
        bundle_id: bundle_id.trim().to_string(),
        rows,
        status_changes: Vec::new(),
        reconcile,
    })
}

/// Clear the bundle identifier from every member
///
/// # Errors
/// * `BundleNotFound` - No row carries the identifier
/// * `Correction` - A member write failed
pub fn dissolve_bundle<S>(
    sheet: &mut S,
    config: &Config,
    bundle_id: &str,
) -> Result<CorrectionReport>
where
    S: RowSource + TableWriter + BundleStore,
{
    let members = members_of(sheet.rows()?, bundle_id, config)?;
    let (start_row, end_row) = span(&members);

    for member in &members {
        sheet
            .write_cell(member.position, Field::BundleId, CellValue::Empty)
            .map_err(|e| correction_failed(bundle_id, start_row, end_row, e))?;
    }

    tracing::info!(bundle_id = %bundle_id.trim(), members = members.len(), "bundle dissolved");

    let reconcile = rebuild_bundle_metadata(sheet, config)?;
    Ok(CorrectionReport {
        bundle_id: bundle_id.trim().to_string(),
        rows: members.iter().map(|row| row.position).collect(),
        status_changes: Vec::new(),
        reconcile,
    })
}
