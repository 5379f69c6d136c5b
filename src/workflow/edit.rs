//! Single-cell edit handling

use serde::Serialize;

use crate::domain::{approver_decision, evaluate_transition, ReconcileReport, TransitionOptions};
use crate::errors::{DealsheetError, Result};
use crate::schemas::{CellValue, Config, Field, RowStatus, StatusOutcome};
use crate::sheet::{BundleStore, RowSource, TableWriter};

use super::reconcile::rebuild_bundle_metadata;

/// What an edit did to its row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditReport {
    pub position: u32,
    pub field: Field,
    pub previous_status: RowStatus,
    pub outcome: StatusOutcome,
    /// Number of valid bundles after a rebuild, if the edit triggered one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_bundles: Option<usize>,
}

fn touches_bundles(field: Field) -> bool {
    matches!(field, Field::BundleId | Field::Term | Field::Quantity)
}

/// Apply one cell edit and settle the row's status.
///
/// The row is snapshotted before the edit so the status engine sees both
/// views. A `Clear` outcome wipes the row. Approver Action edits go through
/// the approver decision rule instead of the transition engine, and direct
/// writes to the Status field are stored as given. Edits to the bundle
/// identifier, Term or Quantity (and clears of bundled rows) rebuild the
/// bundle metadata afterwards.
pub fn handle_edit<S>(
    sheet: &mut S,
    config: &Config,
    position: u32,
    field: Field,
    value: CellValue,
) -> Result<EditReport>
where
    S: RowSource + TableWriter + BundleStore,
{
    let original = sheet.row(position)?;
    let previous_status =
        RowStatus::from_cell(original.get(&config.fields, Field::Status, config.start_col));
    let was_bundled = original.bundle_id(&config.fields, config.start_col).is_some();

    let mut current = original.values.clone();
    let offset = config
        .fields
        .offset(field, config.start_col)
        .filter(|offset| *offset < current.len())
        .ok_or_else(|| {
            DealsheetError::ConfigError(format!("{} has no column in this layout", field))
        })?;
    current[offset] = value.clone();
    sheet.write_cell(position, field, value.clone())?;

    let outcome = match field {
        Field::Status => StatusOutcome::Set(RowStatus::from_cell(&value)),
        Field::ApproverAction => {
            let status = approver_decision(previous_status, &value).unwrap_or(previous_status);
            StatusOutcome::Set(status)
        }
        _ => {
            let decision = evaluate_transition(
                &current,
                &original.values,
                config.telekom_deal,
                &TransitionOptions::default(),
                config.start_col,
                &config.fields,
            );
            tracing::debug!(
                row = position,
                rule = ?decision.rule,
                complete = decision.complete,
                "transition evaluated"
            );
            decision.outcome
        }
    };

    match outcome {
        StatusOutcome::Clear => {
            sheet.clear_row(position)?;
            tracing::info!(row = position, "model removed, row cleared");
        }
        StatusOutcome::Set(status) => {
            if field != Field::Status && status != previous_status {
                sheet.write_cell(position, Field::Status, status.to_cell())?;
            }
            if status != previous_status {
                tracing::info!(
                    row = position,
                    from = %previous_status,
                    to = %status,
                    "status changed"
                );
            }
        }
    }

    let rebuild = touches_bundles(field) || (outcome.is_clear() && was_bundled);
    let valid_bundles = if rebuild {
        let report: ReconcileReport = rebuild_bundle_metadata(sheet, config)?;
        Some(report.descriptors.len())
    } else {
        None
    };

    Ok(EditReport {
        position,
        field,
        previous_status,
        outcome,
        valid_bundles,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::Sheet;
    use crate::workflow::test_support::{complete_item, sheet_with};

    fn with_status(
        mut cells: Vec<(Field, CellValue)>,
        status: RowStatus,
    ) -> Vec<(Field, CellValue)> {
        cells.push((Field::Status, status.to_cell()));
        cells
    }

    fn status_of(sheet: &Sheet, position: u32) -> RowStatus {
        RowStatus::from_cell(&sheet.value(position, Field::Status).unwrap())
    }

    #[test]
    fn test_entering_model_creates_draft() {
        let mut sheet = sheet_with(&[vec![]]);

        let report =
            handle_edit(&mut sheet, &Config::default(), 2, Field::Model, "New Test Device".into())
                .unwrap();

        assert_eq!(report.previous_status, RowStatus::Blank);
        assert_eq!(report.outcome, StatusOutcome::Set(RowStatus::Draft));
        assert_eq!(status_of(&sheet, 2), RowStatus::Draft);
        assert!(report.valid_bundles.is_none());
    }

    #[test]
    fn test_filling_last_field_goes_pending() {
        let mut cells = complete_item("Pixel 8", 24, 2);
        cells.retain(|(field, _)| *field != Field::EpCapex);
        let mut sheet = sheet_with(&[with_status(cells, RowStatus::Draft)]);

        handle_edit(&mut sheet, &Config::default(), 2, Field::EpCapex, 1000.into()).unwrap();

        assert_eq!(status_of(&sheet, 2), RowStatus::PendingApproval);
    }

    #[test]
    fn test_editing_approved_row_marks_revision() {
        let mut sheet = sheet_with(&[with_status(
            complete_item("Pixel 8", 24, 2),
            RowStatus::ApprovedOriginal,
        )]);

        handle_edit(&mut sheet, &Config::default(), 2, Field::Quantity, 3.into()).unwrap();

        assert_eq!(status_of(&sheet, 2), RowStatus::RevisedByAe);
    }

    #[test]
    fn test_comment_keeps_approval() {
        let mut sheet = sheet_with(&[with_status(
            complete_item("Pixel 8", 24, 2),
            RowStatus::ApprovedOriginal,
        )]);

        let report = handle_edit(
            &mut sheet,
            &Config::default(),
            2,
            Field::ApproverComments,
            "fine".into(),
        )
        .unwrap();

        assert_eq!(report.outcome, StatusOutcome::Set(RowStatus::ApprovedOriginal));
        assert_eq!(status_of(&sheet, 2), RowStatus::ApprovedOriginal);
    }

    #[test]
    fn test_removing_model_clears_row_and_bundles() {
        let mut first = complete_item("Pixel 8", 24, 2);
        first.push((Field::BundleId, "707".into()));
        let mut second = complete_item("Pixel 8a", 24, 2);
        second.push((Field::BundleId, "707".into()));
        let mut sheet = sheet_with(&[first, second]);
        rebuild_bundle_metadata(&mut sheet, &Config::default()).unwrap();
        assert_eq!(sheet.descriptors().len(), 1);

        let report =
            handle_edit(&mut sheet, &Config::default(), 3, Field::Model, CellValue::Empty).unwrap();

        assert!(report.outcome.is_clear());
        assert_eq!(report.valid_bundles, Some(0));
        assert!(sheet.row(3).unwrap().values.iter().all(CellValue::is_empty));
        assert!(sheet.descriptors().is_empty());
    }

    #[test]
    fn test_approver_action_finalizes_pending_row() {
        let mut sheet = sheet_with(&[with_status(
            complete_item("Pixel 8", 24, 2),
            RowStatus::PendingApproval,
        )]);

        let report = handle_edit(
            &mut sheet,
            &Config::default(),
            2,
            Field::ApproverAction,
            "Approve New".into(),
        )
        .unwrap();

        assert_eq!(report.outcome, StatusOutcome::Set(RowStatus::ApprovedNew));
        assert_eq!(status_of(&sheet, 2), RowStatus::ApprovedNew);
    }

    #[test]
    fn test_approver_action_ignored_on_draft() {
        let mut sheet = sheet_with(&[with_status(
            vec![(Field::Model, "Pixel 8".into())],
            RowStatus::Draft,
        )]);

        handle_edit(&mut sheet, &Config::default(), 2, Field::ApproverAction, "Reject".into())
            .unwrap();

        assert_eq!(status_of(&sheet, 2), RowStatus::Draft);
        assert_eq!(
            sheet.value(2, Field::ApproverAction).unwrap(),
            CellValue::from("Reject")
        );
    }

    #[test]
    fn test_bundle_id_edit_rebuilds_metadata() {
        let mut second = complete_item("Pixel 8a", 24, 2);
        second.push((Field::BundleId, "B1".into()));
        let mut sheet = sheet_with(&[complete_item("Pixel 8", 24, 2), second]);

        let report =
            handle_edit(&mut sheet, &Config::default(), 2, Field::BundleId, "B1".into()).unwrap();

        assert_eq!(report.valid_bundles, Some(1));
        assert_eq!(sheet.descriptor_for_row(3).unwrap().bundle_id, "B1");
    }

    #[test]
    fn test_edit_unknown_row_fails() {
        let mut sheet = sheet_with(&[vec![]]);
        let err =
            handle_edit(&mut sheet, &Config::default(), 9, Field::Model, "x".into()).unwrap_err();
        assert!(matches!(err, DealsheetError::RowNotFound(9)));
    }

    #[test]
    fn test_telekom_config_changes_requirement() {
        let mut cells = complete_item("Pixel 8", 24, 2);
        cells.retain(|(field, _)| *field != Field::EpCapex);
        let mut sheet = sheet_with(&[with_status(cells, RowStatus::Draft)]);
        let config = Config {
            telekom_deal: true,
            ..Default::default()
        };

        handle_edit(&mut sheet, &config, 2, Field::TelekomCapex, 900.into()).unwrap();

        assert_eq!(status_of(&sheet, 2), RowStatus::PendingApproval);
    }
}
