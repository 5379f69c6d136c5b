//! Row status transition logic
//!
//! The new status of an edited row is decided in two ordered passes:
//!
//! 1. Transition rules look at what the edit changed and pick a tentative
//!    status (or order the row cleared).
//! 2. A refinement pass settles the tentative status against the row's
//!    current completeness.
//!
//! Completeness can change without any rule firing (filling in the last
//! required field, for instance), which is why the passes stay separate.

use crate::schemas::{CellValue, Field, FieldMap, RowStatus, StatusOutcome};

use super::changes::was_key_field_edited;
use super::completeness::is_row_complete;

/// Overrides for a status computation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransitionOptions {
    /// Treat finalized rows as revised even when no key field changed.
    /// Used by bulk recalculation passes.
    pub force_revision_of_finalized_items: bool,
}

/// The transition rule that produced the tentative status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionRule {
    /// Model was removed from the row
    ModelRemoved,
    /// A finalized row was edited (or revision was forced)
    Revision,
    /// A key field changed or Model was newly entered
    Draft,
    /// Nothing relevant happened; the prior status carries over
    Unchanged,
}

/// Full account of a status computation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusDecision {
    /// Status stored in the original row
    pub prior: RowStatus,
    /// Rule that fired in the first pass
    pub rule: TransitionRule,
    /// Status chosen by the first pass (None when the row must be cleared)
    pub tentative: Option<RowStatus>,
    /// Whether the current row passed the completeness check
    pub complete: bool,
    /// What the caller must do
    pub outcome: StatusOutcome,
}

fn first_pass(
    current: &[CellValue],
    original: &[CellValue],
    prior: RowStatus,
    options: &TransitionOptions,
    start_col: u32,
    fields: &FieldMap,
) -> TransitionRule {
    let current_model = fields.value(current, Field::Model, start_col).is_truthy();
    let original_model = fields.value(original, Field::Model, start_col).is_truthy();

    if original_model && !current_model {
        return TransitionRule::ModelRemoved;
    }

    let key_edited = was_key_field_edited(current, original, fields, start_col);

    if prior.is_finalized() && (key_edited || options.force_revision_of_finalized_items) {
        return TransitionRule::Revision;
    }

    if key_edited || (!original_model && current_model) {
        return TransitionRule::Draft;
    }

    TransitionRule::Unchanged
}

fn refine(tentative: RowStatus, prior: RowStatus, complete: bool, has_model: bool) -> RowStatus {
    if complete {
        return match tentative {
            RowStatus::Draft | RowStatus::Blank => RowStatus::PendingApproval,
            other => other,
        };
    }

    if has_model {
        return RowStatus::Draft;
    }

    // Row emptied by paste or delete
    if tentative != prior && !prior.is_finalized() {
        return RowStatus::Blank;
    }

    tentative
}

/// Compute the new status of an edited row, with the reasoning behind it.
///
/// Neither row is modified. `original` is the snapshot taken before the
/// edit; its status cell supplies the prior status.
pub fn evaluate_transition(
    current: &[CellValue],
    original: &[CellValue],
    telekom_deal: bool,
    options: &TransitionOptions,
    start_col: u32,
    fields: &FieldMap,
) -> StatusDecision {
    let prior = RowStatus::from_cell(fields.value(original, Field::Status, start_col));
    let complete = is_row_complete(current, fields, start_col, telekom_deal);
    let rule = first_pass(current, original, prior, options, start_col, fields);

    let tentative = match rule {
        TransitionRule::ModelRemoved => None,
        TransitionRule::Revision => Some(RowStatus::RevisedByAe),
        TransitionRule::Draft => Some(RowStatus::Draft),
        TransitionRule::Unchanged => Some(prior),
    };

    let outcome = match tentative {
        None => StatusOutcome::Clear,
        Some(tentative) => {
            let has_model = fields.value(current, Field::Model, start_col).is_truthy();
            StatusOutcome::Set(refine(tentative, prior, complete, has_model))
        }
    };

    StatusDecision {
        prior,
        rule,
        tentative,
        complete,
        outcome,
    }
}

/// Compute the new status of an edited row.
///
/// Returns [`StatusOutcome::Clear`] when Model was removed; the caller must
/// then wipe the whole row. Never fails: malformed or short rows resolve to a
/// status like any other.
pub fn compute_new_status(
    current: &[CellValue],
    original: &[CellValue],
    telekom_deal: bool,
    options: &TransitionOptions,
    start_col: u32,
    fields: &FieldMap,
) -> StatusOutcome {
    evaluate_transition(current, original, telekom_deal, options, start_col, fields).outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    struct RowBuilder {
        fields: FieldMap,
        values: Vec<CellValue>,
    }

    impl RowBuilder {
        fn new() -> Self {
            let fields = FieldMap::default();
            let values = vec![CellValue::Empty; fields.row_width(1)];
            RowBuilder { fields, values }
        }

        fn set(mut self, field: Field, value: impl Into<CellValue>) -> Self {
            let offset = self.fields.offset(field, 1).unwrap();
            self.values[offset] = value.into();
            self
        }

        fn status(self, status: RowStatus) -> Self {
            self.set(Field::Status, status.to_cell())
        }

        fn build(self) -> Vec<CellValue> {
            self.values
        }
    }

    fn complete() -> RowBuilder {
        RowBuilder::new()
            .set(Field::Model, "Galaxy S24")
            .set(Field::SalesAskPrice, 50)
            .set(Field::Quantity, 10)
            .set(Field::Term, 24)
            .set(Field::EpCapex, 1000)
    }

    fn compute(current: &[CellValue], original: &[CellValue]) -> StatusOutcome {
        compute_new_status(
            current,
            original,
            false,
            &TransitionOptions::default(),
            1,
            &FieldMap::default(),
        )
    }

    #[test]
    fn test_new_model_on_blank_row_is_draft() {
        let original = RowBuilder::new().build();
        let current = RowBuilder::new().set(Field::Model, "New Test Device").build();

        assert_eq!(compute(&current, &original), StatusOutcome::Set(RowStatus::Draft));
    }

    #[test]
    fn test_completing_draft_row_goes_pending() {
        let original = RowBuilder::new()
            .set(Field::Model, "New Test Device")
            .set(Field::Quantity, 1)
            .status(RowStatus::Draft)
            .build();
        let current = RowBuilder::new()
            .set(Field::Model, "New Test Device")
            .set(Field::Quantity, 1)
            .set(Field::Term, 24)
            .set(Field::SalesAskPrice, 50)
            .set(Field::EpCapex, 1000)
            .status(RowStatus::Draft)
            .build();

        assert_eq!(
            compute(&current, &original),
            StatusOutcome::Set(RowStatus::PendingApproval)
        );
    }

    #[test]
    fn test_editing_quantity_of_approved_row_is_revision() {
        let original = complete().status(RowStatus::ApprovedOriginal).build();
        let current = complete()
            .set(Field::Quantity, 12)
            .status(RowStatus::ApprovedOriginal)
            .build();

        let decision = evaluate_transition(
            &current,
            &original,
            false,
            &TransitionOptions::default(),
            1,
            &FieldMap::default(),
        );
        assert_eq!(decision.rule, TransitionRule::Revision);
        assert_eq!(decision.outcome, StatusOutcome::Set(RowStatus::RevisedByAe));
    }

    #[test]
    fn test_rejected_row_edit_is_revision() {
        let original = complete().status(RowStatus::Rejected).build();
        let current = complete()
            .set(Field::SalesAskPrice, 45)
            .status(RowStatus::Rejected)
            .build();

        assert_eq!(
            compute(&current, &original),
            StatusOutcome::Set(RowStatus::RevisedByAe)
        );
    }

    #[test]
    fn test_comment_edit_keeps_approved_status() {
        let original = complete().status(RowStatus::ApprovedOriginal).build();
        let current = complete()
            .set(Field::ApproverComments, "ok for Q3")
            .status(RowStatus::ApprovedOriginal)
            .build();

        assert_eq!(
            compute(&current, &original),
            StatusOutcome::Set(RowStatus::ApprovedOriginal)
        );
    }

    #[test]
    fn test_removing_model_clears_row() {
        let original = complete().status(RowStatus::PendingApproval).build();
        let current = complete()
            .set(Field::Model, "")
            .set(Field::Quantity, 99)
            .status(RowStatus::PendingApproval)
            .build();

        assert_eq!(compute(&current, &original), StatusOutcome::Clear);
    }

    #[test]
    fn test_removing_model_from_approved_row_clears_row() {
        let original = complete().status(RowStatus::ApprovedNew).build();
        let current = complete()
            .set(Field::Model, CellValue::Empty)
            .status(RowStatus::ApprovedNew)
            .build();

        let decision = evaluate_transition(
            &current,
            &original,
            false,
            &TransitionOptions::default(),
            1,
            &FieldMap::default(),
        );
        assert_eq!(decision.rule, TransitionRule::ModelRemoved);
        assert_eq!(decision.tentative, None);
        assert!(decision.outcome.is_clear());
    }

    #[test]
    fn test_forced_revision_without_edit() {
        let row = complete().status(RowStatus::ApprovedNew).build();
        let options = TransitionOptions {
            force_revision_of_finalized_items: true,
        };

        let outcome = compute_new_status(&row, &row, false, &options, 1, &FieldMap::default());
        assert_eq!(outcome, StatusOutcome::Set(RowStatus::RevisedByAe));
    }

    #[test]
    fn test_forced_revision_ignores_unfinalized_rows() {
        let row = complete().status(RowStatus::PendingApproval).build();
        let options = TransitionOptions {
            force_revision_of_finalized_items: true,
        };

        let outcome = compute_new_status(&row, &row, false, &options, 1, &FieldMap::default());
        assert_eq!(outcome, StatusOutcome::Set(RowStatus::PendingApproval));
    }

    #[test]
    fn test_incomplete_row_with_model_is_forced_to_draft() {
        let original = complete().status(RowStatus::PendingApproval).build();
        let current = complete()
            .set(Field::Term, "")
            .status(RowStatus::PendingApproval)
            .build();

        assert_eq!(compute(&current, &original), StatusOutcome::Set(RowStatus::Draft));
    }

    #[test]
    fn test_incomplete_approved_row_drops_to_draft() {
        let original = complete()
            .set(Field::EpCapex, 0)
            .status(RowStatus::ApprovedOriginal)
            .build();
        let current = complete()
            .set(Field::EpCapex, 0)
            .set(Field::ApproverComments, "note")
            .status(RowStatus::ApprovedOriginal)
            .build();

        assert_eq!(compute(&current, &original), StatusOutcome::Set(RowStatus::Draft));
    }

    #[test]
    fn test_key_edit_on_modelless_row_resets_to_blank() {
        let original = RowBuilder::new().set(Field::Quantity, 3).status(RowStatus::Draft).build();
        let current = RowBuilder::new().set(Field::Quantity, 4).status(RowStatus::Draft).build();

        // Tentative Draft equals the stored status, so it is kept
        assert_eq!(compute(&current, &original), StatusOutcome::Set(RowStatus::Draft));

        let original = RowBuilder::new().set(Field::Quantity, 3).build();
        let current = RowBuilder::new().set(Field::Quantity, 4).build();
        assert_eq!(compute(&current, &original), StatusOutcome::Set(RowStatus::Blank));
    }

    #[test]
    fn test_modelless_finalized_row_keeps_revision() {
        let original = RowBuilder::new().set(Field::Term, 24).status(RowStatus::Rejected).build();
        let current = RowBuilder::new().set(Field::Term, 36).status(RowStatus::Rejected).build();

        assert_eq!(
            compute(&current, &original),
            StatusOutcome::Set(RowStatus::RevisedByAe)
        );
    }

    #[test]
    fn test_untouched_blank_row_stays_blank() {
        let row = RowBuilder::new().build();
        assert_eq!(compute(&row, &row), StatusOutcome::Set(RowStatus::Blank));
    }

    #[test]
    fn test_complete_untouched_blank_status_is_promoted() {
        let row = complete().build();
        assert_eq!(
            compute(&row, &row),
            StatusOutcome::Set(RowStatus::PendingApproval)
        );
    }

    #[test]
    fn test_revised_row_edited_again_goes_pending() {
        let original = complete().status(RowStatus::RevisedByAe).build();
        let current = complete()
            .set(Field::Quantity, 20)
            .status(RowStatus::RevisedByAe)
            .build();

        assert_eq!(
            compute(&current, &original),
            StatusOutcome::Set(RowStatus::PendingApproval)
        );
    }

    #[test]
    fn test_telekom_flag_changes_completeness() {
        let original = RowBuilder::new()
            .set(Field::Model, "Pixel 8")
            .status(RowStatus::Draft)
            .build();
        let current = RowBuilder::new()
            .set(Field::Model, "Pixel 8")
            .set(Field::SalesAskPrice, 30)
            .set(Field::Quantity, 2)
            .set(Field::Term, 36)
            .set(Field::TelekomCapex, 700)
            .status(RowStatus::Draft)
            .build();
        let fields = FieldMap::default();
        let options = TransitionOptions::default();

        assert_eq!(
            compute_new_status(&current, &original, true, &options, 1, &fields),
            StatusOutcome::Set(RowStatus::PendingApproval)
        );
        assert_eq!(
            compute_new_status(&current, &original, false, &options, 1, &fields),
            StatusOutcome::Set(RowStatus::Draft)
        );
    }

    #[test]
    fn test_inputs_are_not_mutated() {
        let original = complete().status(RowStatus::ApprovedOriginal).build();
        let current = complete().set(Field::Term, 36).build();
        let original_copy = original.clone();
        let current_copy = current.clone();

        let _ = compute(&current, &original);

        assert_eq!(original, original_copy);
        assert_eq!(current, current_copy);
    }
}
