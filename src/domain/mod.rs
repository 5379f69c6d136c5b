//! Domain logic for row statuses and bundles
//!
//! Everything here is a pure function over in-memory rows: no I/O, no
//! logging, no mutation of the inputs.

mod approvals;
mod bundles;
mod changes;
mod completeness;
mod reconcile;
mod transitions;


pub use approvals::approver_decision;
pub use bundles::{find_all_bundles, group_rows_by_bundle, validate_bundle, BundleGroup};
pub use changes::{edited_key_fields, was_key_field_edited};
pub use completeness::{is_row_complete, missing_required_fields, required_fields};
pub use reconcile::{reconcile_all_bundles, reconcile_report, ReconcileReport};
pub use transitions::{
    compute_new_status, evaluate_transition, StatusDecision, TransitionOptions, TransitionRule,
};
