//! Finance approver decisions

use crate::schemas::{ApproverAction, CellValue, RowStatus};

/// Status a row moves to when an approver records a decision.
///
/// Only rows waiting for a decision (`Pending Approval` or `Revised by AE`)
/// accept one. Returns None when the decision does not apply, including an
/// empty or unrecognised action.
pub fn approver_decision(current: RowStatus, action: &CellValue) -> Option<RowStatus> {
    if !matches!(current, RowStatus::PendingApproval | RowStatus::RevisedByAe) {
        return None;
    }
    action
        .as_display()
        .parse::<ApproverAction>()
        .ok()
        .map(|action| action.resulting_status())
}
