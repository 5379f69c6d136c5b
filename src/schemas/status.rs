//! Row status vocabulary

use serde::{Deserialize, Serialize};

use super::CellValue;

/// Approval status attached to a row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum RowStatus {
    /// No status (blank cell)
    #[default]
    #[serde(rename = "")]
    Blank,
    /// Row exists but required data is missing
    Draft,
    /// Complete row waiting for a finance decision
    #[serde(rename = "Pending Approval")]
    PendingApproval,
    /// Approved at the original price
    #[serde(rename = "Approved (Original)")]
    ApprovedOriginal,
    /// Approved at a new price
    #[serde(rename = "Approved (New)")]
    ApprovedNew,
    /// Rejected by finance
    Rejected,
    /// A finalized row that sales edited afterwards
    #[serde(rename = "Revised by AE")]
    RevisedByAe,
}

/// Every status in display order.
pub const STATUS_VOCABULARY: &[RowStatus] = &[
    RowStatus::Blank,
    RowStatus::Draft,
    RowStatus::PendingApproval,
    RowStatus::ApprovedOriginal,
    RowStatus::ApprovedNew,
    RowStatus::Rejected,
    RowStatus::RevisedByAe,
];

impl RowStatus {
    /// The exact text stored in the status cell.
    pub fn as_str(&self) -> &'static str {
        match self {
            RowStatus::Blank => "",
            RowStatus::Draft => "Draft",
            RowStatus::PendingApproval => "Pending Approval",
            RowStatus::ApprovedOriginal => "Approved (Original)",
            RowStatus::ApprovedNew => "Approved (New)",
            RowStatus::Rejected => "Rejected",
            RowStatus::RevisedByAe => "Revised by AE",
        }
    }

    /// Human-readable label; blank rows read as "(blank)"
    pub fn display_or_blank(&self) -> &'static str {
        match self {
            RowStatus::Blank => "(blank)",
            other => other.as_str(),
        }
    }

    /// Statuses a reviewer has closed out.
    pub fn is_finalized(&self) -> bool {
        matches!(
            self,
            RowStatus::ApprovedOriginal | RowStatus::ApprovedNew | RowStatus::Rejected
        )
    }

    /// Read the status stored in a cell. Text outside the vocabulary reads as blank.
    pub fn from_cell(cell: &CellValue) -> Self {
        cell.as_display().trim().parse().unwrap_or_default()
    }

    pub fn to_cell(&self) -> CellValue {
        match self {
            RowStatus::Blank => CellValue::Empty,
            other => CellValue::Text(other.as_str().to_string()),
        }
    }
}

impl std::fmt::Display for RowStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for RowStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        STATUS_VOCABULARY
            .iter()
            .copied()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("Unknown row status: {}", s))
    }
}

/// What the caller must do with a row after an edit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "status", rename_all = "snake_case")]
pub enum StatusOutcome {
    /// Model was removed; wipe every field of the row
    Clear,
    /// Persist this status
    Set(RowStatus),
}

impl StatusOutcome {
    pub fn is_clear(&self) -> bool {
        matches!(self, StatusOutcome::Clear)
    }

    /// The status to persist, or None when the row must be cleared
    pub fn status(&self) -> Option<RowStatus> {
        match self {
            StatusOutcome::Clear => None,
            StatusOutcome::Set(status) => Some(*status),
        }
    }
}

/// Decision a finance approver records in the Approver Action field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApproverAction {
    #[serde(rename = "Approve Original")]
    ApproveOriginal,
    #[serde(rename = "Approve New")]
    ApproveNew,
    Reject,
}

impl ApproverAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApproverAction::ApproveOriginal => "Approve Original",
            ApproverAction::ApproveNew => "Approve New",
            ApproverAction::Reject => "Reject",
        }
    }

    /// Status a row receives when this decision is applied
    pub fn resulting_status(&self) -> RowStatus {
        match self {
            ApproverAction::ApproveOriginal => RowStatus::ApprovedOriginal,
            ApproverAction::ApproveNew => RowStatus::ApprovedNew,
            ApproverAction::Reject => RowStatus::Rejected,
        }
    }
}

impl std::str::FromStr for ApproverAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Approve Original" => Ok(ApproverAction::ApproveOriginal),
            "Approve New" => Ok(ApproverAction::ApproveNew),
            "Reject" => Ok(ApproverAction::Reject),
            other => Err(format!("Unknown approver action: {}", other)),
        }
    }
}
