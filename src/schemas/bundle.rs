//! Bundle descriptors and validation verdicts

use serde::{Deserialize, Serialize};

/// Structural metadata of a valid bundle
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BundleDescriptor {
    pub bundle_id: String,
    pub start_row: u32,
    pub end_row: u32,
}

impl BundleDescriptor {
    pub fn contains(&self, position: u32) -> bool {
        (self.start_row..=self.end_row).contains(&position)
    }

    pub fn row_count(&self) -> u32 {
        self.end_row - self.start_row + 1
    }
}

/// A reason a bundle is invalid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BundleIssue {
    /// Fewer than two rows carry the identifier
    TooFewMembers { found: usize },
    /// Members are not on consecutive rows
    NonContiguous { missing_rows: Vec<u32> },
    /// A member's Term differs from the first member's
    TermMismatch {
        row: u32,
        expected: String,
        found: String,
    },
    /// A member's Quantity differs from the first member's
    QuantityMismatch {
        row: u32,
        expected: String,
        found: String,
    },
}

impl std::fmt::Display for BundleIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BundleIssue::TooFewMembers { found } => {
                write!(f, "a bundle needs at least 2 rows, found {}", found)
            }
            BundleIssue::NonContiguous { missing_rows } => {
                let rows: Vec<String> = missing_rows.iter().map(|r| r.to_string()).collect();
                write!(f, "rows are not consecutive (gap at {})", rows.join(", "))
            }
            BundleIssue::TermMismatch { row, expected, found } => {
                write!(f, "row {} has term '{}', expected '{}'", row, found, expected)
            }
            BundleIssue::QuantityMismatch { row, expected, found } => {
                write!(f, "row {} has quantity '{}', expected '{}'", row, found, expected)
            }
        }
    }
}

/// Result of validating a single bundle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleVerdict {
    pub is_valid: bool,

    /// Lowest member position, None when no rows carry the id
    pub start_row: Option<u32>,

    /// Highest member position, None when no rows carry the id
    pub end_row: Option<u32>,

    /// Member positions in ascending order
    pub members: Vec<u32>,

    #[serde(default)]
    pub issues: Vec<BundleIssue>,
}

impl BundleVerdict {
    pub fn not_found() -> Self {
        BundleVerdict {
            is_valid: false,
            start_row: None,
            end_row: None,
            members: Vec::new(),
            issues: Vec::new(),
        }
    }

    pub fn is_found(&self) -> bool {
        !self.members.is_empty()
    }
}

/// One bundle group found by a full scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleReport {
    pub bundle_id: String,
    pub start_row: u32,
    pub end_row: u32,
    pub is_valid: bool,
    #[serde(default)]
    pub issues: Vec<BundleIssue>,
}

impl BundleReport {
    /// Descriptor for a valid group; invalid groups get none
    pub fn descriptor(&self) -> Option<BundleDescriptor> {
        if !self.is_valid {
            return None;
        }
        Some(BundleDescriptor {
            bundle_id: self.bundle_id.clone(),
            start_row: self.start_row,
            end_row: self.end_row,
        })
    }
}
