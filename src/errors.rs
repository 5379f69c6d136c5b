//! Error types for dealsheet
//!
//! Each error type has a corresponding error code for programmatic handling.
//! The pure status and bundle functions never produce these; only the sheet
//! collaborators and the workflows built on them do.

use thiserror::Error;

/// Result type alias for dealsheet operations
pub type Result<T> = std::result::Result<T, DealsheetError>;

/// Phase of a bundle metadata rebuild
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcilePhase {
    /// Removing all stored descriptors
    Clear,
    /// Reading the row snapshot
    Scan,
    /// Writing the rebuilt descriptors
    Write,
}

impl std::fmt::Display for ReconcilePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReconcilePhase::Clear => write!(f, "clear"),
            ReconcilePhase::Scan => write!(f, "scan"),
            ReconcilePhase::Write => write!(f, "write"),
        }
    }
}

/// Main error type for all dealsheet operations
#[derive(Debug, Error)]
pub enum DealsheetError {
    /// Invalid JSON format
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// A row does not have the shape the field layout expects
    #[error("Malformed row {row}: {message}")]
    MalformedRow { row: u32, message: String },

    /// Position outside the table
    #[error("Row {0} does not exist")]
    RowNotFound(u32),

    /// Unknown field name
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// No row carries the bundle identifier
    #[error("Bundle not found: {0}")]
    BundleNotFound(String),

    /// A structural correction could not be completed
    #[error("Correction of bundle {bundle_id} (rows {start_row}-{end_row}) failed: {message}")]
    Correction {
        bundle_id: String,
        start_row: u32,
        end_row: u32,
        message: String,
    },

    /// Bundle metadata rebuild failed
    #[error("Bundle reconcile failed during {phase}: {message}")]
    Reconcile {
        phase: ReconcilePhase,
        message: String,
    },

    /// Exclusive section could not be acquired in time
    #[error("Operation timed out: {0}")]
    Timeout(String),

    /// IO error wrapper
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error with context
    #[error("{context}: {message}")]
    Wrapped { context: String, message: String },
}

impl DealsheetError {
    /// Get the error code for this error type
    pub fn code(&self) -> &'static str {
        match self {
            DealsheetError::InvalidJson(_) => "INVALID_JSON",
            DealsheetError::FileNotFound(_) => "FILE_NOT_FOUND",
            DealsheetError::ConfigError(_) => "CONFIG_ERROR",
            DealsheetError::MalformedRow { .. } => "MALFORMED_ROW",
            DealsheetError::RowNotFound(_) => "ROW_NOT_FOUND",
            DealsheetError::UnknownField(_) => "UNKNOWN_FIELD",
            DealsheetError::BundleNotFound(_) => "BUNDLE_NOT_FOUND",
            DealsheetError::Correction { .. } => "CORRECTION_FAILED",
            DealsheetError::Reconcile { .. } => "RECONCILE_FAILED",
            DealsheetError::Timeout(_) => "TIMEOUT",
            DealsheetError::Io(_) => "IO_ERROR",
            DealsheetError::Wrapped { .. } => "WRAPPED_ERROR",
        }
    }

    /// Wrap an error with additional context
    pub fn wrap<E: std::fmt::Display>(error: E, context: impl Into<String>) -> Self {
        DealsheetError::Wrapped {
            context: context.into(),
            message: error.to_string(),
        }
    }

    /// Attach a reconcile phase to a collaborator failure
    pub fn in_phase(self, phase: ReconcilePhase) -> Self {
        DealsheetError::Reconcile {
            phase,
            message: self.to_string(),
        }
    }
}

/// Convert an error to an appropriate exit code
pub fn to_exit_code(error: &DealsheetError) -> i32 {
    match error {
        DealsheetError::ConfigError(_) | DealsheetError::UnknownField(_) => 2,
        DealsheetError::Timeout(_) => 75, // EX_TEMPFAIL, safe to retry
        _ => 1,
    }
}
