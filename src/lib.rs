//! Dealsheet - Line item status and bundle integrity for deal sheets
//!
//! This library provides the core functionality for the dealsheet CLI, including:
//! - Schema definitions for cells, statuses, fields, bundles and config
//! - Domain logic for status transitions and bundle validation
//! - An in-memory sheet behind an exclusive workbook lock
//! - Workflows for edits, recalculation, reconciliation and corrections
//! - File system utilities for reading/writing JSON

pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod fs;
pub mod schemas;
pub mod sheet;
pub mod workflow;

// Re-export commonly used types
pub use errors::{DealsheetError, Result};
pub use schemas::{CellValue, Config, Field, RowStatus, StatusOutcome};
