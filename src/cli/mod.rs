//! CLI module for dealsheet
//!
//! Provides the command-line interface using clap.

pub mod commands;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Dealsheet - Line item status and bundle integrity for deal sheets
#[derive(Parser, Debug)]
#[command(name = "dealsheet")]
#[command(version)]
#[command(about = "Line item status and bundle integrity for deal sheets")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub global: GlobalArgs,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress info-level output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Options shared by every subcommand
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Workbook file to operate on
    #[arg(short, long, global = true, default_value = "workbook.json")]
    pub workbook: PathBuf,

    /// Config file (defaults to dealsheet.json next to the workbook)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Treat the deal as a Telekom deal (Telekom Capex is required)
    #[arg(long, global = true)]
    pub telekom: bool,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Set one cell and update the row's status
    Edit {
        /// Sheet row position
        row: u32,

        /// Field name (e.g. model, term, "Sales Ask Price")
        field: String,

        /// New value; an empty string clears the cell
        value: String,
    },

    /// Show a row's stored status and completeness
    Status {
        /// Sheet row position
        row: u32,
    },

    /// Recompute the status of every row
    Recalc {
        /// Mark finalized rows as Revised by AE
        #[arg(long)]
        force_revision: bool,
    },

    /// Rebuild all stored bundle metadata
    Reconcile,

    /// List every bundle with its verdict
    Bundles,

    /// Validate a single bundle
    Validate {
        /// Bundle identifier
        bundle_id: String,
    },

    /// Force Term and Quantity across a bundle
    Correct {
        /// Bundle identifier
        bundle_id: String,

        /// Term to apply to every member
        #[arg(long)]
        term: String,

        /// Quantity to apply to every member
        #[arg(long)]
        quantity: String,
    },

    /// Move a bundle's members next to its first row
    FixGaps {
        /// Bundle identifier
        bundle_id: String,
    },

    /// Remove the bundle identifier from every member
    Dissolve {
        /// Bundle identifier
        bundle_id: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_edit_with_globals() {
        let cli = Cli::parse_from([
            "dealsheet",
            "--workbook",
            "deal.json",
            "--telekom",
            "edit",
            "5",
            "sales-ask-price",
            "49.5",
        ]);
        assert!(cli.global.telekom);
        assert_eq!(cli.global.workbook, PathBuf::from("deal.json"));
        match cli.command {
            Some(Commands::Edit { row, field, value }) => {
                assert_eq!(row, 5);
                assert_eq!(field, "sales-ask-price");
                assert_eq!(value, "49.5");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_correct_requires_values() {
        assert!(Cli::try_parse_from(["dealsheet", "correct", "707", "--term", "24"]).is_err());

        let cli = Cli::try_parse_from([
            "dealsheet", "correct", "707", "--term", "24", "--quantity", "2", "--json",
        ])
        .unwrap();
        assert!(cli.global.json);
        assert!(matches!(cli.command, Some(Commands::Correct { .. })));
    }

    #[test]
    fn test_parse_recalc_flag() {
        let cli = Cli::parse_from(["dealsheet", "recalc", "--force-revision"]);
        assert!(matches!(cli.command, Some(Commands::Recalc { force_revision: true })));
        let cli = Cli::parse_from(["dealsheet", "fix-gaps", "B1"]);
        assert!(matches!(cli.command, Some(Commands::FixGaps { bundle_id }) if bundle_id == "B1"));
    }
}
