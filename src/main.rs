//! Dealsheet CLI - Line item status and bundle integrity for deal sheets

use clap::Parser;
use dealsheet::cli::commands::{bundles, correct, edit, recalc, reconcile, status};
use dealsheet::cli::{Cli, Commands};
use dealsheet::errors::to_exit_code;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // RUST_LOG wins over the verbosity flags
    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let result = run(cli).await;

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error [{}]: {}", e.code(), e);
            std::process::exit(to_exit_code(&e));
        }
    }
}

async fn run(cli: Cli) -> dealsheet::Result<()> {
    let args = &cli.global;
    match cli.command {
        Some(Commands::Edit { row, field, value }) => edit::run(args, row, &field, &value).await,
        Some(Commands::Status { row }) => status::run(args, row).await,
        Some(Commands::Recalc { force_revision }) => recalc::run(args, force_revision).await,
        Some(Commands::Reconcile) => reconcile::run(args).await,
        Some(Commands::Bundles) => bundles::list(args).await,
        Some(Commands::Validate { bundle_id }) => bundles::validate(args, &bundle_id).await,
        Some(Commands::Correct {
            bundle_id,
            term,
            quantity,
        }) => {
            correct::run(args, &bundle_id, correct::Correction::Apply { term, quantity }).await
        }
        Some(Commands::FixGaps { bundle_id }) => {
            correct::run(args, &bundle_id, correct::Correction::FixGaps).await
        }
        Some(Commands::Dissolve { bundle_id }) => {
            correct::run(args, &bundle_id, correct::Correction::Dissolve).await
        }
        None => {
            // Default to showing help - clap handles this
            println!("Use --help for usage information");
            Ok(())
        }
    }
}
