//! Correction commands - Apply values, close gaps, or dissolve a bundle

use crate::cli::GlobalArgs;
use crate::errors::Result;
use crate::schemas::CellValue;
use crate::sheet::Sheet;
use crate::workflow::{apply_correction, dissolve_bundle, fix_gaps, CorrectionReport};

use super::reconcile::render as render_reconcile;
use super::Session;

/// Which correction to run
#[derive(Debug, Clone)]
pub enum Correction {
    Apply { term: String, quantity: String },
    FixGaps,
    Dissolve,
}

pub async fn run(args: &GlobalArgs, bundle_id: &str, correction: Correction) -> Result<()> {
    let session = Session::open(args)?;

    let report = {
        let mut sheet = session.workbook.exclusive().await?;
        let sheet: &mut Sheet = &mut sheet;
        let report = match &correction {
            Correction::Apply { term, quantity } => apply_correction(
                sheet,
                &session.config,
                bundle_id,
                CellValue::parse_input(term),
                CellValue::parse_input(quantity),
            )?,
            Correction::FixGaps => fix_gaps(sheet, &session.config, bundle_id)?,
            Correction::Dissolve => dissolve_bundle(sheet, &session.config, bundle_id)?,
        };
        session.save(sheet)?;
        report
    };

    session.emit(&report, || render(&correction, &report))
}

fn render(correction: &Correction, report: &CorrectionReport) -> String {
    let rows: Vec<String> = report.rows.iter().map(|r| r.to_string()).collect();
    let action = match correction {
        Correction::Apply { term, quantity } => {
            format!("set term {} and quantity {} on", term, quantity)
        }
        Correction::FixGaps => "moved together".to_string(),
        Correction::Dissolve => "dissolved".to_string(),
    };
    let mut lines = vec![format!(
        "Bundle {}: {} rows {}",
        report.bundle_id,
        action,
        rows.join(", ")
    )];
    for change in &report.status_changes {
        lines.push(format!(
            "  Row {}: {} -> {}",
            change.position,
            change.from.display_or_blank(),
            change.to.display_or_blank()
        ));
    }
    lines.push(render_reconcile(&report.reconcile));
    lines.join("\n")
}
