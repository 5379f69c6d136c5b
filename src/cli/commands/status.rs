//! Status command - Show a row's stored status and completeness

use crate::cli::GlobalArgs;
use crate::errors::Result;
use crate::workflow::{inspect_row, RowSummary};

use super::Session;

/// Show status details for one row
pub async fn run(args: &GlobalArgs, row: u32) -> Result<()> {
    let session = Session::open(args)?;
    let sheet = session.workbook.snapshot().await?;
    let summary = inspect_row(&sheet, &session.config, row)?;

    session.emit(&summary, || render(&summary))
}

fn render(summary: &RowSummary) -> String {
    let model = if summary.model.is_empty() {
        "(no model)"
    } else {
        summary.model.as_str()
    };
    let mut lines = vec![
        format!("Row {}: {}", summary.position, model),
        format!("  Status:   {}", summary.status.display_or_blank()),
    ];

    if summary.complete {
        lines.push("  Complete: yes".to_string());
    } else {
        let missing: Vec<&str> = summary.missing_fields.iter().map(|f| f.label()).collect();
        lines.push(format!("  Complete: no (missing {})", missing.join(", ")));
    }

    if let Some(bundle_id) = &summary.bundle_id {
        let verdict = match &summary.bundle {
            Some(verdict) if verdict.is_valid => "valid".to_string(),
            Some(verdict) => {
                let issues: Vec<String> = verdict.issues.iter().map(|i| i.to_string()).collect();
                format!("invalid: {}", issues.join("; "))
            }
            None => "unchecked".to_string(),
        };
        lines.push(format!("  Bundle:   {} ({})", bundle_id, verdict));
    }

    lines.join("\n")
}
