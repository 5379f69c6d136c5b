//! Bundles and validate commands - Report bundle verdicts without changing anything

use crate::cli::GlobalArgs;
use crate::domain::{find_all_bundles, validate_bundle};
use crate::errors::Result;
use crate::schemas::{BundleIssue, BundleReport, BundleVerdict};
use crate::sheet::RowSource;

use super::Session;

/// List every bundle group with its verdict
pub async fn list(args: &GlobalArgs) -> Result<()> {
    let session = Session::open(args)?;
    let sheet = session.workbook.snapshot().await?;
    let config = &session.config;
    let reports = find_all_bundles(&sheet.rows()?, &config.fields, config.start_col);

    session.emit(&reports, || render_list(&reports))
}

/// Validate a single bundle
pub async fn validate(args: &GlobalArgs, bundle_id: &str) -> Result<()> {
    let session = Session::open(args)?;
    let sheet = session.workbook.snapshot().await?;
    let verdict = validate_bundle(
        &sheet.rows()?,
        bundle_id,
        &session.config.fields,
        session.config.start_col,
    );

    session.emit(&verdict, || render_verdict(bundle_id.trim(), &verdict))
}

fn issue_lines(issues: &[BundleIssue]) -> impl Iterator<Item = String> + '_ {
    issues.iter().map(|issue| format!("    - {}", issue))
}

fn render_list(reports: &[BundleReport]) -> String {
    if reports.is_empty() {
        return "No bundles".to_string();
    }
    let mut lines = Vec::new();
    for report in reports {
        let verdict = if report.is_valid { "valid" } else { "INVALID" };
        lines.push(format!(
            "{}  rows {}-{}  {}",
            report.bundle_id, report.start_row, report.end_row, verdict
        ));
        lines.extend(issue_lines(&report.issues));
    }
    lines.join("\n")
}

fn render_verdict(bundle_id: &str, verdict: &BundleVerdict) -> String {
    if !verdict.is_found() {
        return format!("Bundle {}: no rows carry this identifier", bundle_id);
    }
    let range = match (verdict.start_row, verdict.end_row) {
        (Some(start), Some(end)) => format!("rows {}-{}", start, end),
        _ => {
            let members: Vec<String> = verdict.members.iter().map(|m| m.to_string()).collect();
            format!("row {}", members.join(", "))
        }
    };
    let mut lines = vec![format!(
        "Bundle {}: {} ({})",
        bundle_id,
        if verdict.is_valid { "valid" } else { "INVALID" },
        range
    )];
    lines.extend(issue_lines(&verdict.issues));
    lines.join("\n")
}
