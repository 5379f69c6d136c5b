//! Edit command - Set one cell and settle the row's status

use crate::cli::GlobalArgs;
use crate::errors::{DealsheetError, Result};
use crate::schemas::{CellValue, Field, StatusOutcome};
use crate::workflow::{handle_edit, EditReport};

use super::Session;

/// Set `field` on `row` to `value`
pub async fn run(args: &GlobalArgs, row: u32, field: &str, value: &str) -> Result<()> {
    let field: Field = field.parse().map_err(DealsheetError::UnknownField)?;
    let session = Session::open(args)?;

    let report = {
        let mut sheet = session.workbook.exclusive().await?;
        let report = handle_edit(
            &mut *sheet,
            &session.config,
            row,
            field,
            CellValue::parse_input(value),
        )?;
        session.save(&sheet)?;
        report
    };

    session.emit(&report, || render(&report))
}

fn render(report: &EditReport) -> String {
    let mut out = format!("Row {}: {} updated", report.position, report.field.label());
    match report.outcome {
        StatusOutcome::Clear => out.push_str("\n  Model removed, row cleared"),
        StatusOutcome::Set(status) if status != report.previous_status => {
            out.push_str(&format!(
                "\n  Status: {} -> {}",
                report.previous_status.display_or_blank(),
                status.display_or_blank()
            ));
        }
        StatusOutcome::Set(status) => {
            out.push_str(&format!("\n  Status: {}", status.display_or_blank()));
        }
    }
    if let Some(valid) = report.valid_bundles {
        out.push_str(&format!("\n  Bundles rebuilt: {} valid", valid));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::test_support::workbook_on_disk;
    use crate::fs::read_workbook;
    use crate::schemas::{Config, RowStatus};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_edit_persists_status() {
        let temp = TempDir::new().unwrap();
        let args = workbook_on_disk(&temp, &[vec![]]);

        run(&args, 2, "model", "Galaxy S24").await.unwrap();

        let file = read_workbook(&args.workbook).unwrap();
        let fields = Config::default().fields;
        assert_eq!(
            RowStatus::from_cell(fields.value(&file.rows[0], Field::Status, 1)),
            RowStatus::Draft
        );
    }

    #[tokio::test]
    async fn test_edit_rejects_unknown_field() {
        let temp = TempDir::new().unwrap();
        let args = workbook_on_disk(&temp, &[vec![]]);

        let err = run(&args, 2, "colour", "red").await.unwrap_err();
        assert!(matches!(err, DealsheetError::UnknownField(_)));
    }

    #[test]
    fn test_render_status_change() {
        let report = EditReport {
            position: 4,
            field: Field::Term,
            previous_status: RowStatus::ApprovedNew,
            outcome: StatusOutcome::Set(RowStatus::RevisedByAe),
            valid_bundles: Some(2),
        };
        let text = render(&report);
        assert!(text.contains("Row 4: Term updated"));
        assert!(text.contains("Approved (New) -> Revised by AE"));
        assert!(text.contains("2 valid"));
    }
}
