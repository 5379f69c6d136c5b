//! Bundle grouping and validation
//!
//! A bundle is two or more rows sharing a bundle identifier. It is valid when
//! its members sit on consecutive rows and all agree on Term and Quantity.

use std::collections::HashMap;

use crate::schemas::{BundleIssue, BundleReport, BundleVerdict, Field, FieldMap, SheetRow};

/// Rows sharing one bundle identifier, sorted by position
#[derive(Debug, Clone)]
pub struct BundleGroup<'a> {
    pub bundle_id: String,
    pub members: Vec<&'a SheetRow>,
}

impl BundleGroup<'_> {
    pub fn positions(&self) -> Vec<u32> {
        self.members.iter().map(|row| row.position).collect()
    }
}

/// Group rows by trimmed bundle identifier.
///
/// Identifiers compare as exact, case-sensitive strings. Groups come back in
/// order of their first member's position; members are sorted by position.
/// Single-row groups are included; callers decide what to do with them.
pub fn group_rows_by_bundle<'a>(
    rows: &'a [SheetRow],
    fields: &FieldMap,
    start_col: u32,
) -> Vec<BundleGroup<'a>> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<BundleGroup<'a>> = Vec::new();

    for row in rows {
        let Some(bundle_id) = row.bundle_id(fields, start_col) else {
            continue;
        };
        match index.get(&bundle_id) {
            Some(&slot) => groups[slot].members.push(row),
            None => {
                index.insert(bundle_id.clone(), groups.len());
                groups.push(BundleGroup {
                    bundle_id,
                    members: vec![row],
                });
            }
        }
    }

    for group in &mut groups {
        group.members.sort_by_key(|row| row.position);
    }
    groups.sort_by_key(|group| group.members.first().map(|row| row.position));
    groups
}

/// Contiguity and Term/Quantity homogeneity issues of a sorted group
fn group_issues(group: &BundleGroup<'_>, fields: &FieldMap, start_col: u32) -> Vec<BundleIssue> {
    let mut issues = Vec::new();

    let mut missing_rows = Vec::new();
    let mut contiguous = true;
    for pair in group.members.windows(2) {
        let (previous, current) = (pair[0].position, pair[1].position);
        if current != previous + 1 {
            contiguous = false;
            missing_rows.extend(previous + 1..current);
        }
    }
    if !contiguous {
        issues.push(BundleIssue::NonContiguous { missing_rows });
    }

    let Some(first) = group.members.first() else {
        return issues;
    };
    // Raw cell text: `0` and blank differ, `24` and `24.0` do not
    let expected_term = first.get(fields, Field::Term, start_col).to_string();
    let expected_quantity = first.get(fields, Field::Quantity, start_col).to_string();

    for member in group.members.iter().skip(1) {
        let term = member.get(fields, Field::Term, start_col).to_string();
        if term != expected_term {
            issues.push(BundleIssue::TermMismatch {
                row: member.position,
                expected: expected_term.clone(),
                found: term,
            });
        }
        let quantity = member.get(fields, Field::Quantity, start_col).to_string();
        if quantity != expected_quantity {
            issues.push(BundleIssue::QuantityMismatch {
                row: member.position,
                expected: expected_quantity.clone(),
                found: quantity,
            });
        }
    }

    issues
}

fn report_for(group: &BundleGroup<'_>, fields: &FieldMap, start_col: u32) -> Option<BundleReport> {
    if group.members.len() < 2 {
        return None;
    }
    let (first, last) = (group.members.first()?, group.members.last()?);
    let issues = group_issues(group, fields, start_col);
    Some(BundleReport {
        bundle_id: group.bundle_id.clone(),
        start_row: first.position,
        end_row: last.position,
        is_valid: issues.is_empty(),
        issues,
    })
}

/// Validate the rows carrying one bundle identifier.
///
/// Start and end rows are reported for invalid bundles too, so callers can
/// still mark the affected range. When no rows (or only one row) carry the
/// identifier the boundaries are None and the verdict is invalid.
pub fn validate_bundle(
    rows: &[SheetRow],
    bundle_id: &str,
    fields: &FieldMap,
    start_col: u32,
) -> BundleVerdict {
    let wanted = bundle_id.trim();
    let mut members: Vec<&SheetRow> = rows
        .iter()
        .filter(|row| row.bundle_id(fields, start_col).as_deref() == Some(wanted))
        .collect();
    members.sort_by_key(|row| row.position);

    if members.is_empty() {
        return BundleVerdict::not_found();
    }

    let group = BundleGroup {
        bundle_id: wanted.to_string(),
        members,
    };

    if group.members.len() < 2 {
        return BundleVerdict {
            is_valid: false,
            start_row: None,
            end_row: None,
            members: group.positions(),
            issues: vec![BundleIssue::TooFewMembers {
                found: group.members.len(),
            }],
        };
    }

    let issues = group_issues(&group, fields, start_col);
    let positions = group.positions();
    BundleVerdict {
        is_valid: issues.is_empty(),
        start_row: positions.first().copied(),
        end_row: positions.last().copied(),
        members: positions,
        issues,
    }
}

/// Find every bundle in the table, valid or not.
///
/// Groups with a single member are not bundles and are left out.
pub fn find_all_bundles(rows: &[SheetRow], fields: &FieldMap, start_col: u32) -> Vec<BundleReport> {
    group_rows_by_bundle(rows, fields, start_col)
        .iter()
        .filter_map(|group| report_for(group, fields, start_col))
        .collect()
}
