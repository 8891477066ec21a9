//! Combines row and dataset outcomes into the single verdict of a run.

use std::collections::BTreeSet;

use dq_model::{DatasetViolation, FieldViolation, Record, ValidationOutcome, ValidationReport};

/// Partition `records` and build the report.
///
/// Violations name records by their position in `records`. A record is
/// invalid when any field violation or any dataset violation names its
/// position. Both partitions keep input order, and every partitioned record
/// carries its position as `index`. This is the only place a verdict is
/// decided.
pub fn aggregate(
    records: &[Record],
    field_violations: Vec<FieldViolation>,
    dataset_violations: Vec<DatasetViolation>,
) -> ValidationOutcome {
    let row_failures: BTreeSet<usize> = field_violations.iter().map(|v| v.row).collect();
    let dataset_failures: BTreeSet<usize> = dataset_violations
        .iter()
        .flat_map(|v| v.rows.iter().copied())
        .collect();

    let mut valid_records = Vec::new();
    let mut invalid_records = Vec::new();
    for (position, record) in records.iter().enumerate() {
        let mut record = record.clone();
        record.index = position;
        if row_failures.contains(&position) || dataset_failures.contains(&position) {
            invalid_records.push(record);
        } else {
            valid_records.push(record);
        }
    }

    let report = ValidationReport::new(
        valid_records.len(),
        invalid_records.len(),
        field_violations,
        dataset_violations,
    );

    ValidationOutcome {
        report,
        valid_records,
        invalid_records,
    }
}
