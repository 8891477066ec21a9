//! Aggregate checks across the whole dataset.
//!
//! Each check is one pass over the records producing the input positions it
//! implicates. Checks never stop early and do not rely on the row validator
//! having run.

use std::collections::{BTreeMap, BTreeSet};

use dq_model::{DatasetConstraint, DatasetViolation, Field, Record, ValidationConfig};

use crate::util::{Samples, format_samples, parse_number};

/// Run every dataset check, in a fixed order.
pub fn validate_dataset(records: &[Record], config: &ValidationConfig) -> Vec<DatasetViolation> {
    let mut violations = Vec::new();
    violations.extend(check_not_null(records, Field::OrderId));
    violations.extend(check_unique(records, Field::OrderId));
    violations.extend(check_non_negative(records, Field::Quantity));
    violations.extend(check_non_negative(records, Field::Amount));
    violations.extend(check_allowed_values(
        records,
        Field::Status,
        &config.allowed_statuses,
    ));
    violations
}

/// Records whose value is structurally null.
fn check_not_null(records: &[Record], field: Field) -> Option<DatasetViolation> {
    let rows: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, record)| record.get(field).is_none())
        .map(|(position, _)| position)
        .collect();
    if rows.is_empty() {
        return None;
    }
    Some(DatasetViolation {
        constraint: DatasetConstraint::NotNull,
        field,
        reason: format!("{field} has {} null values", rows.len()),
        rows,
        samples: Vec::new(),
    })
}

/// One violation per group of records sharing a value. Nulls are ignored.
fn check_unique(records: &[Record], field: Field) -> Vec<DatasetViolation> {
    let mut groups: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (position, record) in records.iter().enumerate() {
        if let Some(value) = record.get(field) {
            groups.entry(value).or_default().push(position);
        }
    }

    let mut duplicates: Vec<(&str, Vec<usize>)> = groups
        .into_iter()
        .filter(|(_, rows)| rows.len() > 1)
        .collect();
    // Report groups in the order their value first appears.
    duplicates.sort_by_key(|(_, rows)| rows[0]);

    duplicates
        .into_iter()
        .map(|(value, rows)| DatasetViolation {
            constraint: DatasetConstraint::Unique,
            field,
            reason: format!("{field} '{value}' appears {} times", rows.len()),
            rows,
            samples: vec![value.to_string()],
        })
        .collect()
}

/// Values below zero. Values that cannot be compared as numbers count as out
/// of range; nulls are skipped.
fn check_non_negative(records: &[Record], field: Field) -> Option<DatasetViolation> {
    let mut rows = Vec::new();
    let mut samples = Samples::default();
    for (position, record) in records.iter().enumerate() {
        let Some(raw) = record.get(field) else {
            continue;
        };
        let in_range = parse_number(raw).is_some_and(|value| value >= 0.0);
        if !in_range {
            rows.push(position);
            samples.push(raw.trim());
        }
    }
    if rows.is_empty() {
        return None;
    }
    let samples = samples.into_vec();
    Some(DatasetViolation {
        constraint: DatasetConstraint::NonNegative,
        field,
        reason: format!(
            "{field} has {} values below minimum 0{}",
            rows.len(),
            format_samples(&samples)
        ),
        rows,
        samples,
    })
}

/// Values outside an allowed set. Nulls are skipped.
fn check_allowed_values(
    records: &[Record],
    field: Field,
    allowed: &BTreeSet<String>,
) -> Option<DatasetViolation> {
    let mut rows = Vec::new();
    let mut samples = Samples::default();
    for (position, record) in records.iter().enumerate() {
        let Some(value) = record.get(field) else {
            continue;
        };
        if !allowed.contains(value) {
            rows.push(position);
            samples.push(value);
        }
    }
    if rows.is_empty() {
        return None;
    }
    let samples = samples.into_vec();
    Some(DatasetViolation {
        constraint: DatasetConstraint::AllowedValues,
        field,
        reason: format!(
            "{field} has {} values outside the allowed set{}",
            rows.len(),
            format_samples(&samples)
        ),
        rows,
        samples,
    })
}
