//! Validation report, verdict and the summary handed to notifiers.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::record::Record;
use crate::violation::{DatasetViolation, FieldViolation};

/// Overall outcome of a validation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    Pass,
    Fail,
}

impl Verdict {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pass => "PASS",
            Self::Fail => "FAIL",
        }
    }

    pub const fn is_pass(self) -> bool {
        matches!(self, Self::Pass)
    }

    /// Process exit status for this verdict.
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::Pass => 0,
            Self::Fail => 1,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Aggregate result of one validation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub total: usize,
    pub valid_count: usize,
    pub invalid_count: usize,
    pub field_violations: Vec<FieldViolation>,
    pub dataset_violations: Vec<DatasetViolation>,
    pub verdict: Verdict,
}

impl ValidationReport {
    /// Build a report from partition counts. The verdict is derived from
    /// `invalid_count` and nothing else.
    pub fn new(
        valid_count: usize,
        invalid_count: usize,
        field_violations: Vec<FieldViolation>,
        dataset_violations: Vec<DatasetViolation>,
    ) -> Self {
        let verdict = if invalid_count == 0 {
            Verdict::Pass
        } else {
            Verdict::Fail
        };
        Self {
            total: valid_count + invalid_count,
            valid_count,
            invalid_count,
            field_violations,
            dataset_violations,
            verdict,
        }
    }

    pub fn passed(&self) -> bool {
        self.verdict.is_pass()
    }

    /// Every reason attached to one record, field violations first.
    pub fn reasons_for(&self, row: usize) -> Vec<String> {
        let field = self
            .field_violations
            .iter()
            .filter(|v| v.row == row)
            .map(|v| format!("{}: {}", v.field, v.reason));
        let dataset = self
            .dataset_violations
            .iter()
            .filter(|v| v.rows.contains(&row))
            .map(ToString::to_string);
        field.chain(dataset).collect()
    }

    /// Reasons for every implicated record, keyed by row, built in one pass.
    ///
    /// Each entry matches [`reasons_for`](Self::reasons_for) for that row.
    pub fn reasons_by_row(&self) -> BTreeMap<usize, Vec<String>> {
        let mut reasons: BTreeMap<usize, Vec<String>> = BTreeMap::new();
        for violation in &self.field_violations {
            reasons
                .entry(violation.row)
                .or_default()
                .push(format!("{}: {}", violation.field, violation.reason));
        }
        for violation in &self.dataset_violations {
            let reason = violation.to_string();
            for row in &violation.rows {
                reasons.entry(*row).or_default().push(reason.clone());
            }
        }
        reasons
    }

    /// Distinct `constraint(field)` checks that failed at either level.
    pub fn failed_checks(&self) -> BTreeSet<String> {
        let field = self
            .field_violations
            .iter()
            .map(|v| format!("{}({})", v.constraint, v.field));
        let dataset = self.dataset_violations.iter().map(DatasetViolation::name);
        field.chain(dataset).collect()
    }

    /// Summary for notification collaborators.
    pub fn summary(&self) -> RunSummary {
        let reasons = self
            .field_violations
            .iter()
            .map(ToString::to_string)
            .chain(self.dataset_violations.iter().map(ToString::to_string))
            .collect();
        RunSummary {
            total: self.total,
            valid: self.valid_count,
            invalid: self.invalid_count,
            verdict: self.verdict,
            failed_checks: self.failed_checks().len(),
            reasons,
        }
    }
}

/// Counts and reasons for a run, without the records themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
    pub verdict: Verdict,
    pub failed_checks: usize,
    pub reasons: Vec<String>,
}

/// Report plus the input records partitioned in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub report: ValidationReport,
    pub valid_records: Vec<Record>,
    pub invalid_records: Vec<Record>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Field;
    use crate::violation::{DatasetConstraint, FieldConstraint};

    fn sample_report() -> ValidationReport {
        ValidationReport::new(
            1,
            2,
            vec![FieldViolation::new(
                0,
                Field::Amount,
                FieldConstraint::NonNegative,
                "amount must be >= 0, got -5",
            )],
            vec![DatasetViolation {
                constraint: DatasetConstraint::Unique,
                field: Field::OrderId,
                rows: vec![0, 2],
                samples: vec!["A1".to_string()],
                reason: "order_id 'A1' appears 2 times".to_string(),
            }],
        )
    }

    #[test]
    fn test_verdict_derived_from_invalid_count() {
        assert_eq!(sample_report().verdict, Verdict::Fail);
        let clean = ValidationReport::new(3, 0, Vec::new(), Vec::new());
        assert_eq!(clean.verdict, Verdict::Pass);
        assert_eq!(clean.total, 3);
        assert_eq!(clean.verdict.exit_code(), 0);
    }

    #[test]
    fn test_reasons_for_row() {
        let report = sample_report();
        assert_eq!(
            report.reasons_for(0),
            vec![
                "amount: amount must be >= 0, got -5".to_string(),
                "unique(order_id): order_id 'A1' appears 2 times".to_string(),
            ]
        );
        assert_eq!(report.reasons_for(2).len(), 1);
        assert!(report.reasons_for(1).is_empty());
    }

    #[test]
    fn test_reasons_by_row_matches_reasons_for() {
        let report = sample_report();
        let by_row = report.reasons_by_row();
        assert_eq!(by_row.keys().copied().collect::<Vec<_>>(), vec![0, 2]);
        for row in 0..3 {
            assert_eq!(
                by_row.get(&row).cloned().unwrap_or_default(),
                report.reasons_for(row)
            );
        }
    }

    #[test]
    fn test_summary() {
        let summary = sample_report().summary();
        assert_eq!(summary.total, 3);
        assert_eq!(summary.invalid, 2);
        assert_eq!(summary.failed_checks, 2);
        assert_eq!(summary.reasons.len(), 2);
    }

    #[test]
    fn test_verdict_serializes_uppercase() {
        let json = serde_json::to_string(&Verdict::Fail).unwrap();
        assert_eq!(json, "\"FAIL\"");
    }
}
