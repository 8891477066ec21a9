//! Runs the row and dataset validators and aggregates their results.

use std::thread;

use dq_model::{OrderTable, Record, ValidationConfig, ValidationOutcome};
use tracing::{debug, info, info_span, warn};

use crate::aggregate::aggregate;
use crate::dataset::validate_dataset;
use crate::error::{Result, ValidationError};
use crate::row::validate_records;

/// Validation engine bound to one configuration.
///
/// Holds no state between calls; validating the same input twice yields the
/// same outcome.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    /// Create a validator, rejecting unusable configuration up front.
    pub fn new(config: ValidationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validate a loaded table.
    ///
    /// Fails without validating anything when a required column is absent.
    pub fn validate(&self, table: &OrderTable) -> Result<ValidationOutcome> {
        let missing = table.missing_fields();
        if !missing.is_empty() {
            warn!(missing = missing.len(), "input schema is incomplete");
            return Err(ValidationError::MissingColumns { columns: missing });
        }
        Ok(self.validate_records(&table.records))
    }

    /// Validate records directly, skipping the schema check.
    ///
    /// Row and dataset checks run on separate threads; the aggregator runs
    /// once both have finished.
    pub fn validate_records(&self, records: &[Record]) -> ValidationOutcome {
        let span = info_span!("validate", records = records.len());
        let _guard = span.enter();
        let config = &self.config;

        let (field_violations, dataset_violations) = thread::scope(|scope| {
            let rows = scope.spawn(|| validate_records(records, config));
            let dataset = validate_dataset(records, config);
            let rows = rows
                .join()
                .unwrap_or_else(|payload| std::panic::resume_unwind(payload));
            (rows, dataset)
        });
        debug!(
            field_violations = field_violations.len(),
            dataset_violations = dataset_violations.len(),
            "checks complete"
        );

        let outcome = aggregate(records, field_violations, dataset_violations);
        info!(
            total = outcome.report.total,
            valid = outcome.report.valid_count,
            invalid = outcome.report.invalid_count,
            verdict = %outcome.report.verdict,
            "validation finished"
        );
        outcome
    }
}
