//! Row-level and dataset-level violation types.
//!
//! Each constraint carries a stable code so reports and notifications can
//! group on it without matching on reason text.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::field::Field;

/// A field-level constraint checked by the row validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldConstraint {
    /// Value must be present and not blank.
    NonEmpty,
    /// Value must parse as an integer.
    Integer,
    /// Value must parse as a finite number.
    Number,
    /// Parsed number must be >= 0.
    NonNegative,
    /// Value must equal a configured constant.
    ExpectedValue,
    /// Value must parse with the configured date format.
    DateFormat,
}

impl FieldConstraint {
    pub const fn code(self) -> &'static str {
        match self {
            Self::NonEmpty => "non_empty",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::NonNegative => "non_negative",
            Self::ExpectedValue => "expected_value",
            Self::DateFormat => "date_format",
        }
    }
}

impl fmt::Display for FieldConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One failed field in one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    /// Index of the offending record.
    pub row: usize,
    pub field: Field,
    pub constraint: FieldConstraint,
    pub reason: String,
}

impl FieldViolation {
    pub fn new(
        row: usize,
        field: Field,
        constraint: FieldConstraint,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            row,
            field,
            constraint,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {}: {}: {}", self.row, self.field, self.reason)
    }
}

/// An aggregate constraint checked across the whole dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetConstraint {
    NotNull,
    Unique,
    NonNegative,
    AllowedValues,
}

impl DatasetConstraint {
    pub const fn code(self) -> &'static str {
        match self {
            Self::NotNull => "not_null",
            Self::Unique => "unique",
            Self::NonNegative => "non_negative",
            Self::AllowedValues => "allowed_values",
        }
    }
}

impl fmt::Display for DatasetConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A failed aggregate check.
///
/// `rows` lists every implicated record in input order. Duplicate ids are
/// reported one violation per group of records sharing the same value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetViolation {
    pub constraint: DatasetConstraint,
    pub field: Field,
    pub rows: Vec<usize>,
    /// Up to a handful of distinct offending values, for display.
    pub samples: Vec<String>,
    pub reason: String,
}

impl DatasetViolation {
    /// Constraint name in `constraint(field)` form, e.g. `unique(order_id)`.
    pub fn name(&self) -> String {
        format!("{}({})", self.constraint, self.field)
    }
}

impl fmt::Display for DatasetViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name(), self.reason)
    }
}
