//! Errors that abort a validation run.
//!
//! Constraint failures are never errors; they are recorded in the report.
//! Only problems that make the input uninterpretable end up here.

use dq_model::{ConfigError, Field};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    /// The table lacks columns the validators need.
    #[error("input is missing required columns: {}", format_fields(.columns))]
    MissingColumns { columns: Vec<Field> },

    #[error("invalid validation config: {0}")]
    Config(#[from] ConfigError),
}

fn format_fields(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|f| f.name())
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, ValidationError>;
