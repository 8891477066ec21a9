//! Core data model for the order data-quality pipeline.
//!
//! - [`Record`]: one order row, held as raw text so malformed values can be
//!   classified instead of rejected at load time
//! - [`FieldViolation`] / [`DatasetViolation`]: row- and dataset-level failures
//! - [`ValidationReport`]: the terminal artifact of a run
//! - [`ValidationConfig`]: the settings the validators consult

pub mod config;
pub mod error;
pub mod field;
pub mod record;
pub mod report;
pub mod violation;

pub use config::{
    DEFAULT_ALLOWED_STATUSES, DEFAULT_CURRENCY, DEFAULT_DATE_FORMAT, DEFAULT_SHIP_COUNTRY,
    ValidationConfig, load_config,
};
pub use error::{ConfigError, ModelError};
pub use field::Field;
pub use record::{OrderTable, Record};
pub use report::{RunSummary, ValidationOutcome, ValidationReport, Verdict};
pub use violation::{DatasetConstraint, DatasetViolation, FieldConstraint, FieldViolation};
