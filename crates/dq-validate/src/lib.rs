//! Order data-quality validation engine.
//!
//! Three stages, all pure transforms over an immutable record slice:
//!
//! - **Row checks** ([`validate_record`]): non-empty id, integer and
//!   non-negative quantity, numeric and non-negative amount, expected currency
//!   and ship country, order date in the configured format
//! - **Dataset checks** ([`validate_dataset`]): non-null and unique order ids,
//!   non-negative quantity and amount, status in the allowed set
//! - **Aggregation** ([`aggregate`]): partitions records and decides the verdict
//!
//! # Example
//!
//! ```ignore
//! use dq_model::{OrderTable, ValidationConfig};
//! use dq_validate::Validator;
//!
//! let validator = Validator::new(ValidationConfig::default())?;
//! let outcome = validator.validate(&table)?;
//! std::process::exit(outcome.report.verdict.exit_code());
//! ```

mod aggregate;
mod dataset;
mod engine;
mod error;
mod row;
mod util;

pub use aggregate::aggregate;
pub use dataset::validate_dataset;
pub use engine::Validator;
pub use error::{Result, ValidationError};
pub use row::{validate_record, validate_records};
pub use util::MAX_SAMPLE_VALUES;
