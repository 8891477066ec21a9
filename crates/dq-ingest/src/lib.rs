//! Order data ingestion.
//!
//! Loads an order export (CSV) into an [`OrderTable`](dq_model::OrderTable)
//! through Polars, mapping source headers onto record fields.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use dq_ingest::{IngestOptions, load_orders};
//!
//! let table = load_orders(Path::new("data/orders.csv"), &IngestOptions::default())?;
//! println!("{} records, missing {:?}", table.len(), table.missing_fields());
//! ```

mod columns;
mod error;
mod reader;

pub use columns::{ColumnMapping, field_for_header, normalize_header};
pub use error::{IngestError, Result};
pub use reader::{
    IngestOptions, MAX_CSV_FILE_SIZE, check_file_size_with_limit, load_orders, read_csv_frame,
    table_from_frame,
};
