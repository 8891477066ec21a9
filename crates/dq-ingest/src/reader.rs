//! Order CSV reading.
//!
//! Every column is read as text so malformed numbers survive loading and can
//! be classified by the validators.

use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use dq_model::{Field, OrderTable, Record, ValidationConfig};
use polars::prelude::*;
use tracing::{debug, info, warn};

use crate::columns::ColumnMapping;
use crate::error::{IngestError, Result};

/// Maximum file size for CSV loading (500 MB default).
pub const MAX_CSV_FILE_SIZE: u64 = 500 * 1024 * 1024;

/// Loader settings.
#[derive(Debug, Clone, Default)]
pub struct IngestOptions {
    /// Values used to fill fields whose column is absent from the file.
    pub column_defaults: BTreeMap<Field, String>,
    pub max_file_size: Option<u64>,
}

impl IngestOptions {
    /// Fill absent `currency` and `ship_country` columns with the expected
    /// values from `config`.
    #[must_use]
    pub fn with_locale_defaults(mut self, config: &ValidationConfig) -> Self {
        self.column_defaults
            .insert(Field::Currency, config.expected_currency.clone());
        self.column_defaults
            .insert(Field::ShipCountry, config.expected_ship_country.clone());
        self
    }

    #[must_use]
    pub fn with_max_file_size(mut self, max_size: u64) -> Self {
        self.max_file_size = Some(max_size);
        self
    }
}

/// Load an order CSV into an [`OrderTable`].
///
/// Missing columns are not an error here; the table records which fields are
/// present and the engine decides whether that is enough.
pub fn load_orders(path: &Path, options: &IngestOptions) -> Result<OrderTable> {
    check_file_size_with_limit(path, options.max_file_size.unwrap_or(MAX_CSV_FILE_SIZE))?;
    let df = read_csv_frame(path)?;
    let table = table_from_frame(&df, options)?;
    info!(
        path = %path.display(),
        records = table.len(),
        columns = table.columns.len(),
        "loaded orders"
    );
    Ok(table)
}

/// Check file size against a limit.
pub fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| file_error(path, e))?;

    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }

    Ok(())
}

/// Read a CSV file into a DataFrame with every column typed as string.
pub fn read_csv_frame(path: &Path) -> Result<DataFrame> {
    if !has_header_line(path)? {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }

    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

/// Convert a DataFrame into records, mapping headers to fields.
pub fn table_from_frame(df: &DataFrame, options: &IngestOptions) -> Result<OrderTable> {
    let columns: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.trim_start_matches('\u{feff}').to_string())
        .collect();
    let mapping = ColumnMapping::resolve(&columns);

    let mut fields: BTreeSet<Field> = mapping.fields().collect();
    let defaults: Vec<(Field, &String)> = options
        .column_defaults
        .iter()
        .filter(|(field, _)| !fields.contains(*field))
        .map(|(field, value)| (*field, value))
        .collect();
    for (field, value) in &defaults {
        warn!(field = %field, value = %value, "column absent, filling with default");
        fields.insert(*field);
    }

    let frame_columns = df.get_columns();
    let mut records = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let mut source = Vec::with_capacity(frame_columns.len());
        for column in frame_columns {
            source.push(cell_text(column.get(idx)?).unwrap_or_default());
        }

        let mut record = Record::new(idx);
        for field in mapping.fields() {
            let Some(position) = mapping.position(field) else {
                continue;
            };
            record.set(field, cell_text(frame_columns[position].get(idx)?));
        }
        for (field, value) in &defaults {
            record.set(*field, Some((*value).clone()));
        }
        records.push(record.with_source(source));
    }

    let missing = Field::ALL
        .into_iter()
        .filter(|f| !fields.contains(f))
        .count();
    if missing > 0 {
        debug!(missing, "some fields have no source column");
    }

    Ok(OrderTable::new(columns, fields, records))
}

/// Text of one cell; `None` for null.
fn cell_text(value: AnyValue<'_>) -> Option<String> {
    match value {
        AnyValue::Null => None,
        AnyValue::String(s) => Some(s.to_string()),
        AnyValue::StringOwned(s) => Some(s.to_string()),
        other => Some(other.to_string()),
    }
}

fn has_header_line(path: &Path) -> Result<bool> {
    let file = File::open(path).map_err(|e| file_error(path, e))?;
    let mut reader = BufReader::new(file);
    let mut line = String::new();
    reader
        .read_line(&mut line)
        .map_err(|e| IngestError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
    Ok(!line.trim_start_matches('\u{feff}').trim().is_empty())
}

fn file_error(path: &Path, e: std::io::Error) -> IngestError {
    if e.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: e,
        }
    }
}
