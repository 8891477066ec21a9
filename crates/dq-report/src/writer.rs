//! Writes partition files and the JSON report for one run.

use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use dq_model::{Field, Record, ValidationOutcome, ValidationReport};
use tracing::{debug, info};

use crate::error::{ReportError, Result};

pub const VALID_ROWS_FILE: &str = "valid_rows.csv";
pub const INVALID_ROWS_FILE: &str = "invalid_rows.csv";
pub const REPORT_FILE: &str = "validation_report.json";

/// Extra columns appended to the invalid partition.
pub const ROW_INDEX_COLUMN: &str = "row_index";
pub const ERROR_COLUMN: &str = "validation_error";

/// Paths of the files written for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    pub valid_rows: PathBuf,
    pub invalid_rows: PathBuf,
    pub report: Option<PathBuf>,
}

/// Writes run artifacts into one output directory.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    output_dir: PathBuf,
}

impl ReportWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write both partitions and the JSON report.
    ///
    /// `columns` is the source header; records carrying source cells are
    /// written as they were read, others as their seven fields.
    pub fn write(&self, columns: &[String], outcome: &ValidationOutcome) -> Result<ReportPaths> {
        self.ensure_dir()?;
        let header = if columns.is_empty() {
            canonical_header()
        } else {
            columns.to_vec()
        };

        let valid_rows = self.output_dir.join(VALID_ROWS_FILE);
        write_partition(&valid_rows, &header, &outcome.valid_records, None)?;

        let invalid_rows = self.output_dir.join(INVALID_ROWS_FILE);
        write_partition(
            &invalid_rows,
            &header,
            &outcome.invalid_records,
            Some(&outcome.report),
        )?;

        let report = self.output_dir.join(REPORT_FILE);
        write_report(&report, &outcome.report)?;

        info!(
            output_dir = %self.output_dir.display(),
            valid = outcome.valid_records.len(),
            invalid = outcome.invalid_records.len(),
            "wrote validation artifacts"
        );
        Ok(ReportPaths {
            valid_rows,
            invalid_rows,
            report: Some(report),
        })
    }

    /// Write empty partition files, used when a run aborts before producing
    /// an outcome so downstream steps still find their inputs. A report left
    /// by an earlier run is removed.
    pub fn write_empty(&self) -> Result<ReportPaths> {
        self.ensure_dir()?;
        let report = self.output_dir.join(REPORT_FILE);
        match fs::remove_file(&report) {
            Ok(()) => debug!(path = %report.display(), "removed stale report"),
            Err(error) if error.kind() == ErrorKind::NotFound => {}
            Err(source) => return Err(ReportError::Write { path: report, source }),
        }
        let valid_rows = self.output_dir.join(VALID_ROWS_FILE);
        let invalid_rows = self.output_dir.join(INVALID_ROWS_FILE);
        for path in [&valid_rows, &invalid_rows] {
            File::create(path).map_err(|source| ReportError::Write {
                path: path.clone(),
                source,
            })?;
        }
        debug!(output_dir = %self.output_dir.display(), "wrote empty partition files");
        Ok(ReportPaths {
            valid_rows,
            invalid_rows,
            report: None,
        })
    }

    fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.output_dir).map_err(|source| ReportError::CreateDir {
            path: self.output_dir.clone(),
            source,
        })
    }
}

fn canonical_header() -> Vec<String> {
    Field::ALL.iter().map(|f| f.name().to_string()).collect()
}

fn record_cells(record: &Record) -> Vec<String> {
    if record.source.is_empty() {
        Field::ALL
            .iter()
            .map(|f| record.get(*f).unwrap_or_default().to_string())
            .collect()
    } else {
        record.source.clone()
    }
}

/// Write one partition. When `report` is given the row index and joined
/// reasons are appended to every row.
fn write_partition(
    path: &Path,
    header: &[String],
    records: &[Record],
    report: Option<&ValidationReport>,
) -> Result<()> {
    let csv_err = |source| ReportError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = csv::Writer::from_path(path).map_err(csv_err)?;

    let mut header_row = header.to_vec();
    if report.is_some() {
        header_row.push(ROW_INDEX_COLUMN.to_string());
        header_row.push(ERROR_COLUMN.to_string());
    }
    writer.write_record(&header_row).map_err(csv_err)?;

    let reasons = report.map(ValidationReport::reasons_by_row);
    for record in records {
        let mut cells = record_cells(record);
        if let Some(reasons) = &reasons {
            cells.push(record.index.to_string());
            cells.push(
                reasons
                    .get(&record.index)
                    .map(|r| r.join("; "))
                    .unwrap_or_default(),
            );
        }
        writer.write_record(&cells).map_err(csv_err)?;
    }

    writer.flush().map_err(|source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn write_report(path: &Path, report: &ValidationReport) -> Result<()> {
    let file = File::create(path).map_err(|source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, report).map_err(|source| ReportError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    writer.flush().map_err(|source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use dq_model::{FieldConstraint, FieldViolation};

    fn outcome() -> ValidationOutcome {
        let good = Record::new(0)
            .with(Field::OrderId, "A1")
            .with(Field::Quantity, "1");
        let bad = Record::new(1)
            .with(Field::OrderId, "A2")
            .with(Field::Amount, "-5");
        let report = ValidationReport::new(
            1,
            1,
            vec![FieldViolation::new(
                1,
                Field::Amount,
                FieldConstraint::NonNegative,
                "amount must be >= 0, got -5",
            )],
            Vec::new(),
        );
        ValidationOutcome {
            report,
            valid_records: vec![good],
            invalid_records: vec![bad],
        }
    }

    #[test]
    fn test_write_canonical_partitions() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ReportWriter::new(dir.path().join("out"));
        let paths = writer.write(&[], &outcome()).unwrap();

        let valid = fs::read_to_string(&paths.valid_rows).unwrap();
        let mut lines = valid.lines();
        assert_eq!(
            lines.next(),
            Some("order_id,quantity,amount,currency,ship_country,order_date,status")
        );
        assert_eq!(lines.next(), Some("A1,1,,,,,"));

        let invalid = fs::read_to_string(&paths.invalid_rows).unwrap();
        let mut lines = invalid.lines();
        assert!(lines.next().unwrap().ends_with(",row_index,validation_error"));
        assert_eq!(
            lines.next(),
            Some("A2,,-5,,,,,1,\"amount: amount must be >= 0, got -5\"")
        );

        let json = fs::read_to_string(paths.report.unwrap()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["verdict"], "FAIL");
        assert_eq!(value["invalid_count"], 1);
    }

    #[test]
    fn test_write_source_cells() {
        let dir = tempfile::tempdir().unwrap();
        let mut outcome = outcome();
        outcome.valid_records[0].source = vec!["A1".to_string(), "extra, quoted".to_string()];
        let columns = vec!["Order ID".to_string(), "Notes".to_string()];

        let paths = ReportWriter::new(dir.path()).write(&columns, &outcome).unwrap();
        let valid = fs::read_to_string(paths.valid_rows).unwrap();
        assert_eq!(valid, "Order ID,Notes\nA1,\"extra, quoted\"\n");
    }

    #[test]
    fn test_write_empty() {
        let dir = tempfile::tempdir().unwrap();
        let paths = ReportWriter::new(dir.path()).write_empty().unwrap();
        assert_eq!(fs::read_to_string(paths.valid_rows).unwrap(), "");
        assert_eq!(fs::read_to_string(paths.invalid_rows).unwrap(), "");
        assert!(paths.report.is_none());
    }
}
