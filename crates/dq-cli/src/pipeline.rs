//! Pipeline stages: load, validate, report, notify.
//!
//! Each stage runs inside its own span. A structural failure (unreadable
//! file, missing columns) aborts the run after leaving empty partition files
//! behind; constraint failures never abort.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use dq_ingest::{IngestOptions, load_orders};
use dq_model::{OrderTable, ValidationConfig, ValidationOutcome};
use dq_report::{Notifier, ReportPaths, ReportWriter};
use dq_validate::Validator;
use tracing::{Level, debug, info_span, warn};

use crate::logging::redact_value;

/// Everything one run needs.
#[derive(Debug, Clone)]
pub struct PipelineInput {
    pub input: PathBuf,
    /// `None` skips writing files (dry run).
    pub output_dir: Option<PathBuf>,
    pub config: ValidationConfig,
    /// Fill absent currency/ship-country columns from `config`.
    pub assume_locale: bool,
}

#[derive(Debug)]
pub struct PipelineResult {
    /// Name of the validated dataset, taken from the input file name.
    pub dataset: String,
    pub outcome: ValidationOutcome,
    pub paths: Option<ReportPaths>,
    pub notified: bool,
    pub elapsed: Duration,
}

impl PipelineResult {
    pub fn exit_code(&self) -> i32 {
        self.outcome.report.verdict.exit_code()
    }
}

/// Run the whole pipeline.
///
/// `notifier` is consulted only when the verdict is FAIL. Delivery errors are
/// logged and do not change the result.
pub fn run_pipeline(input: &PipelineInput, notifier: Option<&dyn Notifier>) -> Result<PipelineResult> {
    let start = Instant::now();
    let dataset = dataset_name(&input.input);
    let writer = input.output_dir.as_ref().map(ReportWriter::new);

    let staged = load_stage(input).and_then(|table| {
        let outcome = validate_stage(&input.config, &table)?;
        Ok((table, outcome))
    });
    let (table, outcome) = match staged {
        Ok(staged) => staged,
        Err(error) => {
            if let Some(writer) = &writer {
                if let Err(write_error) = writer.write_empty() {
                    warn!(error = %write_error, "could not write empty partition files");
                }
            }
            return Err(error);
        }
    };

    let paths = match &writer {
        Some(writer) => {
            let span = info_span!("report", output_dir = %writer.output_dir().display());
            let _guard = span.enter();
            Some(
                writer
                    .write(&table.columns, &outcome)
                    .context("write validation outputs")?,
            )
        }
        None => None,
    };

    let notified = match notifier {
        Some(notifier) if !outcome.report.passed() => notify_stage(notifier, &dataset, &outcome),
        _ => false,
    };

    Ok(PipelineResult {
        dataset,
        outcome,
        paths,
        notified,
        elapsed: start.elapsed(),
    })
}

fn load_stage(input: &PipelineInput) -> Result<OrderTable> {
    let span = info_span!("load", path = %input.input.display());
    let _guard = span.enter();
    let mut options = IngestOptions::default();
    if input.assume_locale {
        options = options.with_locale_defaults(&input.config);
    }
    load_orders(&input.input, &options)
        .with_context(|| format!("load {}", input.input.display()))
}

fn validate_stage(config: &ValidationConfig, table: &OrderTable) -> Result<ValidationOutcome> {
    let validator = Validator::new(config.clone()).context("validation config")?;
    let outcome = validator.validate(table).context("validate orders")?;
    if tracing::enabled!(Level::DEBUG) {
        let reasons = outcome.report.reasons_by_row();
        for record in &outcome.invalid_records {
            debug!(
                row = record.index,
                order_id = redact_value(record.order_id.as_deref().unwrap_or_default()),
                reasons = reasons.get(&record.index).map_or(0, Vec::len),
                "invalid record"
            );
        }
    }
    Ok(outcome)
}

fn notify_stage(notifier: &dyn Notifier, dataset: &str, outcome: &ValidationOutcome) -> bool {
    let span = info_span!("notify", channel = notifier.channel());
    let _guard = span.enter();
    match notifier.notify(dataset, &outcome.report.summary()) {
        Ok(()) => true,
        Err(error) => {
            warn!(%error, "failure notification not delivered");
            false
        }
    }
}

/// File name of the input, used to label reports and notifications.
pub fn dataset_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
