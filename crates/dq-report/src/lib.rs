//! Reporting sink for validation runs.
//!
//! - [`ReportWriter`]: `valid_rows.csv`, `invalid_rows.csv` and
//!   `validation_report.json` in an output directory
//! - [`Notifier`]: delivery of a run summary, either to the log or to a
//!   webhook

mod error;
mod notify;
mod writer;

pub use error::{NotifyError, ReportError, Result};
pub use notify::{
    Attachment, AttachmentField, LogNotifier, MAX_LISTED_REASONS, Notifier, WebhookNotifier,
    WebhookPayload, render_summary,
};
pub use writer::{
    ERROR_COLUMN, INVALID_ROWS_FILE, REPORT_FILE, ROW_INDEX_COLUMN, ReportPaths, ReportWriter,
    VALID_ROWS_FILE,
};
