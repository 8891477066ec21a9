//! Failure notification delivery.
//!
//! The engine only produces a [`RunSummary`]; which channel receives it is
//! decided by the caller choosing a [`Notifier`].

use std::time::Duration;

use dq_model::RunSummary;
use reqwest::blocking::Client;
use serde::Serialize;
use tracing::{info, warn};

use crate::error::NotifyError;

/// HTTP request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Reasons listed in a rendered summary before truncating.
pub const MAX_LISTED_REASONS: usize = 10;

const FAILURE_COLOR: &str = "#FF0000";

/// A destination for run summaries.
pub trait Notifier {
    /// Short channel name for logs.
    fn channel(&self) -> &'static str;

    /// Deliver a summary for the named dataset.
    fn notify(&self, dataset: &str, summary: &RunSummary) -> Result<(), NotifyError>;
}

/// Writes the summary to the log. Used when no remote channel is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn channel(&self) -> &'static str {
        "log"
    }

    fn notify(&self, dataset: &str, summary: &RunSummary) -> Result<(), NotifyError> {
        warn!(
            dataset,
            invalid = summary.invalid,
            failed_checks = summary.failed_checks,
            "webhook not configured, skipping remote notification"
        );
        info!("{}", render_summary(dataset, summary));
        Ok(())
    }
}

/// Posts a Slack-style attachment to an incoming webhook.
pub struct WebhookNotifier {
    client: Client,
    url: String,
}

impl WebhookNotifier {
    pub fn new(url: impl Into<String>) -> Result<Self, NotifyError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

impl Notifier for WebhookNotifier {
    fn channel(&self) -> &'static str {
        "webhook"
    }

    fn notify(&self, dataset: &str, summary: &RunSummary) -> Result<(), NotifyError> {
        let payload = WebhookPayload::from_summary(dataset, summary);
        let response = self.client.post(&self.url).json(&payload).send()?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(NotifyError::Rejected { status, message });
        }

        info!(dataset, "webhook notification sent");
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WebhookPayload {
    pub attachments: Vec<Attachment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attachment {
    pub color: String,
    pub title: String,
    pub text: String,
    pub fields: Vec<AttachmentField>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttachmentField {
    pub title: String,
    pub value: String,
    pub short: bool,
}

impl AttachmentField {
    fn short(title: &str, value: impl ToString) -> Self {
        Self {
            title: title.to_string(),
            value: value.to_string(),
            short: true,
        }
    }
}

impl WebhookPayload {
    pub fn from_summary(dataset: &str, summary: &RunSummary) -> Self {
        let attachment = Attachment {
            color: FAILURE_COLOR.to_string(),
            title: format!("Data quality validation {}", summary.verdict),
            text: listed_reasons(summary).join("\n"),
            fields: vec![
                AttachmentField::short("Failed Checks", summary.failed_checks),
                AttachmentField::short("Invalid Rows", summary.invalid),
                AttachmentField::short("Dataset", dataset),
            ],
        };
        Self {
            attachments: vec![attachment],
        }
    }
}

/// Plain-text rendering of a summary.
pub fn render_summary(dataset: &str, summary: &RunSummary) -> String {
    let mut lines = vec![
        format!("Data quality validation {} for {dataset}", summary.verdict),
        format!(
            "records: {} total, {} valid, {} invalid",
            summary.total, summary.valid, summary.invalid
        ),
        format!("failed checks: {}", summary.failed_checks),
    ];
    lines.extend(listed_reasons(summary).into_iter().map(|r| format!("- {r}")));
    lines.join("\n")
}

fn listed_reasons(summary: &RunSummary) -> Vec<String> {
    let mut listed: Vec<String> = summary
        .reasons
        .iter()
        .take(MAX_LISTED_REASONS)
        .cloned()
        .collect();
    let hidden = summary.reasons.len().saturating_sub(MAX_LISTED_REASONS);
    if hidden > 0 {
        listed.push(format!("... and {hidden} more"));
    }
    listed
}
