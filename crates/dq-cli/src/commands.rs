use std::env;

use anyhow::{Context, Result};
use comfy_table::{Cell, Color, Table};
use tracing::{debug, info, info_span};

use dq_cli::pipeline::{PipelineInput, PipelineResult, run_pipeline};
use dq_model::{ValidationConfig, load_config};
use dq_report::{LogNotifier, Notifier, WebhookNotifier};

use crate::cli::{ConfigArgs, ValidateArgs};
use crate::summary::{apply_table_style, dim_cell, header_cell};

/// Environment variable consulted when `--webhook-url` is not given.
pub const WEBHOOK_ENV: &str = "SLACK_WEBHOOK_URL";

pub fn run_validate(args: &ValidateArgs) -> Result<PipelineResult> {
    let span = info_span!("run", input = %args.input.display());
    let _guard = span.enter();
    let config = resolve_config(&args.config)?;
    let notifier = select_notifier(args)?;
    let input = PipelineInput {
        input: args.input.clone(),
        output_dir: (!args.dry_run).then(|| args.output_dir.clone()),
        config,
        assume_locale: args.assume_locale,
    };
    let result = run_pipeline(&input, notifier.as_deref())?;
    let report = &result.outcome.report;
    info!(
        total = report.total,
        valid = report.valid_count,
        invalid = report.invalid_count,
        verdict = %report.verdict,
        elapsed_ms = result.elapsed.as_millis() as u64,
        "validation complete"
    );
    Ok(result)
}

pub fn run_rules(args: &ConfigArgs) -> Result<()> {
    let config = resolve_config(args)?;
    let statuses = config
        .allowed_statuses
        .iter()
        .cloned()
        .collect::<Vec<_>>()
        .join(", ");
    let rules = [
        ("row", "order_id", "present and not blank".to_string()),
        ("row", "quantity", "integer, >= 0".to_string()),
        ("row", "amount", "number, >= 0".to_string()),
        ("row", "currency", format!("equals {}", config.expected_currency)),
        (
            "row",
            "ship_country",
            format!("equals {}", config.expected_ship_country),
        ),
        (
            "row",
            "order_date",
            format!("parses with {}", config.date_format),
        ),
        ("dataset", "not_null(order_id)", "no null order ids".to_string()),
        ("dataset", "unique(order_id)", "no repeated order ids".to_string()),
        ("dataset", "non_negative(quantity)", "no values below 0".to_string()),
        ("dataset", "non_negative(amount)", "no values below 0".to_string()),
        ("dataset", "allowed_values(status)", format!("one of {statuses}")),
    ];
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Level"),
        header_cell("Check"),
        header_cell("Rule"),
    ]);
    apply_table_style(&mut table);
    for (level, check, rule) in rules {
        table.add_row(vec![
            dim_cell(level),
            Cell::new(check).fg(Color::Blue),
            Cell::new(rule),
        ]);
    }
    println!("{table}");
    Ok(())
}

/// Settings from `--config` (or defaults) with individual flags applied on top.
pub fn resolve_config(args: &ConfigArgs) -> Result<ValidationConfig> {
    let mut config = match &args.config {
        Some(path) => load_config(path).context("load validation config")?,
        None => ValidationConfig::default(),
    };
    if let Some(currency) = &args.currency {
        config = config.with_currency(currency);
    }
    if let Some(country) = &args.ship_country {
        config = config.with_ship_country(country);
    }
    if let Some(format) = &args.date_format {
        config = config.with_date_format(format);
    }
    if !args.allowed_statuses.is_empty() {
        config = config.with_allowed_statuses(args.allowed_statuses.iter().cloned());
    }
    config.validate().context("validation config")?;
    debug!(?config, "resolved validation config");
    Ok(config)
}

fn select_notifier(args: &ValidateArgs) -> Result<Option<Box<dyn Notifier>>> {
    if args.no_notify {
        return Ok(None);
    }
    let url = args
        .webhook_url
        .clone()
        .or_else(|| env::var(WEBHOOK_ENV).ok())
        .filter(|url| !url.trim().is_empty());
    let notifier: Box<dyn Notifier> = match url {
        Some(url) => Box::new(WebhookNotifier::new(url).context("build webhook client")?),
        None => Box::new(LogNotifier),
    };
    Ok(Some(notifier))
}
