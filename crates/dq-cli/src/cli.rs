//! CLI argument definitions for the order data-quality pipeline.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "dq-pipeline",
    version,
    about = "Order data-quality pipeline - validate order exports before they ship",
    long_about = "Validate an order CSV against row-level field rules and dataset-level\n\
                  aggregate rules, split it into valid and invalid rows, and exit\n\
                  non-zero when any record fails."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow order values in debug logs (redacted by default).
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate an order CSV and write partitioned outputs.
    Validate(ValidateArgs),

    /// List the active validation rules.
    Rules(ConfigArgs),
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// Path to the order CSV file.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Directory for valid_rows.csv, invalid_rows.csv and the JSON report.
    #[arg(long = "output-dir", value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    #[command(flatten)]
    pub config: ConfigArgs,

    /// Fill absent currency and ship-country columns with the expected values.
    #[arg(long = "assume-locale")]
    pub assume_locale: bool,

    /// Validate and report without writing output files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Incoming webhook for failure notifications (default: $SLACK_WEBHOOK_URL).
    #[arg(long = "webhook-url", value_name = "URL")]
    pub webhook_url: Option<String>,

    /// Do not send failure notifications.
    #[arg(long = "no-notify")]
    pub no_notify: bool,
}

/// Validation settings; flags override values from `--config`.
#[derive(Args, Clone, Default)]
pub struct ConfigArgs {
    /// TOML file with validation settings.
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Expected currency code.
    #[arg(long = "currency", value_name = "CODE")]
    pub currency: Option<String>,

    /// Expected ship country code.
    #[arg(long = "ship-country", value_name = "CODE")]
    pub ship_country: Option<String>,

    /// Order date format (chrono strftime syntax).
    #[arg(long = "date-format", value_name = "FORMAT")]
    pub date_format: Option<String>,

    /// Allowed order status (repeatable; replaces the configured set).
    #[arg(long = "allowed-status", value_name = "STATUS")]
    pub allowed_statuses: Vec<String>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
