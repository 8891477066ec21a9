//! Shared parsing helpers for the validators.

use std::collections::BTreeSet;

/// Maximum number of distinct sample values attached to a dataset violation.
pub const MAX_SAMPLE_VALUES: usize = 5;

/// Parse an integer, accepting whole-valued decimals such as `3.0`.
pub fn parse_integer(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if let Ok(value) = trimmed.parse::<i64>() {
        return Some(value);
    }
    let value = parse_number(trimmed)?;
    if value.fract() != 0.0 || value < i64::MIN as f64 || value > i64::MAX as f64 {
        return None;
    }
    Some(value as i64)
}

/// Parse a finite floating-point number.
pub fn parse_number(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Collects up to [`MAX_SAMPLE_VALUES`] distinct values in first-seen order.
#[derive(Debug, Default)]
pub struct Samples {
    seen: BTreeSet<String>,
    values: Vec<String>,
}

impl Samples {
    pub fn push(&mut self, value: &str) {
        if self.values.len() >= MAX_SAMPLE_VALUES || self.seen.contains(value) {
            return;
        }
        self.seen.insert(value.to_string());
        self.values.push(value.to_string());
    }

    pub fn into_vec(self) -> Vec<String> {
        self.values
    }
}

/// Render samples for a reason string, e.g. ` (e.g., -1, -4)`.
pub fn format_samples(samples: &[String]) -> String {
    if samples.is_empty() {
        String::new()
    } else {
        format!(" (e.g., {})", samples.join(", "))
    }
}
