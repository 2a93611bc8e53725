//! Raw values as they arrive from storage, and numeric parsing helpers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A lab value or range bound before it has been interpreted.
///
/// Storage hands these over either as JSON numbers or as free text
/// (`"12.5"`, `"Negative"`, `""`). Interpretation is deferred to
/// [`RawValue::as_f64`] so that unparseable data stays visible instead of
/// being coerced on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
}

impl RawValue {
    /// Returns the finite numeric value, or `None` when the value is empty,
    /// non-numeric, or not finite.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            RawValue::Number(value) => value.is_finite().then_some(*value),
            RawValue::Text(text) => parse_f64(text),
        }
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Number(value) => write!(f, "{}", format_numeric(*value)),
            RawValue::Text(text) => write!(f, "{text}"),
        }
    }
}

/// Parses a string as a finite f64, returning None for invalid or empty strings.
///
/// `"inf"` and `"NaN"` are rejected even though `str::parse` accepts them.
pub fn parse_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Formats a floating-point number without trailing fractional zeros.
///
/// `70.0` renders as `70`, `0.40` as `0.4`, `100.0` as `100`.
pub fn format_numeric(value: f64) -> String {
    let text = format!("{value}");
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}
