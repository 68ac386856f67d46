use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};

use crate::core::types::DataBounds;

/// Turns a raw y value into label text.
///
/// Called once per visible grid label on every recompute, so implementations
/// must be fast and free of side effects.
pub trait ValueFormatter {
    fn format(&self, value: f64, bounds: DataBounds, y_divisions: u32) -> String;
}

impl<F> ValueFormatter for F
where
    F: Fn(f64, DataBounds, u32) -> String,
{
    fn format(&self, value: f64, bounds: DataBounds, y_divisions: u32) -> String {
        self(value, bounds, y_divisions)
    }
}

/// Fixed-precision decimal formatter with trailing zeros trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecimalValueFormatter {
    pub max_decimals: u32,
    pub prefix: String,
    pub suffix: String,
}

impl Default for DecimalValueFormatter {
    fn default() -> Self {
        Self {
            max_decimals: 2,
            prefix: String::new(),
            suffix: String::new(),
        }
    }
}

impl DecimalValueFormatter {
    #[must_use]
    pub fn with_max_decimals(mut self, max_decimals: u32) -> Self {
        self.max_decimals = max_decimals;
        self
    }

    /// Formatter appending a currency symbol, e.g. `"12.5€"`.
    #[must_use]
    pub fn currency_suffix(symbol: impl Into<String>) -> Self {
        Self {
            suffix: symbol.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn currency_prefix(symbol: impl Into<String>) -> Self {
        Self {
            prefix: symbol.into(),
            ..Self::default()
        }
    }
}

impl ValueFormatter for DecimalValueFormatter {
    fn format(&self, value: f64, _bounds: DataBounds, _y_divisions: u32) -> String {
        let number = format_trimmed_decimal(value, self.max_decimals);
        let mut text = String::with_capacity(self.prefix.len() + number.len() + self.suffix.len());
        text.push_str(&self.prefix);
        text.push_str(&number);
        text.push_str(&self.suffix);
        text
    }
}

/// Two-decimal formatter followed by a percent sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PercentValueFormatter;

impl ValueFormatter for PercentValueFormatter {
    fn format(&self, value: f64, _bounds: DataBounds, _y_divisions: u32) -> String {
        format!("{}%", format_trimmed_decimal(value, 2))
    }
}

/// Rounds half-to-even to `max_decimals` places, trims trailing zeros and
/// never prints a negative zero.
#[must_use]
pub fn format_trimmed_decimal(value: f64, max_decimals: u32) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    match Decimal::from_f64(value) {
        Some(decimal) => decimal.round_dp(max_decimals).normalize().to_string(),
        None => format!("{value:.prec$}", prec = max_decimals as usize),
    }
}
