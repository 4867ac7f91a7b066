//! Turning typed cell values into display strings.

use serde::{Deserialize, Serialize};

use crate::source::{ColumnType, Value};

/// The single supported currency convention: `$1,234.50`, `-$4.00`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyFormat {
    /// Placed before the amount, after any minus sign
    pub symbol: String,
    /// Digits after the decimal point
    pub decimals: usize,
    /// Thousands separator, if any
    pub grouping: Option<char>,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self {
            symbol: "$".to_string(),
            decimals: 2,
            grouping: Some(','),
        }
    }
}

impl CurrencyFormat {
    pub fn format(&self, amount: f64) -> String {
        let sign = if amount < 0.0 { "-" } else { "" };
        if amount.is_nan() {
            return format!("{}NaN", self.symbol);
        }
        if amount.is_infinite() {
            return format!("{}{}\u{221e}", sign, self.symbol);
        }

        let fixed = format!("{:.*}", self.decimals, amount.abs());
        let (whole, fraction) = match fixed.split_once('.') {
            Some((whole, fraction)) => (whole, Some(fraction)),
            None => (fixed.as_str(), None),
        };

        let mut out = format!("{}{}{}", sign, self.symbol, self.group(whole));
        if let Some(fraction) = fraction {
            out.push('.');
            out.push_str(fraction);
        }
        out
    }

    fn group(&self, digits: &str) -> String {
        let Some(sep) = self.grouping else {
            return digits.to_string();
        };
        let mut out = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(sep);
            }
            out.push(c);
        }
        out
    }
}

/// Display text for `value` in a column declared as `column_type`.
///
/// Currency columns go through `currency`; everything else uses the value's
/// own text. NULL becomes `null_marker` whatever the column type.
pub fn format_value(
    column_type: ColumnType,
    value: &Value,
    currency: &CurrencyFormat,
    null_marker: &str,
) -> String {
    if value.is_null() {
        return null_marker.to_string();
    }
    match value.as_f64() {
        Some(amount) if column_type.is_currency() => currency.format(amount),
        _ => value.to_string(),
    }
}
