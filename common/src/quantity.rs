use std::fmt;

use serde::{Deserialize, Serialize};

/// A listed amount split into its numeric prefix and the unit text after it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    pub value: f64,
    pub unit: String,
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unit.is_empty() {
            write!(f, "{}", self.value)
        } else {
            write!(f, "{} {}", self.value, self.unit)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuantityParseError {
    #[error("quantity is empty")]
    Empty,
    #[error("no leading number in {0:?}")]
    NoNumber(String),
    #[error("number in {0:?} is out of range")]
    NotFinite(String),
}

/// Parse the leading number of an amount such as `"50 kg"` or `"2.5L"`.
///
/// Leading whitespace is skipped and the longest numeric prefix wins
/// (optional sign, digits, fraction, exponent). Everything after it, trimmed,
/// becomes the unit. Text with no leading digit, or a number too large for
/// an `f64`, is an error.
pub fn parse_quantity(text: &str) -> Result<Quantity, QuantityParseError> {
    let trimmed = text.trim_start();
    if trimmed.trim_end().is_empty() {
        return Err(QuantityParseError::Empty);
    }

    let end = numeric_prefix_len(trimmed);
    let value = trimmed[..end]
        .parse::<f64>()
        .map_err(|_| QuantityParseError::NoNumber(text.to_string()))?;
    if !value.is_finite() {
        return Err(QuantityParseError::NotFinite(text.to_string()));
    }

    Ok(Quantity {
        value,
        unit: trimmed[end..].trim().to_string(),
    })
}

/// Byte length of the longest prefix that reads as a decimal number, or 0.
fn numeric_prefix_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    let mut i = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }

    let int_start = i;
    while bytes.get(i).is_some_and(u8::is_ascii_digit) {
        i += 1;
    }
    let mut digits = i - int_start;

    if bytes.get(i) == Some(&b'.') {
        let frac_start = i + 1;
        let mut j = frac_start;
        while bytes.get(j).is_some_and(u8::is_ascii_digit) {
            j += 1;
        }
        if digits > 0 || j > frac_start {
            digits += j - frac_start;
            i = j;
        }
    }

    if digits == 0 {
        return 0;
    }

    // Exponent only counts when at least one digit follows it.
    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp_start = j;
        while bytes.get(j).is_some_and(u8::is_ascii_digit) {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }

    i
}
