//! Coercion of whitespace-delimited text tokens into typed numbers.
//!
//! Significance values are compared as text rendered with two decimals,
//! so rounding goes through the same formatter that produces that text.

use half::f16;

use crate::error::{Error, Result};

/// Parse a token as a double-precision float.
pub fn parse_f64(token: &str) -> Result<f64> {
    token.parse().map_err(|_| Error::InvalidNumber {
        token: token.to_string(),
        expected: "float",
    })
}

/// Parse a token as a half-precision float.
///
/// The value is parsed at full precision first and then narrowed, so the
/// result is the nearest representable `f16`.
pub fn parse_f16(token: &str) -> Result<f16> {
    parse_f64(token).map(f16::from_f64)
}

/// Parse a token as a signed integer.
pub fn parse_i64(token: &str) -> Result<i64> {
    token.parse().map_err(|_| Error::InvalidNumber {
        token: token.to_string(),
        expected: "integer",
    })
}

/// Render a value with exactly two decimal places.
pub fn format_2dp(value: f64) -> String {
    format!("{value:.2}")
}

/// Round a value to two decimal places via its two-decimal rendering.
pub fn round_2dp(value: f64) -> f64 {
    // A value rendered by `format_2dp` always parses back.
    format_2dp(value).parse().unwrap_or(value)
}

/// Parse a token as a float and render it with two decimal places.
pub fn reformat_2dp(token: &str) -> Result<String> {
    parse_f64(token).map(format_2dp)
}

/// Split a line on whitespace into exactly `expected` tokens.
///
/// Returns `None` when the field count differs.
pub fn split_fields(line: &str, expected: usize) -> Option<Vec<&str>> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    (fields.len() == expected).then_some(fields)
}
