//! CLI argument validators.

/// Parse a DM value; any finite number is accepted.
pub fn parse_dm(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;

    if !value.is_finite() {
        return Err(format!("DM must be finite, got {value}"));
    }

    Ok(value)
}

/// Parse and validate a significance threshold (non-negative).
pub fn parse_min_sigma(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;

    if !(value.is_finite() && value >= 0.0) {
        return Err(format!("min-sigma must be non-negative, got {value}"));
    }

    Ok(value)
}
