//! Configuration validation.

use crate::config::Config;
use crate::error::{Error, Result};

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    if let Some(min_sigma) = config.defaults.min_sigma
        && !(min_sigma.is_finite() && min_sigma >= 0.0)
    {
        return Err(Error::ConfigValidation {
            message: format!("min_sigma must be a non-negative number, got {min_sigma}"),
        });
    }

    Ok(())
}
