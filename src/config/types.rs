//! Configuration type definitions.

use serde::{Deserialize, Serialize};

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default settings.
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// Defaults applied when the command line leaves a setting out.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Rank to extract when `--rank` is not given.
    pub rank: Option<u32>,

    /// Result format.
    pub format: OutputFormat,

    /// Minimum significance of DM-vs-time detections.
    pub min_sigma: Option<f64>,
}

/// Supported result formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Whitespace-aligned text columns.
    #[default]
    Text,
    /// A single JSON document.
    Json,
}
