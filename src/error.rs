//! Error types for spcand.

use std::path::PathBuf;

/// Result type alias for spcand operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for spcand.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration directory could not be determined.
    #[error("could not determine configuration directory for this platform")]
    ConfigDirNotFound,

    /// Failed to read configuration file.
    #[error("failed to read config file '{path}'")]
    ConfigRead {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}'")]
    ConfigParse {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    /// Failed to write configuration file.
    #[error("failed to write config file '{path}'")]
    ConfigWrite {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize configuration.
    #[error("failed to serialize config")]
    ConfigSerialize {
        /// Underlying serialization error.
        #[source]
        source: toml::ser::Error,
    },

    // Report errors
    /// Failed to read a group report.
    #[error("failed to read group report '{path}'")]
    ReportRead {
        /// Path to the report file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A fixed-offset lookup around a rank marker fell outside the report,
    /// or the referenced line does not have the expected shape.
    #[error("malformed group report at line {line}: {reason}")]
    MalformedReport {
        /// Zero-based index of the offending line.
        line: usize,
        /// Description of what was expected.
        reason: String,
    },

    /// No parameter row of a group carries the peak significance.
    #[error(
        "no parameter row contains peak significance {significance} (rank {rank}, marker at line {marker_line})"
    )]
    NoMatch {
        /// Requested rank.
        rank: u32,
        /// Zero-based index of the rank marker.
        marker_line: usize,
        /// Peak significance rendered to two decimals.
        significance: String,
    },

    /// A token could not be coerced to the expected numeric type.
    #[error("'{token}' is not a valid {expected}")]
    InvalidNumber {
        /// The offending token.
        token: String,
        /// Name of the expected type.
        expected: &'static str,
    },

    // Single-pulse errors
    /// DM tag could not be extracted from a detection-log filename.
    #[error("cannot extract DM from filename '{name}' (expected '...DM<value>.singlepulse')")]
    FilenameFormat {
        /// The offending filename.
        name: String,
    },

    /// A DM window was requested without any target DM values.
    #[error("no target DM values supplied")]
    EmptyDmTargets,

    /// A target DM value is NaN or infinite.
    #[error("target DM {value} is not a finite number")]
    NonFiniteDm {
        /// The offending value.
        value: f64,
    },

    /// Failed to read a loose detection log.
    #[error("failed to read detection log '{path}'")]
    DetectionRead {
        /// Path to the detection log.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A detection row does not have the expected shape.
    #[error("invalid detection row in '{source_name}' line {line}: {message}")]
    DetectionFormat {
        /// File or archive member the row came from.
        source_name: String,
        /// One-based line number within that file.
        line: usize,
        /// Description of the format error.
        message: String,
    },

    /// Failed to open or decode a detection-log archive.
    #[error("failed to read archive '{path}'")]
    ArchiveRead {
        /// Path to the archive.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize results as JSON.
    #[error("failed to serialize results as JSON")]
    JsonSerialize {
        /// Underlying serialization error.
        #[source]
        source: serde_json::Error,
    },
}
