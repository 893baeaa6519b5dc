//! Application-wide constants.
//!
//! Report layout offsets and filename markers live here so the parsers
//! and their tests agree on a single definition.

/// Application name used for config directories and user-facing messages.
pub const APP_NAME: &str = "spcand";

/// Environment variable overriding the config file location.
pub const CONFIG_PATH_ENV: &str = "SPCAND_CONFIG";

/// Layout of the group report written by the single-pulse grouping stage.
pub mod report {
    /// Text preceding the rank value on a rank marker line.
    pub const RANK_MARKER_PREFIX: &str = "\tRank:             ";

    /// Fractional part every rank is rendered with.
    pub const RANK_MARKER_SUFFIX: &str = ".000000";

    /// Lines between the "Group of N single pulses" header and the marker.
    pub const PULSE_COUNT_BACKREF: usize = 6;

    /// Lines between the "Max sigma" line and the marker.
    pub const SIGNIFICANCE_BACKREF: usize = 1;

    /// Whitespace token holding the value on count and significance lines.
    pub const VALUE_TOKEN: usize = 2;

    /// Number of whitespace-delimited fields on a parameter row.
    pub const PARAMETER_FIELDS: usize = 5;
}

/// Naming and layout of per-DM detection logs.
pub mod singlepulse {
    /// Marker preceding the DM value in a detection-log filename.
    pub const DM_MARKER: &str = "DM";

    /// Suffix terminating the DM value in a detection-log filename.
    pub const FILE_SUFFIX: &str = ".singlepulse";

    /// Columns read from a loose detection log.
    pub const LOOSE_COLUMNS: usize = 3;

    /// Columns in an archived detection log row.
    pub const ARCHIVE_COLUMNS: usize = 5;

    /// Leading lines of an archive member that carry column labels.
    pub const ARCHIVE_HEADER_LINES: usize = 1;

    /// Comment marker skipped by the loose reader.
    pub const COMMENT_PREFIX: char = '#';
}
