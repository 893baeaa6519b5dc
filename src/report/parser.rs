//! Resolution of a group block into typed candidate parameters.

use serde::Serialize;
use tracing::debug;

use crate::constants::report::PARAMETER_FIELDS;
use crate::error::{Error, Result};
use crate::numeric::{parse_f64, parse_i64, round_2dp, split_fields};

use super::GroupBlock;

/// Best-fit parameters of one ranked candidate.
///
/// Fields follow the column order of the group's parameter rows. The
/// names come from the single-pulse row layout (`DM Sigma Time Sample
/// Downfact`), so the first field is the DM and the second the rounded
/// significance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CandidateParameters {
    /// Dispersion measure (first column).
    pub dm: f64,
    /// Significance rounded to two decimals (second column).
    pub sigma: f64,
    /// Arrival time in seconds (third column).
    pub time: f64,
    /// Sample index (fourth column).
    pub sample: i64,
    /// Boxcar downsampling factor (fifth column).
    pub downfact: i64,
}

impl CandidateParameters {
    /// The parameters as a positional tuple in row column order.
    pub fn as_tuple(&self) -> (f64, f64, f64, i64, i64) {
        (self.dm, self.sigma, self.time, self.sample, self.downfact)
    }
}

/// Resolve a block into the parameters of its peak-significance row.
///
/// The peak row is the first row whose text contains the block's
/// two-decimal significance string. Rows are compared as text, so two
/// rows sharing the rounded significance are a tie and the earlier row
/// wins. This is a heuristic: it does not identify the true peak when
/// the report holds such ties.
///
/// # Errors
///
/// Returns [`Error::NoMatch`] if no row contains the significance, or
/// [`Error::MalformedReport`] if the chosen row is not five numeric fields.
pub fn parse_block(block: &GroupBlock) -> Result<CandidateParameters> {
    let mut matches = block
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| row.contains(&block.peak_significance));

    let (offset, row) = matches.next().ok_or_else(|| Error::NoMatch {
        rank: block.rank,
        marker_line: block.marker_line,
        significance: block.peak_significance.clone(),
    })?;

    let ties = matches.count();
    if ties > 0 {
        debug!(
            "{} additional row(s) share peak sigma {} in group at line {}; using the first",
            ties, block.peak_significance, block.marker_line
        );
    }

    let line = block.first_row_line() + offset;
    parse_row(row).map_err(|reason| Error::MalformedReport { line, reason })
}

fn parse_row(row: &str) -> std::result::Result<CandidateParameters, String> {
    let fields = split_fields(row, PARAMETER_FIELDS)
        .ok_or_else(|| format!("expected {PARAMETER_FIELDS} fields in parameter row"))?;
    let to_reason = |e: Error| e.to_string();

    Ok(CandidateParameters {
        dm: parse_f64(fields[0]).map_err(to_reason)?,
        sigma: round_2dp(parse_f64(fields[1]).map_err(to_reason)?),
        time: parse_f64(fields[2]).map_err(to_reason)?,
        sample: parse_i64(fields[3]).map_err(to_reason)?,
        downfact: parse_i64(fields[4]).map_err(to_reason)?,
    })
}
