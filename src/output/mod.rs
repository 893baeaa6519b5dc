//! Rendering of extraction results.

mod json;
mod text;

pub use json::{CandidatesPayload, DmVsTimePayload};

use std::io::Write;
use std::path::Path;

use crate::config::OutputFormat;
use crate::error::Result;
use crate::report::CandidateParameters;
use crate::singlepulse::DmVsTime;

/// Write resolved candidates in the requested format.
pub fn write_candidates<W: Write>(
    out: &mut W,
    format: OutputFormat,
    report: &Path,
    rank: u32,
    candidates: &[CandidateParameters],
) -> Result<()> {
    match format {
        OutputFormat::Text => text::write_candidates(out, candidates),
        OutputFormat::Json => json::write_json(
            out,
            &CandidatesPayload {
                report,
                rank,
                candidates,
            },
        ),
    }
}

/// Write DM-vs-time arrays in the requested format.
pub fn write_dm_vs_time<W: Write>(
    out: &mut W,
    format: OutputFormat,
    arrays: &DmVsTime,
) -> Result<()> {
    match format {
        OutputFormat::Text => text::write_dm_vs_time(out, arrays),
        OutputFormat::Json => json::write_json(out, &DmVsTimePayload::from(arrays)),
    }
}
