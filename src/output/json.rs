//! JSON output.

use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::report::CandidateParameters;
use crate::singlepulse::DmVsTime;

/// JSON document for the groups command.
#[derive(Debug, Serialize)]
pub struct CandidatesPayload<'a> {
    /// Report the candidates were read from.
    pub report: &'a Path,
    /// Requested rank.
    pub rank: u32,
    /// Resolved candidates in report order.
    pub candidates: &'a [CandidateParameters],
}

/// JSON document for the dmvt command.
#[derive(Debug, Serialize)]
pub struct DmVsTimePayload<'a> {
    /// Number of detections.
    pub count: usize,
    /// The detection arrays.
    #[serde(flatten)]
    pub arrays: &'a DmVsTime,
}

impl<'a> From<&'a DmVsTime> for DmVsTimePayload<'a> {
    fn from(arrays: &'a DmVsTime) -> Self {
        Self {
            count: arrays.len(),
            arrays,
        }
    }
}

pub(super) fn write_json<W: Write, T: Serialize>(out: &mut W, payload: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, payload)
        .map_err(|e| Error::JsonSerialize { source: e })?;
    writeln!(out)?;
    Ok(())
}
