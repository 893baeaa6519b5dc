//! Column-aligned text output.

use std::io::Write;

use crate::error::Result;
use crate::report::CandidateParameters;
use crate::singlepulse::DmVsTime;

pub(super) fn write_candidates<W: Write>(
    out: &mut W,
    candidates: &[CandidateParameters],
) -> Result<()> {
    writeln!(
        out,
        "# {:>7} {:>7} {:>13} {:>10} {:>8}",
        "DM", "Sigma", "Time (s)", "Sample", "Downfact"
    )?;
    for c in candidates {
        writeln!(
            out,
            "{:>9.2} {:>7.2} {:>13.6} {:>10} {:>8}",
            c.dm, c.sigma, c.time, c.sample, c.downfact
        )?;
    }
    Ok(())
}

pub(super) fn write_dm_vs_time<W: Write>(out: &mut W, arrays: &DmVsTime) -> Result<()> {
    for file in &arrays.files {
        writeln!(out, "# file: {file}")?;
    }
    writeln!(out, "# {:>7} {:>13} {:>7}", "DM", "Time (s)", "Sigma")?;

    let rows = arrays.dms.iter().zip(&arrays.times).zip(&arrays.sigmas);
    for ((dm, time), sigma) in rows {
        writeln!(out, "{dm:>9.2} {time:>13.6} {sigma:>7.2}")?;
    }
    Ok(())
}
