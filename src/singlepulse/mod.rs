//! DM-vs-time detection arrays from per-DM single-pulse logs.
//!
//! Detection logs are named `<basename>_DM<value>.singlepulse`, one per
//! trial DM. Given the DM values of a candidate, a window of logs around
//! them is selected, read from loose files or a tarball, and flattened
//! into parallel arrays.

mod index;
mod merge;
mod record;
mod source;
mod window;

pub use index::{dm_of, dm_tags};
pub use merge::{DmVsTime, merge_trim};
pub use record::{ArchiveRow, DetectionColumns, DetectionRecord, LooseRow, SourceRow};
pub use source::{DetectionSource, LooseFiles, Tarball};
pub use window::{DmBounds, DmWindow, select_window};

use tracing::info;

use crate::error::Result;

/// Build DM-vs-time arrays for a candidate observed at `targets`.
///
/// `names` lists every available detection log, ideally in increasing DM
/// order; the window selected from it is loaded from `source`. An empty
/// window yields empty arrays.
///
/// # Errors
///
/// Returns an error if `targets` is empty, a name carries no DM tag, or
/// the source fails to read a selected log.
pub fn dm_vs_time(
    targets: &[f64],
    names: &[String],
    source: &dyn DetectionSource,
) -> Result<DmVsTime> {
    let (window, selected) = select_window(targets, names)?;
    if window.is_empty() {
        info!("DM window selects no detection logs");
        return Ok(DmVsTime::default());
    }

    let columns = source.load(selected)?;
    let merged = merge_trim(columns, selected.to_vec());
    info!(
        "Collected {} detection(s) from {} log(s)",
        merged.len(),
        merged.files.len()
    );
    Ok(merged)
}
