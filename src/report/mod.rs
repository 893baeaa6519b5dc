//! Candidate extraction from single-pulse group reports.
//!
//! A group report lists clusters of single-pulse detections, each anchored
//! by a rank marker line. This module recovers the best-fit parameters of
//! every group carrying a requested rank.

mod extractor;
mod parser;
mod store;

pub use extractor::{GroupBlock, extract_blocks, rank_marker};
pub use parser::{CandidateParameters, parse_block};
pub use store::{ReportLine, ReportLineStore};

use std::path::Path;

use tracing::info;

use crate::error::Result;

/// Extract the parameters of every group with the given rank from a report file.
///
/// Returns an empty vector when the report holds no marker for `rank`.
///
/// # Errors
///
/// Returns an error if the report cannot be read, a marker's surrounding
/// lines are missing or malformed, or a group has no row carrying its
/// peak significance.
pub fn candidates_for_rank(path: &Path, rank: u32) -> Result<Vec<CandidateParameters>> {
    let store = ReportLineStore::load(path)?;
    let candidates = extract_blocks(&store, rank)?
        .iter()
        .map(parse_block)
        .collect::<Result<Vec<_>>>()?;

    info!(
        "Resolved {} candidate(s) of rank {rank} from {}",
        candidates.len(),
        path.display()
    );
    Ok(candidates)
}
