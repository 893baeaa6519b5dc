//! Group block extraction around rank markers.
//!
//! Each group in a report is anchored by a marker line of the exact form
//! `"\tRank:             <rank>.000000"`. Relative to the marker at line `i`:
//!
//! - line `i - 6` is the group header whose third token is the pulse count,
//! - line `i - 1` is the "Max sigma" line whose third token is the peak significance,
//! - lines `i + 1 ..= i + pulse_count` are the group's parameter rows.
//!
//! The scan walks these offsets as a small state machine so that every
//! out-of-bounds lookup is reported as the step that failed.

use tracing::debug;

use crate::constants::report::{
    PULSE_COUNT_BACKREF, RANK_MARKER_PREFIX, RANK_MARKER_SUFFIX, SIGNIFICANCE_BACKREF, VALUE_TOKEN,
};
use crate::error::{Error, Result};
use crate::numeric::{parse_i64, reformat_2dp};

use super::ReportLineStore;

/// One ranked group recovered from a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupBlock {
    /// Rank the block was extracted for.
    pub rank: u32,
    /// Zero-based index of the rank marker line.
    pub marker_line: usize,
    /// Peak significance rendered with exactly two decimals.
    pub peak_significance: String,
    /// Number of pulses declared by the group header.
    pub pulse_count: usize,
    /// Parameter rows following the marker, in file order.
    pub rows: Vec<String>,
}

impl GroupBlock {
    /// Zero-based line index of the first parameter row.
    pub fn first_row_line(&self) -> usize {
        self.marker_line + 1
    }
}

/// The exact marker line anchoring groups of `rank`.
pub fn rank_marker(rank: u32) -> String {
    format!("{RANK_MARKER_PREFIX}{rank}{RANK_MARKER_SUFFIX}")
}

#[derive(Debug)]
enum ScanState {
    SeekingMarker {
        from: usize,
    },
    ReadCountBackref {
        marker: usize,
    },
    ReadSignificanceBackref {
        marker: usize,
        pulse_count: usize,
    },
    CollectRows {
        marker: usize,
        pulse_count: usize,
        peak_significance: String,
    },
}

/// Extract every group block anchored by the marker for `rank`.
///
/// Markers must match exactly; a report whose rank lines use different
/// spacing or precision yields no blocks rather than an error.
///
/// # Errors
///
/// Returns [`Error::MalformedReport`] when a marker's count line,
/// significance line, or parameter rows fall outside the report, or when
/// those lines do not carry a parseable value token.
pub fn extract_blocks(store: &ReportLineStore, rank: u32) -> Result<Vec<GroupBlock>> {
    let marker_text = rank_marker(rank);
    let mut blocks = Vec::new();
    let mut state = ScanState::SeekingMarker { from: 0 };

    loop {
        state = match state {
            ScanState::SeekingMarker { from } => {
                let next = store
                    .iter()
                    .skip(from)
                    .find(|line| line.text == marker_text);
                match next {
                    Some(line) => ScanState::ReadCountBackref { marker: line.index },
                    None => break,
                }
            }
            ScanState::ReadCountBackref { marker } => {
                let line = backref(marker, PULSE_COUNT_BACKREF, "group header")?;
                let token = value_token(store, line, "pulse count")?;
                let count = parse_i64(token).map_err(|e| Error::MalformedReport {
                    line,
                    reason: format!("pulse count: {e}"),
                })?;
                let pulse_count = usize::try_from(count).map_err(|_| Error::MalformedReport {
                    line,
                    reason: format!("pulse count must be non-negative, got {count}"),
                })?;
                ScanState::ReadSignificanceBackref {
                    marker,
                    pulse_count,
                }
            }
            ScanState::ReadSignificanceBackref {
                marker,
                pulse_count,
            } => {
                let line = backref(marker, SIGNIFICANCE_BACKREF, "max sigma line")?;
                let token = value_token(store, line, "peak significance")?;
                let peak_significance =
                    reformat_2dp(token).map_err(|e| Error::MalformedReport {
                        line,
                        reason: format!("peak significance: {e}"),
                    })?;
                ScanState::CollectRows {
                    marker,
                    pulse_count,
                    peak_significance,
                }
            }
            ScanState::CollectRows {
                marker,
                pulse_count,
                peak_significance,
            } => {
                let first = marker + 1;
                let rows = store
                    .slice(first, first + pulse_count)
                    .ok_or_else(|| Error::MalformedReport {
                        line: marker,
                        reason: format!(
                            "group declares {pulse_count} pulse(s) but only {} line(s) follow the rank marker",
                            store.len().saturating_sub(first)
                        ),
                    })?
                    .to_vec();

                debug!(
                    "Rank {rank} group at line {marker}: {pulse_count} pulse(s), peak sigma {peak_significance}"
                );
                blocks.push(GroupBlock {
                    rank,
                    marker_line: marker,
                    peak_significance,
                    pulse_count,
                    rows,
                });
                ScanState::SeekingMarker { from: marker + 1 }
            }
        };
    }

    debug!("Found {} group(s) of rank {rank}", blocks.len());
    Ok(blocks)
}

fn backref(marker: usize, offset: usize, what: &str) -> Result<usize> {
    marker
        .checked_sub(offset)
        .ok_or_else(|| Error::MalformedReport {
            line: marker,
            reason: format!("expected {what} {offset} line(s) before the rank marker"),
        })
}

fn value_token<'a>(store: &'a ReportLineStore, line: usize, what: &str) -> Result<&'a str> {
    store
        .get(line)
        .and_then(|text| text.split_whitespace().nth(VALUE_TOKEN))
        .ok_or_else(|| Error::MalformedReport {
            line,
            reason: format!("expected {what} as token {}", VALUE_TOKEN + 1),
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn group(count: usize, sigma: &str, rank: u32, rows: &[&str]) -> String {
        let mut text = format!(
            "Group of {count} single pulses: \n\
             \tMin DM (cm-3 pc): 55.000000\n\
             \tMax DM (cm-3 pc): 57.000000\n\
             \tCenter time (s):  12.345000\n\
             \tDuration (s):     0.010000\n\
             \tMax sigma:        {sigma}\n\
             \tRank:             {rank}.000000\n"
        );
        for row in rows {
            text.push_str(row);
            text.push('\n');
        }
        text
    }

    const ROWS: [&str; 3] = [
        "  55.00    6.10     12.340000      12340   2",
        "  56.00    7.89     12.345000      12345   4",
        "  57.00    6.50     12.350000      12350   2",
    ];

    #[test]
    fn test_rank_marker_text() {
        assert_eq!(rank_marker(3), "\tRank:             3.000000");
        assert_eq!(rank_marker(10), "\tRank:             10.000000");
    }

    #[test]
    fn test_single_block_matches_declared_count() {
        let store = ReportLineStore::from_text(&group(3, "7.891000", 3, &ROWS));
        let blocks = extract_blocks(&store, 3).unwrap();

        assert_eq!(blocks.len(), 1);
        let block = &blocks[0];
        assert_eq!(block.marker_line, 6);
        assert_eq!(block.pulse_count, 3);
        assert_eq!(block.rows.len(), 3);
        assert_eq!(block.peak_significance, "7.89");
        assert_eq!(block.rows[0], ROWS[0]);
        assert_eq!(block.first_row_line(), 7);
    }

    #[test]
    fn test_other_ranks_are_ignored() {
        let mut text = group(3, "7.891000", 3, &ROWS);
        text.push_str(&group(1, "5.500000", 2, &["  10.00    5.50     1.000000      100   1"]));
        let store = ReportLineStore::from_text(&text);

        assert_eq!(extract_blocks(&store, 3).unwrap().len(), 1);
        let rank_two = extract_blocks(&store, 2).unwrap();
        assert_eq!(rank_two.len(), 1);
        assert_eq!(rank_two[0].peak_significance, "5.50");
        assert!(extract_blocks(&store, 5).unwrap().is_empty());
    }

    #[test]
    fn test_repeated_rank_yields_blocks_in_file_order() {
        let mut text = group(3, "7.891000", 4, &ROWS);
        text.push_str(&group(2, "6.500000", 4, &ROWS[1..]));
        let store = ReportLineStore::from_text(&text);

        let blocks = extract_blocks(&store, 4).unwrap();
        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].marker_line < blocks[1].marker_line);
        assert_eq!(blocks[1].rows.len(), 2);
    }

    #[test]
    fn test_marker_format_drift_yields_no_blocks() {
        let text = group(3, "7.891000", 3, &ROWS).replace("3.000000", "3.00");
        let store = ReportLineStore::from_text(&text);
        assert!(extract_blocks(&store, 3).unwrap().is_empty());

        let text = group(3, "7.891000", 3, &ROWS).replace("\tRank:             ", "\tRank: ");
        let store = ReportLineStore::from_text(&text);
        assert!(extract_blocks(&store, 3).unwrap().is_empty());
    }

    #[test]
    fn test_marker_too_close_to_start_is_malformed() {
        let text = "\tMax sigma:        7.891000\n\tRank:             3.000000\n";
        let store = ReportLineStore::from_text(text);
        let result = extract_blocks(&store, 3);
        assert!(matches!(result, Err(Error::MalformedReport { line: 1, .. })));
    }

    #[test]
    fn test_rows_past_end_of_report_is_malformed() {
        let store = ReportLineStore::from_text(&group(5, "7.891000", 3, &ROWS));
        let result = extract_blocks(&store, 3);
        assert!(matches!(result, Err(Error::MalformedReport { line: 6, .. })));
    }

    #[test]
    fn test_non_numeric_count_is_malformed() {
        let text = group(3, "7.891000", 3, &ROWS).replace("Group of 3", "Group of many");
        let store = ReportLineStore::from_text(&text);
        let result = extract_blocks(&store, 3);
        assert!(matches!(result, Err(Error::MalformedReport { line: 0, .. })));
    }

    #[test]
    fn test_missing_significance_token_is_malformed() {
        let text = group(3, "7.891000", 3, &ROWS).replace("\tMax sigma:        7.891000", "\tMax sigma:");
        let store = ReportLineStore::from_text(&text);
        let result = extract_blocks(&store, 3);
        assert!(matches!(result, Err(Error::MalformedReport { line: 5, .. })));
    }
}
