//! Merging loaded detections into DM-vs-time arrays.

use serde::Serialize;

use super::record::DetectionColumns;

/// Detections prepared for a DM-vs-time scatter view.
///
/// `dms`, `times` and `sigmas` always have the same length.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DmVsTime {
    /// Dispersion measures.
    pub dms: Vec<f64>,
    /// Arrival times in seconds.
    pub times: Vec<f64>,
    /// Significances.
    pub sigmas: Vec<f64>,
    /// Detection logs the arrays were read from.
    pub files: Vec<String>,
}

impl DmVsTime {
    /// Number of detections.
    pub fn len(&self) -> usize {
        self.dms.len()
    }

    /// Whether there are no detections.
    pub fn is_empty(&self) -> bool {
        self.dms.is_empty()
    }

    /// Keep only detections with `sigma >= threshold`.
    pub fn retain_min_sigma(&mut self, threshold: f64) {
        let keep: Vec<bool> = self.sigmas.iter().map(|&s| s >= threshold).collect();
        let filter = |values: &mut Vec<f64>| {
            let mut flags = keep.iter();
            values.retain(|_| flags.next().copied().unwrap_or(false));
        };
        filter(&mut self.dms);
        filter(&mut self.times);
        filter(&mut self.sigmas);
    }
}

/// Drop the leading detection and pair the arrays with their source files.
///
/// The first row of the concatenated columns is a duplicate artifact of
/// how detection logs are written, so exactly one element is removed from
/// each channel. A single-row input yields empty arrays; empty input stays
/// empty.
pub fn merge_trim(columns: DetectionColumns, files: Vec<String>) -> DmVsTime {
    fn trim(mut values: Vec<f64>) -> Vec<f64> {
        if !values.is_empty() {
            values.remove(0);
        }
        values
    }

    DmVsTime {
        dms: trim(columns.dm),
        times: trim(columns.time),
        sigmas: trim(columns.sigma),
        files,
    }
}
