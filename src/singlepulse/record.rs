//! Detection rows as read from each source, and their common form.
//!
//! Loose logs are read as three full-precision columns. Archived logs
//! carry five columns and store DM, sigma and time at half precision.
//! Both shapes convert into [`DetectionRecord`], where the columns only
//! the archive provides are optional.

use half::f16;

use crate::constants::singlepulse::{ARCHIVE_COLUMNS, LOOSE_COLUMNS};
use crate::numeric::{parse_f16, parse_f64, parse_i64, split_fields};

/// A row of a loose detection log.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LooseRow {
    /// Dispersion measure.
    pub dm: f64,
    /// Detection significance.
    pub sigma: f64,
    /// Arrival time in seconds.
    pub time: f64,
}

impl LooseRow {
    /// Parse the first three columns of a row; further columns are ignored.
    pub fn parse(line: &str) -> Result<Self, String> {
        let fields: Vec<&str> = line.split_whitespace().take(LOOSE_COLUMNS).collect();
        if fields.len() < LOOSE_COLUMNS {
            return Err(format!(
                "expected at least {LOOSE_COLUMNS} columns, found {}",
                fields.len()
            ));
        }

        Ok(Self {
            dm: parse_f64(fields[0]).map_err(|e| e.to_string())?,
            sigma: parse_f64(fields[1]).map_err(|e| e.to_string())?,
            time: parse_f64(fields[2]).map_err(|e| e.to_string())?,
        })
    }
}

/// A row of an archived detection log.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArchiveRow {
    /// Dispersion measure.
    pub dm: f16,
    /// Detection significance.
    pub sigma: f16,
    /// Arrival time in seconds.
    pub time: f16,
    /// Sample index.
    pub sample: i64,
    /// Boxcar downsampling factor.
    pub downfact: i64,
}

impl ArchiveRow {
    /// Parse a row of exactly five columns.
    pub fn parse(line: &str) -> Result<Self, String> {
        let fields = split_fields(line, ARCHIVE_COLUMNS).ok_or_else(|| {
            format!(
                "expected {ARCHIVE_COLUMNS} columns, found {}",
                line.split_whitespace().count()
            )
        })?;

        Ok(Self {
            dm: parse_f16(fields[0]).map_err(|e| e.to_string())?,
            sigma: parse_f16(fields[1]).map_err(|e| e.to_string())?,
            time: parse_f16(fields[2]).map_err(|e| e.to_string())?,
            sample: parse_i64(fields[3]).map_err(|e| e.to_string())?,
            downfact: parse_i64(fields[4]).map_err(|e| e.to_string())?,
        })
    }
}

/// A row from either source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SourceRow {
    /// Row of a loose detection log.
    Loose(LooseRow),
    /// Row of an archive member.
    Archive(ArchiveRow),
}

impl SourceRow {
    /// Convert into the source-independent record.
    pub fn into_record(self) -> DetectionRecord {
        match self {
            Self::Loose(row) => DetectionRecord {
                dm: row.dm,
                sigma: row.sigma,
                time: row.time,
                sample: None,
                downfact: None,
            },
            Self::Archive(row) => DetectionRecord {
                dm: row.dm.to_f64(),
                sigma: row.sigma.to_f64(),
                time: row.time.to_f64(),
                sample: Some(row.sample),
                downfact: Some(row.downfact),
            },
        }
    }
}

impl From<LooseRow> for SourceRow {
    fn from(row: LooseRow) -> Self {
        Self::Loose(row)
    }
}

impl From<ArchiveRow> for SourceRow {
    fn from(row: ArchiveRow) -> Self {
        Self::Archive(row)
    }
}

/// One single-pulse detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectionRecord {
    /// Dispersion measure.
    pub dm: f64,
    /// Detection significance.
    pub sigma: f64,
    /// Arrival time in seconds.
    pub time: f64,
    /// Sample index, when the source provides it.
    pub sample: Option<i64>,
    /// Boxcar downsampling factor, when the source provides it.
    pub downfact: Option<i64>,
}

/// Detections split into parallel columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetectionColumns {
    /// Dispersion measures.
    pub dm: Vec<f64>,
    /// Significances.
    pub sigma: Vec<f64>,
    /// Arrival times in seconds.
    pub time: Vec<f64>,
    /// Sample indices.
    pub sample: Vec<Option<i64>>,
    /// Downsampling factors.
    pub downfact: Vec<Option<i64>>,
}

impl DetectionColumns {
    /// Number of detections.
    pub fn len(&self) -> usize {
        self.dm.len()
    }

    /// Whether there are no detections.
    pub fn is_empty(&self) -> bool {
        self.dm.is_empty()
    }

    /// Append one detection to every column.
    pub fn push(&mut self, record: DetectionRecord) {
        self.dm.push(record.dm);
        self.sigma.push(record.sigma);
        self.time.push(record.time);
        self.sample.push(record.sample);
        self.downfact.push(record.downfact);
    }
}

impl FromIterator<DetectionRecord> for DetectionColumns {
    fn from_iter<I: IntoIterator<Item = DetectionRecord>>(iter: I) -> Self {
        let mut columns = Self::default();
        for record in iter {
            columns.push(record);
        }
        columns
    }
}
