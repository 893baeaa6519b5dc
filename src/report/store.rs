//! Ordered, indexable storage of report lines.

use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};

/// One raw line of a report and its zero-based position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportLine<'a> {
    /// Zero-based line index.
    pub index: usize,
    /// Line text without the line terminator.
    pub text: &'a str,
}

/// A report loaded fully into memory as a sequence of lines.
///
/// Lines are kept verbatim apart from the terminator (`\n` or `\r\n`);
/// leading tabs and trailing spaces are significant for marker matching.
#[derive(Debug, Clone, Default)]
pub struct ReportLineStore {
    lines: Vec<String>,
}

impl ReportLineStore {
    /// Load a report file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReportRead`] if the file cannot be read as UTF-8 text.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::ReportRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        let store = Self::from_text(&contents);
        debug!("Loaded {} report line(s) from {}", store.len(), path.display());
        Ok(store)
    }

    /// Build a store from in-memory report text.
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.lines().map(str::to_string).collect(),
        }
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the report has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Line text at `index`, if in bounds.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    /// Lines in `start..end`, if the whole range is in bounds.
    pub fn slice(&self, start: usize, end: usize) -> Option<&[String]> {
        self.lines.get(start..end)
    }

    /// Iterate over all lines in file order.
    pub fn iter(&self) -> impl Iterator<Item = ReportLine<'_>> {
        self.lines
            .iter()
            .enumerate()
            .map(|(index, text)| ReportLine { index, text })
    }
}
