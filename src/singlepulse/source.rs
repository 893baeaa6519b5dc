//! Readers producing detection columns from loose logs or a tarball.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use flate2::read::GzDecoder;
use tracing::{debug, info};

use crate::constants::singlepulse::{ARCHIVE_HEADER_LINES, COMMENT_PREFIX, FILE_SUFFIX};
use crate::error::{Error, Result};

use super::record::{ArchiveRow, DetectionColumns, LooseRow, SourceRow};

/// A source of single-pulse detections keyed by detection-log name.
pub trait DetectionSource {
    /// Load and concatenate the detections of `selected`, in order.
    ///
    /// # Errors
    ///
    /// Returns an error if a selected log cannot be read or holds a row
    /// that does not parse.
    fn load(&self, selected: &[String]) -> Result<DetectionColumns>;
}

/// Detection logs stored as individual files on disk.
///
/// Names passed to [`DetectionSource::load`] are file paths. Blank lines
/// and `#` comment lines are skipped; only the first three columns
/// (DM, sigma, time) of each row are read.
#[derive(Debug, Clone, Copy, Default)]
pub struct LooseFiles;

impl LooseFiles {
    /// Create a loose-file source.
    pub fn new() -> Self {
        Self
    }
}

impl DetectionSource for LooseFiles {
    fn load(&self, selected: &[String]) -> Result<DetectionColumns> {
        let mut columns = DetectionColumns::default();

        for name in selected {
            let path = Path::new(name);
            let contents = std::fs::read_to_string(path).map_err(|e| Error::DetectionRead {
                path: path.to_path_buf(),
                source: e,
            })?;

            let before = columns.len();
            for (line_num, line) in contents.lines().enumerate() {
                let trimmed = line.trim();
                if trimmed.is_empty() || trimmed.starts_with(COMMENT_PREFIX) {
                    continue;
                }

                let row = LooseRow::parse(trimmed).map_err(|message| Error::DetectionFormat {
                    source_name: name.clone(),
                    line: line_num + 1,
                    message,
                })?;
                columns.push(SourceRow::from(row).into_record());
            }
            debug!("Read {} detection(s) from {name}", columns.len() - before);
        }

        Ok(columns)
    }
}

/// A gzip-compressed tarball of detection logs.
///
/// All regular-file members are read into memory when the archive is
/// opened; later lookups are by exact member name.
#[derive(Debug, Clone, Default)]
pub struct Tarball {
    names: Vec<String>,
    members: HashMap<String, Vec<u8>>,
}

impl Tarball {
    /// Open a `.tgz` archive from disk.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ArchiveRead`] if the file cannot be opened or is not
    /// a valid gzip-compressed tar stream.
    pub fn open(path: &Path) -> Result<Self> {
        let archive_error = |source: std::io::Error| Error::ArchiveRead {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(archive_error)?;
        let tarball = Self::from_reader(BufReader::new(file)).map_err(archive_error)?;

        info!(
            "Loaded {} member(s) from {}",
            tarball.names.len(),
            path.display()
        );
        Ok(tarball)
    }

    /// Read a gzip-compressed tar stream.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if decompression or tar decoding fails.
    pub fn from_reader<R: Read>(reader: R) -> std::io::Result<Self> {
        let mut archive = tar::Archive::new(GzDecoder::new(reader));
        let mut tarball = Self::default();

        for entry in archive.entries()? {
            let mut entry = entry?;
            if !entry.header().entry_type().is_file() {
                continue;
            }

            let name = entry.path()?.to_string_lossy().into_owned();
            let mut content = Vec::new();
            entry.read_to_end(&mut content)?;

            if tarball.members.insert(name.clone(), content).is_none() {
                tarball.names.push(name);
            }
        }

        Ok(tarball)
    }

    /// Member names in archive order.
    pub fn member_names(&self) -> &[String] {
        &self.names
    }

    /// Member names ending in `.singlepulse`, in archive order.
    pub fn singlepulse_names(&self) -> Vec<String> {
        self.names
            .iter()
            .filter(|name| name.ends_with(FILE_SUFFIX))
            .cloned()
            .collect()
    }

    /// Raw content of the member called `name`.
    pub fn member(&self, name: &str) -> Option<&[u8]> {
        self.members.get(name).map(Vec::as_slice)
    }
}

impl DetectionSource for Tarball {
    /// Selected names absent from the archive are skipped. The first line of
    /// each member is a column header and is discarded; every other
    /// non-blank line must hold exactly five columns.
    fn load(&self, selected: &[String]) -> Result<DetectionColumns> {
        let mut columns = DetectionColumns::default();

        for name in selected {
            let Some(content) = self.member(name) else {
                debug!("Skipping {name}: not present in archive");
                continue;
            };

            let text = String::from_utf8_lossy(content);
            for (line_num, line) in text.lines().enumerate().skip(ARCHIVE_HEADER_LINES) {
                if line.trim().is_empty() {
                    continue;
                }

                let row = ArchiveRow::parse(line).map_err(|message| Error::DetectionFormat {
                    source_name: name.clone(),
                    line: line_num + 1,
                    message,
                })?;
                columns.push(SourceRow::from(row).into_record());
            }
        }

        Ok(columns)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::io::Write;
    use tempfile::TempDir;

    fn tgz(members: &[(&str, &str)]) -> Vec<u8> {
        let encoder = GzEncoder::new(Vec::new(), Compression::default());
        let mut builder = tar::Builder::new(encoder);
        for (name, content) in members {
            let mut header = tar::Header::new_gnu();
            header.set_size(content.len() as u64);
            header.set_mode(0o644);
            header.set_cksum();
            builder
                .append_data(&mut header, name, content.as_bytes())
                .unwrap();
        }
        builder.into_inner().unwrap().finish().unwrap()
    }

    const HEADER: &str = "# DM      Sigma      Time (s)     Sample    Downfact\n";

    #[test]
    fn test_loose_files_concatenate_in_order() {
        let dir = TempDir::new().unwrap();
        let first = dir.path().join("obs_DM1.00.singlepulse");
        let second = dir.path().join("obs_DM2.00.singlepulse");

        let mut file = File::create(&first).unwrap();
        write!(file, "{HEADER}1.00 6.00 0.50 500 1\n1.00 7.00 0.75 750 2\n").unwrap();
        let mut file = File::create(&second).unwrap();
        write!(file, "{HEADER}\n2.00 8.00 1.25 1250 4\n").unwrap();

        let selected = vec![
            first.to_string_lossy().into_owned(),
            second.to_string_lossy().into_owned(),
        ];
        let columns = LooseFiles::new().load(&selected).unwrap();

        assert_eq!(columns.dm, vec![1.0, 1.0, 2.0]);
        assert_eq!(columns.sigma, vec![6.0, 7.0, 8.0]);
        assert_eq!(columns.time, vec![0.5, 0.75, 1.25]);
        assert_eq!(columns.sample, vec![None, None, None]);
    }

    #[test]
    fn test_loose_missing_file_is_read_error() {
        let selected = vec!["/nonexistent/obs_DM1.00.singlepulse".to_string()];
        assert!(matches!(
            LooseFiles::new().load(&selected),
            Err(Error::DetectionRead { .. })
        ));
    }

    #[test]
    fn test_loose_bad_row_reports_line() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("obs_DM1.00.singlepulse");
        std::fs::write(&path, "1.00 6.00 0.50\n1.00 oops\n").unwrap();

        let selected = vec![path.to_string_lossy().into_owned()];
        let result = LooseFiles::new().load(&selected);
        assert!(matches!(result, Err(Error::DetectionFormat { line: 2, .. })));
    }

    #[test]
    fn test_tarball_lists_members() {
        let data = tgz(&[
            ("obs_DM1.00.singlepulse", HEADER),
            ("obs.inf", "info"),
            ("obs_DM2.00.singlepulse", HEADER),
        ]);
        let tarball = Tarball::from_reader(data.as_slice()).unwrap();

        assert_eq!(tarball.member_names().len(), 3);
        assert_eq!(
            tarball.singlepulse_names(),
            vec!["obs_DM1.00.singlepulse", "obs_DM2.00.singlepulse"]
        );
        assert_eq!(tarball.member("obs.inf"), Some(b"info".as_slice()));
        assert!(tarball.member("missing").is_none());
    }

    #[test]
    fn test_tarball_drops_header_and_reads_five_columns() {
        let data = tgz(&[
            (
                "obs_DM1.00.singlepulse",
                "# DM Sigma Time Sample Downfact\n1.00 6.00 0.50 500 1\n1.00 7.00 0.75 750 2\n",
            ),
            ("obs_DM2.00.singlepulse", "# header\n2.00 8.00 1.25 1250 4\n"),
        ]);
        let tarball = Tarball::from_reader(data.as_slice()).unwrap();

        let selected = vec![
            "obs_DM1.00.singlepulse".to_string(),
            "obs_DM2.00.singlepulse".to_string(),
        ];
        let columns = tarball.load(&selected).unwrap();

        assert_eq!(columns.dm, vec![1.0, 1.0, 2.0]);
        assert_eq!(columns.time, vec![0.5, 0.75, 1.25]);
        assert_eq!(columns.sample, vec![Some(500), Some(750), Some(1250)]);
        assert_eq!(columns.downfact, vec![Some(1), Some(2), Some(4)]);
    }

    #[test]
    fn test_tarball_skips_absent_members() {
        let data = tgz(&[("obs_DM1.00.singlepulse", "# h\n1.00 6.00 0.50 500 1\n")]);
        let tarball = Tarball::from_reader(data.as_slice()).unwrap();

        let selected = vec![
            "obs_DM0.50.singlepulse".to_string(),
            "obs_DM1.00.singlepulse".to_string(),
        ];
        let columns = tarball.load(&selected).unwrap();
        assert_eq!(columns.len(), 1);
    }

    #[test]
    fn test_tarball_rejects_short_rows() {
        let data = tgz(&[("obs_DM1.00.singlepulse", "# h\n1.00 6.00 0.50\n")]);
        let tarball = Tarball::from_reader(data.as_slice()).unwrap();

        let selected = vec!["obs_DM1.00.singlepulse".to_string()];
        assert!(matches!(
            tarball.load(&selected),
            Err(Error::DetectionFormat { line: 2, .. })
        ));
    }

    #[test]
    fn test_open_invalid_archive_is_archive_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.singlepulse.tgz");
        std::fs::write(&path, b"not a tarball").unwrap();

        assert!(matches!(
            Tarball::open(&path),
            Err(Error::ArchiveRead { .. })
        ));
    }
}
