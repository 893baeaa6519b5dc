//! DM tags encoded in detection-log filenames.

use std::path::Path;

use crate::constants::singlepulse::{DM_MARKER, FILE_SUFFIX};
use crate::error::{Error, Result};
use crate::numeric::parse_f64;

/// Extract the DM value from a detection-log name such as `obs_DM12.34.singlepulse`.
///
/// Only the final path component is inspected, so directory names
/// containing `DM` do not interfere. Within it, the value is the text
/// between the first `DM` and the first `.singlepulse` after it.
///
/// # Errors
///
/// Returns [`Error::FilenameFormat`] if either marker is missing or the
/// text between them is not a number.
pub fn dm_of(name: &str) -> Result<f64> {
    let format_error = || Error::FilenameFormat {
        name: name.to_string(),
    };

    let file_name = Path::new(name)
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(format_error)?;

    let start = file_name.find(DM_MARKER).ok_or_else(format_error)? + DM_MARKER.len();
    let end = file_name[start..]
        .find(FILE_SUFFIX)
        .map(|offset| start + offset)
        .ok_or_else(format_error)?;

    parse_f64(&file_name[start..end]).map_err(|_| format_error())
}

/// DM tags of every name, in the supplied order.
///
/// # Errors
///
/// Returns the first [`Error::FilenameFormat`] encountered.
pub fn dm_tags<S: AsRef<str>>(names: &[S]) -> Result<Vec<f64>> {
    names.iter().map(|name| dm_of(name.as_ref())).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_dm_of_plain_name() {
        assert_eq!(dm_of("foo_DM12.34.singlepulse").unwrap(), 12.34);
        assert_eq!(dm_of("DM0.00.singlepulse").unwrap(), 0.0);
    }

    #[test]
    fn test_dm_of_negative_tag() {
        assert_eq!(dm_of("obs_DM-20.00.singlepulse").unwrap(), -20.0);
    }

    #[test]
    fn test_dm_of_ignores_directories() {
        assert_eq!(dm_of("/data/DMsearch/obs_DM56.50.singlepulse").unwrap(), 56.5);
    }

    #[test]
    fn test_dm_of_missing_markers() {
        assert!(matches!(
            dm_of("foo_12.34.singlepulse"),
            Err(Error::FilenameFormat { .. })
        ));
        assert!(matches!(
            dm_of("foo_DM12.34.dat"),
            Err(Error::FilenameFormat { .. })
        ));
        assert!(matches!(dm_of(""), Err(Error::FilenameFormat { .. })));
    }

    #[test]
    fn test_dm_of_non_numeric_tag() {
        assert!(matches!(
            dm_of("foo_DMx.singlepulse"),
            Err(Error::FilenameFormat { .. })
        ));
    }

    #[test]
    fn test_dm_tags_preserves_order() {
        let names = ["a_DM3.0.singlepulse", "a_DM1.0.singlepulse"];
        assert_eq!(dm_tags(&names).unwrap(), vec![3.0, 1.0]);
    }
}
