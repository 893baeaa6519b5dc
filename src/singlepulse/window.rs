//! Selection of detection logs inside a padded DM window.

use tracing::{debug, warn};

use crate::error::{Error, Result};

use super::index::dm_tags;

/// A half-open index range `[lo, hi)` over a list of detection-log names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DmWindow {
    /// Index of the file nearest the lower DM bound.
    pub lo: usize,
    /// Index of the file nearest the upper DM bound (exclusive).
    pub hi: usize,
}

impl DmWindow {
    /// Number of files in the window.
    pub fn len(&self) -> usize {
        self.hi.saturating_sub(self.lo)
    }

    /// Whether the window selects no files.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The selected names; empty when `hi <= lo`.
    pub fn apply<'a, S>(&self, names: &'a [S]) -> &'a [S] {
        names.get(self.lo..self.hi).unwrap_or(&[])
    }
}

/// DM values the window is padded to reach.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DmBounds {
    /// Lower bound, clamped at zero.
    pub lower: f64,
    /// Upper bound.
    pub upper: f64,
}

impl DmBounds {
    /// Pad the integer span of `targets` by its own width on each side.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyDmTargets`] if `targets` is empty, or
    /// [`Error::NonFiniteDm`] if any target is NaN or infinite.
    pub fn around(targets: &[f64]) -> Result<Self> {
        if let Some(&value) = targets.iter().find(|dm| !dm.is_finite()) {
            return Err(Error::NonFiniteDm { value });
        }

        let max = targets.iter().copied().reduce(f64::max).ok_or(Error::EmptyDmTargets)?;
        let min = targets.iter().copied().reduce(f64::min).ok_or(Error::EmptyDmTargets)?;

        let max_dm = max.ceil();
        let min_dm = min.floor();
        let span = max_dm - min_dm;

        Ok(Self {
            lower: (min_dm - span).max(0.0),
            upper: max_dm + span,
        })
    }
}

/// Select the detection logs whose DM tags fall inside the padded window.
///
/// Each bound maps to the file whose tag is nearest to it (first file on a
/// tie). The names are expected in non-decreasing DM order; other orders
/// are accepted, but the window then covers whatever lies between the two
/// nearest files in the supplied order.
///
/// Returns the window and the selected names, which may be empty.
///
/// # Errors
///
/// Returns [`Error::EmptyDmTargets`] if `targets` is empty,
/// [`Error::NonFiniteDm`] if a target is not finite, or
/// [`Error::FilenameFormat`] if any name lacks a DM tag.
pub fn select_window<'a, S: AsRef<str>>(
    targets: &[f64],
    names: &'a [S],
) -> Result<(DmWindow, &'a [S])> {
    let bounds = DmBounds::around(targets)?;
    let tags = dm_tags(names)?;

    if tags.windows(2).any(|pair| pair[1] < pair[0]) {
        warn!("Detection logs are not in DM order; window bounds may be unexpected");
    }

    let window = DmWindow {
        lo: nearest(&tags, bounds.lower),
        hi: nearest(&tags, bounds.upper),
    };

    debug!(
        "DM window [{}, {}] -> files [{}, {}) of {}",
        bounds.lower,
        bounds.upper,
        window.lo,
        window.hi,
        names.len()
    );
    Ok((window, window.apply(names)))
}

/// Index of the first tag with minimum absolute distance to `target`; 0 if empty.
fn nearest(tags: &[f64], target: f64) -> usize {
    tags.iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (index, tag)| {
            let distance = (tag - target).abs();
            match best {
                Some((_, best_distance)) if best_distance <= distance => best,
                _ => Some((index, distance)),
            }
        })
        .map_or(0, |(index, _)| index)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    fn names(tags: &[&str]) -> Vec<String> {
        tags.iter()
            .map(|tag| format!("obs_DM{tag}.singlepulse"))
            .collect()
    }

    #[test]
    fn test_bounds_pad_by_span() {
        let bounds = DmBounds::around(&[55.2, 57.8]).unwrap();
        // ceil(57.8) = 58, floor(55.2) = 55, span = 3
        assert_eq!(bounds.lower, 52.0);
        assert_eq!(bounds.upper, 61.0);
    }

    #[test]
    fn test_bounds_clamp_lower_at_zero() {
        let bounds = DmBounds::around(&[5.0, 15.0]).unwrap();
        assert_eq!(bounds.lower, 0.0);
        assert_eq!(bounds.upper, 25.0);
    }

    #[test]
    fn test_bounds_single_target_has_zero_span() {
        let bounds = DmBounds::around(&[10.0]).unwrap();
        assert_eq!(bounds, DmBounds { lower: 10.0, upper: 10.0 });
    }

    #[test]
    fn test_empty_targets_is_error() {
        let files = names(&["1.00"]);
        assert!(matches!(
            select_window(&[], &files),
            Err(Error::EmptyDmTargets)
        ));
    }

    #[test]
    fn test_non_finite_targets_are_rejected() {
        assert!(matches!(
            DmBounds::around(&[10.0, f64::INFINITY]),
            Err(Error::NonFiniteDm { .. })
        ));

        let files = names(&["0.00", "10.00"]);
        assert!(matches!(
            select_window(&[f64::NAN], &files),
            Err(Error::NonFiniteDm { .. })
        ));
    }

    #[test]
    fn test_nearest_prefers_first_on_tie() {
        assert_eq!(nearest(&[-20.0, 0.0, 10.0, 20.0, 40.0], -10.0), 0);
        assert_eq!(nearest(&[-20.0, 0.0, 10.0, 20.0, 40.0], 30.0), 3);
        assert_eq!(nearest(&[], 30.0), 0);
    }

    #[test]
    fn test_select_window_over_mixed_tags() {
        let files = names(&["-20.00", "0.00", "10.00", "20.00", "40.00"]);
        let (window, selected) = select_window(&[5.0, 15.0], &files).unwrap();

        // Lower bound clamps to 0 (file 1); upper bound 25 is nearest to 20 (file 3).
        assert_eq!(window, DmWindow { lo: 1, hi: 3 });
        assert_eq!(selected, &files[1..3]);
    }

    #[test]
    fn test_select_window_is_idempotent() {
        let files = names(&["50.00", "52.00", "54.00", "56.00", "58.00", "60.00", "62.00"]);
        let first = select_window(&[55.2, 57.8], &files).unwrap().0;
        let second = select_window(&[55.2, 57.8], &files).unwrap().0;
        assert_eq!(first, second);
        assert_eq!(first, DmWindow { lo: 1, hi: 5 });
    }

    #[test]
    fn test_degenerate_window_is_empty() {
        let files = names(&["0.00", "100.00"]);
        let (window, selected) = select_window(&[10.0], &files).unwrap();
        assert_eq!(window, DmWindow { lo: 0, hi: 0 });
        assert!(window.is_empty());
        assert!(selected.is_empty());
    }

    #[test]
    fn test_reversed_window_selects_nothing() {
        let files = names(&["60.00", "50.00"]);
        let (window, selected) = select_window(&[55.0, 56.0], &files).unwrap();
        assert_eq!(window, DmWindow { lo: 1, hi: 0 });
        assert!(selected.is_empty());
    }

    #[test]
    fn test_bad_filename_is_error() {
        let files = vec!["obs.dat".to_string()];
        assert!(matches!(
            select_window(&[1.0], &files),
            Err(Error::FilenameFormat { .. })
        ));
    }
}
