//! Coordinate axes of the satellite swath grid.

use ndarray::{Array2, Axis};
use num::Float;
use std::{io, ops::Range};

/// Floating-point precision to use for grid coordinates.
#[allow(non_camel_case_types)]
pub type fgr = f32;

/// A 1D profile of coordinate values along one axis of the swath grid,
/// obtained by averaging the 2D coordinate field over the other axis.
///
/// The values are nominally monotonic (increasing for longitude, decreasing
/// for latitude on the swath grid), but rows or columns where every
/// coordinate sample is missing leave NaN entries, and monotonicity is
/// assumed rather than enforced. All searches scan linearly and skip NaNs.
#[derive(Clone, Debug)]
pub struct AxisProfile {
    values: Vec<fgr>,
}

impl AxisProfile {
    /// Creates a profile directly from the given coordinate values.
    pub fn from_values(values: Vec<fgr>) -> Self {
        Self { values }
    }

    /// Creates a profile with one value per column of the given coordinate
    /// field, averaging over the rows of each column.
    pub fn from_column_means(field: &Array2<fgr>) -> Self {
        Self {
            values: field
                .axis_iter(Axis(1))
                .map(|column| nan_mean(column.iter()))
                .collect(),
        }
    }

    /// Creates a profile with one value per row of the given coordinate
    /// field, averaging over the columns of each row.
    pub fn from_row_means(field: &Array2<fgr>) -> Self {
        Self {
            values: field
                .axis_iter(Axis(0))
                .map(|row| nan_mean(row.iter()))
                .collect(),
        }
    }

    /// Returns the coordinate values of the profile.
    pub fn values(&self) -> &[fgr] {
        &self.values
    }

    /// Returns the number of values in the profile.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the profile has no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Finds the index of the profile value nearest to the given coordinate,
    /// or `None` if the profile holds no valid values.
    pub fn nearest_index(&self, coord: fgr) -> Option<usize> {
        nearest_index(&self.values, coord)
    }

    /// Finds the maximal contiguous index span whose profile values lie
    /// within the given closed interval.
    ///
    /// Fails if the interval does not overlap the range of valid profile
    /// values on either side.
    pub fn trim_to_interval(&self, lower: fgr, upper: fgr) -> io::Result<Range<usize>> {
        trim_span(&self.values, lower, upper).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Requested interval [{}, {}] lies outside the coordinate axis",
                    lower, upper
                ),
            )
        })
    }

    /// Returns a new profile restricted to the given index span.
    pub fn trimmed(&self, span: &Range<usize>) -> Self {
        Self {
            values: self.values[span.clone()].to_vec(),
        }
    }
}

/// Computes the mean of the given values, skipping NaNs.
/// Returns NaN if every value is NaN.
fn nan_mean<'a, I>(values: I) -> fgr
where
    I: Iterator<Item = &'a fgr>,
{
    let mut sum = 0.0;
    let mut count: usize = 0;
    for &value in values {
        if value.is_nan() {
            continue;
        }
        sum += value;
        count += 1;
    }
    if count == 0 {
        fgr::NAN
    } else {
        sum / (count as fgr)
    }
}

/// Finds the index of the value nearest to the given coordinate, skipping
/// NaN entries. Ties are resolved to the smallest index. Returns `None` if
/// every value is NaN or the slice is empty.
pub fn nearest_index<F: Float>(values: &[F], coord: F) -> Option<usize> {
    let mut nearest: Option<(usize, F)> = None;
    for (idx, &value) in values.iter().enumerate() {
        let distance = (value - coord).abs();
        if distance.is_nan() {
            continue;
        }
        if nearest.map_or(true, |(_, smallest)| distance < smallest) {
            nearest = Some((idx, distance));
        }
    }
    nearest.map(|(idx, _)| idx)
}

/// Finds the maximal contiguous index span whose values lie within the
/// closed interval `[lower, upper]`.
///
/// Each side of the span is anchored at the position whose offset from the
/// corresponding interval bound is the smallest non-negative value, with
/// ties resolved to the smallest index. Works for both increasing and
/// decreasing value orderings. Returns `None` if every offset on one side
/// is negative, meaning the interval lies outside the value range.
pub fn trim_span<F: Float>(values: &[F], lower: F, upper: F) -> Option<Range<usize>> {
    let lower_anchor = anchor_index(values, |value| value - lower)?;
    let upper_anchor = anchor_index(values, |value| upper - value)?;
    let start = lower_anchor.min(upper_anchor);
    let end = lower_anchor.max(upper_anchor) + 1;
    Some(start..end)
}

/// Finds the index with the smallest non-negative offset, as computed by
/// the given function. NaN offsets never compare as non-negative.
fn anchor_index<F, C>(values: &[F], compute_offset: C) -> Option<usize>
where
    F: Float,
    C: Fn(F) -> F,
{
    let mut anchor: Option<(usize, F)> = None;
    for (idx, &value) in values.iter().enumerate() {
        let offset = compute_offset(value);
        if offset >= F::zero() && anchor.map_or(true, |(_, smallest)| offset < smallest) {
            anchor = Some((idx, offset));
        }
    }
    anchor.map(|(idx, _)| idx)
}
