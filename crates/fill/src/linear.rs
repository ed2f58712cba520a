//! Linear interpolation for very short gaps.

use crate::error::Unresolved;
use crate::gap::Gap;
use crate::series::PrecipSeries;

/// Fills `gap` by linear spacing between the observations either side.
///
/// The `gap.length()` values lie strictly between the two bounding values
/// (endpoints excluded) and are clamped at zero.
///
/// # Errors
///
/// Returns [`Unresolved::MissingBoundary`] if the gap touches either end
/// of the series or a neighbour is missing.
pub fn interpolate(reference: &PrecipSeries, gap: &Gap) -> Result<Vec<f64>, Unresolved> {
    let values = reference.values();
    let before = gap
        .start_index()
        .checked_sub(1)
        .and_then(|i| values[i])
        .ok_or(Unresolved::MissingBoundary)?;
    let after = values
        .get(gap.end_index() + 1)
        .copied()
        .flatten()
        .ok_or(Unresolved::MissingBoundary)?;

    let steps = (gap.length() + 1) as f64;
    Ok((1..=gap.length())
        .map(|k| (before + (after - before) * k as f64 / steps).max(0.0))
        .collect())
}
