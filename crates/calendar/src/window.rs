//! Seasonal windows and nearby-day probing.

use chrono::{NaiveDate, TimeDelta};

/// Shifts `date` by a signed number of days.
///
/// Returns `None` if the result falls outside chrono's representable range.
pub fn shift_days(date: NaiveDate, offset: i64) -> Option<NaiveDate> {
    date.checked_add_signed(TimeDelta::try_days(offset)?)
}

/// Inclusive date range of `half_width` days either side of `center`.
///
/// Ends that would overflow chrono's range are clamped to the
/// representable limits.
pub fn seasonal_window(center: NaiveDate, half_width: u32) -> (NaiveDate, NaiveDate) {
    let hw = i64::from(half_width);
    let lo = shift_days(center, -hw).unwrap_or(NaiveDate::MIN);
    let hi = shift_days(center, hw).unwrap_or(NaiveDate::MAX);
    (lo, hi)
}

/// Offsets to try, in order, when the exact day is unavailable.
///
/// Alternates outward from the centre: `-1, +1, -2, +2, ...` up to
/// `radius`. The centre itself is not included.
///
/// # Example
///
/// ```
/// use ombros_calendar::probe_offsets;
///
/// assert_eq!(probe_offsets(2), vec![-1, 1, -2, 2]);
/// ```
pub fn probe_offsets(radius: u32) -> Vec<i64> {
    (1..=i64::from(radius)).flat_map(|k| [-k, k]).collect()
}
