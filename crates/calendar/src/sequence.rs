//! Daily date sequences and year listings.

use chrono::{Datelike, NaiveDate};

/// Generates every calendar day from `start` to `end`, both inclusive.
///
/// Returns an empty vector when `end < start`.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use ombros_calendar::daily_sequence;
///
/// let start = NaiveDate::from_ymd_opt(2020, 2, 28).unwrap();
/// let end = NaiveDate::from_ymd_opt(2020, 3, 1).unwrap();
/// assert_eq!(daily_sequence(start, end).len(), 3);
/// ```
pub fn daily_sequence(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    if end < start {
        return Vec::new();
    }
    start.iter_days().take_while(|d| *d <= end).collect()
}

/// Returns the distinct years covered by an ascending date slice, in order.
pub fn distinct_years(dates: &[NaiveDate]) -> Vec<i32> {
    let mut years: Vec<i32> = dates.iter().map(|d| d.year()).collect();
    years.dedup();
    years
}
