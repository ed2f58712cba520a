//! Daily precipitation series container.

use std::ops::Range;

use chrono::{Datelike, NaiveDate};
use ombros_calendar::{daily_sequence, distinct_years};

use crate::error::FillError;
use crate::validate;

/// A date-indexed daily precipitation series with explicit missing entries.
///
/// Dates are strictly ascending. `None` marks a missing observation; a
/// recorded zero is a dry day, never a missing one.
#[derive(Debug, Clone, PartialEq)]
pub struct PrecipSeries {
    dates: Vec<NaiveDate>,
    values: Vec<Option<f64>>,
}

impl PrecipSeries {
    /// Creates a new `PrecipSeries` after validating inputs.
    ///
    /// # Errors
    ///
    /// Returns [`FillError::EmptySeries`] if there are no dates,
    /// [`FillError::LengthMismatch`] if the columns differ in length, and
    /// [`FillError::Validation`] if dates are not strictly ascending or an
    /// observed value is non-finite or negative.
    pub fn new(dates: Vec<NaiveDate>, values: Vec<Option<f64>>) -> Result<Self, FillError> {
        if dates.is_empty() {
            return Err(FillError::EmptySeries);
        }
        if dates.len() != values.len() {
            return Err(FillError::LengthMismatch {
                dates_len: dates.len(),
                values_len: values.len(),
            });
        }

        let mut c = validate::validate_dates_ascending(&dates);
        c.merge(validate::validate_observed_values(&values));
        c.finish()?;

        Ok(Self { dates, values })
    }

    /// Builds a series from columns already known to be valid.
    pub(crate) fn from_parts_unchecked(dates: Vec<NaiveDate>, values: Vec<Option<f64>>) -> Self {
        debug_assert_eq!(dates.len(), values.len());
        Self { dates, values }
    }

    /// Returns the date column.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Returns the value column; `None` marks a missing day.
    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    /// Returns the number of days in the series.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Returns `true` if the series holds no days.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Number of missing entries.
    pub fn missing_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_none()).count()
    }

    /// All observed (non-missing) values in date order.
    pub fn observed(&self) -> Vec<f64> {
        self.values.iter().flatten().copied().collect()
    }

    /// Distinct calendar years present, ascending.
    pub fn years(&self) -> Vec<i32> {
        distinct_years(&self.dates)
    }

    /// Index of `date`, if it is part of the series.
    pub fn index_of(&self, date: NaiveDate) -> Option<usize> {
        self.dates.binary_search(&date).ok()
    }

    /// Observed value on `date`. `None` if the date is absent or missing.
    pub fn value_on(&self, date: NaiveDate) -> Option<f64> {
        self.index_of(date).and_then(|i| self.values[i])
    }

    /// Index range of all days with `lo <= date <= hi`.
    pub fn range(&self, lo: NaiveDate, hi: NaiveDate) -> Range<usize> {
        let start = self.dates.partition_point(|d| *d < lo);
        let end = self.dates.partition_point(|d| *d <= hi);
        start..end.max(start)
    }

    /// Index range of all days in calendar year `year`.
    pub fn year_range(&self, year: i32) -> Range<usize> {
        let start = self.dates.partition_point(|d| d.year() < year);
        let end = self.dates.partition_point(|d| d.year() <= year);
        start..end
    }

    /// Inserts a missing entry for every calendar day absent between the
    /// first and last date.
    ///
    /// Without this, a skipped date is invisible to gap location and the
    /// days either side of it are treated as neighbours.
    pub fn with_complete_calendar(self) -> Self {
        let (first, last) = match (self.dates.first(), self.dates.last()) {
            (Some(&f), Some(&l)) => (f, l),
            _ => return self,
        };
        let full = daily_sequence(first, last);
        if full.len() == self.dates.len() {
            return self;
        }

        let mut values = Vec::with_capacity(full.len());
        let mut src = self.dates.iter().zip(self.values.iter()).peekable();
        for date in &full {
            let present = matches!(src.peek(), Some((d, _)) if **d == *date);
            match src.next_if(|_| present) {
                Some((_, v)) => values.push(*v),
                None => values.push(None),
            }
        }

        Self {
            dates: full,
            values,
        }
    }
}
