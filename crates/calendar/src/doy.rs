//! Day-of-year newtype and cross-year alignment.

use chrono::{Datelike, NaiveDate};

use crate::error::CalendarError;

/// Day-of-year on the Gregorian calendar (1..=366).
///
/// Used to align a date in one year with the "same" calendar position in
/// another year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Doy(u16);

impl Doy {
    /// Creates a new `Doy` from a day-of-year value.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidDoy`] if `doy` is not in 1..=366.
    pub fn new(doy: u16) -> Result<Self, CalendarError> {
        if !(1..=366).contains(&doy) {
            return Err(CalendarError::InvalidDoy { doy });
        }
        Ok(Self(doy))
    }

    /// Returns the day-of-year of `date`.
    pub fn of(date: NaiveDate) -> Self {
        // chrono ordinals are always 1..=366.
        Self(date.ordinal() as u16)
    }

    /// Returns the inner day-of-year value (1..=366).
    pub fn get(self) -> u16 {
        self.0
    }

    /// Places this day-of-year in `year`.
    ///
    /// Day 366 has no counterpart in a common year; it is clamped to
    /// December 31 of that year so every day-of-year maps to a date inside
    /// the requested year.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::OutOfRange`] if `year` lies outside the
    /// range chrono can represent.
    pub fn in_year(self, year: i32) -> Result<NaiveDate, CalendarError> {
        NaiveDate::from_yo_opt(year, u32::from(self.0))
            .or_else(|| {
                if self.0 == 366 {
                    NaiveDate::from_ymd_opt(year, 12, 31)
                } else {
                    None
                }
            })
            .ok_or(CalendarError::OutOfRange { year, doy: self.0 })
    }
}

/// Returns the date that occupies the same calendar position as `date`,
/// shifted by `year_offset` years.
///
/// Alignment is by day-of-year, with the clamping rule of [`Doy::in_year`].
///
/// # Errors
///
/// Returns [`CalendarError::OutOfRange`] if the shifted year cannot be
/// represented.
pub fn align_to_year(date: NaiveDate, year: i32) -> Result<NaiveDate, CalendarError> {
    Doy::of(date).in_year(year)
}
