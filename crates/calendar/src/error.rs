//! Error types for the ombros-calendar crate.

/// Error type for all fallible operations in the ombros-calendar crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalendarError {
    /// Returned when a day-of-year value is outside the valid range 1..=366.
    #[error("invalid day of year: {doy} (must be 1..=366)")]
    InvalidDoy {
        /// The invalid day-of-year value that was provided.
        doy: u16,
    },

    /// Returned when a date cannot be represented for the requested year.
    #[error("day of year {doy} is out of range for year {year}")]
    OutOfRange {
        /// Target year.
        year: i32,
        /// Day-of-year that could not be placed.
        doy: u16,
    },
}
