//! Error types for the ombros-fill crate.
//!
//! Only systemic problems are errors. A gap that cannot be filled is not an
//! error: it is recorded as an [`Unresolved`] reason on its outcome and the
//! run carries on.

use chrono::NaiveDate;

/// Error type for all fallible operations in the ombros-fill crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FillError {
    /// Returned when the input series has no observations.
    #[error("input series is empty")]
    EmptySeries,

    /// Returned when the date and value columns differ in length.
    #[error("length mismatch: dates has {dates_len} elements, values has {values_len}")]
    LengthMismatch {
        /// Length of the date column.
        dates_len: usize,
        /// Length of the value column.
        values_len: usize,
    },

    /// Returned when one or more input validation checks fail.
    #[error("{count} validation error(s): {details}")]
    Validation {
        /// Number of accumulated validation failures.
        count: usize,
        /// Human-readable summary of the failures.
        details: String,
    },

    /// Returned when a configuration value is out of range.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when the report cannot be serialised.
    #[error("serialization error: {reason}")]
    Serialization {
        /// Description of the underlying serde failure.
        reason: String,
    },
}

/// Why a single gap could not be filled by a strategy.
///
/// These never abort a run; they are folded into the report.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Unresolved {
    /// The gap is longer than the configured ceiling; nothing was attempted.
    #[error("gap of {length} days exceeds the maximum fill length of {max} days")]
    ExceededMaxGap {
        /// Gap length in days.
        length: usize,
        /// Configured `max_fill_gap_days`.
        max: usize,
    },

    /// Linear interpolation needs a valid value on both sides of the gap.
    #[error("no valid observation on both sides of the gap")]
    MissingBoundary,

    /// Too few pooled observations for a climatological normal.
    #[error("only {pooled} climatology samples for {date}, need at least {required}")]
    InsufficientClimatology {
        /// Missing date being estimated.
        date: NaiveDate,
        /// Number of valid observations pooled across years.
        pooled: usize,
        /// Configured `min_years_for_climatology`.
        required: usize,
    },

    /// No other year has the gap's calendar span fully observed.
    #[error("no candidate year fully observes the gap period")]
    NoCandidateYear,

    /// Candidate years exist but none is similar enough.
    #[error("no candidate year reaches similarity {threshold} (best {best:.3})")]
    NoSimilarYear {
        /// Highest similarity score among candidates.
        best: f64,
        /// Configured `min_similarity_threshold`.
        threshold: f64,
    },

    /// The donor year has no value near the aligned date.
    #[error("donor year {donor_year} has no value near {date}")]
    UnresolvedDonorDay {
        /// Missing date being filled.
        date: NaiveDate,
        /// Selected donor year.
        donor_year: i32,
    },
}
