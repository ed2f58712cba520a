//! Accumulated input validation.
//!
//! Provides [`ValidationCollector`] for gathering every violation in an
//! input series into a single [`FillError::Validation`].

use chrono::NaiveDate;

use crate::error::FillError;

/// Accumulates validation errors and converts them into a single
/// [`FillError::Validation`].
pub(crate) struct ValidationCollector {
    errors: Vec<String>,
}

impl ValidationCollector {
    /// Create an empty collector.
    pub(crate) fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Record one validation error.
    pub(crate) fn push(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    /// Append every error recorded by `other`.
    pub(crate) fn merge(&mut self, other: ValidationCollector) {
        self.errors.extend(other.errors);
    }

    /// Returns the number of recorded errors.
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.errors.len()
    }

    /// Consume the collector and return `Ok(())` if no errors were recorded,
    /// or `Err(FillError::Validation { count, details })` otherwise.
    ///
    /// The `details` string joins all messages with `"; "`.
    pub(crate) fn finish(self) -> Result<(), FillError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(FillError::Validation {
                count: self.errors.len(),
                details: self.errors.join("; "),
            })
        }
    }
}

/// Check that dates are strictly ascending (sorted and unique).
pub(crate) fn validate_dates_ascending(dates: &[NaiveDate]) -> ValidationCollector {
    let mut c = ValidationCollector::new();

    for (i, pair) in dates.windows(2).enumerate() {
        if pair[1] == pair[0] {
            c.push(format!("duplicate date {} at index {}", pair[1], i + 1));
        } else if pair[1] < pair[0] {
            c.push(format!(
                "date {} at index {} precedes {}",
                pair[1],
                i + 1,
                pair[0]
            ));
        }
    }

    c
}

/// Check that every observed value is finite and non-negative.
///
/// Missing entries are skipped.
pub(crate) fn validate_observed_values(values: &[Option<f64>]) -> ValidationCollector {
    let mut c = ValidationCollector::new();

    for (i, v) in values.iter().enumerate() {
        match *v {
            Some(x) if !x.is_finite() => {
                c.push(format!("non-finite precipitation at index {i}: {x}"));
            }
            Some(x) if x < 0.0 => {
                c.push(format!("negative precipitation at index {i}: {x}"));
            }
            _ => {}
        }
    }

    c
}
