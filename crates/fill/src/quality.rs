//! Post-fill validation and descriptive statistics.

use serde::Serialize;

use ombros_stats::{mean, min_max, sd};

/// Relative mean drift below which a fill is considered good.
pub const MAX_MEAN_CHANGE: f64 = 0.10;
/// Relative standard-deviation drift below which a fill is considered good.
pub const MAX_STD_CHANGE: f64 = 0.20;
/// Values above `mean + EXTREME_SIGMAS * sd` of the original are extreme.
pub const EXTREME_SIGMAS: f64 = 4.0;

/// Aggregate drift and sanity checks comparing pre- and post-fill values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    /// `|mean_after - mean_before| / mean_before`.
    pub mean_change: f64,
    /// `|sd_after - sd_before| / sd_before`.
    pub std_change: f64,
    pub negative_count: usize,
    pub extreme_count: usize,
    pub quality_good: bool,
}

/// Compares the observed values before and after filling.
///
/// Standard deviations use the sample (N-1) estimator. Counts cover every
/// post-fill value, observed and imputed alike.
pub fn validate_fill(original: &[f64], filled: &[f64]) -> ValidationResult {
    let (m0, s0) = (mean(original), sd(original));
    let (m1, s1) = (mean(filled), sd(filled));

    let mean_change = relative_change(m0, m1);
    let std_change = relative_change(s0, s1);
    let negative_count = filled.iter().filter(|&&v| v < 0.0).count();
    let ceiling = m0 + EXTREME_SIGMAS * s0;
    let extreme_count = filled.iter().filter(|&&v| v > ceiling).count();

    ValidationResult {
        mean_change,
        std_change,
        negative_count,
        extreme_count,
        quality_good: mean_change < MAX_MEAN_CHANGE
            && std_change < MAX_STD_CHANGE
            && negative_count == 0,
    }
}

/// Absolute relative change. A zero baseline yields 0 when both are zero
/// and 1 otherwise.
fn relative_change(before: f64, after: f64) -> f64 {
    if before == 0.0 {
        if after == 0.0 { 0.0 } else { 1.0 }
    } else {
        ((after - before) / before).abs()
    }
}

/// Descriptive statistics of the post-fill series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataQuality {
    pub mean_precipitation: f64,
    pub std_precipitation: f64,
    pub min_precipitation: Option<f64>,
    pub max_precipitation: Option<f64>,
    pub zero_precipitation_days: usize,
}

impl DataQuality {
    /// Summarises the valid values of a series.
    pub fn from_values(values: &[f64]) -> Self {
        let range = min_max(values);
        Self {
            mean_precipitation: mean(values),
            std_precipitation: sd(values),
            min_precipitation: range.map(|(lo, _)| lo),
            max_precipitation: range.map(|(_, hi)| hi),
            zero_precipitation_days: values.iter().filter(|&&v| v == 0.0).count(),
        }
    }
}
