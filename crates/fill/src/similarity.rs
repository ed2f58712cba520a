//! Year-to-year similarity of monthly precipitation patterns.

use chrono::Datelike;
use ombros_stats::{pearson_correlation, pearson_p_value};

use crate::series::PrecipSeries;

/// Minimum number of months observed in both years for a non-zero score.
pub const MIN_COMMON_MONTHS: usize = 6;

/// Two-sided significance level a correlation must beat to count.
pub const SIGNIFICANCE_LEVEL: f64 = 0.05;

/// Result of comparing two years.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearSimilarity {
    /// Months with at least one observation in both years.
    pub common_months: usize,
    /// Pearson correlation of the common monthly totals, if defined.
    pub correlation: Option<f64>,
    /// Two-sided p-value of `correlation`.
    pub p_value: Option<f64>,
    /// The correlation when significant, otherwise exactly 0.
    pub score: f64,
}

/// Monthly precipitation totals for `year` from observed days only.
///
/// A month with no observed day is `None`; a fully dry month is `Some(0.0)`.
pub fn monthly_totals(series: &PrecipSeries, year: i32) -> [Option<f64>; 12] {
    let dates = series.dates();
    let values = series.values();
    let mut totals = [None; 12];

    for i in series.year_range(year) {
        if let Some(v) = values[i] {
            let slot = &mut totals[dates[i].month0() as usize];
            *slot = Some(slot.unwrap_or(0.0) + v);
        }
    }

    totals
}

/// Scores how alike the monthly patterns of two years are.
///
/// The score is the Pearson correlation of monthly totals over the months
/// present in both years, kept only when p < [`SIGNIFICANCE_LEVEL`]. Fewer
/// than [`MIN_COMMON_MONTHS`] shared months, a constant year, or an
/// insignificant correlation all score 0.
pub fn year_similarity(series: &PrecipSeries, year_a: i32, year_b: i32) -> YearSimilarity {
    let a = monthly_totals(series, year_a);
    let b = monthly_totals(series, year_b);

    let (xs, ys): (Vec<f64>, Vec<f64>) = a
        .iter()
        .zip(b.iter())
        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
        .unzip();
    let common_months = xs.len();

    if common_months < MIN_COMMON_MONTHS {
        return YearSimilarity {
            common_months,
            correlation: None,
            p_value: None,
            score: 0.0,
        };
    }

    let correlation = pearson_correlation(&xs, &ys);
    let p_value = correlation.and_then(|r| pearson_p_value(r, common_months));
    let score = match (correlation, p_value) {
        (Some(r), Some(p)) if p < SIGNIFICANCE_LEVEL => r,
        _ => 0.0,
    };

    YearSimilarity {
        common_months,
        correlation,
        p_value,
        score,
    }
}
