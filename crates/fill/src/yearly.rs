//! Per-year missing-data analysis.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::series::PrecipSeries;

/// Years with more missing days than this are flagged as significant.
pub const SIGNIFICANT_MISSING_DAYS: usize = 90;

/// Missing-data figures for one calendar year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearGaps {
    pub total_missing_days: usize,
    pub max_consecutive_missing: usize,
    pub total_days_in_year: usize,
    /// Percentage rounded to one decimal.
    pub percent_missing: f64,
}

/// Summary over all years.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearlySummary {
    pub total_years_analyzed: usize,
    pub years_with_significant_gaps: usize,
    pub avg_missing_days_per_year: f64,
    pub max_missing_days_any_year: usize,
    pub max_consecutive_missing_any_year: usize,
    pub years_with_no_gaps: usize,
}

/// Yearly gap analysis section of the report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearlyAnalysis {
    pub summary_statistics: YearlySummary,
    pub years_with_significant_gaps: BTreeMap<i32, YearGaps>,
    pub notes: Vec<String>,
}

impl YearlyAnalysis {
    /// Significant years ordered by percent missing, worst first.
    pub fn worst_years(&self) -> Vec<(i32, f64)> {
        let mut years: Vec<(i32, f64)> = self
            .years_with_significant_gaps
            .iter()
            .map(|(&y, g)| (y, g.percent_missing))
            .collect();
        years.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        years
    }
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

fn year_gaps(values: &[Option<f64>]) -> YearGaps {
    let mut missing = 0;
    let mut run = 0;
    let mut longest = 0;
    for v in values {
        if v.is_none() {
            missing += 1;
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }
    YearGaps {
        total_missing_days: missing,
        max_consecutive_missing: longest,
        total_days_in_year: values.len(),
        percent_missing: round1(missing as f64 / values.len().max(1) as f64 * 100.0),
    }
}

/// Analyses missing days per calendar year of `series`.
///
/// Consecutive runs are counted within a year; a gap spanning New Year
/// contributes to both years separately.
pub fn analyze_years(series: &PrecipSeries) -> YearlyAnalysis {
    let per_year: Vec<(i32, YearGaps)> = series
        .years()
        .into_iter()
        .map(|y| (y, year_gaps(&series.values()[series.year_range(y)])))
        .collect();

    let n = per_year.len();
    let total_missing: usize = per_year.iter().map(|(_, g)| g.total_missing_days).sum();
    let significant: BTreeMap<i32, YearGaps> = per_year
        .iter()
        .filter(|(_, g)| g.total_missing_days > SIGNIFICANT_MISSING_DAYS)
        .map(|(y, g)| (*y, g.clone()))
        .collect();

    let summary_statistics = YearlySummary {
        total_years_analyzed: n,
        years_with_significant_gaps: significant.len(),
        avg_missing_days_per_year: if n == 0 {
            0.0
        } else {
            round1(total_missing as f64 / n as f64)
        },
        max_missing_days_any_year: per_year
            .iter()
            .map(|(_, g)| g.total_missing_days)
            .max()
            .unwrap_or(0),
        max_consecutive_missing_any_year: per_year
            .iter()
            .map(|(_, g)| g.max_consecutive_missing)
            .max()
            .unwrap_or(0),
        years_with_no_gaps: per_year
            .iter()
            .filter(|(_, g)| g.total_missing_days == 0)
            .count(),
    };

    YearlyAnalysis {
        summary_statistics,
        years_with_significant_gaps: significant,
        notes: vec![
            format!("Only years with >{SIGNIFICANT_MISSING_DAYS} missing days are listed as significant"),
            "Years with extensive gaps may not be suitable for statistical modeling".to_string(),
            "Consider the impact of filled data on downstream precipitation statistics".to_string(),
        ],
    }
}
