//! Climatological normals for medium-length gaps.

use chrono::{Datelike, NaiveDate};
use ombros_calendar::{align_to_year, seasonal_window};
use ombros_stats::{median, sorted};

use crate::config::FillConfig;
use crate::error::Unresolved;
use crate::gap::Gap;
use crate::series::PrecipSeries;

/// Collects the valid observations within the seasonal window around
/// `date`'s calendar position in every other year of `reference`.
pub fn seasonal_pool(reference: &PrecipSeries, date: NaiveDate, half_width: u32) -> Vec<f64> {
    let values = reference.values();
    let mut pool = Vec::new();

    for year in reference.years() {
        if year == date.year() {
            continue;
        }
        let Ok(center) = align_to_year(date, year) else {
            continue;
        };
        let (lo, hi) = seasonal_window(center, half_width);
        pool.extend(reference.range(lo, hi).filter_map(|i| values[i]));
    }

    pool
}

/// Fills every day of `gap` with the median of its seasonal pool.
///
/// Each day is estimated on its own. The minimum pool size is
/// `min_years_for_climatology`, counted in observations rather than
/// distinct years.
///
/// # Errors
///
/// Returns [`Unresolved::InsufficientClimatology`] for the first day whose
/// pool is too small; no values are produced for the gap in that case.
pub fn climatological_normal(
    reference: &PrecipSeries,
    gap: &Gap,
    config: &FillConfig,
) -> Result<Vec<f64>, Unresolved> {
    let required = config.min_years_for_climatology().max(1);
    let dates = &reference.dates()[gap.start_index()..=gap.end_index()];

    dates
        .iter()
        .map(|&date| {
            let pool = seasonal_pool(reference, date, config.seasonal_window_days());
            if pool.len() < required {
                return Err(Unresolved::InsufficientClimatology {
                    date,
                    pooled: pool.len(),
                    required,
                });
            }
            Ok(median(&sorted(&pool)).max(0.0))
        })
        .collect()
}
