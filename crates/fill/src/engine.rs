//! The fill pipeline: locate, resolve, validate, report.

use tracing::{debug, info, info_span, warn};

use crate::config::FillConfig;
use crate::error::FillError;
use crate::gap::locate_gaps;
use crate::quality::{DataQuality, validate_fill};
use crate::report::{FillStatistics, FillingReport, ReportInputs, build_report};
use crate::series::PrecipSeries;
use crate::strategy::resolve_gap;
use crate::yearly::analyze_years;

/// Fills the missing entries of `series` and reports how each gap was handled.
///
/// All strategies read from `series` as given; imputed values are written
/// to a separate output and never feed later gaps. Gaps that cannot be
/// filled stay missing and are explained in the report.
///
/// # Errors
///
/// Returns [`FillError::InvalidConfig`] if `config` fails validation, or
/// [`FillError::EmptySeries`] for an empty series.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use ombros_fill::{FillConfig, FillingReport, PrecipSeries, fill};
///
/// let d = |day| NaiveDate::from_ymd_opt(2020, 1, day).unwrap();
/// let series = PrecipSeries::new(
///     vec![d(4), d(5), d(6)],
///     vec![Some(2.0), None, Some(6.0)],
/// )?;
/// let (filled, report) = fill(&series, &FillConfig::default())?;
/// assert_eq!(filled.values()[1], Some(4.0));
/// assert!(matches!(report, FillingReport::Completed(_)));
/// # Ok::<(), ombros_fill::FillError>(())
/// ```
pub fn fill(
    series: &PrecipSeries,
    config: &FillConfig,
) -> Result<(PrecipSeries, FillingReport), FillError> {
    let _span = info_span!("fill", days = series.len()).entered();
    config.validate()?;
    if series.is_empty() {
        return Err(FillError::EmptySeries);
    }

    let original_missing = series.missing_count();
    if original_missing == 0 {
        info!("no missing data");
        return Ok((series.clone(), FillingReport::NoMissingData));
    }

    let gaps = locate_gaps(series);
    info!(missing = original_missing, gaps = gaps.len(), "located gaps");

    let mut output = series.values().to_vec();
    let mut statistics = FillStatistics::default();
    let mut outcomes = Vec::with_capacity(gaps.len());

    for gap in &gaps {
        let (outcome, values) = resolve_gap(series, gap, config);
        match values {
            Some(values) => {
                debug!(
                    start = %gap.start_date(),
                    length = gap.length(),
                    strategy = ?outcome.strategy_used,
                    "gap filled"
                );
                for (slot, v) in output[gap.start_index()..=gap.end_index()]
                    .iter_mut()
                    .zip(values)
                {
                    *slot = Some(v.max(0.0));
                }
            }
            None => {
                if let Some(reason) = &outcome.reason {
                    warn!(start = %gap.start_date(), length = gap.length(), %reason, "gap left unfilled");
                }
            }
        }
        statistics.record(&outcome);
        outcomes.push(outcome);
    }

    let filled = PrecipSeries::from_parts_unchecked(series.dates().to_vec(), output);
    let filled_values = filled.observed();
    let validation = validate_fill(&series.observed(), &filled_values);
    if !validation.quality_good {
        warn!(
            mean_change = validation.mean_change,
            std_change = validation.std_change,
            "filled series drifted from the original"
        );
    }

    let final_missing = filled.missing_count();
    info!(
        filled = original_missing - final_missing,
        unfilled_gaps = statistics.unfilled_gaps,
        "fill complete"
    );

    let report = build_report(ReportInputs {
        original_missing,
        final_missing,
        outcomes: &outcomes,
        statistics,
        yearly: analyze_years(series),
        validation,
        quality: DataQuality::from_values(&filled_values),
    });

    Ok((filled, FillingReport::Completed(Box::new(report))))
}
