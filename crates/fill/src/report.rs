//! Structured filling report.

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::FillError;
use crate::gap::{GapBucket, MEDIUM_MAX_DAYS};
use crate::quality::{DataQuality, ValidationResult};
use crate::strategy::{GapOutcome, Strategy, StrategyUsed};
use crate::yearly::{SIGNIFICANT_MISSING_DAYS, YearlyAnalysis};

/// Per-strategy counters accumulated over one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FillStatistics {
    pub linear_interpolation: usize,
    pub climatological_normal: usize,
    pub analogous_year: usize,
    pub unfilled_gaps: usize,
    pub total_days_filled: usize,
}

impl FillStatistics {
    /// Counts one gap outcome.
    pub fn record(&mut self, outcome: &GapOutcome) {
        match outcome.strategy_used {
            StrategyUsed::Linear => self.linear_interpolation += 1,
            StrategyUsed::Climatological => self.climatological_normal += 1,
            StrategyUsed::Analogous => self.analogous_year += 1,
            StrategyUsed::Unfilled => self.unfilled_gaps += 1,
        }
        if outcome.success {
            self.total_days_filled += outcome.gap.length();
        }
    }
}

/// Headline counts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FillSummary {
    pub original_missing_values: usize,
    pub final_missing_values: usize,
    pub values_filled: usize,
    /// Percentage of originally missing values now filled.
    pub fill_success_rate: f64,
    pub total_gaps_identified: usize,
    pub gaps_filled: usize,
}

/// One row of the per-gap table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GapDetail {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub length_days: usize,
    pub bucket: GapBucket,
    pub strategy: StrategyUsed,
    pub filled: bool,
    pub attempted: Vec<Strategy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl From<&GapOutcome> for GapDetail {
    fn from(o: &GapOutcome) -> Self {
        Self {
            start_date: o.gap.start_date(),
            end_date: o.gap.end_date(),
            length_days: o.gap.length(),
            bucket: o.gap.bucket(),
            strategy: o.strategy_used,
            filled: o.success,
            attempted: o.attempted.clone(),
            reason: o.reason.as_ref().map(ToString::to_string),
        }
    }
}

/// Full report of a run that had missing data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletedReport {
    pub summary: FillSummary,
    pub methods_used: FillStatistics,
    pub gap_details: Vec<GapDetail>,
    pub yearly_analysis: YearlyAnalysis,
    pub validation_results: ValidationResult,
    pub data_quality: DataQuality,
    pub recommendations: Vec<String>,
}

/// Report returned by [`fill`](crate::fill).
///
/// Serialises with a `status` tag: `"no_missing_data"` on its own, or
/// `"completed"` alongside every section of [`CompletedReport`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FillingReport {
    NoMissingData,
    Completed(Box<CompletedReport>),
}

impl FillingReport {
    /// Returns the full report, if the run had anything to fill.
    pub fn completed(&self) -> Option<&CompletedReport> {
        match self {
            FillingReport::NoMissingData => None,
            FillingReport::Completed(r) => Some(r),
        }
    }

    /// Serialises to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, FillError> {
        serde_json::to_string_pretty(self).map_err(|e| FillError::Serialization {
            reason: e.to_string(),
        })
    }
}

pub(crate) struct ReportInputs<'a> {
    pub original_missing: usize,
    pub final_missing: usize,
    pub outcomes: &'a [GapOutcome],
    pub statistics: FillStatistics,
    pub yearly: YearlyAnalysis,
    pub validation: ValidationResult,
    pub quality: DataQuality,
}

pub(crate) fn build_report(inputs: ReportInputs<'_>) -> CompletedReport {
    let ReportInputs {
        original_missing,
        final_missing,
        outcomes,
        statistics,
        yearly,
        validation,
        quality,
    } = inputs;

    let values_filled = original_missing.saturating_sub(final_missing);
    let summary = FillSummary {
        original_missing_values: original_missing,
        final_missing_values: final_missing,
        values_filled,
        fill_success_rate: if original_missing == 0 {
            100.0
        } else {
            values_filled as f64 / original_missing as f64 * 100.0
        },
        total_gaps_identified: outcomes.len(),
        gaps_filled: outcomes.len() - statistics.unfilled_gaps,
    };
    let gap_details: Vec<GapDetail> = outcomes.iter().map(GapDetail::from).collect();
    let recommendations = recommend(&validation, &gap_details, &statistics, &yearly);

    CompletedReport {
        summary,
        methods_used: statistics,
        gap_details,
        yearly_analysis: yearly,
        validation_results: validation,
        data_quality: quality,
        recommendations,
    }
}

const SUCCESS_MESSAGE: &str = "Data filling completed successfully";

fn recommend(
    validation: &ValidationResult,
    gaps: &[GapDetail],
    stats: &FillStatistics,
    yearly: &YearlyAnalysis,
) -> Vec<String> {
    let mut out = Vec::new();

    if !validation.quality_good {
        out.push(
            "Review filled data quality: statistical properties may have changed significantly"
                .to_string(),
        );
    }
    if validation.negative_count > 0 {
        out.push(format!(
            "{} values are negative: review the filling method",
            validation.negative_count
        ));
    }
    if validation.extreme_count > 0 {
        out.push(format!(
            "{} values appear extreme: consider additional quality control",
            validation.extreme_count
        ));
    }

    let long = gaps.iter().filter(|g| g.length_days > MEDIUM_MAX_DAYS).count();
    if long > 0 {
        out.push(format!(
            "Found {long} gaps longer than {MEDIUM_MAX_DAYS} days: filled values may be less reliable there"
        ));
    }
    if stats.unfilled_gaps > 0 {
        out.push(format!(
            "{} gaps could not be filled: see gap_details for the reason of each",
            stats.unfilled_gaps
        ));
    }

    let worst = yearly.worst_years();
    if !worst.is_empty() {
        out.push(format!(
            "{} years have more than {SIGNIFICANT_MISSING_DAYS} missing days: use them with caution for statistical modeling",
            worst.len()
        ));
        let listed: Vec<String> = worst
            .iter()
            .take(3)
            .map(|(y, pct)| format!("{y} ({pct}% missing)"))
            .collect();
        out.push(format!("Years with highest missing data: {}", listed.join(", ")));
    }

    if out.is_empty() {
        out.push(SUCCESS_MESSAGE.to_string());
    }
    out
}
