//! Strategy fallback for medium gaps with sparse climatology.
//!
//! Three years, 2001 to 2003, with a five-day gap in June 2002. Around that
//! date 2001 only observes the gap's own span and 2003 observes nothing, so
//! the seasonal pool holds five samples and the climatological normal
//! fails. Whether the analogous fallback succeeds depends on how well 2001
//! correlates with 2002.

use approx::assert_relative_eq;
use chrono::{Datelike, NaiveDate};
use ombros_calendar::daily_sequence;
use ombros_fill::{
    FillConfig, FillPlan, GapBucket, GapDetail, PrecipSeries, Strategy, StrategyUsed, fill,
};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn within(d: NaiveDate, lo: NaiveDate, hi: NaiveDate) -> bool {
    lo <= d && d <= hi
}

fn sparse_history(pattern_2001: impl Fn(NaiveDate) -> f64) -> PrecipSeries {
    let dates = daily_sequence(ymd(2001, 1, 1), ymd(2003, 12, 31));
    let values = dates
        .iter()
        .map(|&d| match d.year() {
            2001 => {
                let hole = within(d, ymd(2001, 5, 20), ymd(2001, 7, 10))
                    && !within(d, ymd(2001, 6, 10), ymd(2001, 6, 14));
                (!hole).then(|| pattern_2001(d))
            }
            2002 => (!within(d, ymd(2002, 6, 10), ymd(2002, 6, 14))).then(|| d.month() as f64),
            _ => (!within(d, ymd(2003, 5, 20), ymd(2003, 7, 10))).then(|| d.month() as f64),
        })
        .collect();
    PrecipSeries::new(dates, values).unwrap()
}

fn june_2002_gap(details: &[GapDetail]) -> &GapDetail {
    details
        .iter()
        .find(|g| g.start_date == ymd(2002, 6, 10))
        .unwrap()
}

#[test]
fn falls_back_to_analogous_year() {
    let s = sparse_history(|d| 2.0 * d.month() as f64);
    let (filled, report) = fill(&s, &FillConfig::default()).unwrap();
    let r = report.completed().unwrap();

    let gap = june_2002_gap(&r.gap_details);
    assert_eq!(gap.length_days, 5);
    assert_eq!(gap.bucket, GapBucket::Medium);
    assert_eq!(
        gap.attempted,
        vec![Strategy::Climatological, Strategy::Analogous]
    );
    assert_eq!(gap.strategy, StrategyUsed::Analogous);
    assert!(gap.filled);

    let start = filled.index_of(ymd(2002, 6, 10)).unwrap();
    for v in &filled.values()[start..start + 5] {
        assert_relative_eq!(v.unwrap(), 12.0);
    }
}

#[test]
fn ends_unfilled_without_a_similar_year() {
    let s = sparse_history(|d| if d.month() % 2 == 0 { 3.0 } else { 1.0 });
    let (filled, report) = fill(&s, &FillConfig::default()).unwrap();
    let r = report.completed().unwrap();

    let gap = june_2002_gap(&r.gap_details);
    assert_eq!(
        gap.attempted,
        vec![Strategy::Climatological, Strategy::Analogous]
    );
    assert_eq!(gap.strategy, StrategyUsed::Unfilled);
    assert!(
        gap.reason
            .as_deref()
            .unwrap()
            .starts_with("no candidate year reaches similarity 0.7")
    );
    assert_eq!(filled.value_on(ymd(2002, 6, 12)), None);
}

#[test]
fn zero_threshold_never_accepts_a_zero_score() {
    // The alternating 2001 pattern correlates insignificantly with 2002 and
    // scores 0, so even a zero threshold must leave the gap unfilled.
    let s = sparse_history(|d| if d.month() % 2 == 0 { 3.0 } else { 1.0 });
    let config = FillConfig::new().with_min_similarity_threshold(0.0);
    let (filled, report) = fill(&s, &config).unwrap();
    let r = report.completed().unwrap();

    let gap = june_2002_gap(&r.gap_details);
    assert_ne!(gap.strategy, StrategyUsed::Analogous);
    assert!(!gap.filled);
    assert_eq!(
        gap.reason.as_deref(),
        Some("no candidate year reaches similarity 0 (best 0.000)")
    );
    assert_eq!(filled.value_on(ymd(2002, 6, 10)), None);
}

#[test]
fn overlong_gap_in_2003_is_reported() {
    let s = sparse_history(|d| 2.0 * d.month() as f64);
    let (_, report) = fill(&s, &FillConfig::default()).unwrap();
    let r = report.completed().unwrap();
    let gap = r
        .gap_details
        .iter()
        .find(|g| g.start_date == ymd(2003, 5, 20))
        .unwrap();
    assert_eq!(gap.length_days, 52);
    assert!(gap.attempted.is_empty());
    assert!(!gap.filled);
}

#[test]
fn lookups_ignore_values_imputed_earlier_in_the_run() {
    // Monthly ramp in every year. 2001-06-12 is a one-day gap that linear
    // interpolation fills before the 2002 gap is handled.
    let dates = daily_sequence(ymd(2000, 1, 1), ymd(2002, 12, 31));
    let values = dates
        .iter()
        .map(|&d| {
            let missing = d == ymd(2001, 6, 12) || within(d, ymd(2002, 6, 12), ymd(2002, 6, 16));
            (!missing).then(|| d.month() as f64)
        })
        .collect();
    let s = PrecipSeries::new(dates, values).unwrap();

    let config = FillConfig::new()
        .with_seasonal_window_days(0)
        .with_min_years_for_climatology(2)
        .with_plan(FillPlan::new().with_chain(GapBucket::Medium, vec![Strategy::Climatological]));
    let (filled, report) = fill(&s, &config).unwrap();
    let r = report.completed().unwrap();

    assert_eq!(filled.value_on(ymd(2001, 6, 12)), Some(6.0));
    let gap = r
        .gap_details
        .iter()
        .find(|g| g.start_date == ymd(2002, 6, 12))
        .unwrap();
    assert!(!gap.filled);
    assert_eq!(
        gap.reason.as_deref(),
        Some("only 1 climatology samples for 2002-06-12, need at least 2")
    );
}
