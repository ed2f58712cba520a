//! End-to-end tests for `ombros_fill::fill`.

use approx::assert_relative_eq;
use chrono::{Datelike, NaiveDate};
use ombros_calendar::daily_sequence;
use ombros_fill::{
    FillConfig, FillPlan, FillingReport, GapBucket, PrecipSeries, Strategy, StrategyUsed, fill,
};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn series_from(start: NaiveDate, values: Vec<Option<f64>>) -> PrecipSeries {
    let end = start + chrono::Days::new(values.len() as u64 - 1);
    PrecipSeries::new(daily_sequence(start, end), values).unwrap()
}

/// Deterministic wet/dry pattern over several years with assorted gaps.
fn patchy_series() -> PrecipSeries {
    let dates = daily_sequence(ymd(2000, 1, 1), ymd(2009, 12, 31));
    let missing = |i: usize| {
        matches!(i % 97, 40 | 41)
            || (i % 211 >= 100 && i % 211 < 105)
            || (i % 503 >= 300 && i % 503 < 312)
    };
    let values = (0..dates.len())
        .map(|i| {
            if missing(i) {
                None
            } else {
                let month = dates[i].month() as f64;
                Some(((i * 7919) % 13) as f64 * 0.5 * month / 6.0)
            }
        })
        .collect();
    PrecipSeries::new(dates, values).unwrap()
}

#[test]
fn single_day_linear_example() {
    let s = series_from(ymd(2020, 1, 4), vec![Some(2.0), None, Some(6.0)]);
    let (filled, report) = fill(&s, &FillConfig::default()).unwrap();
    assert_relative_eq!(filled.values()[1].unwrap(), 4.0);

    let r = report.completed().unwrap();
    assert_eq!(r.methods_used.linear_interpolation, 1);
    assert_eq!(r.methods_used.total_days_filled, 1);
    assert_eq!(r.summary.final_missing_values, 0);
    assert_relative_eq!(r.summary.fill_success_rate, 100.0);
    assert_eq!(r.gap_details[0].start_date, ymd(2020, 1, 5));
}

#[test]
fn leading_gap_remains_unfilled() {
    let s = series_from(ymd(2020, 1, 1), vec![None, Some(1.0), Some(2.0)]);
    let (filled, report) = fill(&s, &FillConfig::default()).unwrap();
    assert_eq!(filled.values()[0], None);

    let r = report.completed().unwrap();
    assert_eq!(r.methods_used.unfilled_gaps, 1);
    assert_eq!(r.gap_details[0].strategy, StrategyUsed::Unfilled);
    assert!(!r.gap_details[0].filled);
    assert!(
        r.recommendations
            .iter()
            .any(|m| m.contains("could not be filled"))
    );
}

#[test]
fn leading_gap_unfilled_in_every_bucket() {
    for len in [1, 4, 10] {
        let mut values = vec![None; len];
        values.extend([Some(1.0); 30]);
        let s = series_from(ymd(2020, 1, 1), values);
        let (filled, _) = fill(&s, &FillConfig::default()).unwrap();
        assert_eq!(filled.missing_count(), len, "length {len}");
    }
}

#[test]
fn no_missing_data_is_unchanged() {
    let s = series_from(ymd(2020, 1, 1), vec![Some(0.0), Some(1.5), Some(3.0)]);
    let (filled, report) = fill(&s, &FillConfig::default()).unwrap();
    assert_eq!(filled, s);
    assert_eq!(report, FillingReport::NoMissingData);
}

#[test]
fn second_fill_is_a_no_op() {
    let s = series_from(
        ymd(2020, 3, 1),
        vec![Some(1.0), None, None, Some(4.0), Some(0.0), None, Some(2.0)],
    );
    let (once, _) = fill(&s, &FillConfig::default()).unwrap();
    assert_eq!(once.missing_count(), 0);

    let (twice, report) = fill(&once, &FillConfig::default()).unwrap();
    assert_eq!(twice, once);
    assert_eq!(report, FillingReport::NoMissingData);
}

#[test]
fn short_gap_values_stay_between_neighbours() {
    let s = series_from(ymd(2020, 1, 1), vec![Some(9.0), None, None, Some(3.0)]);
    let (filled, _) = fill(&s, &FillConfig::default()).unwrap();
    for v in &filled.values()[1..3] {
        let v = v.unwrap();
        assert!((3.0..=9.0).contains(&v), "{v}");
    }
}

#[test]
fn filled_values_are_never_negative_and_observed_values_untouched() {
    let s = patchy_series();
    let (filled, report) = fill(&s, &FillConfig::default()).unwrap();

    for (before, after) in s.values().iter().zip(filled.values()) {
        if let Some(v) = after {
            assert!(*v >= 0.0);
        }
        if before.is_some() {
            assert_eq!(before, after);
        }
    }

    let r = report.completed().unwrap();
    let m = &r.methods_used;
    // Every filling method contributes on this fixture.
    assert!(m.linear_interpolation > 0);
    assert!(m.climatological_normal > 0 && m.analogous_year > 0);
    assert_eq!(
        m.linear_interpolation + m.climatological_normal + m.analogous_year + m.unfilled_gaps,
        r.summary.total_gaps_identified
    );
    assert_eq!(
        r.summary.values_filled,
        s.missing_count() - filled.missing_count()
    );
}

#[test]
fn buckets_follow_gap_length() {
    let (_, report) = fill(&patchy_series(), &FillConfig::default()).unwrap();
    for g in &report.completed().unwrap().gap_details {
        assert_eq!(g.bucket, GapBucket::from_length(g.length_days));
    }
}

#[test]
fn gaps_longer_than_maximum_are_skipped() {
    let mut values = vec![Some(1.0); 5];
    values.extend([None; 4]);
    values.extend([Some(1.0); 5]);
    let s = series_from(ymd(2020, 1, 1), values);
    let config = FillConfig::new().with_max_fill_gap_days(3);
    let (filled, report) = fill(&s, &config).unwrap();
    assert_eq!(filled.missing_count(), 4);

    let detail = &report.completed().unwrap().gap_details[0];
    assert!(detail.attempted.is_empty());
    assert_eq!(
        detail.reason.as_deref(),
        Some("gap of 4 days exceeds the maximum fill length of 3 days")
    );
}

#[test]
fn invalid_config_is_an_error() {
    let s = series_from(ymd(2020, 1, 1), vec![Some(1.0), None, Some(1.0)]);
    let config = FillConfig::new().with_min_similarity_threshold(2.0);
    assert!(fill(&s, &config).is_err());
}

#[test]
fn custom_plan_is_honoured() {
    let s = series_from(
        ymd(2020, 1, 1),
        vec![Some(0.0), None, None, None, None, Some(5.0)],
    );
    let plan = FillPlan::new().with_chain(GapBucket::Medium, vec![Strategy::Linear]);
    let (filled, report) = fill(&s, &FillConfig::new().with_plan(plan)).unwrap();
    let got: Vec<f64> = filled.values().iter().map(|v| v.unwrap()).collect();
    for (g, e) in got.iter().zip([0.0, 1.0, 2.0, 3.0, 4.0, 5.0]) {
        assert_relative_eq!(*g, e, epsilon = 1e-12);
    }
    let detail = &report.completed().unwrap().gap_details[0];
    assert_eq!(detail.attempted, vec![Strategy::Linear]);
}

#[test]
fn report_json_shape() {
    let s = series_from(ymd(2020, 1, 4), vec![Some(2.0), None, Some(6.0)]);
    let (_, report) = fill(&s, &FillConfig::default()).unwrap();
    let v: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

    assert_eq!(v["status"], "completed");
    for key in [
        "summary",
        "methods_used",
        "gap_details",
        "yearly_analysis",
        "validation_results",
        "data_quality",
        "recommendations",
    ] {
        assert!(v.get(key).is_some(), "missing {key}");
    }
    for key in [
        "linear_interpolation",
        "climatological_normal",
        "analogous_year",
        "unfilled_gaps",
        "total_days_filled",
    ] {
        assert!(v["methods_used"].get(key).is_some(), "missing {key}");
    }
    let gap = &v["gap_details"][0];
    assert_eq!(gap["start_date"], "2020-01-05");
    assert_eq!(gap["end_date"], "2020-01-05");
    assert_eq!(gap["length_days"], 1);
    assert_eq!(gap["strategy"], "linear");
    assert_eq!(v["validation_results"]["negative_count"], 0);
}
