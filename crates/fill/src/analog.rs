//! Analogous-year donation for long gaps.
//!
//! A donor year must observe the gap's calendar span completely, and must
//! resemble the gap year closely enough (see [`crate::similarity`]). Values
//! are then copied day by day, aligned by day-of-year.

use chrono::{Datelike, NaiveDate};
use ombros_calendar::{align_to_year, probe_offsets, shift_days};
use tracing::debug;

use crate::config::FillConfig;
use crate::error::Unresolved;
use crate::gap::Gap;
use crate::series::PrecipSeries;
use crate::similarity::year_similarity;

/// Days either side of the aligned date probed when it has no value.
pub const PROBE_RADIUS: u32 = 2;

/// The chosen donor year and its similarity score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Donor {
    pub year: i32,
    pub score: f64,
}

/// Years other than the gap year whose equivalent span is fully observed.
///
/// The equivalent span starts at the gap start's day-of-year in the
/// candidate year and runs for `gap.length()` calendar days. It must
/// contain exactly that many observations, all valid.
pub fn candidate_years(reference: &PrecipSeries, gap: &Gap) -> Vec<i32> {
    let gap_year = gap.start_date().year();
    let values = reference.values();
    let span = gap.length() as i64 - 1;

    reference
        .years()
        .into_iter()
        .filter(|&year| year != gap_year)
        .filter(|&year| {
            let Ok(start) = align_to_year(gap.start_date(), year) else {
                return false;
            };
            let Some(end) = shift_days(start, span) else {
                return false;
            };
            let range = reference.range(start, end);
            range.len() == gap.length() && range.into_iter().all(|i| values[i].is_some())
        })
        .collect()
}

/// Picks the most similar candidate whose score reaches `threshold`.
///
/// Ties go to the earliest year. A score of zero never qualifies, whatever
/// the threshold: it marks too few shared months or an insignificant
/// correlation.
///
/// # Errors
///
/// Returns [`Unresolved::NoCandidateYear`] if `candidates` is empty and
/// [`Unresolved::NoSimilarYear`] if no score reaches `threshold`.
pub fn select_donor(
    reference: &PrecipSeries,
    gap_year: i32,
    candidates: &[i32],
    threshold: f64,
) -> Result<Donor, Unresolved> {
    let mut best: Option<Donor> = None;
    for &year in candidates {
        let score = year_similarity(reference, gap_year, year).score;
        debug!(gap_year, candidate = year, score, "scored candidate year");
        if best.is_none_or(|b| score > b.score) {
            best = Some(Donor { year, score });
        }
    }

    match best {
        None => Err(Unresolved::NoCandidateYear),
        Some(donor) if donor.score > 0.0 && donor.score >= threshold => Ok(donor),
        Some(donor) => Err(Unresolved::NoSimilarYear {
            best: donor.score,
            threshold,
        }),
    }
}

/// Copies donor values into the gap, one aligned day at a time.
///
/// Each gap day maps to the same day-of-year in the donor year (advanced by
/// however many years the gap has crossed). When that date has no value,
/// offsets `-1, +1, -2, +2` are tried in order.
///
/// # Errors
///
/// Returns [`Unresolved::UnresolvedDonorDay`] for the first day with no
/// donor value within [`PROBE_RADIUS`] days.
pub fn transfer(reference: &PrecipSeries, gap: &Gap, donor_year: i32) -> Result<Vec<f64>, Unresolved> {
    let gap_year = gap.start_date().year();
    let offsets = probe_offsets(PROBE_RADIUS);
    let dates = &reference.dates()[gap.start_index()..=gap.end_index()];

    dates
        .iter()
        .map(|&date| {
            let unresolved = Unresolved::UnresolvedDonorDay { date, donor_year };
            let target_year = donor_year + (date.year() - gap_year);
            let aligned = align_to_year(date, target_year).map_err(|_| unresolved.clone())?;
            donor_value(reference, aligned, &offsets).ok_or(unresolved)
        })
        .collect()
}

fn donor_value(reference: &PrecipSeries, aligned: NaiveDate, offsets: &[i64]) -> Option<f64> {
    reference.value_on(aligned).or_else(|| {
        offsets
            .iter()
            .filter_map(|&k| shift_days(aligned, k))
            .find_map(|d| reference.value_on(d))
    })
}

/// Fills `gap` from the most similar fully observed year.
///
/// # Errors
///
/// Propagates the [`Unresolved`] reason from candidate selection or value
/// transfer.
pub fn analogous_year(
    reference: &PrecipSeries,
    gap: &Gap,
    config: &FillConfig,
) -> Result<Vec<f64>, Unresolved> {
    let candidates = candidate_years(reference, gap);
    debug!(n = candidates.len(), "candidate donor years");
    let donor = select_donor(
        reference,
        gap.start_date().year(),
        &candidates,
        config.min_similarity_threshold(),
    )?;
    debug!(year = donor.year, score = donor.score, "selected donor year");
    transfer(reference, gap, donor.year)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gap::locate_gaps;
    use ombros_calendar::daily_sequence;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Years 2001..=2003 (no leap years) with a monthly ramp scaled per year.
    /// The values in `missing` are blanked.
    fn ramp(missing: &[(NaiveDate, NaiveDate)]) -> PrecipSeries {
        let dates = daily_sequence(ymd(2001, 1, 1), ymd(2003, 12, 31));
        let values = dates
            .iter()
            .map(|d| {
                if missing.iter().any(|(lo, hi)| (*lo..=*hi).contains(d)) {
                    None
                } else {
                    let scale = f64::from(d.year() - 2000);
                    Some(f64::from(d.month()) * scale + f64::from(d.day()) * 0.01)
                }
            })
            .collect();
        PrecipSeries::new(dates, values).unwrap()
    }

    #[test]
    fn candidates_require_full_span() {
        let s = ramp(&[
            (ymd(2002, 3, 1), ymd(2002, 3, 10)),
            (ymd(2003, 3, 5), ymd(2003, 3, 5)),
        ]);
        let gap = locate_gaps(&s)[0];
        assert_eq!(gap.length(), 10);
        // 2003 has a hole on March 5.
        assert_eq!(candidate_years(&s, &gap), vec![2001]);
    }

    #[test]
    fn candidates_need_span_inside_series() {
        // The gap crosses into 2003. The 2001 span runs into January 2002
        // and is observed; the 2003 span would run past the end of the data.
        let s = ramp(&[(ymd(2002, 12, 28), ymd(2003, 1, 3))]);
        let gap = locate_gaps(&s)[0];
        assert_eq!(gap.length(), 7);
        assert_eq!(candidate_years(&s, &gap), vec![2001]);
    }

    #[test]
    fn select_donor_picks_highest_score() {
        let s = ramp(&[(ymd(2002, 6, 1), ymd(2002, 6, 12))]);
        let gap = locate_gaps(&s)[0];
        let candidates = candidate_years(&s, &gap);
        let donor = select_donor(&s, 2002, &candidates, 0.7).unwrap();
        assert!(donor.score >= 0.7);
        assert!(candidates.contains(&donor.year));
    }

    #[test]
    fn select_donor_empty_candidates() {
        let s = ramp(&[]);
        assert_eq!(
            select_donor(&s, 2002, &[], 0.7),
            Err(Unresolved::NoCandidateYear)
        );
    }

    #[test]
    fn select_donor_threshold_not_met() {
        let s = ramp(&[(ymd(2002, 6, 1), ymd(2002, 6, 12))]);
        let err = select_donor(&s, 2002, &[2001, 2003], 1.5).unwrap_err();
        assert!(matches!(err, Unresolved::NoSimilarYear { threshold, .. } if threshold == 1.5));
    }

    #[test]
    fn select_donor_rejects_zero_score_at_zero_threshold() {
        // 2001 only shares January to March with 2002.
        let s = ramp(&[
            (ymd(2001, 4, 1), ymd(2001, 12, 31)),
            (ymd(2003, 1, 1), ymd(2003, 12, 31)),
        ]);
        let err = select_donor(&s, 2002, &[2001], 0.0).unwrap_err();
        assert!(matches!(err, Unresolved::NoSimilarYear { best, .. } if best == 0.0));
    }

    #[test]
    fn transfer_copies_aligned_values() {
        let s = ramp(&[(ymd(2002, 6, 1), ymd(2002, 6, 12))]);
        let gap = locate_gaps(&s)[0];
        let filled = transfer(&s, &gap, 2001).unwrap();
        assert_eq!(filled.len(), 12);
        assert_eq!(Some(filled[0]), s.value_on(ymd(2001, 6, 1)));
        assert_eq!(Some(filled[11]), s.value_on(ymd(2001, 6, 12)));
    }

    #[test]
    fn transfer_probes_nearby_days() {
        let s = ramp(&[
            (ymd(2002, 6, 1), ymd(2002, 6, 12)),
            (ymd(2001, 6, 5), ymd(2001, 6, 5)),
        ]);
        let gap = locate_gaps(&s)[1];
        assert_eq!(gap.start_date(), ymd(2002, 6, 1));
        let filled = transfer(&s, &gap, 2001).unwrap();
        // June 5 2001 is missing; June 4 is probed first.
        assert_eq!(Some(filled[4]), s.value_on(ymd(2001, 6, 4)));
    }

    #[test]
    fn transfer_reports_unresolved_day() {
        let s = ramp(&[
            (ymd(2002, 6, 1), ymd(2002, 6, 12)),
            (ymd(2001, 6, 1), ymd(2001, 6, 10)),
        ]);
        let gap = locate_gaps(&s)[1];
        // June 1 and 2 reach May 31 by probing; June 3 has nothing within
        // two days.
        assert_eq!(
            transfer(&s, &gap, 2001),
            Err(Unresolved::UnresolvedDonorDay {
                date: ymd(2002, 6, 3),
                donor_year: 2001,
            })
        );
    }
}
