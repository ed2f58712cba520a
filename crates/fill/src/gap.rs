//! Gap location: maximal runs of missing observations.

use chrono::NaiveDate;
use serde::Serialize;

use crate::series::PrecipSeries;

/// A maximal contiguous run of missing observations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gap {
    start_index: usize,
    end_index: usize,
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl Gap {
    pub(crate) fn new(
        start_index: usize,
        end_index: usize,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        debug_assert!(start_index <= end_index);
        Self {
            start_index,
            end_index,
            start_date,
            end_date,
        }
    }

    /// Index of the first missing day.
    pub fn start_index(&self) -> usize {
        self.start_index
    }

    /// Index of the last missing day (inclusive).
    pub fn end_index(&self) -> usize {
        self.end_index
    }

    /// Date of the first missing day.
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Date of the last missing day.
    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// Number of missing entries in the run.
    pub fn length(&self) -> usize {
        self.end_index - self.start_index + 1
    }

    /// Length bucket that selects the fill strategy chain.
    pub fn bucket(&self) -> GapBucket {
        GapBucket::from_length(self.length())
    }
}

/// Longest gap, in days, classed as [`GapBucket::Short`].
pub const SHORT_MAX_DAYS: usize = 2;
/// Longest gap, in days, classed as [`GapBucket::Medium`].
pub const MEDIUM_MAX_DAYS: usize = 7;

/// Gap length class.
///
/// | Bucket | Length |
/// |--------|--------|
/// | `Short` | 1–2 days |
/// | `Medium` | 3–7 days |
/// | `Long` | 8+ days |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GapBucket {
    Short,
    Medium,
    Long,
}

impl GapBucket {
    /// All buckets in ascending length order.
    pub const ALL: [GapBucket; 3] = [GapBucket::Short, GapBucket::Medium, GapBucket::Long];

    /// Classifies a gap length. A zero length is treated as `Short`.
    pub fn from_length(length: usize) -> Self {
        if length <= SHORT_MAX_DAYS {
            GapBucket::Short
        } else if length <= MEDIUM_MAX_DAYS {
            GapBucket::Medium
        } else {
            GapBucket::Long
        }
    }
}

/// Scans the missing mask and returns every maximal missing run in order.
///
/// A run that reaches the last record is still reported; a single
/// observed day always separates two runs.
pub fn locate_gaps(series: &PrecipSeries) -> Vec<Gap> {
    let dates = series.dates();
    let mut gaps = Vec::new();
    let mut run_start: Option<usize> = None;

    for (i, value) in series.values().iter().enumerate() {
        match (value.is_none(), run_start) {
            (true, None) => run_start = Some(i),
            (false, Some(start)) => {
                gaps.push(Gap::new(start, i - 1, dates[start], dates[i - 1]));
                run_start = None;
            }
            _ => {}
        }
    }

    if let Some(start) = run_start {
        let end = series.len() - 1;
        gaps.push(Gap::new(start, end, dates[start], dates[end]));
    }

    gaps
}

#[cfg(test)]
mod tests {
    use super::*;
    use ombros_calendar::daily_sequence;

    fn series(values: Vec<Option<f64>>) -> PrecipSeries {
        let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let end = start + chrono::Days::new(values.len() as u64 - 1);
        PrecipSeries::new(daily_sequence(start, end), values).unwrap()
    }

    #[test]
    fn no_gaps() {
        assert!(locate_gaps(&series(vec![Some(0.0), Some(1.0)])).is_empty());
    }

    #[test]
    fn interior_gap() {
        let gaps = locate_gaps(&series(vec![Some(1.0), None, None, Some(2.0)]));
        assert_eq!(gaps.len(), 1);
        let g = gaps[0];
        assert_eq!((g.start_index(), g.end_index(), g.length()), (1, 2, 2));
        assert_eq!(g.start_date(), NaiveDate::from_ymd_opt(2020, 1, 2).unwrap());
        assert_eq!(g.end_date(), NaiveDate::from_ymd_opt(2020, 1, 3).unwrap());
    }

    #[test]
    fn leading_and_trailing_gaps() {
        let gaps = locate_gaps(&series(vec![None, Some(1.0), Some(2.0), None, None]));
        assert_eq!(gaps.len(), 2);
        assert_eq!((gaps[0].start_index(), gaps[0].end_index()), (0, 0));
        assert_eq!((gaps[1].start_index(), gaps[1].end_index()), (3, 4));
    }

    #[test]
    fn single_observation_separates_runs() {
        let gaps = locate_gaps(&series(vec![None, None, Some(0.0), None]));
        assert_eq!(gaps.len(), 2);
        assert_eq!(gaps[0].length(), 2);
        assert_eq!(gaps[1].length(), 1);
    }

    #[test]
    fn all_missing_is_one_gap() {
        let gaps = locate_gaps(&series(vec![None; 6]));
        assert_eq!(gaps.len(), 1);
        assert_eq!(gaps[0].length(), 6);
    }

    #[test]
    fn zero_is_not_missing() {
        assert!(locate_gaps(&series(vec![Some(0.0); 4])).is_empty());
    }

    #[test]
    fn buckets_are_exhaustive_and_disjoint() {
        for len in 1..=400usize {
            let matching = GapBucket::ALL
                .iter()
                .filter(|&&b| b == GapBucket::from_length(len))
                .count();
            assert_eq!(matching, 1, "length {len}");
        }
        assert_eq!(GapBucket::from_length(1), GapBucket::Short);
        assert_eq!(GapBucket::from_length(2), GapBucket::Short);
        assert_eq!(GapBucket::from_length(3), GapBucket::Medium);
        assert_eq!(GapBucket::from_length(7), GapBucket::Medium);
        assert_eq!(GapBucket::from_length(8), GapBucket::Long);
    }
}
