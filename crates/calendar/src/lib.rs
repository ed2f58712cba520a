//! # ombros-calendar
//!
//! Date arithmetic on the Gregorian calendar for cross-year alignment.
//!
//! Gap filling compares a missing day with "the same day" in other years.
//! This crate defines what that means: alignment is by day-of-year, and
//! day 366 of a leap year clamps to December 31 in a common year.
//!
//! ## Quick Start
//!
//! ```
//! use chrono::NaiveDate;
//! use ombros_calendar::{Doy, align_to_year, probe_offsets, seasonal_window};
//!
//! let date = NaiveDate::from_ymd_opt(2021, 7, 4).unwrap();
//! assert_eq!(Doy::of(date).get(), 185);
//!
//! let aligned = align_to_year(date, 2019).unwrap();
//! assert_eq!(aligned, NaiveDate::from_ymd_opt(2019, 7, 4).unwrap());
//!
//! let (lo, hi) = seasonal_window(aligned, 15);
//! assert!(lo < aligned && aligned < hi);
//!
//! assert_eq!(probe_offsets(2), vec![-1, 1, -2, 2]);
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `doy` | Day-of-year newtype and cross-year alignment |
//! | `sequence` | Daily date sequences and year listings |
//! | `window` | Seasonal windows and nearby-day probing |
//! | `error` | Error types |

mod doy;
mod error;
mod sequence;
mod window;

pub use doy::{Doy, align_to_year};
pub use error::CalendarError;
pub use sequence::{daily_sequence, distinct_years};
pub use window::{probe_offsets, seasonal_window, shift_days};
