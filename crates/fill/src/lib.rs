//! Gap filling for daily precipitation series.
//!
//! [`fill`] classifies each run of missing days by length and walks the
//! strategy chain configured for that length in a [`FillPlan`]:
//!
//! - **Linear**: straight-line interpolation between the flanking days.
//! - **Climatological**: median of the same season in other years.
//! - **Analogous**: values copied from the most similar other year, where
//!   similarity is the significant Pearson correlation of monthly totals.
//!
//! The filled series is validated for statistical drift and returned with
//! a [`FillingReport`].

pub mod analog;
pub mod climatology;
mod config;
mod engine;
mod error;
pub mod gap;
pub mod linear;
pub mod quality;
pub mod report;
mod series;
pub mod similarity;
pub mod strategy;
mod validate;
pub mod yearly;

pub use config::FillConfig;
pub use engine::fill;
pub use error::{FillError, Unresolved};
pub use gap::{Gap, GapBucket, locate_gaps};
pub use quality::{DataQuality, ValidationResult};
pub use report::{CompletedReport, FillStatistics, FillSummary, FillingReport, GapDetail};
pub use series::PrecipSeries;
pub use strategy::{FillPlan, GapOutcome, GapState, Strategy, StrategyUsed};
pub use yearly::YearlyAnalysis;
