//! Configuration for gap filling.

use crate::error::FillError;
use crate::strategy::FillPlan;

/// Configuration for [`fill`](crate::fill).
///
/// Use the builder methods to customise parameters.
///
/// # Example
///
/// ```
/// use ombros_fill::FillConfig;
///
/// let config = FillConfig::new()
///     .with_max_fill_gap_days(60)
///     .with_seasonal_window_days(10);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct FillConfig {
    min_similarity_threshold: f64,
    max_fill_gap_days: usize,
    seasonal_window_days: u32,
    min_years_for_climatology: usize,
    plan: FillPlan,
}

impl FillConfig {
    /// Creates a new configuration with defaults.
    ///
    /// Defaults: `min_similarity_threshold = 0.7`, `max_fill_gap_days = 30`,
    /// `seasonal_window_days = 15`, `min_years_for_climatology = 10`, and
    /// the default [`FillPlan`].
    pub fn new() -> Self {
        Self {
            min_similarity_threshold: 0.7,
            max_fill_gap_days: 30,
            seasonal_window_days: 15,
            min_years_for_climatology: 10,
            plan: FillPlan::new(),
        }
    }

    /// Sets the minimum similarity score a donor year must reach.
    pub fn with_min_similarity_threshold(mut self, threshold: f64) -> Self {
        self.min_similarity_threshold = threshold;
        self
    }

    /// Sets the longest gap, in days, that will be attempted.
    pub fn with_max_fill_gap_days(mut self, days: usize) -> Self {
        self.max_fill_gap_days = days;
        self
    }

    /// Sets the half-width, in days, of the climatological window.
    pub fn with_seasonal_window_days(mut self, days: u32) -> Self {
        self.seasonal_window_days = days;
        self
    }

    /// Sets the minimum pooled observation count for a climatological normal.
    pub fn with_min_years_for_climatology(mut self, count: usize) -> Self {
        self.min_years_for_climatology = count;
        self
    }

    /// Sets the strategy transition table.
    pub fn with_plan(mut self, plan: FillPlan) -> Self {
        self.plan = plan;
        self
    }

    // --- Accessors ---

    /// Returns the minimum donor similarity score.
    pub fn min_similarity_threshold(&self) -> f64 {
        self.min_similarity_threshold
    }

    /// Returns the longest gap that will be attempted.
    pub fn max_fill_gap_days(&self) -> usize {
        self.max_fill_gap_days
    }

    /// Returns the climatological window half-width.
    pub fn seasonal_window_days(&self) -> u32 {
        self.seasonal_window_days
    }

    /// Returns the minimum pooled observation count.
    pub fn min_years_for_climatology(&self) -> usize {
        self.min_years_for_climatology
    }

    /// Returns the strategy transition table.
    pub fn plan(&self) -> &FillPlan {
        &self.plan
    }

    /// Validates this configuration.
    ///
    /// Checks that the similarity threshold is finite and in `[0, 1]`, that
    /// the gap ceiling and pool minimum are positive, and that the plan is
    /// valid.
    pub fn validate(&self) -> Result<(), FillError> {
        let t = self.min_similarity_threshold;
        if !t.is_finite() || !(0.0..=1.0).contains(&t) {
            return Err(FillError::InvalidConfig {
                reason: format!("min_similarity_threshold must be in [0, 1], got {t}"),
            });
        }
        if self.max_fill_gap_days == 0 {
            return Err(FillError::InvalidConfig {
                reason: "max_fill_gap_days must be at least 1".to_string(),
            });
        }
        if self.min_years_for_climatology == 0 {
            return Err(FillError::InvalidConfig {
                reason: "min_years_for_climatology must be at least 1".to_string(),
            });
        }
        self.plan.validate()
    }
}

impl Default for FillConfig {
    fn default() -> Self {
        Self::new()
    }
}
