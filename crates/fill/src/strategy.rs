//! Strategy selection as an explicit per-gap state machine.
//!
//! Each gap walks the strategy chain configured for its length bucket in a
//! [`FillPlan`]. The walk is recorded as a sequence of [`GapState`]s, ending
//! in `Resolved` or `Unfilled`.

use serde::Serialize;
use tracing::debug;

use crate::analog;
use crate::climatology;
use crate::config::FillConfig;
use crate::error::{FillError, Unresolved};
use crate::gap::{Gap, GapBucket};
use crate::linear;
use crate::series::PrecipSeries;

/// An imputation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Linear,
    Climatological,
    Analogous,
}

impl Strategy {
    fn apply(
        self,
        reference: &PrecipSeries,
        gap: &Gap,
        config: &FillConfig,
    ) -> Result<Vec<f64>, Unresolved> {
        match self {
            Strategy::Linear => linear::interpolate(reference, gap),
            Strategy::Climatological => climatology::climatological_normal(reference, gap, config),
            Strategy::Analogous => analog::analogous_year(reference, gap, config),
        }
    }
}

/// Which strategy ended up filling a gap, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyUsed {
    Linear,
    Climatological,
    Analogous,
    Unfilled,
}

impl From<Strategy> for StrategyUsed {
    fn from(s: Strategy) -> Self {
        match s {
            Strategy::Linear => StrategyUsed::Linear,
            Strategy::Climatological => StrategyUsed::Climatological,
            Strategy::Analogous => StrategyUsed::Analogous,
        }
    }
}

/// Resolution state of one gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GapState {
    Unattempted,
    LinearTried,
    ClimatologicalTried,
    AnalogousTried,
    Resolved(Strategy),
    Unfilled,
}

impl GapState {
    /// State after attempting `strategy`.
    pub fn after_attempt(self, strategy: Strategy, succeeded: bool) -> GapState {
        match (self, succeeded) {
            (GapState::Resolved(_) | GapState::Unfilled, _) => self,
            (_, true) => GapState::Resolved(strategy),
            (_, false) => match strategy {
                Strategy::Linear => GapState::LinearTried,
                Strategy::Climatological => GapState::ClimatologicalTried,
                Strategy::Analogous => GapState::AnalogousTried,
            },
        }
    }

    /// Terminal state once the chain is exhausted.
    pub fn exhausted(self) -> GapState {
        match self {
            GapState::Resolved(_) => self,
            _ => GapState::Unfilled,
        }
    }

    /// Returns `true` for `Resolved` and `Unfilled`.
    pub fn is_terminal(self) -> bool {
        matches!(self, GapState::Resolved(_) | GapState::Unfilled)
    }
}

/// Transition table: the ordered strategy chain for each length bucket.
///
/// Defaults: short gaps try `Linear`; medium gaps try `Climatological`,
/// then `Analogous`; long gaps try `Analogous`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillPlan {
    short: Vec<Strategy>,
    medium: Vec<Strategy>,
    long: Vec<Strategy>,
}

impl FillPlan {
    /// Creates the default plan.
    pub fn new() -> Self {
        Self {
            short: vec![Strategy::Linear],
            medium: vec![Strategy::Climatological, Strategy::Analogous],
            long: vec![Strategy::Analogous],
        }
    }

    /// Replaces the chain for `bucket`.
    pub fn with_chain(mut self, bucket: GapBucket, chain: Vec<Strategy>) -> Self {
        match bucket {
            GapBucket::Short => self.short = chain,
            GapBucket::Medium => self.medium = chain,
            GapBucket::Long => self.long = chain,
        }
        self
    }

    /// Returns the chain for `bucket`.
    pub fn chain(&self, bucket: GapBucket) -> &[Strategy] {
        match bucket {
            GapBucket::Short => &self.short,
            GapBucket::Medium => &self.medium,
            GapBucket::Long => &self.long,
        }
    }

    /// Validates that every chain is non-empty and free of repeats.
    pub fn validate(&self) -> Result<(), FillError> {
        for bucket in GapBucket::ALL {
            let chain = self.chain(bucket);
            if chain.is_empty() {
                return Err(FillError::InvalidConfig {
                    reason: format!("strategy chain for {bucket:?} gaps is empty"),
                });
            }
            for (i, s) in chain.iter().enumerate() {
                if chain[..i].contains(s) {
                    return Err(FillError::InvalidConfig {
                        reason: format!("strategy {s:?} repeated in chain for {bucket:?} gaps"),
                    });
                }
            }
        }
        Ok(())
    }
}

impl Default for FillPlan {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of resolving one gap.
#[derive(Debug, Clone, PartialEq)]
pub struct GapOutcome {
    pub gap: Gap,
    pub strategy_used: StrategyUsed,
    pub success: bool,
    /// Strategies attempted, in order.
    pub attempted: Vec<Strategy>,
    /// Reason the last attempt failed; `None` on success.
    pub reason: Option<Unresolved>,
    pub final_state: GapState,
}

/// Resolves one gap against the read-only `reference`.
///
/// Returns the outcome and, on success, the values to write over the gap.
pub(crate) fn resolve_gap(
    reference: &PrecipSeries,
    gap: &Gap,
    config: &FillConfig,
) -> (GapOutcome, Option<Vec<f64>>) {
    if gap.length() > config.max_fill_gap_days() {
        let outcome = GapOutcome {
            gap: *gap,
            strategy_used: StrategyUsed::Unfilled,
            success: false,
            attempted: Vec::new(),
            reason: Some(Unresolved::ExceededMaxGap {
                length: gap.length(),
                max: config.max_fill_gap_days(),
            }),
            final_state: GapState::Unfilled,
        };
        return (outcome, None);
    }

    let mut state = GapState::Unattempted;
    let mut attempted = Vec::new();
    let mut reason = None;

    for &strategy in config.plan().chain(gap.bucket()) {
        attempted.push(strategy);
        match strategy.apply(reference, gap, config) {
            Ok(values) => {
                state = state.after_attempt(strategy, true);
                let outcome = GapOutcome {
                    gap: *gap,
                    strategy_used: strategy.into(),
                    success: true,
                    attempted,
                    reason: None,
                    final_state: state,
                };
                return (outcome, Some(values));
            }
            Err(why) => {
                debug!(
                    start = %gap.start_date(),
                    length = gap.length(),
                    ?strategy,
                    reason = %why,
                    "strategy failed"
                );
                state = state.after_attempt(strategy, false);
                reason = Some(why);
            }
        }
    }

    let outcome = GapOutcome {
        gap: *gap,
        strategy_used: StrategyUsed::Unfilled,
        success: false,
        attempted,
        reason,
        final_state: state.exhausted(),
    };
    (outcome, None)
}
