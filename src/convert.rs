//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Context, Result, bail};

use crate::config::*;

use ombros_fill::{FillConfig, FillPlan, GapBucket, Strategy};
use ombros_io::{ReaderConfig, WriterConfig};

/// Parses a strategy name string into the corresponding enum variant.
pub fn parse_strategy(s: &str) -> Result<Strategy> {
    match s.to_lowercase().as_str() {
        "linear" => Ok(Strategy::Linear),
        "climatological" | "climatology" => Ok(Strategy::Climatological),
        "analogous" | "analog" => Ok(Strategy::Analogous),
        other => bail!("unknown fill strategy: {other:?}"),
    }
}

/// Builds a [`FillPlan`] from the TOML plan table, starting from defaults.
pub fn build_plan(plan: &PlanToml) -> Result<FillPlan> {
    let mut out = FillPlan::default();
    let buckets = [
        (GapBucket::Short, &plan.short),
        (GapBucket::Medium, &plan.medium),
        (GapBucket::Long, &plan.long),
    ];
    for (bucket, chain) in buckets {
        if let Some(names) = chain {
            let chain = names
                .iter()
                .map(|n| parse_strategy(n))
                .collect::<Result<Vec<_>>>()
                .with_context(|| format!("invalid [fill.plan] chain for {bucket:?} gaps"))?;
            out = out.with_chain(bucket, chain);
        }
    }
    Ok(out)
}

/// Builds a validated [`FillConfig`] from the TOML fill configuration.
pub fn build_fill_config(fill: &FillToml) -> Result<FillConfig> {
    let cfg = FillConfig::new()
        .with_min_similarity_threshold(fill.min_similarity_threshold)
        .with_max_fill_gap_days(fill.max_fill_gap_days)
        .with_seasonal_window_days(fill.seasonal_window_days)
        .with_min_years_for_climatology(fill.min_years_for_climatology)
        .with_plan(build_plan(&fill.plan)?);
    cfg.validate().context("invalid [fill] configuration")?;
    Ok(cfg)
}

/// Builds a [`ReaderConfig`] from the TOML I/O configuration.
pub fn build_reader_config(io: &IoConfig) -> ReaderConfig {
    let mut cfg = ReaderConfig::default()
        .with_date_col(&io.date_col)
        .with_precip_col(&io.precip_col)
        .with_missing_markers(io.missing_markers.iter().cloned())
        .with_complete_calendar(io.complete_calendar);
    if let Some(ref formats) = io.date_formats {
        cfg = cfg.with_date_formats(formats.iter().cloned());
    }
    cfg
}

/// Builds a [`WriterConfig`] from the TOML I/O configuration.
///
/// Unfilled days are written with the first missing marker.
pub fn build_writer_config(io: &IoConfig) -> WriterConfig {
    let marker = io.missing_markers.first().cloned().unwrap_or_default();
    let mut cfg = WriterConfig::default()
        .with_date_col(&io.date_col)
        .with_precip_col(&io.precip_col)
        .with_missing_marker(marker);
    if let Some(first) = io.date_formats.as_ref().and_then(|f| f.first()) {
        cfg = cfg.with_date_format(first);
    }
    cfg
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_strategy_names() {
        assert_eq!(parse_strategy("linear").unwrap(), Strategy::Linear);
        assert_eq!(parse_strategy("Climatology").unwrap(), Strategy::Climatological);
        assert_eq!(parse_strategy("ANALOGOUS").unwrap(), Strategy::Analogous);
        assert!(parse_strategy("spline").is_err());
    }

    #[test]
    fn plan_overrides_only_named_buckets() {
        let plan = build_plan(&PlanToml {
            short: None,
            medium: Some(vec!["analogous".into()]),
            long: None,
        })
        .unwrap();
        assert_eq!(plan.chain(GapBucket::Medium), &[Strategy::Analogous]);
        assert_eq!(plan.chain(GapBucket::Short), &[Strategy::Linear]);
    }

    #[test]
    fn plan_with_unknown_strategy_fails() {
        let err = build_plan(&PlanToml {
            short: Some(vec!["cubic".into()]),
            medium: None,
            long: None,
        })
        .unwrap_err();
        assert!(format!("{err:#}").contains("unknown fill strategy"));
    }

    #[test]
    fn fill_config_defaults_round_trip() {
        let cfg = build_fill_config(&FillToml::default()).unwrap();
        assert_eq!(cfg, FillConfig::default());
    }

    #[test]
    fn fill_config_is_validated() {
        let toml = FillToml {
            min_similarity_threshold: 1.5,
            ..FillToml::default()
        };
        assert!(build_fill_config(&toml).is_err());

        let toml = FillToml {
            plan: PlanToml {
                long: Some(vec![]),
                ..PlanToml::default()
            },
            ..FillToml::default()
        };
        assert!(build_fill_config(&toml).is_err());
    }
}
