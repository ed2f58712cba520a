//! Fill command: read a precipitation CSV, fill its gaps, write the result.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, info_span};

use ombros_fill::{FillingReport, fill};
use ombros_io::{read_csv, report_path, write_csv, write_report};

use crate::cli::FillArgs;
use crate::config::OmbrosConfig;
use crate::convert;

/// Run the fill pipeline.
pub fn run(args: FillArgs) -> Result<()> {
    let _cmd = info_span!("fill_cmd").entered();

    // 1. Load project TOML, if any
    let mut config = match &args.config {
        Some(path) => {
            let toml_str = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config file: {}", path.display()))?;
            toml::from_str::<OmbrosConfig>(&toml_str).context("failed to parse TOML config")?
        }
        None => OmbrosConfig::default(),
    };

    // 2. Apply CLI overrides
    if let Some(days) = args.max_gap {
        config.fill.max_fill_gap_days = days;
    }
    let input = args
        .input
        .or_else(|| config.io.input.clone())
        .ok_or_else(|| anyhow::anyhow!("no input path: set [io].input in config or use --input"))?;
    let output = args
        .output
        .or_else(|| config.io.output.clone())
        .unwrap_or_else(|| default_output(&input));

    let report = execute(&config, &input, &output)?;
    if let Some(r) = report.completed() {
        info!(
            filled = r.summary.values_filled,
            still_missing = r.summary.final_missing_values,
            quality_good = r.validation_results.quality_good,
            "done"
        );
    }
    Ok(())
}

/// `station.csv` -> `station.filled.csv`.
fn default_output(input: &Path) -> PathBuf {
    input.with_extension("filled.csv")
}

/// Reads `input`, fills it, and writes `output` plus its report sidecar.
fn execute(config: &OmbrosConfig, input: &Path, output: &Path) -> Result<FillingReport> {
    // 1. Build configs from TOML
    let reader_cfg = convert::build_reader_config(&config.io);
    let writer_cfg = convert::build_writer_config(&config.io);
    let fill_cfg = convert::build_fill_config(&config.fill)?;

    // 2. Read observed series
    info!(path = %input.display(), "reading observed series");
    let series = read_csv(input, &reader_cfg)
        .with_context(|| format!("failed to read CSV: {}", input.display()))?;
    info!(
        days = series.len(),
        missing = series.missing_count(),
        "observed series loaded"
    );

    // 3. Fill
    let (filled, report) = fill(&series, &fill_cfg).context("gap filling failed")?;

    // 4. Write filled series and report
    write_csv(output, &filled, &writer_cfg)
        .with_context(|| format!("failed to write CSV: {}", output.display()))?;
    let sidecar = report_path(output);
    write_report(&sidecar, &report)
        .with_context(|| format!("failed to write report: {}", sidecar.display()))?;

    Ok(report)
}
