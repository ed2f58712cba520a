use std::path::PathBuf;

use serde::Deserialize;

/// Top-level Ombros configuration.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct OmbrosConfig {
    /// I/O settings.
    #[serde(default)]
    pub io: IoConfig,

    /// Gap filling settings.
    #[serde(default)]
    pub fill: FillToml,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IoConfig {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    #[serde(default = "default_date_col")]
    pub date_col: String,
    #[serde(default = "default_precip_col")]
    pub precip_col: String,
    #[serde(default = "default_missing_markers")]
    pub missing_markers: Vec<String>,
    #[serde(default)]
    pub date_formats: Option<Vec<String>>,
    #[serde(default = "default_true")]
    pub complete_calendar: bool,
}

impl Default for IoConfig {
    fn default() -> Self {
        Self {
            input: None,
            output: None,
            date_col: default_date_col(),
            precip_col: default_precip_col(),
            missing_markers: default_missing_markers(),
            date_formats: None,
            complete_calendar: true,
        }
    }
}

fn default_date_col() -> String {
    "DATE".to_string()
}
fn default_precip_col() -> String {
    "PRCP".to_string()
}
fn default_missing_markers() -> Vec<String> {
    ["", "NA", "NaN", "-9999"].map(String::from).to_vec()
}
fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FillToml {
    #[serde(default = "default_min_similarity_threshold")]
    pub min_similarity_threshold: f64,
    #[serde(default = "default_max_fill_gap_days")]
    pub max_fill_gap_days: usize,
    #[serde(default = "default_seasonal_window_days")]
    pub seasonal_window_days: u32,
    #[serde(default = "default_min_years_for_climatology")]
    pub min_years_for_climatology: usize,
    #[serde(default)]
    pub plan: PlanToml,
}

impl Default for FillToml {
    fn default() -> Self {
        Self {
            min_similarity_threshold: default_min_similarity_threshold(),
            max_fill_gap_days: default_max_fill_gap_days(),
            seasonal_window_days: default_seasonal_window_days(),
            min_years_for_climatology: default_min_years_for_climatology(),
            plan: PlanToml::default(),
        }
    }
}

fn default_min_similarity_threshold() -> f64 {
    0.7
}
fn default_max_fill_gap_days() -> usize {
    30
}
fn default_seasonal_window_days() -> u32 {
    15
}
fn default_min_years_for_climatology() -> usize {
    10
}

/// Strategy chains per gap-length bucket. Unset buckets keep the default.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct PlanToml {
    pub short: Option<Vec<String>>,
    pub medium: Option<Vec<String>>,
    pub long: Option<Vec<String>>,
}
