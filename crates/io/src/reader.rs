//! CSV reader configuration and parsing.

use std::fs::File;
use std::path::Path;

use chrono::NaiveDate;
use csv::StringRecord;
use ombros_fill::PrecipSeries;
use tracing::{debug, info};

use crate::error::IoError;
use crate::validate::ValidationCollector;

// ---------------------------------------------------------------------------
// ReaderConfig
// ---------------------------------------------------------------------------

/// Configuration for reading a daily precipitation CSV.
///
/// The [`Default`] implementation matches GHCN-Daily station exports: a
/// `DATE` column in ISO format and a `PRCP` column, with blank cells, `NA`,
/// `NaN` or `-9999` marking missing days.
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Preferred date column name.
    date_col: String,
    /// Preferred precipitation column name.
    precip_col: String,
    /// Fallback date column names tried in order.
    date_aliases: Vec<String>,
    /// Fallback precipitation column names tried in order.
    precip_aliases: Vec<String>,
    /// Cell contents treated as a missing observation.
    missing_markers: Vec<String>,
    /// `chrono` formats tried in order when parsing dates.
    date_formats: Vec<String>,
    /// Insert absent calendar days as missing.
    complete_calendar: bool,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            date_col: "DATE".into(),
            precip_col: "PRCP".into(),
            date_aliases: ["Date", "date", "TIME", "DATETIME", "DateTime"]
                .map(String::from)
                .to_vec(),
            precip_aliases: [
                "PRECIPITATION",
                "Precipitation",
                "precipitation",
                "RAIN",
                "Rain",
            ]
            .map(String::from)
            .to_vec(),
            missing_markers: ["", "NA", "NaN", "-9999"].map(String::from).to_vec(),
            date_formats: ["%Y-%m-%d", "%Y%m%d", "%m/%d/%Y"].map(String::from).to_vec(),
            complete_calendar: true,
        }
    }
}

impl ReaderConfig {
    /// Set the preferred date column name.
    pub fn with_date_col(mut self, name: impl Into<String>) -> Self {
        self.date_col = name.into();
        self
    }

    /// Set the preferred precipitation column name.
    pub fn with_precip_col(mut self, name: impl Into<String>) -> Self {
        self.precip_col = name.into();
        self
    }

    /// Replace the set of missing-value markers.
    pub fn with_missing_markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.missing_markers = markers.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the list of accepted date formats.
    pub fn with_date_formats<I, S>(mut self, formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.date_formats = formats.into_iter().map(Into::into).collect();
        self
    }

    /// Enable or disable insertion of absent calendar days.
    pub fn with_complete_calendar(mut self, complete: bool) -> Self {
        self.complete_calendar = complete;
        self
    }

    /// Validate that the configuration is internally consistent.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] if a column name is blank or no date
    /// format is configured.
    pub fn validate(&self) -> Result<(), IoError> {
        let mut c = ValidationCollector::new();
        if self.date_col.trim().is_empty() {
            c.push("date_col must not be empty");
        }
        if self.precip_col.trim().is_empty() {
            c.push("precip_col must not be empty");
        }
        if self.date_formats.is_empty() {
            c.push("at least one date format is required");
        }
        c.finish()
    }

    fn is_missing(&self, cell: &str) -> bool {
        self.missing_markers.iter().any(|m| m == cell)
    }

    fn parse_date(&self, cell: &str) -> Option<NaiveDate> {
        self.date_formats
            .iter()
            .find_map(|f| NaiveDate::parse_from_str(cell, f).ok())
    }
}

// ---------------------------------------------------------------------------
// read_csv
// ---------------------------------------------------------------------------

/// Returns the index of `preferred`, or of the first alias present.
fn resolve_column(
    headers: &StringRecord,
    preferred: &str,
    aliases: &[String],
) -> Result<usize, IoError> {
    let position = |name: &str| headers.iter().position(|h| h == name);
    if let Some(i) = position(preferred) {
        return Ok(i);
    }
    for alias in aliases {
        if let Some(i) = position(alias) {
            info!(column = %alias, "using fallback column for {preferred}");
            return Ok(i);
        }
    }
    Err(IoError::MissingColumn {
        name: preferred.to_string(),
        available: headers.iter().collect::<Vec<_>>().join(", "),
    })
}

/// Read a daily precipitation series from a CSV file.
///
/// Rows may appear in any order; they are sorted by date. Every
/// unparseable date or non-numeric value is collected before failing, so a
/// single error lists all bad rows.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if `path` does not exist,
/// [`IoError::MissingColumn`] if a required column is absent,
/// [`IoError::Validation`] for unparseable rows, and [`IoError::Series`] if
/// the resulting series is empty, has duplicate dates or holds negative
/// values.
pub fn read_csv(path: &Path, config: &ReaderConfig) -> Result<PrecipSeries, IoError> {
    config.validate()?;
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let file = File::open(path).map_err(|e| IoError::Io {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(file);

    let headers = reader.headers()?.clone();
    let date_idx = resolve_column(&headers, &config.date_col, &config.date_aliases)?;
    let precip_idx = resolve_column(&headers, &config.precip_col, &config.precip_aliases)?;

    let mut rows: Vec<(NaiveDate, Option<f64>)> = Vec::new();
    let mut c = ValidationCollector::new();

    for (idx, result) in reader.records().enumerate() {
        // Header is line 1.
        let line = idx + 2;
        let record = result?;

        let date_cell = record.get(date_idx).unwrap_or_default();
        let Some(date) = config.parse_date(date_cell) else {
            c.push(format!("line {line}: unparseable date {date_cell:?}"));
            continue;
        };

        let value_cell = record.get(precip_idx).unwrap_or_default();
        if config.is_missing(value_cell) {
            rows.push((date, None));
            continue;
        }
        match value_cell.parse::<f64>() {
            Ok(v) if v.is_nan() => rows.push((date, None)),
            Ok(v) => rows.push((date, Some(v))),
            Err(_) => c.push(format!("line {line}: non-numeric value {value_cell:?}")),
        }
    }
    c.finish()?;

    rows.sort_by_key(|(d, _)| *d);
    let (dates, values): (Vec<NaiveDate>, Vec<Option<f64>>) = rows.into_iter().unzip();
    debug!(rows = dates.len(), path = %path.display(), "parsed csv");

    let mut series = PrecipSeries::new(dates, values)?;
    if config.complete_calendar {
        let before = series.len();
        series = series.with_complete_calendar();
        if series.len() > before {
            info!(
                inserted = series.len() - before,
                "inserted absent calendar days as missing"
            );
        }
    }
    Ok(series)
}
