//! CSV and report writers.

use std::fs::File;
use std::path::{Path, PathBuf};

use ombros_fill::{FillingReport, PrecipSeries};
use tracing::info;

use crate::error::IoError;

/// Configuration for writing a filled series to CSV.
#[derive(Debug, Clone)]
pub struct WriterConfig {
    /// Header of the date column.
    date_col: String,
    /// Header of the precipitation column.
    precip_col: String,
    /// Cell written for a day that is still missing.
    missing_marker: String,
    /// `chrono` format for dates.
    date_format: String,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            date_col: "DATE".into(),
            precip_col: "PRCP".into(),
            missing_marker: String::new(),
            date_format: "%Y-%m-%d".into(),
        }
    }
}

impl WriterConfig {
    /// Set the date column header.
    pub fn with_date_col(mut self, name: impl Into<String>) -> Self {
        self.date_col = name.into();
        self
    }

    /// Set the precipitation column header.
    pub fn with_precip_col(mut self, name: impl Into<String>) -> Self {
        self.precip_col = name.into();
        self
    }

    /// Set the cell written for unfilled days.
    pub fn with_missing_marker(mut self, marker: impl Into<String>) -> Self {
        self.missing_marker = marker.into();
        self
    }

    /// Set the date format.
    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }
}

/// Write `series` as a two-column CSV.
///
/// # Errors
///
/// Returns [`IoError::Io`] if the file cannot be created and
/// [`IoError::Csv`] if a row cannot be written.
pub fn write_csv(path: &Path, series: &PrecipSeries, config: &WriterConfig) -> Result<(), IoError> {
    let file = File::create(path).map_err(|e| IoError::Io {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let mut writer = csv::Writer::from_writer(file);
    writer.write_record([config.date_col.as_str(), config.precip_col.as_str()])?;

    for (date, value) in series.dates().iter().zip(series.values()) {
        let cell = match value {
            Some(v) => v.to_string(),
            None => config.missing_marker.clone(),
        };
        writer.write_record([date.format(&config.date_format).to_string(), cell])?;
    }
    writer.flush().map_err(|e| IoError::Io {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    info!(path = %path.display(), rows = series.len(), "series written");
    Ok(())
}

/// Sidecar report path for a series written to `output`.
///
/// `filled.csv` becomes `filled.report.json`.
pub fn report_path(output: &Path) -> PathBuf {
    output.with_extension("report.json")
}

/// Write `report` as pretty-printed JSON.
///
/// # Errors
///
/// Returns [`IoError::Series`] if serialisation fails and [`IoError::Io`]
/// if the file cannot be written.
pub fn write_report(path: &Path, report: &FillingReport) -> Result<(), IoError> {
    let json = report.to_json()?;
    std::fs::write(path, json).map_err(|e| IoError::Io {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    info!(path = %path.display(), "report written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_path_replaces_extension() {
        assert_eq!(
            report_path(Path::new("/data/filled.csv")),
            PathBuf::from("/data/filled.report.json")
        );
        assert_eq!(
            report_path(Path::new("out")),
            PathBuf::from("out.report.json")
        );
    }
}
