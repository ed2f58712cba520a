//! # ombros-io
//!
//! Read daily precipitation records from CSV into a
//! [`PrecipSeries`](ombros_fill::PrecipSeries), and write filled series and
//! their JSON reports back to disk.

mod error;
mod reader;
mod validate;
mod writer;

pub use error::IoError;
pub use reader::{ReaderConfig, read_csv};
pub use writer::{WriterConfig, report_path, write_csv, write_report};
