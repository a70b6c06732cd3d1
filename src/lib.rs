pub mod aggregate;
pub mod api;
pub mod dashboard;
pub mod dataset;
pub mod error;
pub mod filter;
pub mod logger;
pub mod parser;
pub mod queries;
pub mod sinks;
pub mod value;
pub use crate::error::{Error, Result};
pub use api::{LoadSummary, MissionsFile, ReadOptions, SharedDataset};
pub use dataset::{Dataset, Mission, Rows};
pub use filter::{DateRange, FilterSpec, FilteredView, RocketStatusFilter, apply_filters};
pub use sinks::{CsvSink, RowSink, SinkContext, write_rows};
pub use value::{MissionStatus, RocketStatus};

/// Reads a mission table from disk.
///
/// Convenience wrapper over [`MissionsFile::open`] with default options.
///
/// # Errors
///
/// Returns an error if the file cannot be read or lacks a required column.
pub fn load_dataset(path: impl AsRef<std::path::Path>) -> Result<Dataset> {
    let (dataset, _summary) = MissionsFile::open(path)?.load()?;
    Ok(dataset)
}
