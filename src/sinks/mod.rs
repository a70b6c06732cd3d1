mod csv;

use crate::dataset::{Mission, Rows};
use crate::error::Result;

pub use self::csv::CsvSink;

/// Column names written by exporting sinks, in output order.
pub const EXPORT_COLUMNS: [&str; 7] = [
    "Mission",
    "Company",
    "Date",
    "Rocket",
    "RocketStatus",
    "MissionStatus",
    "Price (Millions $)",
];

/// Describes the rows about to be written.
pub struct SinkContext<'a> {
    pub columns: &'a [&'a str],
    /// Number of rows the sink will receive.
    pub row_count: usize,
}

impl SinkContext<'static> {
    #[must_use]
    pub const fn export(row_count: usize) -> Self {
        Self {
            columns: &EXPORT_COLUMNS,
            row_count,
        }
    }
}

/// Trait implemented by consumers of mission rows.
pub trait RowSink {
    /// Called before any rows are written to allow the sink to initialise internal state.
    fn begin(&mut self, context: SinkContext<'_>) -> Result<()>;

    /// Invoked for every row in table order.
    fn write_row(&mut self, row: &Mission) -> Result<()>;

    /// Called once all rows have been forwarded to the sink.
    fn finish(&mut self) -> Result<()>;
}

/// Streams every row of `table` through `sink`.
///
/// # Errors
///
/// Propagates the first error reported by the sink.
pub fn write_rows<T, S>(table: &T, sink: &mut S) -> Result<()>
where
    T: Rows + ?Sized,
    S: RowSink + ?Sized,
{
    sink.begin(SinkContext::export(table.row_count()))?;
    for mission in table.rows() {
        sink.write_row(mission)?;
    }
    sink.finish()
}
