use std::borrow::Cow;
use std::io::Write;

use csv::{ByteRecord, Writer, WriterBuilder};
use ryu::Buffer as RyuBuffer;

use crate::dataset::Mission;
use crate::error::{Error, Result};
use crate::sinks::{RowSink, SinkContext};

use super::encode::{encode_date, encode_price, encode_text, flush_record};

const DEFAULT_DELIMITER: u8 = b',';
const DEFAULT_SCRATCH_CAPACITY: usize = 64;

/// Writes mission rows into a delimited text file (CSV/TSV).
pub struct CsvSink<W: Write> {
    output: Option<W>,
    writer: Option<Writer<W>>,
    delimiter: u8,
    write_headers: bool,
    column_count: usize,
    record: ByteRecord,
    scratch: Vec<Vec<u8>>, // one scratch buffer per column
    rows_written: u64,
}

impl<W: Write> CsvSink<W> {
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self {
            output: Some(writer),
            writer: None,
            delimiter: DEFAULT_DELIMITER,
            write_headers: true,
            column_count: 0,
            record: ByteRecord::new(),
            scratch: Vec::new(),
            rows_written: 0,
        }
    }

    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    #[must_use]
    pub const fn with_headers(mut self, headers: bool) -> Self {
        self.write_headers = headers;
        self
    }

    #[must_use]
    pub const fn rows_written(&self) -> u64 {
        self.rows_written
    }

    /// Returns the underlying writer once the sink has finished.
    pub fn into_inner(self) -> Option<W> {
        self.output
    }

    fn build_writer(&mut self) -> Result<()> {
        let output = self.output.take().ok_or_else(|| Error::Write {
            details: Cow::from("CSV sink output already taken"),
        })?;
        let writer = WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_writer(output);
        self.writer = Some(writer);
        Ok(())
    }

    fn writer_mut(&mut self) -> Result<&mut Writer<W>> {
        self.writer.as_mut().ok_or_else(|| Error::Write {
            details: Cow::from("CSV sink used before begin"),
        })
    }
}

impl<W: Write> RowSink for CsvSink<W> {
    fn begin(&mut self, context: SinkContext<'_>) -> Result<()> {
        if self.writer.is_some() {
            return Err(Error::InvalidOptions {
                details: Cow::from("CSV sink cannot be reused without finishing"),
            });
        }
        if context.columns.len() != crate::sinks::EXPORT_COLUMNS.len() {
            return Err(Error::InvalidOptions {
                details: Cow::Owned(format!(
                    "CSV sink writes {} columns, context lists {}",
                    crate::sinks::EXPORT_COLUMNS.len(),
                    context.columns.len()
                )),
            });
        }

        self.build_writer()?;
        self.column_count = context.columns.len();
        self.record = ByteRecord::with_capacity(self.column_count * 16, self.column_count);
        self.scratch = (0..self.column_count)
            .map(|_| Vec::with_capacity(DEFAULT_SCRATCH_CAPACITY))
            .collect();
        self.rows_written = 0;

        if self.write_headers {
            let header: ByteRecord = context.columns.iter().map(|name| name.as_bytes()).collect();
            let writer = self.writer_mut()?;
            flush_record(writer, &header)?;
        }
        Ok(())
    }

    fn write_row(&mut self, row: &Mission) -> Result<()> {
        let mut ryu = RyuBuffer::new();
        let [mission, company, date, rocket, rocket_status, mission_status, price] =
            self.scratch.as_mut_slice()
        else {
            return Err(Error::Write {
                details: Cow::from("CSV sink used before begin"),
            });
        };

        encode_text(&row.mission, mission);
        encode_text(&row.company, company);
        encode_date(row.date, date);
        encode_text(&row.rocket, rocket);
        encode_text(
            row.rocket_status.as_ref().map_or("", |status| status.as_str()),
            rocket_status,
        );
        encode_text(
            row.mission_status.as_ref().map_or("", |status| status.as_str()),
            mission_status,
        );
        encode_price(row.price, price, &mut ryu);

        self.record.clear();
        for field in &self.scratch {
            self.record.push_field(field);
        }
        let writer = self.writer.as_mut().ok_or_else(|| Error::Write {
            details: Cow::from("CSV sink used before begin"),
        })?;
        flush_record(writer, &self.record)?;
        self.rows_written += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush()?;
            let out = writer.into_inner().map_err(|e| Error::Write {
                details: Cow::Owned(format!("csv into_inner failed: {e}")),
            })?;
            self.output = Some(out);
        }
        self.column_count = 0;
        self.scratch.clear();
        self.record.clear();
        Ok(())
    }
}
