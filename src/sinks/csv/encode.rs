use std::borrow::Cow;

use csv::ByteRecord;
use ryu::Buffer as RyuBuffer;
use time::Date;

use crate::error::{Error, Result};

pub fn encode_text(value: &str, out: &mut Vec<u8>) {
    out.clear();
    out.extend_from_slice(value.as_bytes());
}

/// Writes `YYYY-MM-DD`; a missing date leaves the field empty.
pub fn encode_date(date: Option<Date>, out: &mut Vec<u8>) {
    out.clear();
    if let Some(date) = date {
        out.extend_from_slice(date.to_string().as_bytes());
    }
}

/// Writes the shortest round-tripping decimal; a missing price leaves the field empty.
pub fn encode_price(price: Option<f64>, out: &mut Vec<u8>, ryu: &mut RyuBuffer) {
    out.clear();
    if let Some(price) = price {
        out.extend_from_slice(ryu.format(price).as_bytes());
    }
}

pub fn flush_record<W: std::io::Write>(
    writer: &mut csv::Writer<W>,
    record: &ByteRecord,
) -> Result<()> {
    writer
        .write_byte_record(record)
        .map_err(|e| Error::Write {
            details: Cow::Owned(format!("csv write failed: {e}")),
        })
}
