mod encode;
mod sink;

pub use sink::CsvSink;
