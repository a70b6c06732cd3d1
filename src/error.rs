use std::borrow::Cow;
use std::io;

/// Result type used across the mission loader and analytics.
pub type Result<T> = std::result::Result<T, Error>;

/// Structural failures surfaced while loading or exporting missions.
///
/// Field-level problems (an unparseable date or price) never show up here;
/// they are recovered by nulling the field.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O failure while reading the source or writing an export.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// The delimited source could not be decoded.
    #[error("malformed CSV input: {details}")]
    Csv { details: Cow<'static, str> },

    /// The header row lacks a column every mission record needs.
    #[error("required column '{column}' not found in header")]
    MissingColumn { column: Cow<'static, str> },

    /// Reader or sink options that cannot be honoured.
    #[error("invalid options: {details}")]
    InvalidOptions { details: Cow<'static, str> },

    /// Failure while emitting rows through a sink.
    #[error("write failed: {details}")]
    Write { details: Cow<'static, str> },
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        if err.is_io_error() {
            if let csv::ErrorKind::Io(io_err) = err.into_kind() {
                return Self::Io(io_err);
            }
            return Self::Csv {
                details: Cow::from("unknown I/O failure"),
            };
        }
        Self::Csv {
            details: Cow::Owned(err.to_string()),
        }
    }
}
