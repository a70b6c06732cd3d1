use std::borrow::Cow;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use csv::{ReaderBuilder, StringRecord};

use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::logger::log_info;
use crate::parser::{FieldIssues, RecordDecoder};

/// Configures how a mission source is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadOptions {
    delimiter: u8,
    skip_rows: Option<u64>,
    max_rows: Option<u64>,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl ReadOptions {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            delimiter: b',',
            skip_rows: None,
            max_rows: None,
        }
    }

    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets the delimiter from a character, as typed on a command line.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOptions`] for characters outside ASCII, which
    /// cannot be a single-byte delimiter.
    pub fn with_delimiter_char(self, delimiter: char) -> Result<Self> {
        match u8::try_from(delimiter) {
            Ok(byte) if byte.is_ascii() => Ok(self.with_delimiter(byte)),
            _ => Err(Error::InvalidOptions {
                details: Cow::Owned(format!(
                    "delimiter {delimiter:?} must be a single ASCII character"
                )),
            }),
        }
    }

    #[must_use]
    pub const fn with_skip_rows(mut self, count: u64) -> Self {
        self.skip_rows = Some(count);
        self
    }

    #[must_use]
    pub const fn with_max_rows(mut self, count: u64) -> Self {
        self.max_rows = Some(count);
        self
    }

    #[must_use]
    pub const fn delimiter(&self) -> u8 {
        self.delimiter
    }

    fn skip_rows(&self) -> u64 {
        self.skip_rows.unwrap_or(0)
    }

    const fn max_rows(&self) -> Option<u64> {
        self.max_rows
    }

    fn validate(&self) -> Result<()> {
        if matches!(self.delimiter, b'"' | b'\n' | b'\r') {
            return Err(Error::InvalidOptions {
                details: Cow::Owned(format!(
                    "delimiter {:?} cannot separate fields",
                    char::from(self.delimiter)
                )),
            });
        }
        Ok(())
    }
}

/// Counts reported after a load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub rows: u64,
    pub invalid_dates: u64,
    pub invalid_prices: u64,
    pub missing_prices: u64,
}

impl LoadSummary {
    const fn from_issues(rows: u64, issues: FieldIssues) -> Self {
        Self {
            rows,
            invalid_dates: issues.invalid_dates,
            invalid_prices: issues.invalid_prices,
            missing_prices: issues.missing_prices,
        }
    }
}

/// A delimited mission source that has not been read yet.
pub struct MissionsFile<R: Read> {
    reader: R,
    options: ReadOptions,
}

impl MissionsFile<File> {
    /// Opens a mission table on disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Ok(Self::from_reader(file))
    }
}

impl<R: Read> MissionsFile<R> {
    #[must_use]
    pub fn from_reader(reader: R) -> Self {
        Self {
            reader,
            options: ReadOptions::new(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: ReadOptions) -> Self {
        self.options = options;
        self
    }

    /// Reads every record into an immutable [`Dataset`].
    ///
    /// # Errors
    ///
    /// Fails on I/O errors, malformed CSV framing, an invalid delimiter, or a
    /// header missing one of the mission columns. Unparseable dates and prices
    /// are not errors.
    pub fn load(self) -> Result<(Dataset, LoadSummary)> {
        self.options.validate()?;
        let mut csv = ReaderBuilder::new()
            .delimiter(self.options.delimiter())
            .has_headers(true)
            .from_reader(self.reader);

        let headers = csv.headers()?.clone();
        let decoder = RecordDecoder::from_headers(&headers)?;

        let skip = self.options.skip_rows();
        let limit = self.options.max_rows();
        let mut issues = FieldIssues::default();
        let mut missions = Vec::new();
        let mut record = StringRecord::new();
        let mut row: u64 = 0;

        while csv.read_record(&mut record)? {
            row += 1;
            if row <= skip {
                continue;
            }
            if limit.is_some_and(|max| missions.len() as u64 >= max) {
                break;
            }
            missions.push(decoder.decode(&record, row, &mut issues));
        }

        let summary = LoadSummary::from_issues(missions.len() as u64, issues);
        log_info(&format!(
            "loaded {} missions ({} unparseable dates, {} unparseable prices, {} missing prices)",
            summary.rows, summary.invalid_dates, summary.invalid_prices, summary.missing_prices
        ));
        Ok((Dataset::new(missions), summary))
    }
}

/// Loads a dataset once and hands out the same table afterwards.
///
/// The first call to [`SharedDataset::get`] reads the source while holding a
/// lock, so concurrent first callers never trigger duplicate loads. A failed
/// load is not cached; the next call retries.
#[derive(Debug)]
pub struct SharedDataset {
    path: PathBuf,
    options: ReadOptions,
    slot: Mutex<Option<Arc<Dataset>>>,
}

impl SharedDataset {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_options(path, ReadOptions::new())
    }

    #[must_use]
    pub fn with_options(path: impl Into<PathBuf>, options: ReadOptions) -> Self {
        Self {
            path: path.into(),
            options,
            slot: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the loaded dataset, reading the source on first use.
    ///
    /// # Errors
    ///
    /// Propagates any error raised while loading the source.
    pub fn get(&self) -> Result<Arc<Dataset>> {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(dataset) = slot.as_ref() {
            return Ok(Arc::clone(dataset));
        }
        let (dataset, _summary) = MissionsFile::open(&self.path)?
            .with_options(self.options.clone())
            .load()?;
        let dataset = Arc::new(dataset);
        *slot = Some(Arc::clone(&dataset));
        Ok(dataset)
    }

    /// True once a load has succeeded.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}
