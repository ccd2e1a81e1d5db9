//! Reader family: pick the first reader that accepts an input and load it.

use std::path::Path;

use log::debug;

use super::text::{CsvConfig, CsvReader};
use super::workbook::Workbook;
use crate::common::{Error, FileFormat, Result};

/// A spreadsheet reader for one input format.
///
/// New formats become new variants; callers dispatch through
/// [`SpreadsheetReader::can_read`] and [`SpreadsheetReader::load`].
#[derive(Debug, Clone)]
pub enum SpreadsheetReader {
    Csv(CsvReader),
}

impl SpreadsheetReader {
    /// The format this reader handles.
    pub fn format(&self) -> FileFormat {
        match self {
            SpreadsheetReader::Csv(_) => FileFormat::Csv,
        }
    }

    /// Returns `true` if this reader accepts the file at `path`.
    pub fn can_read<P: AsRef<Path>>(&self, path: P) -> bool {
        match self {
            SpreadsheetReader::Csv(reader) => reader.can_read(path),
        }
    }

    /// Load the file at `path` into a new workbook.
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<Workbook> {
        match self {
            SpreadsheetReader::Csv(reader) => reader.load(path),
        }
    }
}

impl From<CsvReader> for SpreadsheetReader {
    fn from(reader: CsvReader) -> Self {
        SpreadsheetReader::Csv(reader)
    }
}

/// Ordered set of readers, consulted first to last.
///
/// # Examples
///
/// ```rust,no_run
/// use longan::sheet::ReaderSelector;
///
/// let workbook = ReaderSelector::default().load("data.csv")?;
/// println!("{} sheet(s)", workbook.sheet_count());
/// # Ok::<(), longan::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct ReaderSelector {
    readers: Vec<SpreadsheetReader>,
}

impl Default for ReaderSelector {
    fn default() -> Self {
        Self::new(vec![SpreadsheetReader::Csv(CsvReader::new(CsvConfig::default()))])
    }
}

impl ReaderSelector {
    /// Create a selector trying `readers` in the given order
    pub fn new(readers: Vec<SpreadsheetReader>) -> Self {
        ReaderSelector { readers }
    }

    pub fn readers(&self) -> &[SpreadsheetReader] {
        &self.readers
    }

    /// First reader that accepts `path`.
    pub fn select<P: AsRef<Path>>(&self, path: P) -> Option<&SpreadsheetReader> {
        let path = path.as_ref();
        self.readers.iter().find(|reader| reader.can_read(path))
    }

    /// Load `path` with the first reader that accepts it.
    ///
    /// # Errors
    ///
    /// [`Error::Unsupported`] when no reader accepts the file, otherwise
    /// whatever the chosen reader reports.
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<Workbook> {
        let path = path.as_ref();
        let reader = self.select(path).ok_or_else(|| {
            Error::Unsupported(format!("no reader accepts '{}'", path.display()))
        })?;
        debug!("reading {} as {}", path.display(), reader.format().name());
        reader.load(path)
    }
}
