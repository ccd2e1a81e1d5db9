//! CSV reader: drives decoding, line assembly and tokenizing into a workbook.

use std::borrow::Cow;
use std::fmt;
use std::fs::File;
use std::io::{Cursor, Read};
use std::path::Path;
use std::sync::Arc;

use log::{debug, warn};

use super::config::CsvConfig;
use super::lines::LineReader;
use super::parser::CsvTokenizer;
use crate::common::detection::is_text_file;
use crate::common::encoding::{EncodingNormalizer, normalize_newlines};
use crate::common::{Error, Result};
use crate::sheet::coordinates::{Coordinate, column_name};
use crate::sheet::workbook::Workbook;
use crate::sheet::worksheet::Worksheet;

/// Decides which cells are written while loading.
pub trait ReadFilter: Send + Sync {
    /// Returns `true` if the cell at `column` (letters) and 1-based `row`
    /// of `worksheet` should be loaded.
    fn read_cell(&self, column: &str, row: u32, worksheet: &str) -> bool;
}

/// Filter that loads every cell.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultReadFilter;

impl ReadFilter for DefaultReadFilter {
    fn read_cell(&self, _column: &str, _row: u32, _worksheet: &str) -> bool {
        true
    }
}

/// Sheet shape reported by [`CsvReader::list_worksheet_info`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorksheetInfo {
    pub worksheet_name: String,
    /// Number of records
    pub total_rows: u32,
    /// Widest record, in fields
    pub total_columns: u32,
    /// Letters of the last column, `None` when there are no fields
    pub last_column_name: Option<&'static str>,
}

/// Reader for CSV and CSV-like delimited text.
///
/// Each load uses its own stream and produces a fresh [`Workbook`] with a
/// single sheet; nothing is shared between loads.
///
/// # Examples
///
/// ```
/// use longan::sheet::text::{CsvConfig, CsvReader};
///
/// let reader = CsvReader::new(CsvConfig::default());
/// let workbook = reader.load_from_bytes(b"a,b,c\n1,2,3\n")?;
/// let sheet = workbook.sheet(0).unwrap();
/// assert_eq!(sheet.cell_by_coordinate("C2")?.unwrap().value(), "3");
/// # Ok::<(), longan::Error>(())
/// ```
#[derive(Clone)]
pub struct CsvReader {
    config: CsvConfig,
    normalizer: EncodingNormalizer,
    filter: Arc<dyn ReadFilter>,
}

impl fmt::Debug for CsvReader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CsvReader")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for CsvReader {
    fn default() -> Self {
        Self::new(CsvConfig::default())
    }
}

impl CsvReader {
    /// Create a reader with the given configuration
    pub fn new(config: CsvConfig) -> Self {
        let normalizer = EncodingNormalizer::new(config.codecs.clone());
        CsvReader {
            config,
            normalizer,
            filter: Arc::new(DefaultReadFilter),
        }
    }

    /// Only load cells accepted by `filter`
    pub fn with_read_filter(mut self, filter: impl ReadFilter + 'static) -> Self {
        self.filter = Arc::new(filter);
        self
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &CsvConfig {
        &self.config
    }

    /// Returns `true` if `path` plausibly holds delimited text.
    ///
    /// Never fails; a missing file yields `false`.
    pub fn can_read<P: AsRef<Path>>(&self, path: P) -> bool {
        is_text_file(path)
    }

    /// Load the file at `path` into a new workbook.
    ///
    /// # Errors
    ///
    /// [`Error::Read`] when the file cannot be opened or read,
    /// [`Error::Encoding`] when the configured encoding is unsupported,
    /// [`Error::InvalidFormat`] for an invalid delimiter/enclosure.
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<Workbook> {
        let path = path.as_ref();
        debug!("loading CSV from {}", path.display());
        let bytes = read_file(path)?;
        self.load_from_bytes(&bytes)
    }

    /// Load from any byte stream.
    pub fn load_from_reader<R: Read>(&self, mut reader: R) -> Result<Workbook> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        self.load_from_bytes(&bytes)
    }

    /// Load from an in-memory buffer.
    pub fn load_from_bytes(&self, bytes: &[u8]) -> Result<Workbook> {
        let mut workbook = Workbook::new();
        let sheet = workbook.create_sheet();
        let rows = self.fill_sheet(bytes, sheet)?;
        debug!("loaded {rows} row(s), {} cell(s)", sheet.cell_count());
        Ok(workbook)
    }

    /// Decode `bytes` to UTF-8 text with `\n`-only line breaks.
    fn decode_text(&self, bytes: &[u8]) -> Result<String> {
        let text = self
            .normalizer
            .decode_stream(bytes, self.config.input_encoding.as_deref())?;
        let normalized = match normalize_newlines(&text) {
            Cow::Owned(normalized) => Some(normalized),
            Cow::Borrowed(_) => None,
        };
        Ok(normalized.unwrap_or(text))
    }

    fn fill_sheet(&self, bytes: &[u8], sheet: &mut Worksheet) -> Result<u32> {
        let (delimiter, enclosure) = self.config.validate()?;
        let text = self.decode_text(bytes)?;
        let tokenizer = CsvTokenizer::new(delimiter, enclosure);

        let mut row = 0u32;
        for line in LineReader::new(Cursor::new(text.as_bytes()), enclosure) {
            let line = line?;
            row = row.saturating_add(1);
            for (index, value) in tokenizer.tokenize(&line.text).into_iter().enumerate() {
                if value.is_empty() {
                    continue;
                }
                let coordinate = u32::try_from(index + 1)
                    .ok()
                    .and_then(|column| Coordinate::new(column, row).ok());
                let Some(coordinate) = coordinate else {
                    warn!(
                        "record at line {} exceeds the addressable grid; remaining fields dropped",
                        line.start_line
                    );
                    break;
                };
                if !self
                    .filter
                    .read_cell(coordinate.column_name(), row, sheet.title())
                {
                    continue;
                }
                let value = self.normalizer.check_string(&value);
                sheet.get_cell_mut(coordinate).set_value(value);
            }
        }
        Ok(row)
    }

    /// Report the sheet's shape without building cells.
    pub fn list_worksheet_info<P: AsRef<Path>>(&self, path: P) -> Result<WorksheetInfo> {
        let bytes = read_file(path.as_ref())?;
        let (delimiter, enclosure) = self.config.validate()?;
        let text = self.decode_text(&bytes)?;
        let tokenizer = CsvTokenizer::new(delimiter, enclosure);

        let (mut total_rows, mut total_columns) = (0u32, 0u32);
        for line in LineReader::new(Cursor::new(text.as_bytes()), enclosure) {
            let line = line?;
            total_rows = total_rows.saturating_add(1);
            let fields = u32::try_from(tokenizer.tokenize(&line.text).len()).unwrap_or(u32::MAX);
            total_columns = total_columns.max(fields);
        }

        Ok(WorksheetInfo {
            worksheet_name: "Sheet1".to_string(),
            total_rows,
            total_columns,
            last_column_name: column_name(total_columns).ok(),
        })
    }
}

/// Read a whole file; the handle is closed before returning on every path.
fn read_file(path: &Path) -> Result<Vec<u8>> {
    let mut file = File::open(path).map_err(|e| Error::read(path, e))?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)
        .map_err(|e| Error::read(path, e))?;
    Ok(bytes)
}
