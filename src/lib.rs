//! Longan - CSV ingestion into an in-memory spreadsheet model
//!
//! This library loads comma-separated and CSV-like delimited text into a
//! workbook of A1-addressed cells, taking care of the parts real-world files
//! get wrong.
//!
//! # Features
//!
//! - **Format sniffing**: accept `.csv`/`.tsv`/`.txt` by extension, anything
//!   else by the printable share of its first kilobyte
//! - **Encoding normalization**: BOM detection (UTF-8/16/32), configurable
//!   input encoding and an explicit, ordered list of codec backends
//! - **Multi-line records**: enclosed fields spanning physical lines, plus
//!   backslash-escaped enclosures as written by some spreadsheet tools
//! - **Coordinate codec**: bijective base-26 column names from `A` to `ZZZ`
//!
//! # Example - Reading a CSV file
//!
//! ```no_run
//! use longan::sheet::text::{CsvConfig, CsvReader};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let reader = CsvReader::new(CsvConfig::default());
//! let workbook = reader.load("people.csv")?;
//! let sheet = workbook.sheet(0).ok_or("no sheet")?;
//!
//! if let Some(cell) = sheet.cell_by_coordinate("B2")? {
//!     println!("B2 = {}", cell.value());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Coordinates
//!
//! ```
//! use longan::sheet::{Coordinate, column_name, column_number};
//!
//! assert_eq!(column_name(28)?, "AB");
//! assert_eq!(column_number("ZZZ")?, 18278);
//!
//! let coordinate: Coordinate = "C7".parse()?;
//! assert_eq!((coordinate.column(), coordinate.row()), (3, 7));
//! # Ok::<(), longan::Error>(())
//! ```
//!
//! # Example - Configuration file
//!
//! ```
//! use longan::sheet::text::{CsvConfig, CsvReader};
//!
//! let config = CsvConfig::from_yaml_str("delimiter: ';'\ncodecs: [std]\n")?;
//! let workbook = CsvReader::new(config).load_from_bytes(b"a;b\n")?;
//! assert_eq!(workbook.sheet(0).map(|s| s.cell_count()), Some(2));
//! # Ok::<(), longan::Error>(())
//! ```

/// Errors, BOM probing, encoding normalization and format detection
pub mod common;

/// Spreadsheet model (workbook, worksheet, cell, coordinates) and readers
pub mod sheet;

// Re-export commonly used types for convenience
pub use common::{Error, Result};
pub use sheet::text::{CsvConfig, CsvReader};
pub use sheet::{Cell, CellRange, Coordinate, ReaderSelector, SpreadsheetReader, Workbook, Worksheet};
