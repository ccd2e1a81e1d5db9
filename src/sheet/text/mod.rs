//! Delimited text (CSV, TSV and CSV-like) support.
//!
//! Loading runs a strict sequential pipeline:
//!
//! 1. the whole input is decoded to UTF-8 ([`crate::common::encoding`]),
//!    honouring a BOM or the configured input encoding;
//! 2. [`LineReader`] reassembles physical lines into records, joining lines
//!    while an enclosure is open;
//! 3. [`CsvTokenizer`] splits each record into unescaped fields;
//! 4. [`CsvReader`] writes every non-empty field to the cell at
//!    (field index + 1, record number).
//!
//! # Example
//!
//! ```rust,no_run
//! use longan::sheet::text::{CsvConfig, CsvReader};
//!
//! let reader = CsvReader::new(CsvConfig::semicolon().with_input_encoding("windows-1252"));
//! if reader.can_read("export.txt") {
//!     let workbook = reader.load("export.txt")?;
//!     let sheet = workbook.sheet(0).unwrap();
//!     for cell in sheet.cells_sorted() {
//!         println!("{} = {}", cell.coordinate(), cell.value());
//!     }
//! }
//! # Ok::<(), longan::Error>(())
//! ```

pub mod config;
pub mod lines;
pub mod parser;
pub mod reader;

pub use config::CsvConfig;
pub use lines::{LineReader, LogicalLine};
pub use parser::CsvTokenizer;
pub use reader::{CsvReader, DefaultReadFilter, ReadFilter, WorksheetInfo};
