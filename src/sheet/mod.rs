//! In-memory spreadsheet model and the readers that fill it.
//!
//! A reader turns an input file into a [`Workbook`] of [`Worksheet`]s whose
//! cells are addressed by [`Coordinate`] (`A1`-style, 1-based).
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use longan::sheet::ReaderSelector;
//!
//! // Pick a reader for the file and load it
//! let workbook = ReaderSelector::default().load("data.csv")?;
//!
//! for sheet in workbook.sheets() {
//!     for row in sheet.to_rows() {
//!         println!("{}", row.join(" | "));
//!     }
//! }
//! # Ok::<(), longan::Error>(())
//! ```

// Submodule declarations
pub mod cell;
pub mod coordinates;
pub mod reader;
pub mod text;
mod workbook;
mod worksheet;

// Re-exports
pub use cell::Cell;
pub use coordinates::{CellRange, Coordinate, MAX_COLUMN, MAX_ROW, column_name, column_number};
pub use reader::{ReaderSelector, SpreadsheetReader};
pub use workbook::Workbook;
pub use worksheet::Worksheet;
