//! File format type enumeration.

/// Spreadsheet input formats a reader exists for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileFormat {
    /// Comma-separated values and CSV-like delimited text (.csv, .txt)
    Csv,
}

impl FileFormat {
    /// Human-readable name used in diagnostics.
    pub const fn name(&self) -> &'static str {
        match self {
            FileFormat::Csv => "CSV",
        }
    }
}
