//! Cell storage for loaded worksheets.

use super::coordinates::Coordinate;

/// A single cell: its address and its text value.
///
/// Delimited text carries no types or styles, so the value is always a
/// string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    coordinate: Coordinate,
    value: String,
}

impl Cell {
    /// Create an empty cell at `coordinate`
    pub fn new(coordinate: Coordinate) -> Self {
        Cell {
            coordinate,
            value: String::new(),
        }
    }

    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    /// 1-based row
    pub fn row(&self) -> u32 {
        self.coordinate.row()
    }

    /// 1-based column
    pub fn column(&self) -> u32 {
        self.coordinate.column()
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replace the cell value.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}
