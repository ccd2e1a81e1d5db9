//! Worksheet: cells keyed by coordinate.

use std::collections::HashMap;

use super::cell::Cell;
use super::coordinates::{CellRange, Coordinate};
use crate::common::Result;

/// A single sheet of a workbook.
///
/// Cells are stored sparsely and looked up by [`Coordinate`]; insertion
/// order carries no meaning.
#[derive(Debug, Clone, Default)]
pub struct Worksheet {
    title: String,
    cells: HashMap<Coordinate, Cell>,
}

impl Worksheet {
    /// Create an empty worksheet
    pub fn new(title: impl Into<String>) -> Self {
        Worksheet {
            title: title.into(),
            cells: HashMap::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Get the cell at `coordinate`, creating it if needed.
    pub fn get_cell_mut(&mut self, coordinate: Coordinate) -> &mut Cell {
        self.cells
            .entry(coordinate)
            .or_insert_with(|| Cell::new(coordinate))
    }

    /// Get an existing cell.
    pub fn cell(&self, coordinate: &Coordinate) -> Option<&Cell> {
        self.cells.get(coordinate)
    }

    /// Get an existing cell by A1 address (e.g., "B3").
    pub fn cell_by_coordinate(&self, address: &str) -> Result<Option<&Cell>> {
        let coordinate = Coordinate::parse(address)?;
        Ok(self.cells.get(&coordinate))
    }

    /// Value at (column, row), 1-based; `None` for a missing cell.
    pub fn cell_value(&self, column: u32, row: u32) -> Option<&str> {
        let coordinate = Coordinate::new(column, row).ok()?;
        self.cells.get(&coordinate).map(Cell::value)
    }

    /// Number of stored cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Highest row holding a cell, 0 for an empty sheet.
    pub fn highest_row(&self) -> u32 {
        self.cells.keys().map(Coordinate::row).max().unwrap_or(0)
    }

    /// Highest column holding a cell, 0 for an empty sheet.
    pub fn highest_column(&self) -> u32 {
        self.cells.keys().map(Coordinate::column).max().unwrap_or(0)
    }

    /// Smallest range covering every stored cell.
    pub fn dimension(&self) -> Option<CellRange> {
        let mut keys = self.cells.keys();
        let first = *keys.next()?;
        let (mut min, mut max) = ((first.column(), first.row()), (first.column(), first.row()));
        for coord in keys {
            min = (min.0.min(coord.column()), min.1.min(coord.row()));
            max = (max.0.max(coord.column()), max.1.max(coord.row()));
        }
        let start = Coordinate::new(min.0, min.1).ok()?;
        let end = Coordinate::new(max.0, max.1).ok()?;
        Some(CellRange::new(start, end))
    }

    /// Cells in row-major order.
    pub fn cells_sorted(&self) -> Vec<&Cell> {
        let mut cells: Vec<&Cell> = self.cells.values().collect();
        cells.sort_by_key(|cell| cell.coordinate());
        cells
    }

    /// Dense grid from A1 to the highest row/column; gaps are empty strings.
    ///
    /// Allocates `highest_row() * highest_column()` strings, so a single cell
    /// far from A1 makes this very large. Use [`Worksheet::rows_in`] to
    /// bound the grid.
    pub fn to_rows(&self) -> Vec<Vec<String>> {
        match self.dimension() {
            Some(dimension) => self.rows_in(CellRange::new(Coordinate::A1, dimension.end())),
            None => Vec::new(),
        }
    }

    /// Dense grid covering `range` only; gaps are empty strings.
    pub fn rows_in(&self, range: CellRange) -> Vec<Vec<String>> {
        let (width, height) = (range.width() as usize, range.height() as usize);
        let mut grid = vec![vec![String::new(); width]; height];
        for cell in self.cells.values() {
            if !range.contains(&cell.coordinate()) {
                continue;
            }
            let row = (cell.row() - range.start().row()) as usize;
            let column = (cell.column() - range.start().column()) as usize;
            grid[row][column] = cell.value().to_string();
        }
        grid
    }
}
