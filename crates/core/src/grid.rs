//! Validated dungeon grids.
//!
//! A [`Grid`] can only be built through validation, so everything downstream
//! (solver, canonical keys) may assume a non-empty rectangular matrix.

use crate::Error;

/// A non-empty rectangular dungeon grid.
///
/// Negative cells damage the traveler, positive cells heal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Vec<i32>>,
    cols: usize,
}

impl Grid {
    /// Validate raw rows into a grid.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` if the grid is empty, the first row is
    /// empty, or row lengths are inconsistent.
    pub fn new(cells: Vec<Vec<i32>>) -> Result<Self, Error> {
        let Some(first) = cells.first() else {
            return Err(Error::InvalidInput("Dungeon array cannot be null or empty".into()));
        };

        let cols = first.len();
        if cols == 0 {
            return Err(Error::InvalidInput("Dungeon array cannot have empty rows".into()));
        }

        if cells.iter().skip(1).any(|row| row.len() != cols) {
            return Err(Error::InvalidInput("All rows in dungeon must have the same length".into()));
        }

        Ok(Self { cells, cols })
    }

    /// Validate raw rows and additionally bound the total cell count.
    ///
    /// # Errors
    ///
    /// Same as [`Grid::new`], plus `Error::InvalidInput` when the grid holds
    /// more than `max_cells` cells.
    pub fn with_limit(cells: Vec<Vec<i32>>, max_cells: usize) -> Result<Self, Error> {
        let grid = Self::new(cells)?;
        let total = grid.rows().saturating_mul(grid.cols());
        if total > max_cells {
            return Err(Error::InvalidInput(format!(
                "Dungeon has {total} cells, exceeding the limit of {max_cells}"
            )));
        }
        Ok(grid)
    }

    /// Number of rows (m).
    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    /// Number of columns (n).
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Cell value at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if `row >= self.rows()` or `col >= self.cols()`.
    pub fn at(&self, row: usize, col: usize) -> i32 {
        self.cells[row][col]
    }

    /// Borrow the cells row by row.
    pub fn as_rows(&self) -> &[Vec<i32>] {
        &self.cells
    }
}

impl TryFrom<Vec<Vec<i32>>> for Grid {
    type Error = Error;

    fn try_from(cells: Vec<Vec<i32>>) -> Result<Self, Self::Error> {
        Self::new(cells)
    }
}
