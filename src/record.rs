//! Plain data records handed to displayers during a demo run.
//!
//! The grid carries its own dimensions and refuses out-of-range access,
//! so a displayer can never read past the buffer it was given.

use crate::constants::{DEMO_CELL_VALUE, DEMO_GRID_COLS, DEMO_GRID_ROWS, DEMO_RECORD_TAG};

/// Upper bound on grid cells, keeps a malformed plugin from requesting
/// an allocation the host cannot satisfy.
pub const MAX_GRID_CELLS: usize = 1 << 20;

/// A rectangular, row-major buffer of floats with validated access.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<f32>,
}

impl Grid {
    /// Creates a zero-filled grid. Dimensions must be non-zero and the
    /// total cell count must stay under [`MAX_GRID_CELLS`].
    pub fn new(rows: usize, cols: usize) -> Result<Self, GridError> {
        Self::filled(rows, cols, 0.0)
    }

    /// Creates a grid with every cell set to `value`.
    pub fn filled(rows: usize, cols: usize, value: f32) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::ZeroDimension { rows, cols });
        }
        let total = rows
            .checked_mul(cols)
            .filter(|&n| n <= MAX_GRID_CELLS)
            .ok_or(GridError::TooLarge { rows, cols })?;
        Ok(Self {
            rows,
            cols,
            cells: vec![value; total],
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Reads the cell at `(row, col)`, failing instead of reading out of range.
    pub fn get(&self, row: usize, col: usize) -> Result<f32, GridError> {
        let idx = self.index(row, col)?;
        Ok(self.cells[idx])
    }

    /// Writes the cell at `(row, col)`, failing instead of writing out of range.
    pub fn set(&mut self, row: usize, col: usize, value: f32) -> Result<(), GridError> {
        let idx = self.index(row, col)?;
        self.cells[idx] = value;
        Ok(())
    }

    fn index(&self, row: usize, col: usize) -> Result<usize, GridError> {
        if row >= self.rows || col >= self.cols {
            return Err(GridError::OutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(row * self.cols + col)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    ZeroDimension { rows: usize, cols: usize },
    TooLarge { rows: usize, cols: usize },
    OutOfBounds { row: usize, col: usize, rows: usize, cols: usize },
}

impl std::fmt::Display for GridError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GridError::ZeroDimension { rows, cols } => {
                write!(f, "grid dimensions must be non-zero (got {}x{})", rows, cols)
            }
            GridError::TooLarge { rows, cols } => write!(
                f,
                "grid {}x{} exceeds the maximum of {} cells",
                rows, cols, MAX_GRID_CELLS
            ),
            GridError::OutOfBounds { row, col, rows, cols } => write!(
                f,
                "cell ({}, {}) is outside the {}x{} grid",
                row, col, rows, cols
            ),
        }
    }
}

impl std::error::Error for GridError {}

/// The record forwarded to every displayer alongside a message.
///
/// `label` mirrors the optional byte-string slot of the original aggregate;
/// the demo leaves it empty.
#[derive(Debug, Clone, PartialEq)]
pub struct PodRecord {
    pub tag: i32,
    pub label: Vec<u8>,
    pub grid: Grid,
}

impl PodRecord {
    pub fn new(tag: i32, label: Vec<u8>, grid: Grid) -> Self {
        Self { tag, label, grid }
    }

    /// The record the demo driver hands out: tag 1 and a 1x1 grid
    /// holding 101.0.
    pub fn demo() -> Self {
        Self {
            tag: DEMO_RECORD_TAG,
            label: Vec::new(),
            grid: Grid {
                rows: DEMO_GRID_ROWS,
                cols: DEMO_GRID_COLS,
                cells: vec![DEMO_CELL_VALUE; DEMO_GRID_ROWS * DEMO_GRID_COLS],
            },
        }
    }
}
