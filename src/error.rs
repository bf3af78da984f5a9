//! Error type shared by the union-find, the grid model and the generators.

use std::fmt;

use crate::grid::Side;

/// Errors raised by construction and validation.
///
/// Query-time boundary conditions (an out-of-range position handed to a
/// connectivity check, an empty grid) are not errors; those queries answer `false`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MazeError {
    /// A node index outside the union-find universe `[0, size)`.
    IndexOutOfRange { index: usize, size: usize },

    /// A cell coordinate outside the grid.
    CellOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// Requested dimensions are too small for the chosen generator.
    MazeTooSmall { rows: usize, cols: usize },

    /// The side of the cell lies on the outer boundary, there is no cell across it.
    NoNeighbor { row: usize, col: usize, side: Side },

    /// The grid has no rows, or its first row has no cells.
    EmptyGrid,

    /// A row whose length differs from the first row.
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Two adjacent cells disagree about the wall between them.
    /// `side` is the side of (`row`, `col`) facing the neighbour.
    SharedWallMismatch { row: usize, col: usize, side: Side },

    /// An outward-facing wall on the grid boundary is open.
    OpenBoundary { row: usize, col: usize, side: Side },
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MazeError::IndexOutOfRange { index, size } => {
                write!(f, "index {index} out of range for a universe of size {size}")
            }
            MazeError::CellOutOfBounds {
                row,
                col,
                rows,
                cols,
            } => write!(f, "cell ({row}, {col}) is outside a {rows}x{cols} grid"),
            MazeError::MazeTooSmall { rows, cols } => {
                write!(f, "a {rows}x{cols} maze is too small to be generated")
            }
            MazeError::NoNeighbor { row, col, side } => {
                write!(f, "cell ({row}, {col}) has no neighbour on its {side} side")
            }
            MazeError::EmptyGrid => write!(f, "grid is empty"),
            MazeError::RaggedRow {
                row,
                expected,
                found,
            } => write!(f, "row {row} has {found} cells, expected {expected}"),
            MazeError::SharedWallMismatch { row, col, side } => write!(
                f,
                "cell ({row}, {col}) and its {side} neighbour disagree about their shared wall"
            ),
            MazeError::OpenBoundary { row, col, side } => {
                write!(f, "boundary cell ({row}, {col}) has an open {side} wall")
            }
        }
    }
}

impl std::error::Error for MazeError {}
