//! Perfect mazes: the open passages form a spanning tree over all cells.
//!
//! Growth starts from cell `(0, 0)` with a frontier holding the walls of visited
//! cells. A frontier wall is picked uniformly at random and removed; if the cell
//! behind it has not been visited yet, the wall is opened on both sides and the new
//! cell contributes its own walls to the frontier. Walls leading back into the
//! visited region are dropped untouched, which is what keeps the result free of
//! cycles.

use rand::Rng;

use crate::grid::{Dimensions, Grid, Side, Wall};

/// A wall on `side` of the cell at (`row`, `col`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct FrontierWall {
    row: usize,
    col: usize,
    side: Side,
}

struct Carver {
    grid: Grid,
    visited: Vec<Vec<bool>>,
    frontier: Vec<FrontierWall>,
}

impl Carver {
    fn new(dimensions: Dimensions) -> Self {
        Self {
            grid: Grid::closed(dimensions.rows, dimensions.cols),
            visited: vec![vec![false; dimensions.cols]; dimensions.rows],
            frontier: Vec::new(),
        }
    }

    fn visit(&mut self, row: usize, col: usize) {
        self.visited[row][col] = true;
        for side in Side::ALL {
            if self.grid.neighbor(row, col, side).is_some() {
                self.frontier.push(FrontierWall { row, col, side });
            }
        }
    }

    fn carve(mut self, rng: &mut impl Rng) -> Grid {
        self.visit(0, 0);

        while !self.frontier.is_empty() {
            let index = rng.gen_range(0..self.frontier.len());
            let wall = self.frontier.swap_remove(index);

            let Some((n_row, n_col)) = self.grid.neighbor(wall.row, wall.col, wall.side) else {
                continue;
            };
            if self.visited[n_row][n_col] {
                continue;
            }

            // Both copies of the wall, in one step.
            self.grid.cell_mut(wall.row, wall.col).set(wall.side, Wall::Open);
            self.grid.cell_mut(n_row, n_col).set(wall.side.opposite(), Wall::Open);

            self.visit(n_row, n_col);
        }

        self.grid
    }
}

/// Generates a `rows` x `cols` perfect maze. Returns an empty grid if either
/// dimension is zero.
pub fn generate_perfect_grid(dimensions: Dimensions, rng: &mut impl Rng) -> Grid {
    if dimensions.rows == 0 || dimensions.cols == 0 {
        return Grid::default();
    }

    Carver::new(dimensions).carve(rng)
}

/// Generates an `n` x `n` perfect maze.
///
/// There is no meaningful maze for `n <= 1`; those sizes produce an empty grid.
pub fn generate_perfect_maze(n: usize, rng: &mut impl Rng) -> Grid {
    if n <= 1 {
        return Grid::default();
    }

    generate_perfect_grid(Dimensions::square(n), rng)
}
