//! Grids with randomly placed walls.
//!
//! Every interior wall is present with probability 1/2 and the outer boundary is
//! always closed. Nothing guarantees that the two corners are connected.

use rand::Rng;

use crate::{
    error::MazeError,
    grid::{CellWalls, Dimensions, Grid, Side, Wall},
};

fn check_dimensions(dimensions: Dimensions) -> Result<(), MazeError> {
    if dimensions.rows <= 2 || dimensions.cols <= 2 {
        return Err(MazeError::MazeTooSmall {
            rows: dimensions.rows,
            cols: dimensions.cols,
        });
    }
    Ok(())
}

fn sample_wall(rng: &mut impl Rng) -> Wall {
    rng.gen_bool(0.5).into()
}

/// Samples all four walls of every cell on their own, then closes the boundary.
///
/// The two copies of a shared wall are drawn separately and usually disagree, so
/// the result does not satisfy the shared-wall invariant. Use
/// [`generate_random_maze`] for anything that queries connectivity.
pub fn generate_independent_walls(
    dimensions: Dimensions,
    rng: &mut impl Rng,
) -> Result<Grid, MazeError> {
    check_dimensions(dimensions)?;

    let mut rows = Vec::with_capacity(dimensions.rows);
    for _ in 0..dimensions.rows {
        let mut cells = Vec::with_capacity(dimensions.cols);
        for _ in 0..dimensions.cols {
            cells.push(CellWalls {
                top: sample_wall(rng),
                right: sample_wall(rng),
                bottom: sample_wall(rng),
                left: sample_wall(rng),
            });
        }
        rows.push(cells);
    }

    let mut grid = Grid::from_rows(rows);
    grid.close_boundary();
    Ok(grid)
}

/// Samples each interior wall once and writes it to both cells sharing it.
///
/// Cells are visited in row-major order; for each cell the wall towards the right
/// neighbour is drawn first, then the wall towards the neighbour below.
pub fn generate_random_maze(dimensions: Dimensions, rng: &mut impl Rng) -> Result<Grid, MazeError> {
    check_dimensions(dimensions)?;

    // Outer walls start closed and are never sampled.
    let mut grid = Grid::closed(dimensions.rows, dimensions.cols);

    for (row, col) in grid.positions() {
        if col + 1 < dimensions.cols {
            grid.set_shared_wall(row, col, Side::Right, sample_wall(rng))?;
        }
        if row + 1 < dimensions.rows {
            grid.set_shared_wall(row, col, Side::Bottom, sample_wall(rng))?;
        }
    }

    Ok(grid)
}
