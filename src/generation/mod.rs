//! Maze generators.
//!
//! The free functions in [`random`] and [`perfect`] are the primary interface. The
//! [`MazeGenerator`] trait wraps them behind one object-safe seam so the command line
//! and the benchmark can pick a generator at run time.

pub mod perfect;
pub mod random;

use rand::RngCore;

use crate::{error::MazeError, grid::{Dimensions, Grid}};

pub use perfect::{generate_perfect_grid, generate_perfect_maze};
pub use random::{generate_independent_walls, generate_random_maze};

pub trait MazeGenerator: Sync {
    fn name(&self) -> &'static str;

    fn generate(&self, dimensions: Dimensions, rng: &mut dyn RngCore) -> Result<Grid, MazeError>;
}

/// Random walls sampled per cell, without keeping shared walls in agreement.
#[derive(Clone, Copy, Debug, Default)]
pub struct IndependentWalls;

/// Random walls with both copies of every shared wall kept equal.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomWalls;

/// Spanning-tree maze grown from a random frontier.
#[derive(Clone, Copy, Debug, Default)]
pub struct PerfectMaze;

impl MazeGenerator for IndependentWalls {
    fn name(&self) -> &'static str {
        "independent"
    }

    fn generate(
        &self,
        dimensions: Dimensions,
        mut rng: &mut dyn RngCore,
    ) -> Result<Grid, MazeError> {
        generate_independent_walls(dimensions, &mut rng)
    }
}

impl MazeGenerator for RandomWalls {
    fn name(&self) -> &'static str {
        "random"
    }

    fn generate(
        &self,
        dimensions: Dimensions,
        mut rng: &mut dyn RngCore,
    ) -> Result<Grid, MazeError> {
        generate_random_maze(dimensions, &mut rng)
    }
}

impl MazeGenerator for PerfectMaze {
    fn name(&self) -> &'static str {
        "perfect"
    }

    /// Unlike [`generate_perfect_maze`], degenerate dimensions are an error here.
    fn generate(
        &self,
        dimensions: Dimensions,
        mut rng: &mut dyn RngCore,
    ) -> Result<Grid, MazeError> {
        if dimensions.rows <= 1 || dimensions.cols <= 1 {
            return Err(MazeError::MazeTooSmall {
                rows: dimensions.rows,
                cols: dimensions.cols,
            });
        }
        Ok(generate_perfect_grid(dimensions, &mut rng))
    }
}
