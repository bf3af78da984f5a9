//! Grid mazes: generation and connectivity queries built on a gated union-find.

pub mod benchmark;
pub mod connectivity;
pub mod did;
pub mod display;
pub mod error;
pub mod generation;
pub mod grid;
pub mod union_find;
pub mod utils;

pub use connectivity::{BoolMaze, Reachability, is_connected, is_connected2};
pub use error::MazeError;
pub use generation::{generate_perfect_maze, generate_random_maze};
pub use grid::{CellWalls, Dimensions, Grid, Pos, Side, Wall};
pub use union_find::DisjointSet;
