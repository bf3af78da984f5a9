//! Reachability queries over mazes, answered with a [`DisjointSet`].
//!
//! Two flavours exist. [`is_connected`] works on the coarse boolean representation
//! where whole cells are walls. [`is_connected2`] and [`Reachability`] work on
//! [`Grid`]s, where walls sit between cells and a [`WallGate`] decides which
//! neighbouring cells may be merged.
//!
//! Positions outside the maze and empty mazes are ordinary inputs here: the answer
//! is `false`, never an error.

use itertools::Itertools;

use crate::{
    error::MazeError,
    grid::{Grid, Pos, flatten_index, unflatten_index},
    union_find::{DisjointSet, MergeGate, NodeId},
};

/// Coarse maze: `0` is an open cell, anything else is a wall.
pub type BoolMaze = Vec<Vec<u8>>;

/// Checks whether the top-left and bottom-right cells of a boolean maze are connected
/// through open cells (4-neighbourhood).
///
/// Rows may have different lengths; missing cells count as walls.
pub fn is_connected(maze: &[Vec<u8>]) -> bool {
    corners_connected(maze).unwrap_or(false)
}

fn corners_connected(maze: &[Vec<u8>]) -> Result<bool, MazeError> {
    let rows = maze.len();
    let cols = maze.first().map_or(0, Vec::len);
    if rows == 0 || cols == 0 {
        return Ok(false);
    }

    let open = |row: usize, col: usize| maze.get(row).and_then(|cells| cells.get(col)) == Some(&0);
    if !open(0, 0) || !open(rows - 1, cols - 1) {
        return Ok(false);
    }

    let mut sets = DisjointSet::with_size(rows * cols);
    for (row, col) in (0..rows).cartesian_product(0..cols) {
        if !open(row, col) {
            continue;
        }

        let here = flatten_index(row, col, cols);
        if col + 1 < cols && open(row, col + 1) {
            sets.union(here, flatten_index(row, col + 1, cols))?;
        }
        if row + 1 < rows && open(row + 1, col) {
            sets.union(here, flatten_index(row + 1, col, cols))?;
        }
    }

    sets.connected(0, flatten_index(rows - 1, cols - 1, cols))
}

/// Allows a merge only between two adjacent cells with the wall between them open
/// on both sides.
///
/// Node indices are row-major flattenings of `(row, col)` using the grid's column
/// count. In a 1x1 grid every pair is accepted.
#[derive(Clone, Copy, Debug)]
pub struct WallGate<'g> {
    grid: &'g Grid,
    cols: usize,
}

impl<'g> WallGate<'g> {
    pub fn new(grid: &'g Grid) -> Self {
        Self {
            grid,
            cols: grid.cols(),
        }
    }
}

impl MergeGate for WallGate<'_> {
    fn may_merge(&self, x: NodeId, y: NodeId) -> bool {
        if self.cols == 0 {
            return false;
        }

        let (row_x, col_x) = unflatten_index(x, self.cols);
        let (row_y, col_y) = unflatten_index(y, self.cols);
        let (Some(cell_x), Some(cell_y)) =
            (self.grid.cell(row_x, col_x), self.grid.cell(row_y, col_y))
        else {
            return false;
        };

        if row_x == row_y && col_x.abs_diff(col_y) == 1 {
            let (left, right) = if col_x < col_y { (cell_x, cell_y) } else { (cell_y, cell_x) };
            left.right.is_open() && right.left.is_open()
        } else if col_x == col_y && row_x.abs_diff(row_y) == 1 {
            let (top, bottom) = if row_x < row_y { (cell_x, cell_y) } else { (cell_y, cell_x) };
            top.bottom.is_open() && bottom.top.is_open()
        } else {
            self.grid.rows() == 1 && self.grid.cols() == 1
        }
    }
}

/// Connected regions of one grid, computed once and queried many times.
#[derive(Debug)]
pub struct Reachability<'g> {
    sets: DisjointSet<WallGate<'g>>,
    grid: &'g Grid,
    cols: usize,
}

impl<'g> Reachability<'g> {
    /// Returns `None` for an empty grid (no rows, or an empty first row).
    pub fn build(grid: &'g Grid) -> Option<Self> {
        if grid.is_empty() {
            return None;
        }

        let dimensions = grid.dimensions();
        let (rows, cols) = (dimensions.rows, dimensions.cols);
        let mut sets = DisjointSet::with_gate(dimensions.cell_count(), WallGate::new(grid));

        for (row, col) in grid.positions() {
            let here = flatten_index(row, col, cols);
            if col + 1 < cols {
                sets.union(here, flatten_index(row, col + 1, cols)).ok()?;
            }
            if row + 1 < rows {
                sets.union(here, flatten_index(row + 1, col, cols)).ok()?;
            }
        }

        Some(Self { sets, grid, cols })
    }

    /// `false` when either position has no cell, including the missing tail of a
    /// short row.
    pub fn is_connected(&self, start: Pos, end: Pos) -> bool {
        if !self.grid.contains(start) || !self.grid.contains(end) {
            return false;
        }

        self.sets
            .connected(
                flatten_index(start.y, start.x, self.cols),
                flatten_index(end.y, end.x, self.cols),
            )
            .unwrap_or(false)
    }

    /// Number of connected regions. Cells missing from short rows of a ragged grid
    /// count as isolated regions.
    pub fn component_count(&self) -> usize {
        self.sets.set_count()
    }
}

/// Checks whether `start` and `end` are connected through open walls of `grid`.
pub fn is_connected2(grid: &Grid, start: Pos, end: Pos) -> bool {
    if grid.is_empty() || !grid.contains(start) || !grid.contains(end) {
        return false;
    }

    Reachability::build(grid).is_some_and(|reachability| reachability.is_connected(start, end))
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use rand::{SeedableRng, rngs::StdRng};

    use super::{BoolMaze, Reachability, WallGate, is_connected, is_connected2};
    use crate::{
        generation::generate_random_maze,
        grid::{CellWalls, Dimensions, Grid, Pos, Side, Wall},
        union_find::MergeGate,
    };

    #[test]
    fn boolean_maze_with_path() {
        let maze: BoolMaze = vec![
            vec![0, 0, 1, 1, 1],
            vec![1, 0, 1, 1, 1],
            vec![1, 0, 1, 1, 1],
            vec![1, 0, 0, 0, 0],
            vec![1, 0, 1, 1, 0],
        ];

        assert!(is_connected(&maze));
    }

    #[test]
    fn boolean_maze_without_path() {
        let maze: BoolMaze = vec![
            vec![0, 0, 1],
            vec![1, 1, 1],
            vec![1, 0, 0],
        ];
        assert!(!is_connected(&maze));

        let blocked_start: BoolMaze = vec![vec![1, 0], vec![0, 0]];
        assert!(!is_connected(&blocked_start));

        let blocked_end: BoolMaze = vec![vec![0, 0], vec![0, 1]];
        assert!(!is_connected(&blocked_end));
    }

    #[test]
    fn boolean_maze_edge_cases() {
        let no_rows: BoolMaze = Vec::new();
        let no_cols: BoolMaze = vec![Vec::new()];
        assert!(!is_connected(&no_rows));
        assert!(!is_connected(&no_cols));
        assert!(is_connected(&[vec![0u8]]));
        // The short last row has no bottom-right cell.
        assert!(!is_connected(&[vec![0u8, 0, 0], vec![0, 0]]));
    }

    #[test]
    fn single_cell() {
        let grid = Grid::closed(1, 1);

        assert!(is_connected2(&grid, Pos::new(0, 0), Pos::new(0, 0)));
    }

    #[test]
    fn out_of_bounds_is_unreachable() {
        let grid = Grid::closed(4, 4);

        assert!(!is_connected2(&grid, Pos::new(0, 0), Pos::new(5, 5)));
        assert!(!is_connected2(&grid, Pos::new(4, 0), Pos::new(0, 0)));
        assert!(!is_connected2(&Grid::default(), Pos::new(0, 0), Pos::new(0, 0)));
        assert!(!is_connected2(&Grid::from_rows(vec![vec![]]), Pos::new(0, 0), Pos::new(0, 0)));
    }

    #[test]
    fn closed_walls_block() {
        let mut grid = Grid::closed(2, 3);
        grid.set_shared_wall(0, 0, Side::Right, Wall::Open).unwrap();
        grid.set_shared_wall(0, 1, Side::Bottom, Wall::Open).unwrap();

        assert!(is_connected2(&grid, Pos::new(0, 0), Pos::new(1, 1)));
        assert!(is_connected2(&grid, Pos::new(1, 1), Pos::new(0, 0)));
        assert!(!is_connected2(&grid, Pos::new(0, 0), Pos::new(2, 0)));
        assert!(!is_connected2(&grid, Pos::new(0, 1), Pos::new(1, 1)));
        assert_eq!(Reachability::build(&grid).unwrap().component_count(), 4);
    }

    #[test]
    fn half_open_wall_blocks() {
        let grid = Grid::closed(1, 2);
        let mut cells = grid.as_rows().to_vec();
        cells[0][0].right = Wall::Open;
        let grid = Grid::from_rows(cells);

        assert!(!is_connected2(&grid, Pos::new(0, 0), Pos::new(1, 0)));
    }

    #[test]
    fn gate_semantics() {
        let mut grid = Grid::closed(3, 3);
        grid.set_shared_wall(1, 1, Side::Right, Wall::Open).unwrap();
        grid.set_shared_wall(1, 1, Side::Top, Wall::Open).unwrap();
        let gate = WallGate::new(&grid);

        // (1,1) = 4, (1,2) = 5, (0,1) = 1
        assert!(gate.may_merge(4, 5));
        assert!(gate.may_merge(5, 4));
        assert!(gate.may_merge(1, 4));
        assert!(!gate.may_merge(4, 7));
        // Not adjacent
        assert!(!gate.may_merge(3, 5));
        assert!(!gate.may_merge(0, 4));
        // Outside the grid
        assert!(!gate.may_merge(4, 9));

        let single = Grid::closed(1, 1);
        assert!(WallGate::new(&single).may_merge(0, 0));
    }

    #[test]
    fn ragged_grid_does_not_panic() {
        let grid = Grid::from_rows(vec![
            vec![CellWalls::closed(); 3],
            vec![CellWalls::closed(); 1],
        ]);

        assert!(!is_connected2(&grid, Pos::new(0, 0), Pos::new(2, 1)));
        assert!(is_connected2(&grid, Pos::new(0, 1), Pos::new(0, 1)));
    }

    #[test]
    fn missing_cell_of_short_row_is_unreachable() {
        let grid = Grid::from_rows(vec![
            vec![CellWalls::closed(); 3],
            vec![CellWalls::closed(); 1],
        ]);
        assert!(grid.cell(1, 2).is_none());

        assert!(!is_connected2(&grid, Pos::new(2, 1), Pos::new(2, 1)));
        assert!(!is_connected2(&grid, Pos::new(1, 1), Pos::new(0, 1)));

        let reachability = Reachability::build(&grid).unwrap();
        assert!(!reachability.is_connected(Pos::new(2, 1), Pos::new(2, 1)));
        assert!(reachability.is_connected(Pos::new(2, 0), Pos::new(2, 0)));
    }

    #[test]
    fn cells_past_the_first_row_width_are_outside() {
        let mut cells = vec![vec![CellWalls::closed(); 2]; 3];
        cells[1] = vec![CellWalls::closed(); 4];
        let grid = Grid::from_rows(cells);

        // (2, 1) would flatten onto the first cell of row 2.
        assert!(!is_connected2(&grid, Pos::new(2, 1), Pos::new(0, 2)));
        assert!(!is_connected2(&grid, Pos::new(2, 1), Pos::new(2, 1)));
    }

    fn flood(grid: &Grid, start: Pos) -> Vec<Vec<bool>> {
        let mut seen = vec![vec![false; grid.cols()]; grid.rows()];
        let mut queue = VecDeque::from([(start.y, start.x)]);
        seen[start.y][start.x] = true;

        while let Some((row, col)) = queue.pop_front() {
            for side in Side::ALL {
                if let Some((n_row, n_col)) = grid.neighbor(row, col, side) {
                    if grid.passage_open(row, col, side) && !seen[n_row][n_col] {
                        seen[n_row][n_col] = true;
                        queue.push_back((n_row, n_col));
                    }
                }
            }
        }

        seen
    }

    #[test]
    fn agrees_with_flood_fill() {
        let mut rng = StdRng::seed_from_u64(2024);

        for _ in 0..20 {
            let grid = generate_random_maze(Dimensions { rows: 6, cols: 7 }, &mut rng).unwrap();
            let reachability = Reachability::build(&grid).unwrap();
            let reached = flood(&grid, Pos::new(0, 0));

            for (row, col) in grid.positions() {
                assert_eq!(
                    reachability.is_connected(Pos::new(0, 0), Pos::new(col, row)),
                    reached[row][col],
                    "cell ({row}, {col})\n{grid}"
                );
            }
        }
    }
}
