//! Cell and wall model of a rectangular maze.
//!
//! Every cell owns all four of its walls, so the wall between two neighbours is
//! stored twice. The shared-wall invariant states that both copies agree, and that
//! every wall on the outer boundary is closed. Generators keep it by writing both
//! copies in one step ([`Grid::set_shared_wall`]); [`validate`] checks it after the fact.

use std::{fmt, str::FromStr};

use itertools::Itertools;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::error::MazeError;

/// Row-major index of `(row, col)` in a grid with `cols` columns.
pub fn flatten_index(row: usize, col: usize, cols: usize) -> usize {
    row * cols + col
}

/// Inverse of [`flatten_index`], returns `(row, col)`.
pub fn unflatten_index(index: usize, cols: usize) -> (usize, usize) {
    (index / cols, index % cols)
}

/// State of one wall, stored as `0` (open) or `1` (closed) in JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Wall {
    Open,
    Closed,
}

impl Wall {
    pub fn is_open(self) -> bool {
        self == Wall::Open
    }
}

impl From<bool> for Wall {
    /// `true` means a wall is present.
    fn from(present: bool) -> Self {
        if present { Wall::Closed } else { Wall::Open }
    }
}

impl Serialize for Wall {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(match self {
            Wall::Open => 0,
            Wall::Closed => 1,
        })
    }
}

impl<'de> Deserialize<'de> for Wall {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match u8::deserialize(deserializer)? {
            0 => Ok(Wall::Open),
            1 => Ok(Wall::Closed),
            other => Err(de::Error::invalid_value(
                de::Unexpected::Unsigned(other as u64),
                &"0 (open) or 1 (wall)",
            )),
        }
    }
}

/// One side of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];

    pub fn opposite(self) -> Side {
        match self {
            Side::Top => Side::Bottom,
            Side::Right => Side::Left,
            Side::Bottom => Side::Top,
            Side::Left => Side::Right,
        }
    }

    /// `(row, col)` offset of the cell across this side.
    fn offset(self) -> (isize, isize) {
        match self {
            Side::Top => (-1, 0),
            Side::Right => (0, 1),
            Side::Bottom => (1, 0),
            Side::Left => (0, -1),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Side::Top => "top",
            Side::Right => "right",
            Side::Bottom => "bottom",
            Side::Left => "left",
        };
        f.write_str(name)
    }
}

/// The four walls of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellWalls {
    pub top: Wall,
    pub right: Wall,
    pub bottom: Wall,
    pub left: Wall,
}

impl CellWalls {
    pub fn closed() -> Self {
        Self {
            top: Wall::Closed,
            right: Wall::Closed,
            bottom: Wall::Closed,
            left: Wall::Closed,
        }
    }

    pub fn get(&self, side: Side) -> Wall {
        match side {
            Side::Top => self.top,
            Side::Right => self.right,
            Side::Bottom => self.bottom,
            Side::Left => self.left,
        }
    }

    pub fn set(&mut self, side: Side, wall: Wall) {
        match side {
            Side::Top => self.top = wall,
            Side::Right => self.right = wall,
            Side::Bottom => self.bottom = wall,
            Side::Left => self.left = wall,
        }
    }
}

/// A grid position: `x` is the column, `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub x: usize,
    pub y: usize,
}

impl Pos {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl FromStr for Pos {
    type Err = String;

    /// Parses `"x,y"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s
            .split_once(',')
            .ok_or_else(|| format!("expected `x,y`, got `{s}`"))?;
        let x = x.trim().parse().map_err(|e| format!("bad x in `{s}`: {e}"))?;
        let y = y.trim().parse().map_err(|e| format!("bad y in `{s}`: {e}"))?;
        Ok(Pos { x, y })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    pub rows: usize,
    pub cols: usize,
}

impl Dimensions {
    pub fn square(n: usize) -> Self {
        Self { rows: n, cols: n }
    }

    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// Rows of cells. Serialized as a plain JSON array of rows.
///
/// A grid read from a file may be ragged or empty; accessors are bounds-checked and
/// [`cols`](Self::cols) is the length of the first row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grid {
    cells: Vec<Vec<CellWalls>>,
}

impl Grid {
    /// A `rows` x `cols` grid with every wall closed.
    pub fn closed(rows: usize, cols: usize) -> Self {
        Self {
            cells: vec![vec![CellWalls::closed(); cols]; rows],
        }
    }

    pub fn from_rows(cells: Vec<Vec<CellWalls>>) -> Self {
        Self { cells }
    }

    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    pub fn cols(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions {
            rows: self.rows(),
            cols: self.cols(),
        }
    }

    /// `true` when there are no rows or the first row has no cells.
    pub fn is_empty(&self) -> bool {
        self.rows() == 0 || self.cols() == 0
    }

    pub fn as_rows(&self) -> &[Vec<CellWalls>] {
        &self.cells
    }

    /// `true` if `pos` lies within `rows()` x `cols()` and a cell exists there.
    ///
    /// Short rows of a ragged grid hold fewer cells; cells past the first row's
    /// length are outside the maze.
    pub fn contains(&self, pos: Pos) -> bool {
        pos.x < self.cols() && self.cell(pos.y, pos.x).is_some()
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&CellWalls> {
        self.cells.get(row)?.get(col)
    }

    pub fn cell_at(&self, row: usize, col: usize) -> Result<CellWalls, MazeError> {
        self.cell(row, col)
            .copied()
            .ok_or(MazeError::CellOutOfBounds {
                row,
                col,
                rows: self.rows(),
                cols: self.cols(),
            })
    }

    pub(crate) fn cell_mut(&mut self, row: usize, col: usize) -> &mut CellWalls {
        &mut self.cells[row][col]
    }

    /// All `(row, col)` pairs of a `rows()` x `cols()` grid in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = (usize, usize)> + use<> {
        (0..self.rows()).cartesian_product(0..self.cols())
    }

    /// The cell across `side` of `(row, col)`, if it lies inside the grid.
    pub fn neighbor(&self, row: usize, col: usize, side: Side) -> Option<(usize, usize)> {
        let (d_row, d_col) = side.offset();
        let n_row = row.checked_add_signed(d_row)?;
        let n_col = col.checked_add_signed(d_col)?;
        self.cell(n_row, n_col)?;
        Some((n_row, n_col))
    }

    /// Sets the wall on `side` of `(row, col)` and its copy in the neighbouring cell.
    pub fn set_shared_wall(
        &mut self,
        row: usize,
        col: usize,
        side: Side,
        wall: Wall,
    ) -> Result<(), MazeError> {
        self.cell_at(row, col)?;
        let (n_row, n_col) = self
            .neighbor(row, col, side)
            .ok_or(MazeError::NoNeighbor { row, col, side })?;

        self.cells[row][col].set(side, wall);
        self.cells[n_row][n_col].set(side.opposite(), wall);
        Ok(())
    }

    /// Closes every outward-facing wall of the boundary cells.
    pub(crate) fn close_boundary(&mut self) {
        let rows = self.rows();
        for (row, cells) in self.cells.iter_mut().enumerate() {
            let cols = cells.len();
            for (col, cell) in cells.iter_mut().enumerate() {
                if row == 0 {
                    cell.top = Wall::Closed;
                }
                if row + 1 == rows {
                    cell.bottom = Wall::Closed;
                }
                if col == 0 {
                    cell.left = Wall::Closed;
                }
                if col + 1 == cols {
                    cell.right = Wall::Closed;
                }
            }
        }
    }

    /// Number of interior edges with both copies of the wall open.
    pub fn open_interior_walls(&self) -> usize {
        self.positions()
            .flat_map(|(row, col)| {
                [Side::Right, Side::Bottom]
                    .into_iter()
                    .map(move |side| (row, col, side))
            })
            .filter(|&(row, col, side)| self.passage_open(row, col, side))
            .count()
    }

    /// `true` if both copies of the wall on `side` of `(row, col)` are open.
    pub fn passage_open(&self, row: usize, col: usize, side: Side) -> bool {
        let Some((n_row, n_col)) = self.neighbor(row, col, side) else {
            return false;
        };
        match (self.cell(row, col), self.cell(n_row, n_col)) {
            (Some(here), Some(there)) => {
                here.get(side).is_open() && there.get(side.opposite()).is_open()
            }
            _ => false,
        }
    }
}

/// Checks that `grid` is a non-empty rectangle satisfying the shared-wall invariant.
///
/// Returns the first violation found in row-major order.
pub fn validate(grid: &Grid) -> Result<(), MazeError> {
    if grid.is_empty() {
        return Err(MazeError::EmptyGrid);
    }

    let cols = grid.cols();
    for (row, cells) in grid.as_rows().iter().enumerate() {
        if cells.len() != cols {
            return Err(MazeError::RaggedRow {
                row,
                expected: cols,
                found: cells.len(),
            });
        }
    }

    for (row, col) in grid.positions() {
        let cell = grid.cell_at(row, col)?;

        for side in Side::ALL {
            match grid.neighbor(row, col, side) {
                None if cell.get(side).is_open() => {
                    return Err(MazeError::OpenBoundary { row, col, side });
                }
                None => {}
                // Each interior edge is checked once, from its upper or left cell.
                Some((n_row, n_col)) if matches!(side, Side::Right | Side::Bottom) => {
                    if grid.cell_at(n_row, n_col)?.get(side.opposite()) != cell.get(side) {
                        return Err(MazeError::SharedWallMismatch { row, col, side });
                    }
                }
                Some(_) => {}
            }
        }
    }

    Ok(())
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::display::render(self, &crate::display::Highlights::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::{CellWalls, Grid, Pos, Side, Wall, flatten_index, unflatten_index, validate};
    use crate::error::MazeError;

    #[test]
    fn flattening() {
        assert_eq!(flatten_index(0, 0, 4), 0);
        assert_eq!(flatten_index(2, 3, 4), 11);
        assert_eq!(unflatten_index(11, 4), (2, 3));

        for index in 0..20 {
            let (row, col) = unflatten_index(index, 5);
            assert_eq!(flatten_index(row, col, 5), index);
        }
    }

    #[test]
    fn cell_access() {
        let grid = Grid::closed(2, 3);

        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.cols(), 3);
        assert_eq!(grid.cell_at(1, 2), Ok(CellWalls::closed()));
        assert_eq!(
            grid.cell_at(2, 0),
            Err(MazeError::CellOutOfBounds {
                row: 2,
                col: 0,
                rows: 2,
                cols: 3
            })
        );
        assert!(grid.contains(Pos::new(2, 1)));
        assert!(!grid.contains(Pos::new(1, 2)));
    }

    #[test]
    fn ragged_rows_contain_only_their_cells() {
        let grid = Grid::from_rows(vec![vec![CellWalls::closed(); 3], vec![CellWalls::closed()]]);

        assert_eq!(grid.dimensions().cell_count(), 6);
        assert!(grid.contains(Pos::new(2, 0)));
        assert!(grid.contains(Pos::new(0, 1)));
        assert!(grid.cell(1, 2).is_none());
        assert!(!grid.contains(Pos::new(2, 1)));
        assert!(!grid.contains(Pos::new(1, 1)));

        let long_tail = Grid::from_rows(vec![
            vec![CellWalls::closed(); 2],
            vec![CellWalls::closed(); 4],
        ]);
        assert!(long_tail.cell(1, 3).is_some());
        assert!(!long_tail.contains(Pos::new(3, 1)));
    }

    #[test]
    fn neighbours() {
        let grid = Grid::closed(3, 3);

        assert_eq!(grid.neighbor(0, 0, Side::Top), None);
        assert_eq!(grid.neighbor(0, 0, Side::Left), None);
        assert_eq!(grid.neighbor(0, 0, Side::Right), Some((0, 1)));
        assert_eq!(grid.neighbor(1, 1, Side::Bottom), Some((2, 1)));
        assert_eq!(grid.neighbor(2, 2, Side::Right), None);
    }

    #[test]
    fn shared_wall_updates_both_cells() {
        let mut grid = Grid::closed(3, 3);
        grid.set_shared_wall(1, 1, Side::Top, Wall::Open).unwrap();
        grid.set_shared_wall(1, 1, Side::Right, Wall::Open).unwrap();

        assert_eq!(grid.cell_at(1, 1).unwrap().top, Wall::Open);
        assert_eq!(grid.cell_at(0, 1).unwrap().bottom, Wall::Open);
        assert_eq!(grid.cell_at(1, 2).unwrap().left, Wall::Open);
        assert_eq!(grid.open_interior_walls(), 2);
        assert_eq!(validate(&grid), Ok(()));

        assert_eq!(
            grid.set_shared_wall(0, 2, Side::Right, Wall::Open),
            Err(MazeError::NoNeighbor {
                row: 0,
                col: 2,
                side: Side::Right
            })
        );
    }

    #[test]
    fn validation_failures() {
        assert_eq!(validate(&Grid::default()), Err(MazeError::EmptyGrid));
        assert_eq!(validate(&Grid::from_rows(vec![vec![]])), Err(MazeError::EmptyGrid));

        let ragged = Grid::from_rows(vec![vec![CellWalls::closed(); 2], vec![CellWalls::closed()]]);
        assert_eq!(
            validate(&ragged),
            Err(MazeError::RaggedRow {
                row: 1,
                expected: 2,
                found: 1
            })
        );

        let mut half_open = Grid::closed(2, 2);
        half_open.cell_mut(0, 0).right = Wall::Open;
        assert_eq!(
            validate(&half_open),
            Err(MazeError::SharedWallMismatch {
                row: 0,
                col: 0,
                side: Side::Right
            })
        );

        let mut leaky = Grid::closed(2, 2);
        leaky.cell_mut(1, 1).bottom = Wall::Open;
        assert_eq!(
            validate(&leaky),
            Err(MazeError::OpenBoundary {
                row: 1,
                col: 1,
                side: Side::Bottom
            })
        );
    }

    #[test]
    fn single_cell_grid_is_valid() {
        assert_eq!(validate(&Grid::closed(1, 1)), Ok(()));
    }

    #[test]
    fn boundary_closing() {
        let open = CellWalls {
            top: Wall::Open,
            right: Wall::Open,
            bottom: Wall::Open,
            left: Wall::Open,
        };
        let mut grid = Grid::from_rows(vec![vec![open; 3]; 3]);
        grid.close_boundary();

        assert_eq!(grid.cell_at(0, 0).unwrap().top, Wall::Closed);
        assert_eq!(grid.cell_at(0, 0).unwrap().left, Wall::Closed);
        assert_eq!(grid.cell_at(1, 1).unwrap(), open);
        assert_eq!(grid.cell_at(2, 2).unwrap().right, Wall::Closed);
        assert_eq!(validate(&grid), Ok(()));
    }

    #[test]
    fn json_format() {
        let mut grid = Grid::closed(1, 2);
        grid.set_shared_wall(0, 0, Side::Right, Wall::Open).unwrap();

        let json = serde_json::to_string(&grid).unwrap();
        assert_eq!(
            json,
            r#"[[{"top":1,"right":0,"bottom":1,"left":1},{"top":1,"right":1,"bottom":1,"left":0}]]"#
        );
        assert_eq!(serde_json::from_str::<Grid>(&json).unwrap(), grid);

        let bad = r#"[[{"top":2,"right":1,"bottom":1,"left":1}]]"#;
        assert!(serde_json::from_str::<Grid>(bad).is_err());
    }

    #[test]
    fn position_parsing() {
        assert_eq!("3,1".parse::<Pos>(), Ok(Pos::new(3, 1)));
        assert_eq!(" 0 , 7 ".parse::<Pos>(), Ok(Pos::new(0, 7)));
        assert!("3".parse::<Pos>().is_err());
        assert!("-1,2".parse::<Pos>().is_err());
    }
}
