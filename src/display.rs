//! Plain-text drawing of a [`Grid`].
//!
//! Each cell is drawn from its own `top` and `left` walls; the last column adds its
//! `right` walls and the last row its `bottom` walls. For a grid that satisfies the
//! shared-wall invariant this shows every wall exactly once.

use colored::Colorize;
use std::fmt::Write;

use crate::grid::{Grid, Pos, Wall};

/// Positions to mark while drawing.
#[derive(Clone, Debug, Default)]
pub struct Highlights {
    pub start: Option<Pos>,
    pub end: Option<Pos>,
    /// Colour the markers with ANSI escapes.
    pub colored: bool,
}

impl Highlights {
    fn marker(&self, row: usize, col: usize) -> String {
        let here = Some(Pos::new(col, row));
        if here == self.start {
            self.paint("S", true)
        } else if here == self.end {
            self.paint("E", false)
        } else {
            " ".to_string()
        }
    }

    fn paint(&self, label: &str, start: bool) -> String {
        match (self.colored, start) {
            (false, _) => label.to_string(),
            (true, true) => label.green().bold().to_string(),
            (true, false) => label.red().bold().to_string(),
        }
    }
}

fn horizontal(wall: Wall) -> &'static str {
    match wall {
        Wall::Closed => "---",
        Wall::Open => "   ",
    }
}

fn vertical(wall: Wall) -> char {
    match wall {
        Wall::Closed => '|',
        Wall::Open => ' ',
    }
}

pub fn render(grid: &Grid, highlights: &Highlights) -> String {
    let mut buffer = String::new();

    for (row, cells) in grid.as_rows().iter().enumerate() {
        for cell in cells {
            write!(&mut buffer, "+{}", horizontal(cell.top)).unwrap();
        }
        buffer.push_str("+\n");

        for (col, cell) in cells.iter().enumerate() {
            write!(
                &mut buffer,
                "{} {} ",
                vertical(cell.left),
                highlights.marker(row, col)
            )
            .unwrap();
        }
        if let Some(last) = cells.last() {
            buffer.push(vertical(last.right));
        }
        buffer.push('\n');
    }

    if let Some(cells) = grid.as_rows().last() {
        for cell in cells {
            write!(&mut buffer, "+{}", horizontal(cell.bottom)).unwrap();
        }
        buffer.push_str("+\n");
    }

    buffer
}
