use core::fmt;

use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Position;

/// Default board width used by the arena and the CLI.
pub const BOARD_WIDTH: i32 = 25;
/// Default board height used by the arena and the CLI.
pub const BOARD_HEIGHT: i32 = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Cell {
    #[default]
    Empty,
    Wall,
    Food,
    Head,
    Body,
}

impl Cell {
    /// Whether a head may move onto this cell.
    pub fn is_free(self) -> bool {
        matches!(self, Cell::Empty | Cell::Food)
    }

    pub fn glyph(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Wall => '#',
            Cell::Food => '*',
            Cell::Head => 'H',
            Cell::Body => 'o',
        }
    }

    pub fn from_glyph(glyph: char) -> Option<Cell> {
        match glyph {
            '.' => Some(Cell::Empty),
            '#' => Some(Cell::Wall),
            '*' => Some(Cell::Food),
            'H' => Some(Cell::Head),
            'o' => Some(Cell::Body),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("board must have at least one row and one column")]
    Empty,
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("column {column} has {found} cells, expected {expected}")]
    RaggedColumn {
        column: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown glyph {glyph:?} at {position}")]
    UnknownGlyph { glyph: char, position: Position },
}

/// Typed collections of a board, in x-major scan order.
///
/// The head is also listed in `body`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardScan {
    pub head: Option<Position>,
    pub body: Vec<Position>,
    pub walls: Vec<Position>,
    pub food: Vec<Position>,
    pub empty: Vec<Position>,
}

/// Fixed-size grid of cells.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Board {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
}

impl Board {
    pub fn new(width: i32, height: i32) -> Result<Self, BoardError> {
        if width <= 0 || height <= 0 {
            return Err(BoardError::Empty);
        }
        Ok(Self {
            width,
            height,
            cells: vec![Cell::Empty; (width * height) as usize],
        })
    }

    /// Build from column-major data indexed `[x][y]`, the layout the game hands to agents.
    pub fn from_columns(columns: Vec<Vec<Cell>>) -> Result<Self, BoardError> {
        let height = columns.first().map(Vec::len).unwrap_or(0);
        let mut board = Self::new(columns.len() as i32, height as i32)?;
        for (x, column) in columns.into_iter().enumerate() {
            if column.len() != height {
                return Err(BoardError::RaggedColumn {
                    column: x,
                    expected: height,
                    found: column.len(),
                });
            }
            for (y, cell) in column.into_iter().enumerate() {
                board.set(Position::new(x as i32, y as i32), cell);
            }
        }
        Ok(board)
    }

    /// Parse a text fixture, one row per line from top to bottom.
    ///
    /// `.` empty, `#` wall, `*` food, `H` head, `o` body. Blank lines and surrounding
    /// whitespace are ignored.
    pub fn from_ascii(text: &str) -> Result<Self, BoardError> {
        let rows: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let width = rows.first().map(|r| r.chars().count()).unwrap_or(0);
        let mut board = Self::new(width as i32, rows.len() as i32)?;

        for (y, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width {
                return Err(BoardError::RaggedRow {
                    row: y,
                    expected: width,
                    found,
                });
            }
            for (x, glyph) in row.chars().enumerate() {
                let position = Position::new(x as i32, y as i32);
                let cell = Cell::from_glyph(glyph)
                    .ok_or(BoardError::UnknownGlyph { glyph, position })?;
                board.set(position, cell);
            }
        }
        Ok(board)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn in_bounds(&self, p: Position) -> bool {
        p.x >= 0 && p.y >= 0 && p.x < self.width && p.y < self.height
    }

    /// Dense index of an in-bounds position.
    pub fn index(&self, p: Position) -> Option<usize> {
        if !self.in_bounds(p) {
            return None;
        }
        Some((p.y * self.width + p.x) as usize)
    }

    pub fn get(&self, p: Position) -> Option<Cell> {
        self.index(p).map(|idx| self.cells[idx])
    }

    /// Out-of-bounds writes are ignored.
    pub fn set(&mut self, p: Position, cell: Cell) {
        if let Some(idx) = self.index(p) {
            self.cells[idx] = cell;
        }
    }

    /// In bounds and empty or food.
    pub fn is_free(&self, p: Position) -> bool {
        self.get(p).is_some_and(Cell::is_free)
    }

    /// Top-left, top-right, bottom-left, bottom-right.
    pub fn corners(&self) -> [Position; 4] {
        let (w, h) = (self.width - 1, self.height - 1);
        [
            Position::new(0, 0),
            Position::new(w, 0),
            Position::new(0, h),
            Position::new(w, h),
        ]
    }

    /// Corners of the smallest rectangle holding every non-wall cell, in [`corners`](Self::corners)
    /// order. On a board ringed by walls these are the cells just inside the ring. Falls back to
    /// the board corners when every cell is a wall.
    pub fn open_corners(&self) -> [Position; 4] {
        let mut open = self.positions().filter(|p| self.get(*p) != Some(Cell::Wall));
        let Some(first) = open.next() else {
            return self.corners();
        };
        let (mut lo, mut hi) = (first, first);
        for p in open {
            lo.x = lo.x.min(p.x);
            lo.y = lo.y.min(p.y);
            hi.x = hi.x.max(p.x);
            hi.y = hi.y.max(p.y);
        }
        [
            Position::new(lo.x, lo.y),
            Position::new(hi.x, lo.y),
            Position::new(lo.x, hi.y),
            Position::new(hi.x, hi.y),
        ]
    }

    /// Every position in x-major order (`x` outer, `y` inner).
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.width).flat_map(move |x| (0..self.height).map(move |y| Position::new(x, y)))
    }

    pub fn positions_of(&self, cell: Cell) -> impl Iterator<Item = Position> + '_ {
        self.positions().filter(move |p| self.get(*p) == Some(cell))
    }

    pub fn head(&self) -> Option<Position> {
        self.positions_of(Cell::Head).next()
    }

    pub fn scan(&self) -> BoardScan {
        let mut scan = BoardScan::default();
        for p in self.positions() {
            match self.get(p) {
                Some(Cell::Head) => {
                    scan.head = Some(p);
                    scan.body.push(p);
                }
                Some(Cell::Body) => scan.body.push(p),
                Some(Cell::Wall) => scan.walls.push(p),
                Some(Cell::Food) => scan.food.push(p),
                Some(Cell::Empty) => scan.empty.push(p),
                None => {}
            }
        }
        scan
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            for x in 0..self.width {
                let cell = self.get(Position::new(x, y)).unwrap_or_default();
                write!(f, "{}", cell.glyph())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_round_trips_through_display() {
        let text = "#.*\n.H.\n.o.\n";
        let board = Board::from_ascii(text).unwrap();
        assert_eq!(board.to_string(), text);
    }

    #[test]
    fn corners_follow_fixed_order() {
        let board = Board::new(4, 3).unwrap();
        assert_eq!(
            board.corners(),
            [
                Position::new(0, 0),
                Position::new(3, 0),
                Position::new(0, 2),
                Position::new(3, 2)
            ]
        );
    }

    #[test]
    fn open_corners_sit_inside_a_wall_ring() {
        let board = Board::from_ascii(
            "
            ######
            #..*.#
            #.H..#
            ######
            ",
        )
        .unwrap();
        assert_eq!(
            board.open_corners(),
            [
                Position::new(1, 1),
                Position::new(4, 1),
                Position::new(1, 2),
                Position::new(4, 2)
            ]
        );
        assert_eq!(Board::new(4, 3).unwrap().open_corners(), Board::new(4, 3).unwrap().corners());
    }
}
