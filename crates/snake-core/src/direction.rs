#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Move relative to the current facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Move {
    Left,
    Straight,
    Right,
}

impl Move {
    /// Canonical enumeration order. Planners and agents iterate moves in this order, so it is
    /// also the tie-break order between equally good moves.
    pub const ALL: [Move; 3] = [Move::Left, Move::Straight, Move::Right];

    pub fn as_str(self) -> &'static str {
        match self {
            Move::Left => "left",
            Move::Straight => "straight",
            Move::Right => "right",
        }
    }
}

/// Absolute facing on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Facing after taking `mv`.
    pub fn turn(self, mv: Move) -> Direction {
        match (self, mv) {
            (d, Move::Straight) => d,
            (Direction::North, Move::Left) => Direction::West,
            (Direction::North, Move::Right) => Direction::East,
            (Direction::East, Move::Left) => Direction::North,
            (Direction::East, Move::Right) => Direction::South,
            (Direction::South, Move::Left) => Direction::East,
            (Direction::South, Move::Right) => Direction::West,
            (Direction::West, Move::Left) => Direction::South,
            (Direction::West, Move::Right) => Direction::North,
        }
    }

    /// Unit displacement `(dx, dy)` of one step in this facing. North is `-y`.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }

    /// New facing plus the displacement of the step it produces.
    pub fn resolve(self, mv: Move) -> (Direction, (i32, i32)) {
        let facing = self.turn(mv);
        (facing, facing.delta())
    }
}
