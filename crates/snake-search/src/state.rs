use std::rc::Rc;

use snake_core::{Board, Cell, Direction, Move, Position};

/// Bitset of cells a head may not enter (walls, head, body).
#[derive(Debug, Clone, PartialEq, Eq)]
struct Occupancy {
    words: Vec<u64>,
}

impl Occupancy {
    fn from_board(board: &Board) -> Self {
        let mut occupancy = Self {
            words: vec![0; board.len().div_ceil(64)],
        };
        for p in board.positions() {
            if board.is_free(p) {
                continue;
            }
            if let Some(idx) = board.index(p) {
                occupancy.insert(idx);
            }
        }
        occupancy
    }

    fn contains(&self, idx: usize) -> bool {
        self.words
            .get(idx / 64)
            .is_some_and(|word| (*word >> (idx % 64)) & 1 == 1)
    }

    fn insert(&mut self, idx: usize) {
        if let Some(word) = self.words.get_mut(idx / 64) {
            *word |= 1u64 << (idx % 64);
        }
    }
}

/// Simulated snapshot of the board after following [`moves`](Self::moves) from the root.
///
/// The root board is shared by every state of a search and never mutated; each state owns its
/// own occupancy bitset, so siblings cannot observe each other's moves. [`cell`](Self::cell)
/// reads exactly like a full copy of the grid would: the head is always [`Cell::Head`], every
/// earlier head position is [`Cell::Body`]. The simulated tail never retracts.
#[derive(Debug, Clone)]
pub struct SearchState {
    board: Rc<Board>,
    blocked: Occupancy,
    head: Position,
    facing: Direction,
    cost: u32,
    moves: Vec<Move>,
}

impl SearchState {
    /// Root state for a live board. `None` when the board has no head.
    pub fn root(board: &Board, facing: Direction) -> Option<Self> {
        let head = board.head()?;
        Some(Self {
            blocked: Occupancy::from_board(board),
            board: Rc::new(board.clone()),
            head,
            facing,
            cost: 0,
            moves: Vec::new(),
        })
    }

    /// The root board this state was derived from.
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn head(&self) -> Position {
        self.head
    }

    pub fn facing(&self) -> Direction {
        self.facing
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Key used for frontier/explored bookkeeping.
    ///
    /// Only the head counts: states with different facings or bodies but the same head are
    /// treated as the same node. This can hide a better path through a different body shape.
    pub fn dominance_key(&self) -> Position {
        self.head
    }

    pub fn cell(&self, p: Position) -> Option<Cell> {
        let idx = self.board.index(p)?;
        if p == self.head {
            return Some(Cell::Head);
        }
        let base = self.board.get(p)?;
        if self.blocked.contains(idx) {
            return Some(match base {
                Cell::Wall => Cell::Wall,
                _ => Cell::Body,
            });
        }
        Some(base)
    }

    /// In bounds and neither wall nor snake in this state.
    pub fn is_free(&self, p: Position) -> bool {
        self.board
            .index(p)
            .is_some_and(|idx| !self.blocked.contains(idx))
    }

    /// Facing and head position after `mv`, without checking legality.
    pub fn destination(&self, mv: Move) -> (Direction, Position) {
        let (facing, (dx, dy)) = self.facing.resolve(mv);
        (facing, self.head.translate(dx, dy))
    }

    /// Child state after `mv`. The parent is left untouched.
    pub fn transition(&self, mv: Move) -> SearchState {
        let (facing, head) = self.destination(mv);

        let mut blocked = self.blocked.clone();
        if let Some(idx) = self.board.index(head) {
            blocked.insert(idx);
        }

        let mut moves = Vec::with_capacity(self.moves.len() + 1);
        moves.extend_from_slice(&self.moves);
        moves.push(mv);

        SearchState {
            board: Rc::clone(&self.board),
            blocked,
            head,
            facing,
            cost: self.cost.saturating_add(1),
            moves,
        }
    }

    /// Same simulated board, head and facing, with cost and move history reset. Used to start a
    /// follow-up search from the end of a plan.
    pub fn rebased(&self) -> SearchState {
        SearchState {
            board: Rc::clone(&self.board),
            blocked: self.blocked.clone(),
            head: self.head,
            facing: self.facing,
            cost: 0,
            moves: Vec::new(),
        }
    }

    /// Materialize the simulated grid.
    pub fn to_board(&self) -> Board {
        let mut board = (*self.board).clone();
        for p in self.board.positions() {
            if let Some(cell) = self.cell(p) {
                board.set(p, cell);
            }
        }
        board
    }
}
