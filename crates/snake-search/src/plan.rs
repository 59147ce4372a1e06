use std::collections::VecDeque;

use snake_core::{Move, Position};

use crate::SearchState;

/// Moves leading from a root state to a resolved target.
#[derive(Debug, Clone)]
pub struct Plan {
    moves: VecDeque<Move>,
    target: Position,
    terminal: SearchState,
}

impl Plan {
    /// Plan ending in `terminal`, replaying its full move history.
    pub fn from_terminal(terminal: SearchState, target: Position) -> Self {
        Self {
            moves: terminal.moves().iter().copied().collect(),
            target,
            terminal,
        }
    }

    pub fn moves(&self) -> &VecDeque<Move> {
        &self.moves
    }

    pub fn target(&self) -> Position {
        self.target
    }

    /// Simulated state on arrival at the target.
    pub fn terminal(&self) -> &SearchState {
        &self.terminal
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn peek(&self) -> Option<Move> {
        self.moves.front().copied()
    }

    pub fn pop_front(&mut self) -> Option<Move> {
        self.moves.pop_front()
    }
}
