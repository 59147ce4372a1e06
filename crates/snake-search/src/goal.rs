use snake_core::Position;

use crate::SearchState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalKind {
    /// Satisfied as soon as the head stands on the target.
    Reach,
    /// Like `Reach`, but the arrival state must still be able to reach a board corner.
    Safe,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Goal {
    target: Position,
    kind: GoalKind,
}

impl Goal {
    pub fn reach(target: Position) -> Self {
        Self {
            target,
            kind: GoalKind::Reach,
        }
    }

    pub fn safe(target: Position) -> Self {
        Self {
            target,
            kind: GoalKind::Safe,
        }
    }

    pub fn target(&self) -> Position {
        self.target
    }

    pub fn kind(&self) -> GoalKind {
        self.kind
    }

    /// Search priority heuristic: Manhattan distance from `state`'s head to the target.
    pub fn heuristic(&self, state: &SearchState) -> u32 {
        state.head().manhattan(self.target)
    }

    pub fn is_at_target(&self, state: &SearchState) -> bool {
        state.head() == self.target
    }
}
