use snake_core::Move;
use snake_search::Plan;

use crate::StallController;

/// Everything a [`PlannerAgent`](crate::PlannerAgent) carries from one turn to the next.
///
/// Owned by the agent and cleared in one go by [`reset`](Self::reset) when the snake dies.
#[derive(Debug, Default)]
pub struct PlanContext {
    last_score: Option<u32>,
    active: Option<Plan>,
    lookahead: Option<Plan>,
    stall: StallController,
}

impl PlanContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record this turn's score. Returns `true` when it differs from the previous turn's.
    pub fn observe_score(&mut self, score: u32) -> bool {
        let changed = self.last_score.is_some_and(|last| last != score);
        self.last_score = Some(score);
        changed
    }

    pub fn last_score(&self) -> Option<u32> {
        self.last_score
    }

    /// Replace both plans wholesale.
    pub fn adopt(&mut self, plan: Plan, lookahead: Option<Plan>) {
        self.active = Some(plan);
        self.lookahead = lookahead;
    }

    pub fn active(&self) -> Option<&Plan> {
        self.active.as_ref()
    }

    pub fn lookahead(&self) -> Option<&Plan> {
        self.lookahead.as_ref()
    }

    /// The move [`next_move`](Self::next_move) would return.
    pub fn peek(&self) -> Option<Move> {
        self.active
            .as_ref()
            .and_then(Plan::peek)
            .or_else(|| self.lookahead.as_ref().and_then(Plan::peek))
    }

    /// No cached move left in either plan.
    pub fn is_idle(&self) -> bool {
        self.peek().is_none()
    }

    /// Pop the next cached move, promoting the lookahead once the active plan runs out.
    pub fn next_move(&mut self) -> Option<Move> {
        self.promote_lookahead();
        self.active.as_mut()?.pop_front()
    }

    /// Make the lookahead the active plan once the active one has run out. Returns `false`
    /// when there is nothing to promote.
    pub fn promote_lookahead(&mut self) -> bool {
        if !self.active.as_ref().map_or(true, Plan::is_empty) {
            return false;
        }
        match self.lookahead.take() {
            Some(next) if !next.is_empty() => {
                self.active = Some(next);
                true
            }
            _ => false,
        }
    }

    pub fn set_lookahead(&mut self, lookahead: Option<Plan>) {
        self.lookahead = lookahead;
    }

    pub fn clear_plans(&mut self) {
        self.active = None;
        self.lookahead = None;
    }

    pub fn stall(&self) -> &StallController {
        &self.stall
    }

    pub fn stall_mut(&mut self) -> &mut StallController {
        &mut self.stall
    }

    /// Forget score, plans and stall memory.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
