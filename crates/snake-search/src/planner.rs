use std::collections::BTreeSet;

use snake_core::Position;
use thiserror::Error;
use tracing::{debug, trace};

use crate::{legal_moves, Frontier, Goal, GoalKind, Plan, SearchState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannerConfig {
    /// Upper bound on expansions for a single search (nested safety searches count separately).
    pub max_expansions: usize,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_expansions: 4096,
        }
    }
}

/// Expansion allowance shared by every search run on behalf of one decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Budget {
    limit: Option<usize>,
    spent: usize,
}

impl Budget {
    pub fn new(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            spent: 0,
        }
    }

    pub fn unlimited() -> Self {
        Self {
            limit: None,
            spent: 0,
        }
    }

    pub fn spent(&self) -> usize {
        self.spent
    }

    pub fn remaining(&self) -> Option<usize> {
        self.limit.map(|limit| limit.saturating_sub(self.spent))
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining() == Some(0)
    }

    fn try_spend(&mut self) -> bool {
        if self.is_exhausted() {
            return false;
        }
        self.spent += 1;
        true
    }
}

/// Why a search ended without a plan. This is an ordinary outcome, not a fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlanNotFound {
    #[error("frontier exhausted after {expanded} expansions")]
    Exhausted { expanded: usize },
    #[error("search stopped at its limit of {limit} expansions")]
    ExpansionLimit { limit: usize },
    #[error("turn budget ran out after {expanded} expansions of this search")]
    BudgetExhausted { expanded: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    Initialized,
    Expanding,
    Succeeded,
    Failed,
}

impl SearchPhase {
    pub fn is_finished(self) -> bool {
        matches!(self, SearchPhase::Succeeded | SearchPhase::Failed)
    }
}

/// One best-first search, advanced one pop at a time with [`step`](Self::step).
pub struct Search<'p> {
    planner: &'p Planner,
    goal: Goal,
    frontier: Frontier,
    explored: BTreeSet<Position>,
    phase: SearchPhase,
    expanded: usize,
    found: Option<SearchState>,
    failure: Option<PlanNotFound>,
}

impl<'p> Search<'p> {
    fn new(planner: &'p Planner, root: SearchState, goal: Goal) -> Self {
        let mut frontier = Frontier::new(goal);
        frontier.insert(root);
        Self {
            planner,
            goal,
            frontier,
            explored: BTreeSet::new(),
            phase: SearchPhase::Initialized,
            expanded: 0,
            found: None,
            failure: None,
        }
    }

    pub fn goal(&self) -> Goal {
        self.goal
    }

    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    pub fn explored(&self) -> &BTreeSet<Position> {
        &self.explored
    }

    /// Number of states popped so far.
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    /// Pop one state: finish on the goal, otherwise expand it into the frontier.
    pub fn step(&mut self, budget: &mut Budget) -> SearchPhase {
        match self.phase {
            SearchPhase::Succeeded | SearchPhase::Failed => return self.phase,
            SearchPhase::Initialized => self.phase = SearchPhase::Expanding,
            SearchPhase::Expanding => {}
        }

        let Some(node) = self.frontier.pop() else {
            return self.fail(PlanNotFound::Exhausted {
                expanded: self.expanded,
            });
        };
        let limit = self.planner.config.max_expansions;
        if self.expanded >= limit {
            return self.fail(PlanNotFound::ExpansionLimit { limit });
        }
        if !budget.try_spend() {
            return self.fail(PlanNotFound::BudgetExhausted {
                expanded: self.expanded,
            });
        }
        self.expanded += 1;

        if self.planner.accepts(&self.goal, &node, budget) {
            self.found = Some(node);
            self.phase = SearchPhase::Succeeded;
            return self.phase;
        }

        self.explored.insert(node.dominance_key());
        for mv in legal_moves(&node) {
            let child = node.transition(mv);
            if self.explored.contains(&child.dominance_key()) {
                continue;
            }
            self.frontier.offer(child);
        }

        self.phase
    }

    /// Step until the search succeeds or fails.
    pub fn run(mut self, budget: &mut Budget) -> Result<Plan, PlanNotFound> {
        while !self.step(budget).is_finished() {}

        match (self.found, self.failure) {
            (Some(terminal), _) => Ok(Plan::from_terminal(terminal, self.goal.target())),
            (None, Some(failure)) => Err(failure),
            (None, None) => Err(PlanNotFound::Exhausted {
                expanded: self.expanded,
            }),
        }
    }

    fn fail(&mut self, failure: PlanNotFound) -> SearchPhase {
        self.failure = Some(failure);
        self.phase = SearchPhase::Failed;
        self.phase
    }
}

/// Best-first planner over [`SearchState`]s.
///
/// Priority is `cost + manhattan(head, target)`. That makes the search A*-like but not
/// guaranteed to find the cheapest plan (states are merged by head only); callers may rely on
/// termination and on every returned plan being legal, not on optimality.
#[derive(Debug, Clone, Default)]
pub struct Planner {
    config: PlannerConfig,
}

impl Planner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: PlannerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> PlannerConfig {
        self.config
    }

    /// A fresh search rooted at `root`, for callers that want to drive it step by step.
    pub fn search(&self, root: &SearchState, goal: Goal) -> Search<'_> {
        Search::new(self, root.clone(), goal)
    }

    pub fn plan(&self, root: &SearchState, goal: &Goal) -> Result<Plan, PlanNotFound> {
        self.plan_within(root, goal, &mut Budget::unlimited())
    }

    /// Plan while charging every expansion (nested safety searches included) to `budget`.
    pub fn plan_within(
        &self,
        root: &SearchState,
        goal: &Goal,
        budget: &mut Budget,
    ) -> Result<Plan, PlanNotFound> {
        let spent_before = budget.spent();
        let result = self.search(root, *goal).run(budget);
        match &result {
            Ok(plan) => debug!(
                target_cell = %goal.target(),
                moves = plan.len(),
                spent = budget.spent() - spent_before,
                "plan found"
            ),
            Err(reason) => debug!(target_cell = %goal.target(), %reason, "no plan"),
        }
        result
    }

    /// Goal test. `Safe` goals additionally require a corner to stay reachable.
    pub fn accepts(&self, goal: &Goal, state: &SearchState, budget: &mut Budget) -> bool {
        if !goal.is_at_target(state) {
            return false;
        }
        match goal.kind() {
            GoalKind::Reach => true,
            GoalKind::Safe => self.corner_reachable(state, budget),
        }
    }

    /// Whether some corner of the open area can still be reached from `state`.
    ///
    /// Corners come from [`Board::open_corners`](snake_core::Board::open_corners), so a wall ring
    /// moves them one cell inward. Runs at most one plain `Reach` search per corner, so it never
    /// nests further.
    pub fn corner_reachable(&self, state: &SearchState, budget: &mut Budget) -> bool {
        let corners = state.board().open_corners();
        if corners.contains(&state.head()) {
            return true;
        }

        let root = state.rebased();
        for corner in corners {
            if !state.is_free(corner) {
                continue;
            }
            match self.search(&root, Goal::reach(corner)).run(budget) {
                Ok(_) => return true,
                Err(reason) => trace!(%corner, %reason, "corner unreachable"),
            }
        }
        false
    }
}
