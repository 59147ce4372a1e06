use snake_core::{Move, Position};
use snake_search::{legal_moves, Budget, Goal, Plan, Planner, SearchState};
use tracing::{debug, trace, warn};

use crate::trace::{TraceEvent, TraceKind, TraceSink};
use crate::{Agent, AgentConfig, PlanContext, Turn};

/// Food positions ordered by Manhattan distance from `from`; ties keep board scan order.
fn nearest_first(from: Position, food: &[Position], exclude: Option<Position>) -> Vec<Position> {
    let mut candidates: Vec<Position> = food
        .iter()
        .copied()
        .filter(|p| Some(*p) != exclude)
        .collect();
    candidates.sort_by_key(|p| from.manhattan(*p));
    candidates
}

/// Plan-caching agent.
///
/// Each turn it:
/// - replans when it has no cached move, the score changed (food was eaten), or the next cached
///   move became illegal, trying food nearest-first until one yields a plan;
/// - optionally chains a lookahead plan from the end of the adopted one to the next food, and
///   switches to it without replanning when the food at the end of the active plan is eaten;
/// - pops one cached move, or asks the [`StallController`](crate::StallController) when nothing
///   is cached.
///
/// All searches of one turn share an expansion budget; running out simply ends candidate
/// selection for that turn.
pub struct PlannerAgent {
    config: AgentConfig,
    planner: Planner,
    context: PlanContext,
    turn: u64,
    replans: u64,
    trace: Option<Box<dyn TraceSink>>,
}

impl Default for PlannerAgent {
    fn default() -> Self {
        Self::new(AgentConfig::default())
    }
}

impl PlannerAgent {
    pub fn new(config: AgentConfig) -> Self {
        Self {
            planner: Planner::new().with_config(config.planner_config()),
            config,
            context: PlanContext::new(),
            turn: 0,
            replans: 0,
            trace: None,
        }
    }

    pub fn with_trace_sink(mut self, sink: Box<dyn TraceSink>) -> Self {
        self.trace = Some(sink);
        self
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn context(&self) -> &PlanContext {
        &self.context
    }

    /// Number of turns on which candidate selection ran.
    pub fn replans(&self) -> u64 {
        self.replans
    }

    fn emit(&mut self, event: TraceEvent) {
        if let Some(sink) = self.trace.as_mut() {
            sink.emit(event);
        }
    }

    fn goal_for(&self, target: Position) -> Goal {
        if self.config.safe_goals {
            Goal::safe(target)
        } else {
            Goal::reach(target)
        }
    }

    fn select_plan(
        &self,
        root: &SearchState,
        food: &[Position],
        budget: &mut Budget,
    ) -> Option<(Plan, Option<Plan>)> {
        let mut candidates = nearest_first(root.head(), food, None);
        if let Some(max) = self.config.max_candidates {
            candidates.truncate(max);
        }

        for target in candidates {
            if budget.is_exhausted() {
                debug!(spent = budget.spent(), "turn budget exhausted");
                break;
            }
            match self.planner.plan_within(root, &self.goal_for(target), budget) {
                Ok(plan) => {
                    let lookahead = if self.config.chain_lookahead {
                        self.chain_from(&plan, food, budget)
                    } else {
                        None
                    };
                    return Some((plan, lookahead));
                }
                Err(reason) => trace!(%target, %reason, "candidate rejected"),
            }
        }
        None
    }

    /// Report the promoted lookahead and chain the next leg after it.
    fn follow_promoted(&mut self, food: &[Position]) {
        let Some(active) = self.context.active() else {
            return;
        };
        let (moves, target) = (active.len(), active.target());
        let next = if self.config.chain_lookahead {
            let mut budget = Budget::new(self.config.turn_expansion_budget);
            self.chain_from(active, food, &mut budget)
        } else {
            None
        };

        debug!(turn = self.turn, target_cell = %target, moves, "following chained plan");
        self.emit(
            TraceEvent::new(self.turn, TraceKind::PlanFollowed)
                .with_moves(moves)
                .with_target(target),
        );
        if let Some(next) = next.as_ref() {
            self.emit(
                TraceEvent::new(self.turn, TraceKind::PlanChained)
                    .with_moves(next.len())
                    .with_target(next.target()),
            );
        }
        self.context.set_lookahead(next);
    }

    /// Plan from the projected end of `plan` to the food nearest to it.
    fn chain_from(&self, plan: &Plan, food: &[Position], budget: &mut Budget) -> Option<Plan> {
        let end = plan.terminal();
        let next = nearest_first(end.head(), food, Some(plan.target()))
            .into_iter()
            .next()?;
        self.planner
            .plan_within(&end.rebased(), &self.goal_for(next), budget)
            .ok()
    }
}

impl Agent for PlannerAgent {
    fn decide(&mut self, turn: &Turn<'_>) -> Move {
        self.turn += 1;

        let Some(root) = SearchState::root(turn.board, turn.facing) else {
            warn!(turn = self.turn, "board has no head, moving straight");
            return Move::Straight;
        };
        let legal: Vec<Move> = legal_moves(&root).collect();
        let food = turn.board.scan().food;

        let mut score_changed = self.context.observe_score(turn.score);
        if let Some(next) = self.context.peek() {
            if !legal.contains(&next) {
                debug!(turn = self.turn, next = next.as_str(), "cached move blocked, dropping plan");
                self.context.clear_plans();
            }
        }

        // Food just eaten at the end of the active plan: the chained plan already starts here.
        if score_changed && self.context.promote_lookahead() {
            score_changed = false;
            self.follow_promoted(&food);
        }

        if self.context.is_idle() || score_changed {
            self.replans += 1;
            let mut budget = Budget::new(self.config.turn_expansion_budget);

            match self.select_plan(&root, &food, &mut budget) {
                Some((plan, lookahead)) => {
                    debug!(
                        turn = self.turn,
                        target_cell = %plan.target(),
                        moves = plan.len(),
                        lookahead = lookahead.as_ref().map_or(0, Plan::len),
                        spent = budget.spent(),
                        "plan adopted"
                    );
                    self.emit(
                        TraceEvent::new(self.turn, TraceKind::PlanAdopted)
                            .with_moves(plan.len())
                            .with_expansions(budget.spent())
                            .with_target(plan.target()),
                    );
                    if let Some(next) = lookahead.as_ref() {
                        self.emit(
                            TraceEvent::new(self.turn, TraceKind::PlanChained)
                                .with_moves(next.len())
                                .with_target(next.target()),
                        );
                    }
                    self.context.adopt(plan, lookahead);
                }
                None if self.context.is_idle() => {
                    debug!(turn = self.turn, food = food.len(), spent = budget.spent(), "no plan");
                    self.emit(
                        TraceEvent::new(self.turn, TraceKind::PlanNone)
                            .with_expansions(budget.spent()),
                    );
                }
                None => {
                    debug!(turn = self.turn, "no new plan, following cached moves");
                    self.emit(TraceEvent::new(self.turn, TraceKind::PlanFollowed));
                }
            }
        }

        if let Some(mv) = self.context.next_move() {
            return mv;
        }

        let mv = self.context.stall_mut().choose(&legal);
        debug!(turn = self.turn, legal = legal.len(), choice = mv.as_str(), "stalling");
        self.emit(TraceEvent::new(self.turn, TraceKind::Stall).with_moves(legal.len()));
        mv
    }

    fn on_death(&mut self) {
        debug!(turn = self.turn, "agent died, clearing plan context");
        self.context.reset();
        self.emit(TraceEvent::new(self.turn, TraceKind::Death));
    }
}
