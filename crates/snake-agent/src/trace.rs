//! Decision trace.
//!
//! [`PlannerAgent`](crate::PlannerAgent) emits one [`TraceEvent`] per notable decision (plan
//! adopted, lookahead chained, stall, ...) so tests and tooling can see why a move was made
//! without parsing logs.

use snake_core::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraceKind {
    /// A fresh plan replaced the cached one. `moves` is its length.
    PlanAdopted,
    /// A lookahead plan was chained after the active one. `moves` is its length.
    PlanChained,
    /// Candidate selection found nothing. `expansions` is the turn budget spent.
    PlanNone,
    /// Cached moves keep being followed although a replan was due.
    PlanFollowed,
    /// Stall fallback. `moves` is the number of legal moves.
    Stall,
    Death,
}

impl TraceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TraceKind::PlanAdopted => "agent.plan.adopt",
            TraceKind::PlanChained => "agent.plan.chain",
            TraceKind::PlanNone => "agent.plan.none",
            TraceKind::PlanFollowed => "agent.plan.follow",
            TraceKind::Stall => "agent.stall",
            TraceKind::Death => "agent.death",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceEvent {
    /// Decision counter of the emitting agent; the first `decide` is turn 1.
    pub turn: u64,
    pub kind: TraceKind,
    pub moves: usize,
    pub expansions: usize,
    /// Food the plan in question heads for.
    pub target: Option<Position>,
}

impl TraceEvent {
    pub fn new(turn: u64, kind: TraceKind) -> Self {
        Self {
            turn,
            kind,
            moves: 0,
            expansions: 0,
            target: None,
        }
    }

    pub fn with_moves(mut self, moves: usize) -> Self {
        self.moves = moves;
        self
    }

    pub fn with_expansions(mut self, expansions: usize) -> Self {
        self.expansions = expansions;
        self
    }

    pub fn with_target(mut self, target: Position) -> Self {
        self.target = Some(target);
        self
    }
}

pub trait TraceSink {
    fn emit(&mut self, event: TraceEvent);
}

/// Forwards every event to `tracing` at trace level.
#[derive(Debug, Default)]
pub struct LogTraceSink;

impl TraceSink for LogTraceSink {
    fn emit(&mut self, event: TraceEvent) {
        tracing::trace!(
            turn = event.turn,
            kind = event.kind.as_str(),
            moves = event.moves,
            expansions = event.expansions,
            target = ?event.target,
            "decision"
        );
    }
}
