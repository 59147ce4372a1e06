use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use snake_agent::Agent;
use tracing::debug;

use crate::{Arena, DeathCause, StepOutcome};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArenaStats {
    pub turns: u64,
    pub deaths: u64,
    pub food_eaten: u64,
    /// Highest score reached by a single life.
    pub best_score: u32,
    /// Most turns survived by a single life.
    pub longest_life: u32,
    pub deaths_by_cause: BTreeMap<DeathCause, u64>,
}

impl ArenaStats {
    /// Fold another run's totals into these.
    pub fn merge(&mut self, other: &ArenaStats) {
        self.turns += other.turns;
        self.deaths += other.deaths;
        self.food_eaten += other.food_eaten;
        self.best_score = self.best_score.max(other.best_score);
        self.longest_life = self.longest_life.max(other.longest_life);
        for (cause, count) in &other.deaths_by_cause {
            *self.deaths_by_cause.entry(*cause).or_default() += count;
        }
    }
}

/// Run `agent` for `turns` turns, notifying it after every death.
pub fn play<A: Agent + ?Sized>(agent: &mut A, arena: &mut Arena, turns: u64) -> ArenaStats {
    let mut stats = ArenaStats::default();
    for _ in 0..turns {
        let mv = agent.decide(&arena.turn_input());
        let lived = arena.turns_alive() + 1;
        stats.turns += 1;

        match arena.apply(mv) {
            StepOutcome::Moved => {}
            StepOutcome::Ate => {
                stats.food_eaten += 1;
                stats.best_score = stats.best_score.max(arena.score());
            }
            StepOutcome::Died(cause) => {
                stats.deaths += 1;
                *stats.deaths_by_cause.entry(cause).or_default() += 1;
                stats.longest_life = stats.longest_life.max(lived);
                agent.on_death();
            }
        }
    }
    stats.longest_life = stats.longest_life.max(arena.turns_alive());
    debug!(
        turns = stats.turns,
        deaths = stats.deaths,
        food = stats.food_eaten,
        best = stats.best_score,
        "game finished"
    );
    stats
}
