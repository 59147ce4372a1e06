use std::collections::BTreeMap;

use snake_core::{DeterministicRng, Move, SplitMix64};
use snake_search::{legal_moves, SearchState};
use tracing::trace;

use crate::{Agent, Turn};

/// One-step heuristic: take the legal move that ends closest to some food, provided it does not
/// move away from that food. Otherwise a random legal move, otherwise straight.
#[derive(Debug, Clone)]
pub struct GreedyAgent {
    rng: SplitMix64,
}

impl GreedyAgent {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SplitMix64::new(seed),
        }
    }
}

impl Agent for GreedyAgent {
    fn decide(&mut self, turn: &Turn<'_>) -> Move {
        let Some(root) = SearchState::root(turn.board, turn.facing) else {
            return Move::Straight;
        };
        let legal: Vec<Move> = legal_moves(&root).collect();
        let head = root.head();

        // distance -> move; on equal distance the later food/move wins.
        let mut closer: BTreeMap<u32, Move> = BTreeMap::new();
        for food in turn.board.scan().food {
            let current = head.manhattan(food);
            for &mv in &legal {
                let (_, next) = root.destination(mv);
                let distance = next.manhattan(food);
                if distance <= current {
                    closer.insert(distance, mv);
                }
            }
        }

        if let Some((&distance, &mv)) = closer.iter().next() {
            trace!(distance, choice = mv.as_str(), "greedy step");
            return mv;
        }
        self.rng.choose(&legal).copied().unwrap_or(Move::Straight)
    }
}
