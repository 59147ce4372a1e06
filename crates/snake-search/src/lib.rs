//! Deterministic best-first path planner over simulated snake states.
//!
//! The planner searches over [`SearchState`]s: each one is the board as it would look after
//! following a move sequence from the live position, with every visited cell turned into body.
//! States are deduplicated by head position only (see [`SearchState::dominance_key`]).

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod actions;
pub mod frontier;
pub mod goal;
pub mod plan;
pub mod planner;
pub mod state;

pub use actions::legal_moves;
pub use frontier::{Frontier, Offer};
pub use goal::{Goal, GoalKind};
pub use plan::Plan;
pub use planner::{Budget, PlanNotFound, Planner, PlannerConfig, Search, SearchPhase};
pub use state::SearchState;
