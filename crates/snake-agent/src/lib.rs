//! Per-turn snake agents.
//!
//! [`PlannerAgent`] is the main brain: it plans toward food with `snake-search`, caches the plan
//! across turns, and falls back to [`StallController`] when nothing can be planned.
//! [`GreedyAgent`] is the single-step heuristic mode.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod agent;
pub mod config;
pub mod context;
pub mod greedy;
pub mod planner_agent;
pub mod stall;
pub mod trace;

pub use agent::{Agent, Turn};
pub use config::{AgentConfig, ConfigError};
pub use context::PlanContext;
pub use greedy::GreedyAgent;
pub use planner_agent::PlannerAgent;
pub use stall::StallController;
pub use trace::{LogTraceSink, TraceEvent, TraceKind, TraceSink};
