//! Library half of `snakebot`: run configuration and the game loop the binary drives.

use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use snake_agent::{Agent, AgentConfig, GreedyAgent, LogTraceSink, PlannerAgent};
use snake_arena::{play, Arena, ArenaConfig, ArenaStats};
use snake_core::rng::derive_seed;
use tracing::info;

/// Which brain drives the snake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentKind {
    Planner,
    Greedy,
}

/// Everything a run reads from its config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub agent: AgentConfig,
    pub arena: ArenaConfig,
}

impl RunConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(text).context("failed to parse run config")?;
        config.agent.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_yaml_str(&text).with_context(|| format!("invalid config {}", path.display()))
    }

    /// `path` if given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("failed to serialize run config")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub agent: AgentKind,
    pub games: u32,
    pub turns_per_game: u64,
    pub seed: u64,
    pub stats: ArenaStats,
}

pub fn build_agent(kind: AgentKind, config: &AgentConfig, seed: u64) -> Box<dyn Agent> {
    match kind {
        AgentKind::Planner => {
            Box::new(PlannerAgent::new(config.clone()).with_trace_sink(Box::new(LogTraceSink)))
        }
        AgentKind::Greedy => Box::new(GreedyAgent::new(seed)),
    }
}

/// Play `games` independent games of `turns` turns each. Game `i` is seeded with
/// `derive_seed(seed, i)`.
pub fn run_games(
    config: &RunConfig,
    kind: AgentKind,
    games: u32,
    turns: u64,
    seed: u64,
) -> Result<RunSummary> {
    let mut total = ArenaStats::default();
    for game in 0..games {
        let game_seed = derive_seed(seed, u64::from(game));
        let mut arena = Arena::new(config.arena.clone(), game_seed)
            .with_context(|| format!("failed to set up game {game}"))?;
        let mut agent = build_agent(kind, &config.agent, game_seed);

        let stats = play(&mut agent, &mut arena, turns);
        info!(
            game,
            food = stats.food_eaten,
            deaths = stats.deaths,
            best = stats.best_score,
            "game done"
        );
        total.merge(&stats);
    }

    Ok(RunSummary {
        agent: kind,
        games,
        turns_per_game: turns,
        seed,
        stats: total,
    })
}
