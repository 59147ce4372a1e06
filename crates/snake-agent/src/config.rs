//! Planner agent configuration, loadable from YAML.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use snake_search::PlannerConfig;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("yaml parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    Invalid(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Only accept food after which a board corner is still reachable.
    #[serde(default = "default_true")]
    pub safe_goals: bool,

    /// Plan a second leg from the end of each adopted plan to the next food.
    #[serde(default = "default_true")]
    pub chain_lookahead: bool,

    /// Try at most this many food cells (nearest first) per replan. `None` tries all.
    pub max_candidates: Option<usize>,

    /// Expansion cap for a single search.
    #[serde(default = "default_max_expansions")]
    pub max_expansions: usize,

    /// Expansions allowed across every search of one turn.
    #[serde(default = "default_turn_budget")]
    pub turn_expansion_budget: usize,
}

fn default_true() -> bool {
    true
}
fn default_max_expansions() -> usize {
    PlannerConfig::default().max_expansions
}
fn default_turn_budget() -> usize {
    50_000
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            safe_goals: default_true(),
            chain_lookahead: default_true(),
            max_candidates: None,
            max_expansions: default_max_expansions(),
            turn_expansion_budget: default_turn_budget(),
        }
    }
}

impl AgentConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_expansions == 0 {
            return Err(ConfigError::Invalid("max_expansions must be > 0"));
        }
        if self.turn_expansion_budget == 0 {
            return Err(ConfigError::Invalid("turn_expansion_budget must be > 0"));
        }
        if self.max_candidates == Some(0) {
            return Err(ConfigError::Invalid("max_candidates must be > 0 when set"));
        }
        Ok(())
    }

    pub fn planner_config(&self) -> PlannerConfig {
        PlannerConfig {
            max_expansions: self.max_expansions,
        }
    }
}
