use serde::{Deserialize, Serialize};
use snake_core::{BOARD_HEIGHT, BOARD_WIDTH};

/// Arena rules. Every field has a default so partial YAML/JSON documents load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    #[serde(default = "default_width")]
    pub width: i32,
    #[serde(default = "default_height")]
    pub height: i32,
    /// Ring the board with walls.
    #[serde(default = "default_true")]
    pub border_walls: bool,
    /// Food kept on the board at all times. `0` disables spawning.
    #[serde(default = "default_food")]
    pub food: usize,
    /// Turns without eating before the snake starves. `None` disables starvation.
    #[serde(default = "default_starve_after")]
    pub starve_after: Option<u32>,
    /// Head plus body cells at spawn.
    #[serde(default = "default_initial_length")]
    pub initial_length: u32,
}

fn default_width() -> i32 {
    BOARD_WIDTH
}
fn default_height() -> i32 {
    BOARD_HEIGHT
}
fn default_true() -> bool {
    true
}
fn default_food() -> usize {
    3
}
fn default_starve_after() -> Option<u32> {
    Some(200)
}
fn default_initial_length() -> u32 {
    3
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            border_walls: default_true(),
            food: default_food(),
            starve_after: default_starve_after(),
            initial_length: default_initial_length(),
        }
    }
}
