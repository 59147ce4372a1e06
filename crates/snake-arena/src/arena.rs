use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use snake_agent::Turn;
use snake_core::{
    Board, BoardError, Cell, DeterministicRng, Direction, Move, Position, SplitMix64,
};
use thiserror::Error;
use tracing::{debug, trace};

use crate::ArenaConfig;

#[derive(Debug, Error)]
pub enum ArenaError {
    #[error("board must be at least 3x3, got {width}x{height}")]
    TooSmall { width: i32, height: i32 },
    #[error("initial snake length must be at least 1")]
    ZeroLength,
    #[error("a snake of length {length} does not fit below the centre of a {height}-row board")]
    SnakeDoesNotFit { length: u32, height: i32 },
    #[error(transparent)]
    Board(#[from] BoardError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeathCause {
    Wall,
    OutOfBounds,
    SelfCollision,
    Starvation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Moved,
    Ate,
    /// The snake died; the arena has already respawned it.
    Died(DeathCause),
}

/// Board plus one snake. The snake's cells are mirrored on the board as `Head`/`Body`.
#[derive(Debug, Clone)]
pub struct Arena {
    config: ArenaConfig,
    rng: SplitMix64,
    board: Board,
    /// Head first.
    snake: VecDeque<Position>,
    facing: Direction,
    score: u32,
    turns_alive: u32,
    since_food: u32,
}

impl Arena {
    pub fn new(config: ArenaConfig, seed: u64) -> Result<Self, ArenaError> {
        if config.width < 3 || config.height < 3 {
            return Err(ArenaError::TooSmall {
                width: config.width,
                height: config.height,
            });
        }
        if config.initial_length == 0 {
            return Err(ArenaError::ZeroLength);
        }
        let border = i32::from(config.border_walls);
        let tail_y = i64::from(config.height / 2) + i64::from(config.initial_length) - 1;
        if tail_y >= i64::from(config.height - border) {
            return Err(ArenaError::SnakeDoesNotFit {
                length: config.initial_length,
                height: config.height,
            });
        }

        let board = Board::new(config.width, config.height)?;
        let mut arena = Self {
            config,
            rng: SplitMix64::new(seed),
            board,
            snake: VecDeque::new(),
            facing: Direction::North,
            score: 0,
            turns_alive: 0,
            since_food: 0,
        };
        arena.respawn();
        Ok(arena)
    }

    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn head(&self) -> Option<Position> {
        self.snake.front().copied()
    }

    pub fn len(&self) -> usize {
        self.snake.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snake.is_empty()
    }

    pub fn facing(&self) -> Direction {
        self.facing
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn turns_alive(&self) -> u32 {
        self.turns_alive
    }

    pub fn turns_to_starve(&self) -> Option<u32> {
        self.config
            .starve_after
            .map(|limit| limit.saturating_sub(self.since_food))
    }

    /// What an agent sees this turn.
    pub fn turn_input(&self) -> Turn<'_> {
        Turn {
            board: &self.board,
            score: self.score,
            turns_alive: self.turns_alive,
            turns_to_starve: self.turns_to_starve(),
            facing: self.facing,
        }
    }

    /// Put food on an empty cell. Returns `false` if the cell is not empty.
    pub fn place_food(&mut self, p: Position) -> bool {
        if self.board.get(p) != Some(Cell::Empty) {
            return false;
        }
        self.board.set(p, Cell::Food);
        true
    }

    /// Advance the snake one cell.
    pub fn apply(&mut self, mv: Move) -> StepOutcome {
        let Some(head) = self.head() else {
            self.respawn();
            return StepOutcome::Moved;
        };
        let (facing, (dx, dy)) = self.facing.resolve(mv);
        let next = head.translate(dx, dy);
        self.turns_alive += 1;
        self.since_food += 1;

        let ate = match self.board.get(next) {
            None => return self.die(DeathCause::OutOfBounds),
            Some(Cell::Wall) => return self.die(DeathCause::Wall),
            // The tail moves out of the way in the same step.
            Some(Cell::Body) if self.snake.back() != Some(&next) => {
                return self.die(DeathCause::SelfCollision)
            }
            Some(Cell::Head) => return self.die(DeathCause::SelfCollision),
            Some(Cell::Food) => true,
            Some(Cell::Body) | Some(Cell::Empty) => false,
        };

        if !ate {
            if let Some(tail) = self.snake.pop_back() {
                self.board.set(tail, Cell::Empty);
            }
        }
        self.board.set(head, Cell::Body);
        self.board.set(next, Cell::Head);
        self.snake.push_front(next);
        self.facing = facing;

        if ate {
            self.score += 1;
            self.since_food = 0;
            trace!(at = %next, score = self.score, "food eaten");
            self.spawn_food();
            return StepOutcome::Ate;
        }
        if self
            .config
            .starve_after
            .is_some_and(|limit| self.since_food >= limit)
        {
            return self.die(DeathCause::Starvation);
        }
        StepOutcome::Moved
    }

    fn die(&mut self, cause: DeathCause) -> StepOutcome {
        debug!(
            ?cause,
            score = self.score,
            turns_alive = self.turns_alive,
            "snake died"
        );
        self.respawn();
        StepOutcome::Died(cause)
    }

    /// Fresh board, centred snake facing north, score reset.
    fn respawn(&mut self) {
        let (width, height) = (self.board.width(), self.board.height());
        for p in self.board.positions().collect::<Vec<_>>() {
            let border = p.x == 0 || p.y == 0 || p.x == width - 1 || p.y == height - 1;
            let cell = if self.config.border_walls && border {
                Cell::Wall
            } else {
                Cell::Empty
            };
            self.board.set(p, cell);
        }

        let centre = Position::new(width / 2, height / 2);
        self.snake = (0..self.config.initial_length as i32)
            .map(|i| centre.translate(0, i))
            .collect();
        for (i, &p) in self.snake.iter().enumerate() {
            self.board
                .set(p, if i == 0 { Cell::Head } else { Cell::Body });
        }

        self.facing = Direction::North;
        self.score = 0;
        self.turns_alive = 0;
        self.since_food = 0;
        self.spawn_food();
    }

    /// Top food back up to the configured count on random empty cells.
    fn spawn_food(&mut self) {
        let present = self.board.positions_of(Cell::Food).count();
        for _ in present..self.config.food {
            let empty: Vec<Position> = self.board.positions_of(Cell::Empty).collect();
            match self.rng.choose(&empty) {
                Some(&p) => self.board.set(p, Cell::Food),
                None => break,
            }
        }
    }
}
