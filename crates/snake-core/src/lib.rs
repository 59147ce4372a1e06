//! Grid, cell and move vocabulary shared by the snake planning crates.
//!
//! Everything here is plain data: the planner (`snake-search`), the agents (`snake-agent`) and the
//! headless engine (`snake-arena`) all speak in these types.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod board;
pub mod direction;
pub mod position;
pub mod rng;

pub use board::{Board, BoardError, BoardScan, Cell, BOARD_HEIGHT, BOARD_WIDTH};
pub use direction::{Direction, Move};
pub use position::Position;
pub use rng::{DeterministicRng, SplitMix64};
