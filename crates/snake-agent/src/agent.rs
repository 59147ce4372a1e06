use snake_core::{Board, Direction, Move};

/// Everything the game hands an agent for one turn.
#[derive(Debug, Clone, Copy)]
pub struct Turn<'a> {
    /// Board indexed `[x][y]` from the top-left.
    pub board: &'a Board,
    /// Food eaten by the current life. Resets to zero on death.
    pub score: u32,
    pub turns_alive: u32,
    /// Turns left before starving; `None` when starvation is disabled.
    pub turns_to_starve: Option<u32>,
    pub facing: Direction,
}

/// A snake brain. `decide` is called once per turn and always yields a move.
pub trait Agent {
    fn decide(&mut self, turn: &Turn<'_>) -> Move;

    /// Called after the snake died, before the first `decide` of the next life.
    fn on_death(&mut self) {}
}

impl<A: Agent + ?Sized> Agent for Box<A> {
    fn decide(&mut self, turn: &Turn<'_>) -> Move {
        (**self).decide(turn)
    }

    fn on_death(&mut self) {
        (**self).on_death()
    }
}
