use snake_core::Move;

use crate::SearchState;

/// Moves whose destination is in bounds and empty or food, in [`Move::ALL`] order.
pub fn legal_moves(state: &SearchState) -> impl Iterator<Item = Move> + '_ {
    Move::ALL.into_iter().filter(move |mv| {
        let (_, destination) = state.destination(*mv);
        state.is_free(destination)
    })
}
