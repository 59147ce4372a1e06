use snake_core::Move;

/// Fallback move choice for turns without a plan.
///
/// Order of preference: a move remembered from the previous stall if it is still legal,
/// then straight, then the first legal move (remembering the next one for later), and finally
/// straight even though it is illegal, so a move is always returned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StallController {
    remembered: Option<Move>,
}

impl StallController {
    pub fn new() -> Self {
        Self::default()
    }

    /// `legal` must be in [`Move::ALL`] order.
    pub fn choose(&mut self, legal: &[Move]) -> Move {
        // The memory is only good for the turn right after it was stored.
        if let Some(mv) = self.remembered.take() {
            if legal.contains(&mv) {
                return mv;
            }
        }

        if legal.contains(&Move::Straight) {
            return Move::Straight;
        }

        match legal {
            [first, rest @ ..] => {
                self.remembered = rest.first().copied();
                *first
            }
            [] => Move::Straight,
        }
    }

    pub fn remembered(&self) -> Option<Move> {
        self.remembered
    }

    pub fn reset(&mut self) {
        self.remembered = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn straight_wins_whenever_legal() {
        let mut stall = StallController::new();
        for legal in [
            vec![Move::Straight],
            vec![Move::Left, Move::Straight],
            vec![Move::Left, Move::Straight, Move::Right],
        ] {
            assert_eq!(stall.choose(&legal), Move::Straight);
        }
        assert_eq!(stall.remembered(), None);
    }

    #[test]
    fn remembers_the_runner_up_and_reuses_it_once() {
        let mut stall = StallController::new();
        assert_eq!(stall.choose(&[Move::Left, Move::Right]), Move::Left);
        assert_eq!(stall.remembered(), Some(Move::Right));

        // Remembered move beats straight on the next turn.
        assert_eq!(stall.choose(&[Move::Straight, Move::Right]), Move::Right);
        assert_eq!(stall.remembered(), None);
    }

    #[test]
    fn stale_memory_is_dropped() {
        let mut stall = StallController::new();
        stall.choose(&[Move::Left, Move::Right]);
        assert_eq!(stall.choose(&[Move::Left, Move::Straight]), Move::Straight);
        assert_eq!(stall.remembered(), None);
    }

    #[test]
    fn no_legal_move_falls_back_to_straight() {
        let mut stall = StallController::new();
        assert_eq!(stall.choose(&[]), Move::Straight);
        assert_eq!(stall.choose(&[Move::Right]), Move::Right);
        assert_eq!(stall.remembered(), None);
    }
}
