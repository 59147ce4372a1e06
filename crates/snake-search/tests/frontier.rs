use snake_core::{Board, Direction, Move, Position};
use snake_search::{Frontier, Goal, Offer, SearchState};

fn open_root() -> SearchState {
    let board = Board::from_ascii(
        "
        .......
        .......
        .......
        ...H...
        .......
        .......
        ",
    )
    .unwrap();
    SearchState::root(&board, Direction::North).unwrap()
}

#[test]
fn pop_returns_lowest_priority_first() {
    let root = open_root();
    // Target straight ahead: going straight lowers the heuristic, turning raises it.
    let mut frontier = Frontier::new(Goal::reach(Position::new(3, 0)));

    frontier.insert(root.transition(Move::Left));
    frontier.insert(root.transition(Move::Straight));
    frontier.insert(root.transition(Move::Right));

    assert_eq!(frontier.len(), 3);
    let first = frontier.pop().unwrap();
    assert_eq!(first.moves(), &[Move::Straight]);
}

#[test]
fn equal_priority_pops_in_insertion_order() {
    let root = open_root();
    // Target directly behind the head: left and right are symmetric.
    let mut frontier = Frontier::new(Goal::reach(Position::new(3, 5)));

    frontier.insert(root.transition(Move::Right));
    frontier.insert(root.transition(Move::Left));

    assert_eq!(frontier.pop().unwrap().moves(), &[Move::Right]);
    assert_eq!(frontier.pop().unwrap().moves(), &[Move::Left]);
    assert!(frontier.pop().is_none());
}

#[test]
fn offer_keeps_the_cheaper_state_per_head() {
    let root = open_root();
    let mut frontier = Frontier::new(Goal::reach(Position::new(0, 0)));

    // Both reach (2, 2): one in two moves, one in four.
    let cheap = root.transition(Move::Left).transition(Move::Right);
    let expensive = root
        .transition(Move::Straight)
        .transition(Move::Straight)
        .transition(Move::Left)
        .transition(Move::Left);
    assert_eq!(cheap.head(), expensive.head());

    assert_eq!(frontier.offer(expensive.clone()), Offer::Inserted);
    assert_eq!(frontier.offer(cheap.clone()), Offer::Replaced);
    assert_eq!(frontier.offer(expensive), Offer::Rejected);
    assert_eq!(frontier.offer(cheap), Offer::Rejected, "ties keep the incumbent");

    assert_eq!(frontier.len(), 1);
    let head = Position::new(2, 2);
    assert!(frontier.contains(head));
    assert_eq!(frontier.get(head).unwrap().cost(), 2);

    // The replaced entry is stale and must not resurface.
    assert_eq!(frontier.pop().unwrap().cost(), 2);
    assert!(frontier.pop().is_none());
    assert!(frontier.is_empty());
}

#[test]
fn remove_drops_member_and_its_heap_entry() {
    let root = open_root();
    let mut frontier = Frontier::new(Goal::reach(Position::new(3, 0)));
    let straight = root.transition(Move::Straight);
    let head = straight.head();

    frontier.insert(straight);
    frontier.insert(root.transition(Move::Left));

    let removed = frontier.remove(head).unwrap();
    assert_eq!(removed.moves(), &[Move::Straight]);
    assert!(!frontier.contains(head));

    assert_eq!(frontier.pop().unwrap().moves(), &[Move::Left]);
    assert!(frontier.pop().is_none());
    assert_eq!(frontier.high_water(), 2);
}
