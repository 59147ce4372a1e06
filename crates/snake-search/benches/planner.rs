use criterion::{black_box, criterion_group, criterion_main, Criterion};
use snake_core::{Board, Cell, Direction, Position, BOARD_HEIGHT, BOARD_WIDTH};
use snake_search::{Goal, Planner, SearchState};

/// Full-size board with a comb of walls the planner has to weave through.
fn comb_board() -> (SearchState, Position) {
    let mut board = Board::new(BOARD_WIDTH, BOARD_HEIGHT).expect("non-empty board");
    for x in (2..BOARD_WIDTH - 2).step_by(4) {
        for y in 0..BOARD_HEIGHT - 3 {
            board.set(Position::new(x, y), Cell::Wall);
        }
        for y in 3..BOARD_HEIGHT {
            board.set(Position::new(x + 2, y), Cell::Wall);
        }
    }
    board.set(Position::new(0, BOARD_HEIGHT - 1), Cell::Head);
    let food = Position::new(BOARD_WIDTH - 1, 0);
    board.set(food, Cell::Food);

    let root = SearchState::root(&board, Direction::North).expect("head placed");
    (root, food)
}

fn bench_planner(c: &mut Criterion) {
    let (root, food) = comb_board();
    let planner = Planner::new();

    c.bench_function("snake-search/plan(comb 25x25, reach)", |b| {
        b.iter(|| {
            let plan = planner.plan(&root, &Goal::reach(food)).expect("plan");
            black_box(plan.len());
        })
    });

    c.bench_function("snake-search/plan(comb 25x25, safe)", |b| {
        b.iter(|| {
            let plan = planner.plan(&root, &Goal::safe(food)).expect("plan");
            black_box(plan.len());
        })
    });
}

criterion_group!(benches, bench_planner);
criterion_main!(benches);
