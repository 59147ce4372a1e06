use std::cell::RefCell;
use std::rc::Rc;

use snake_agent::{Agent, AgentConfig, PlannerAgent, TraceEvent, TraceKind, TraceSink, Turn};
use snake_core::{Board, Cell, Direction, Move, Position};
use snake_search::{Goal, Planner, SearchState};

#[derive(Clone, Default)]
struct RcSink(Rc<RefCell<Vec<TraceEvent>>>);

impl TraceSink for RcSink {
    fn emit(&mut self, event: TraceEvent) {
        self.0.borrow_mut().push(event);
    }
}

/// Minimal game loop: the head advances, old heads turn to body, nothing retracts. Landing on
/// food scores a point.
struct Sim {
    board: Board,
    facing: Direction,
    score: u32,
    turns: u32,
}

impl Sim {
    fn new(text: &str, facing: Direction) -> Self {
        Self {
            board: Board::from_ascii(text).expect("fixture parses"),
            facing,
            score: 0,
            turns: 0,
        }
    }

    fn head(&self) -> Position {
        self.board.head().expect("board has a head")
    }

    fn turn(&self) -> Turn<'_> {
        Turn {
            board: &self.board,
            score: self.score,
            turns_alive: self.turns,
            turns_to_starve: None,
            facing: self.facing,
        }
    }

    /// Ask the agent for a move and apply it. Panics on an illegal move.
    fn step(&mut self, agent: &mut impl Agent) -> Move {
        let mv = agent.decide(&self.turn());
        let root = SearchState::root(&self.board, self.facing).expect("board has a head");
        let (_, dest) = root.destination(mv);
        assert!(root.is_free(dest), "agent chose illegal {mv:?} at {}", root.head());
        if self.board.get(dest) == Some(Cell::Food) {
            self.score += 1;
        }
        let next = root.transition(mv);
        self.board = next.to_board();
        self.facing = next.facing();
        self.turns += 1;
        mv
    }
}

fn traced(config: AgentConfig) -> (PlannerAgent, Rc<RefCell<Vec<TraceEvent>>>) {
    let sink = RcSink::default();
    let events = sink.0.clone();
    (PlannerAgent::new(config).with_trace_sink(Box::new(sink)), events)
}

fn kinds(events: &[TraceEvent]) -> Vec<TraceKind> {
    events.iter().map(|e| e.kind).collect()
}

const OPEN: &str = "
    .......
    .......
    ....*..
    .......
    .......
    .H.....
    .......
";

const CORRIDOR: &str = "
    .......
    ...H..*
    ###.###
    ###*###
    #######
";

const BOX: &str = "
    #####
    #.H.#
    #####
";

#[test]
fn follows_one_cached_plan_onto_the_food() {
    let mut sim = Sim::new(OPEN, Direction::North);
    let food = Position::new(4, 2);
    let expected = Planner::new()
        .plan(
            &SearchState::root(&sim.board, sim.facing).expect("head"),
            &Goal::safe(food),
        )
        .expect("open board is solvable");

    let mut agent = PlannerAgent::default();
    let moves: Vec<Move> = (0..expected.len()).map(|_| sim.step(&mut agent)).collect();

    assert_eq!(moves, expected.moves().iter().copied().collect::<Vec<_>>());
    assert_eq!(sim.head(), food);
    assert_eq!(agent.replans(), 1, "plan is computed once and then replayed");
    assert!(agent.context().is_idle());
}

#[test]
fn safe_goals_skip_dead_end_food() {
    let mut sim = Sim::new(CORRIDOR, Direction::South);
    let (mut agent, events) = traced(AgentConfig::default());

    // (3, 3) is nearer but seals the snake in; it heads east for (6, 1) instead.
    assert_eq!(sim.step(&mut agent), Move::Left);

    let events = events.borrow();
    let adopt = events
        .iter()
        .find(|e| e.kind == TraceKind::PlanAdopted)
        .expect("a plan is adopted");
    assert_eq!(adopt.turn, 1);
    assert_eq!(adopt.moves, 3);
    assert_eq!(adopt.target, Some(Position::new(6, 1)));
}

#[test]
fn reach_goals_take_the_nearest_food() {
    let mut sim = Sim::new(CORRIDOR, Direction::South);
    let mut agent = PlannerAgent::new(AgentConfig {
        safe_goals: false,
        ..AgentConfig::default()
    });

    assert_eq!(sim.step(&mut agent), Move::Straight);
    assert_eq!(sim.step(&mut agent), Move::Straight);
    assert_eq!(sim.head(), Position::new(3, 3));
}

#[test]
fn chained_lookahead_is_promoted_when_the_first_food_is_eaten() {
    let mut sim = Sim::new(
        "
        ....*..
        .......
        ....*..
        .......
        .......
        .H.....
        .......
        ",
        Direction::North,
    );
    let (mut agent, events) = traced(AgentConfig::default());

    sim.step(&mut agent);
    let (first, second) = {
        let context = agent.context();
        let active = context.active().expect("plan adopted");
        let lookahead = context.lookahead().expect("lookahead chained");
        (active.len() + 1, lookahead.len())
    };
    assert_eq!(first, 6);

    for _ in 1..first + second {
        sim.step(&mut agent);
    }

    assert_eq!(sim.head(), Position::new(4, 0));
    assert_eq!(sim.score, 2);
    assert_eq!(agent.replans(), 1, "eating the first food switches to the chained plan");

    let events = events.borrow();
    assert_eq!(
        kinds(&events),
        vec![
            TraceKind::PlanAdopted,
            TraceKind::PlanChained,
            TraceKind::PlanFollowed
        ]
    );
    assert_eq!(events[0].target, Some(Position::new(4, 2)));
    assert_eq!(events[1].target, Some(Position::new(4, 0)));
    assert_eq!(events[2].target, Some(Position::new(4, 0)));
    assert_eq!(events[2].turn, first as u64 + 1);
}

#[test]
fn score_change_forces_a_replan() {
    let mut sim = Sim::new(OPEN, Direction::North);
    let mut agent = PlannerAgent::default();

    sim.step(&mut agent);
    sim.step(&mut agent);
    assert_eq!(agent.replans(), 1);

    sim.score = 1;
    sim.step(&mut agent);
    assert_eq!(agent.replans(), 2);
    assert_eq!(agent.context().last_score(), Some(1));
}

#[test]
fn blocked_cached_move_is_dropped_and_replanned() {
    let mut sim = Sim::new(OPEN, Direction::North);
    let mut agent = PlannerAgent::default();
    sim.step(&mut agent);

    let next = agent.context().peek().expect("plan still has moves");
    let root = SearchState::root(&sim.board, sim.facing).expect("head");
    let (_, dest) = root.destination(next);
    sim.board.set(dest, Cell::Wall);

    let mv = sim.step(&mut agent);
    assert_ne!(mv, next);
    assert_eq!(agent.replans(), 2);
}

#[test]
fn stalls_when_nothing_can_be_planned() {
    let mut sim = Sim::new(BOX, Direction::North);
    let (mut agent, events) = traced(AgentConfig::default());

    // Straight is a wall: first legal move, remembering the runner-up.
    assert_eq!(sim.step(&mut agent), Move::Left);
    assert_eq!(agent.context().stall().remembered(), Some(Move::Right));

    let events = events.borrow();
    assert_eq!(kinds(&events), vec![TraceKind::PlanNone, TraceKind::Stall]);
    assert_eq!(events[1].moves, 2);
}

#[test]
fn death_clears_the_plan_context() {
    let sim = Sim::new(OPEN, Direction::North);
    let (mut agent, events) = traced(AgentConfig::default());

    agent.decide(&sim.turn());
    assert!(!agent.context().is_idle());
    assert_eq!(agent.context().last_score(), Some(0));

    agent.on_death();
    assert!(agent.context().is_idle());
    assert!(agent.context().active().is_none());
    assert_eq!(agent.context().last_score(), None);
    assert_eq!(agent.context().stall().remembered(), None);
    assert_eq!(
        events.borrow().last().map(|e| e.kind),
        Some(TraceKind::Death)
    );
}

#[test]
fn headless_board_moves_straight() {
    let board = Board::from_ascii(
        "
        ...
        .*.
        ...
        ",
    )
    .expect("fixture parses");
    let mut agent = PlannerAgent::default();
    let turn = Turn {
        board: &board,
        score: 0,
        turns_alive: 0,
        turns_to_starve: None,
        facing: Direction::East,
    };
    assert_eq!(agent.decide(&turn), Move::Straight);
    assert_eq!(agent.replans(), 0);
}
