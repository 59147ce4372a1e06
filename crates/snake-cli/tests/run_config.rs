use snake_cli::{build_agent, run_games, AgentKind, RunConfig};

const SMALL: &str = "
agent:
  chain_lookahead: false
arena:
  width: 11
  height: 11
  food: 2
";

#[test]
fn sections_are_optional() {
    let config = RunConfig::from_yaml_str("{}").expect("empty mapping parses");
    assert_eq!(config, RunConfig::default());

    let config = RunConfig::from_yaml_str(SMALL).expect("valid config");
    assert!(!config.agent.chain_lookahead);
    assert!(config.agent.safe_goals);
    assert_eq!(config.arena.width, 11);
    assert_eq!(config.arena.food, 2);
    assert!(config.arena.border_walls);
}

#[test]
fn agent_limits_are_validated() {
    let err = RunConfig::from_yaml_str("agent:\n  max_expansions: 0\n").expect_err("zero cap");
    assert!(format!("{err:#}").contains("max_expansions"));
}

#[test]
fn printed_yaml_loads_back() {
    let config = RunConfig::from_yaml_str(SMALL).expect("valid config");
    let text = config.to_yaml().expect("serializes");
    assert_eq!(RunConfig::from_yaml_str(&text).expect("reparses"), config);
}

#[test]
fn runs_are_reproducible_per_seed() {
    let config = RunConfig::from_yaml_str(SMALL).expect("valid config");
    let a = run_games(&config, AgentKind::Planner, 2, 150, 9).expect("runs");
    let b = run_games(&config, AgentKind::Planner, 2, 150, 9).expect("runs");

    assert_eq!(a, b);
    assert_eq!(a.stats.turns, 300);
    assert!(a.stats.food_eaten > 0);
}

#[test]
fn invalid_arena_is_reported_with_context() {
    let config = RunConfig::from_yaml_str("arena:\n  width: 2\n").expect("parses");
    let err = run_games(&config, AgentKind::Greedy, 1, 10, 0).expect_err("too small");
    let message = format!("{err:#}");
    assert!(message.contains("game 0"), "{message}");
    assert!(message.contains("3x3"), "{message}");
}

#[test]
fn both_agent_kinds_build() {
    let config = RunConfig::default();
    for kind in [AgentKind::Planner, AgentKind::Greedy] {
        let _agent = build_agent(kind, &config.agent, 1);
    }
}
