//! `snakebot` - headless snake games.
//!
//! - `snakebot run` - play games and print a summary
//! - `snakebot config` - print the effective configuration

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use snake_cli::{run_games, AgentKind, RunConfig, RunSummary};

#[derive(Parser)]
#[command(name = "snakebot")]
#[command(about = "Plays headless snake games with a planning agent", version)]
struct Cli {
    /// YAML config with `agent` and `arena` sections
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play games and print a summary
    Run {
        /// Number of games
        #[arg(long, default_value_t = 1)]
        games: u32,

        /// Turns per game
        #[arg(long, default_value_t = 1000)]
        turns: u64,

        /// Base seed; each game derives its own
        #[arg(long, default_value_t = 0)]
        seed: u64,

        #[arg(long, value_enum, default_value_t = AgentKind::Planner)]
        agent: AgentKind,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the effective configuration as YAML
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = RunConfig::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Run {
            games,
            turns,
            seed,
            agent,
            json,
        } => {
            let summary = run_games(&config, agent, games, turns, seed)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print_summary(&summary);
            }
            Ok(())
        }
        Commands::Config => {
            print!("{}", config.to_yaml()?);
            Ok(())
        }
    }
}

fn print_summary(summary: &RunSummary) {
    let stats = &summary.stats;
    println!(
        "{:?} agent, {} game(s) x {} turns, seed {}",
        summary.agent, summary.games, summary.turns_per_game, summary.seed
    );
    println!("  food eaten:   {}", stats.food_eaten);
    println!("  best score:   {}", stats.best_score);
    println!("  deaths:       {}", stats.deaths);
    for (cause, count) in &stats.deaths_by_cause {
        println!("    {cause:?}: {count}");
    }
    println!("  longest life: {} turns", stats.longest_life);
}
