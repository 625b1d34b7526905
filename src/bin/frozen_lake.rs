//! Frozen lake CLI - Tabular reinforcement learning on a grid world
//!
//! This CLI provides a unified interface for:
//! - Training Monte Carlo, SARSA or Q-learning agents
//! - Comparing all three algorithms under identical settings
//! - Inspecting and exporting lake layouts

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "frozen-lake")]
#[command(version, about = "Tabular reinforcement learning on the frozen lake", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a single learner
    Train(frozen_lake::cli::commands::train::TrainArgs),

    /// Train all three algorithms and compare them
    Compare(frozen_lake::cli::commands::compare::CompareArgs),

    /// Show a lake layout
    Layout(frozen_lake::cli::commands::layout::LayoutArgs),
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Train(args) => frozen_lake::cli::commands::train::execute(args),
        Commands::Compare(args) => frozen_lake::cli::commands::compare::execute(args),
        Commands::Layout(args) => frozen_lake::cli::commands::layout::execute(args),
    }
}
