//! Train command - Train one learner on the lake

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use crate::{
    analysis::{render_path, render_policy, trace_greedy_path},
    cli::{
        config::{LakeArgs, LearningArgs},
        output::{format_duration, format_number, print_kv, print_metrics_summary, print_section, print_subsection},
    },
    export::{write_metrics_csv, write_q_table_csv},
    lake::FrozenLakeEnv,
    learning::Algorithm,
    pipeline::{
        JsonlObserver, LogObserver, MilestoneObserver, ProgressObserver, TrainingConfig,
        TrainingPipeline,
    },
};

/// Control algorithm to train
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LearnerType {
    /// First-visit Monte Carlo control
    MonteCarlo,
    /// SARSA (on-policy TD control)
    Sarsa,
    /// Q-learning (off-policy TD control)
    QLearning,
}

impl From<LearnerType> for Algorithm {
    fn from(learner: LearnerType) -> Self {
        match learner {
            LearnerType::MonteCarlo => Algorithm::MonteCarlo,
            LearnerType::Sarsa => Algorithm::Sarsa,
            LearnerType::QLearning => Algorithm::QLearning,
        }
    }
}

#[derive(Parser, Debug)]
#[command(about = "Train a learner", allow_negative_numbers = true)]
pub struct TrainArgs {
    /// Type of learner to train
    #[arg(value_enum)]
    pub learner: LearnerType,

    /// Number of training episodes
    #[arg(long, short = 'e', default_value_t = 250_000)]
    pub episodes: usize,

    #[command(flatten)]
    pub learning: LearningArgs,

    #[command(flatten)]
    pub lake: LakeArgs,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Log the recent success rate every N episodes
    #[arg(long)]
    pub log_interval: Option<usize>,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Optional CSV file for per-episode metrics
    #[arg(long)]
    pub metrics: Option<PathBuf>,

    /// Optional CSV file for the learned action values
    #[arg(long)]
    pub q_table: Option<PathBuf>,

    /// Optional file for JSONL observations
    #[arg(long)]
    pub observations: Option<PathBuf>,
}

/// Default file name when `--summary` names a directory.
const SUMMARY_FILE_NAME: &str = "training_summary.json";

/// Resolve `--summary` to a JSON file path.
///
/// A directory argument (trailing separator or no file name) gets
/// [`SUMMARY_FILE_NAME`]; any other extension is replaced by `.json`.
fn summary_file_path(requested: &Path) -> PathBuf {
    let names_directory = requested
        .as_os_str()
        .to_string_lossy()
        .ends_with(std::path::is_separator)
        || requested.file_name().is_none();
    if names_directory {
        return requested.join(SUMMARY_FILE_NAME);
    }

    let is_json = requested
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        requested.to_path_buf()
    } else {
        requested.with_extension("json")
    }
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let lake = args.lake.load()?;
    let hyperparameters = args.learning.hyperparameters()?;
    let algorithm = Algorithm::from(args.learner);

    let summary_path = args.summary.as_deref().map(|raw| {
        let resolved = summary_file_path(raw);
        if resolved != raw {
            println!("Summary path normalized to {}", resolved.display());
        }
        resolved
    });

    let mut env = FrozenLakeEnv::new(lake)?;
    let mut learner = algorithm.build(hyperparameters.clone(), args.seed)?;

    print_section(&format!("Training {}", algorithm.name()));
    print_kv("Lake", &format!("{}x{}, {} holes", env.rows(), env.cols(), env.holes().len()));
    print_kv("Episodes", &format_number(args.episodes));
    print_kv("Max steps", &format_number(hyperparameters.max_steps));
    print_kv("Discount", &hyperparameters.discount.to_string());
    match algorithm {
        Algorithm::MonteCarlo => print_kv("Step size", &hyperparameters.monte_carlo_step_size.to_string()),
        Algorithm::Sarsa | Algorithm::QLearning => {
            print_kv("Learning rate", &hyperparameters.learning_rate.to_string())
        }
    }
    print_kv("Exploration", &hyperparameters.exploration.to_string());
    if let Some(seed) = args.seed {
        print_kv("Seed", &seed.to_string());
    }

    let mut pipeline = TrainingPipeline::new(TrainingConfig {
        num_episodes: args.episodes,
        seed: args.seed,
    })
    .with_observer(Box::new(MilestoneObserver::new()));
    if !args.no_progress {
        pipeline = pipeline.with_observer(Box::new(ProgressObserver::new()));
    }
    if let Some(interval) = args.log_interval {
        pipeline = pipeline.with_observer(Box::new(LogObserver::new(interval)));
    }
    if let Some(path) = &args.observations {
        let observer = JsonlObserver::new(path)
            .with_context(|| format!("Failed to create observation file {}", path.display()))?;
        pipeline = pipeline.with_observer(Box::new(observer));
    }

    let result = pipeline.run(learner.as_mut(), &mut env)?;

    print_subsection("Results");
    print_metrics_summary(&result.metrics.summary());
    print_kv("States visited", &format_number(result.q_table.len()));
    print_kv("Training time", &format_duration(result.elapsed));

    print_subsection("Learned policy");
    print!("{}", render_policy(&result.q_table, &env));

    let path = trace_greedy_path(&result.q_table, &env);
    print_subsection("Greedy path");
    print!("{}", render_path(&env, &path));
    println!("  {} moves, {}", path.len(), path.stop);

    if let Some(path) = &args.metrics {
        write_metrics_csv(path, &[(algorithm.label(), &result.metrics)])?;
        println!("\nMetrics written to {}", path.display());
    }
    if let Some(path) = &args.q_table {
        write_q_table_csv(path, &result.q_table, &env)?;
        println!("Action values written to {}", path.display());
    }
    if let Some(path) = &summary_path {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        result
            .summary()
            .save(path)
            .with_context(|| format!("Failed to write summary to {}", path.display()))?;
        println!("Summary written to {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_file_path() {
        assert_eq!(summary_file_path(Path::new("out/run")), PathBuf::from("out/run.json"));
        assert_eq!(summary_file_path(Path::new("out/run.txt")), PathBuf::from("out/run.json"));
        assert_eq!(summary_file_path(Path::new("out/run.JSON")), PathBuf::from("out/run.JSON"));
        assert_eq!(
            summary_file_path(Path::new("out/")),
            PathBuf::from("out/training_summary.json")
        );
        assert_eq!(
            summary_file_path(Path::new("..")),
            PathBuf::from("../training_summary.json")
        );
    }

    #[test]
    fn test_learner_type_maps_to_algorithm() {
        assert_eq!(Algorithm::from(LearnerType::MonteCarlo), Algorithm::MonteCarlo);
        assert_eq!(Algorithm::from(LearnerType::Sarsa), Algorithm::Sarsa);
        assert_eq!(Algorithm::from(LearnerType::QLearning), Algorithm::QLearning);
    }
}
