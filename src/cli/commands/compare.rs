//! Compare command - Train all three algorithms side-by-side

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::{
    analysis::{render_policy, trace_greedy_path},
    cli::{
        config::{LakeArgs, LearningArgs},
        output::{format_duration, format_number, print_section, print_subsection},
    },
    export::write_metrics_csv,
    lake::FrozenLakeEnv,
    pipeline::{ComparisonFramework, Observer, ProgressObserver, TrainingConfig},
};

#[derive(Parser, Debug)]
#[command(about = "Compare Monte Carlo, SARSA and Q-learning", allow_negative_numbers = true)]
pub struct CompareArgs {
    /// Number of training episodes per algorithm
    #[arg(long, short = 'e', default_value_t = 250_000)]
    pub episodes: usize,

    #[command(flatten)]
    pub learning: LearningArgs,

    #[command(flatten)]
    pub lake: LakeArgs,

    /// Random seed for reproducibility (run `i` uses `seed + i`)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Hide the progress bars
    #[arg(long)]
    pub no_progress: bool,

    /// Export per-episode metrics of every run to CSV
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

pub fn execute(args: CompareArgs) -> Result<()> {
    let lake = args.lake.load()?;
    let hyperparameters = args.learning.hyperparameters()?;
    let env = FrozenLakeEnv::new(lake.clone())?;

    print_section("Algorithm comparison");
    println!(
        "{} episodes per algorithm on a {}x{} lake with {} holes",
        format_number(args.episodes),
        env.rows(),
        env.cols(),
        env.holes().len()
    );

    let mut framework = ComparisonFramework::new(
        lake,
        hyperparameters,
        TrainingConfig {
            num_episodes: args.episodes,
            seed: args.seed,
        },
    );
    if !args.no_progress {
        framework = framework.with_observers(|_| {
            let progress: Box<dyn Observer> = Box::new(ProgressObserver::new());
            Ok(vec![progress])
        });
    }
    let result = framework.run()?;

    for (algorithm, run) in &result.runs {
        print_subsection(&format!("{} policy", algorithm.name()));
        print!("{}", render_policy(&run.q_table, &env));
        let path = trace_greedy_path(&run.q_table, &env);
        println!("  greedy path: {} moves, {}", path.len(), path.stop);
    }

    print_subsection("Summary");
    println!(
        "  {:<12} {:>10} {:>10} {:>12} {:>12} {:>10}",
        "Algorithm", "Successes", "Success %", "Mean reward", "Mean steps", "Time"
    );
    for (algorithm, run) in &result.runs {
        let summary = run.metrics.summary();
        println!(
            "  {:<12} {:>10} {:>9.1}% {:>12.4} {:>12.1} {:>10}",
            algorithm.name(),
            format_number(summary.successes),
            summary.success_rate * 100.0,
            summary.mean_reward,
            summary.mean_steps,
            format_duration(run.elapsed)
        );
    }
    if let Some(best) = result.best_by_success_rate() {
        println!("\nHighest success rate: {best}");
    }

    if let Some(output_path) = &args.output {
        let runs: Vec<(&str, &_)> = result
            .runs
            .iter()
            .map(|(algorithm, run)| (algorithm.label(), &run.metrics))
            .collect();
        write_metrics_csv(output_path, &runs)?;
        println!("\nResults exported to: {}", output_path.display());
    }

    Ok(())
}
