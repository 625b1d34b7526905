//! Training pipeline for tabular learners

use std::time::{Duration, Instant};

use log::info;
use serde::{Deserialize, Serialize};

use super::metrics::{Metrics, MetricsSummary};
use crate::{
    Result,
    lake::FrozenLakeEnv,
    learning::{ActionValueTable, EpisodeSummary, StepRecord},
    ports::{Learner, Observer},
};

/// Training configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Number of training episodes
    pub num_episodes: usize,

    /// Random seed
    pub seed: Option<u64>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            num_episodes: 250_000,
            seed: None,
        }
    }
}

/// Result of a training run
#[derive(Debug, Clone)]
pub struct TrainingResult {
    /// Name of the learner that produced the table
    pub learner: String,
    /// One entry per episode
    pub metrics: Metrics,
    /// Final action-value table
    pub q_table: ActionValueTable,
    /// Wall-clock training time
    pub elapsed: Duration,
}

impl TrainingResult {
    pub fn summary(&self) -> TrainingSummary {
        TrainingSummary {
            learner: self.learner.clone(),
            metrics: self.metrics.summary(),
            states_visited: self.q_table.len(),
            elapsed_secs: self.elapsed.as_secs_f64(),
        }
    }
}

/// Serializable digest of a [`TrainingResult`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingSummary {
    pub learner: String,
    pub metrics: MetricsSummary,
    pub states_visited: usize,
    pub elapsed_secs: f64,
}

impl TrainingSummary {
    /// Save summary to JSON file
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load summary from JSON file
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let summary = serde_json::from_reader(file)?;
        Ok(summary)
    }
}

/// Training pipeline for a single learner on one environment
pub struct TrainingPipeline {
    config: TrainingConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl TrainingPipeline {
    /// Create a new training pipeline
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Run `num_episodes` episodes sequentially.
    ///
    /// The learner keeps whatever table it already has; pass a fresh learner
    /// for an independent run.
    pub fn run(
        &mut self,
        learner: &mut dyn Learner,
        env: &mut FrozenLakeEnv,
    ) -> Result<TrainingResult> {
        if let Some(seed) = self.config.seed {
            learner.set_rng_seed(seed)?;
        }

        let total = self.config.num_episodes;
        info!(
            "training {} for {total} episodes on a {}x{} lake",
            learner.name(),
            env.rows(),
            env.cols()
        );

        let mut observers = Fanout(&mut self.observers);
        observers.on_training_start(learner.name(), total)?;

        let started = Instant::now();
        let mut metrics = Metrics::with_capacity(total);
        for episode in 0..total {
            observers.on_episode_start(episode)?;
            let summary = learner.run_episode(env, episode, &mut observers)?;
            metrics.record(&summary);
            observers.on_episode_end(&summary)?;
        }
        let elapsed = started.elapsed();

        observers.on_training_end()?;

        info!(
            "{} finished in {:.3}s: {} successes / {} episodes ({:.1}%), {} states visited",
            learner.name(),
            elapsed.as_secs_f64(),
            metrics.success_count(),
            metrics.len(),
            metrics.success_rate() * 100.0,
            learner.q_table().len()
        );

        Ok(TrainingResult {
            learner: learner.name().to_string(),
            metrics,
            q_table: learner.q_table().clone(),
            elapsed,
        })
    }
}

/// Forwards every event to each observer in registration order.
struct Fanout<'a>(&'a mut [Box<dyn Observer>]);

impl Observer for Fanout<'_> {
    fn on_training_start(&mut self, learner: &str, total_episodes: usize) -> Result<()> {
        for observer in self.0.iter_mut() {
            observer.on_training_start(learner, total_episodes)?;
        }
        Ok(())
    }

    fn on_episode_start(&mut self, episode: usize) -> Result<()> {
        for observer in self.0.iter_mut() {
            observer.on_episode_start(episode)?;
        }
        Ok(())
    }

    fn on_step(&mut self, episode: usize, step: &StepRecord) -> Result<()> {
        for observer in self.0.iter_mut() {
            observer.on_step(episode, step)?;
        }
        Ok(())
    }

    fn on_episode_end(&mut self, summary: &EpisodeSummary) -> Result<()> {
        for observer in self.0.iter_mut() {
            observer.on_episode_end(summary)?;
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        for observer in self.0.iter_mut() {
            observer.on_training_end()?;
        }
        Ok(())
    }
}
