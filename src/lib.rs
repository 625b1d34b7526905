//! Tabular reinforcement learning on a deterministic Frozen Lake grid
//!
//! This crate provides:
//! - A configurable grid world with a start cell, a goal and holes
//! - Lazily materialized action-value tables with epsilon-greedy exploration
//! - First-visit Monte Carlo control, SARSA and Q-learning
//! - A training pipeline with per-episode metrics and pluggable observers
//! - Policy and greedy-path views, CSV export and a comparison of all three
//!   algorithms
//!
//! # Examples
//!
//! ```
//! use frozen_lake::{
//!     lake::{FrozenLakeEnv, LakeConfig},
//!     learning::{EpsilonSchedule, Hyperparameters, QLearner},
//!     pipeline::{TrainingConfig, TrainingPipeline},
//!     types::Cell,
//! };
//!
//! let lake = LakeConfig::new(3, 3, Cell::new(0, 0), Cell::new(2, 2));
//! let mut env = FrozenLakeEnv::new(lake)?;
//! let hyperparameters = Hyperparameters::default()
//!     .with_learning_rate(0.5)
//!     .with_exploration(EpsilonSchedule::constant(0.1))
//!     .with_max_steps(50);
//! let mut learner = QLearner::new(hyperparameters)?;
//!
//! let mut pipeline = TrainingPipeline::new(TrainingConfig {
//!     num_episodes: 100,
//!     seed: Some(7),
//! });
//! let result = pipeline.run(&mut learner, &mut env)?;
//! assert_eq!(result.metrics.len(), 100);
//! # Ok::<(), frozen_lake::Error>(())
//! ```

pub mod analysis;
pub mod cli;
pub mod error;
pub mod export;
pub mod lake;
pub mod learning;
pub mod pipeline;
pub mod ports;
pub mod types;
pub mod utils;

pub use analysis::{GreedyPath, PathStop, render_path, render_policy, trace_greedy_path};
pub use error::{Error, Result};
pub use lake::{FrozenLakeEnv, LakeConfig};
pub use learning::{
    ActionValueTable, Algorithm, EpsilonSchedule, Hyperparameters, MonteCarloControl, QLearner,
    SarsaLearner,
};
pub use pipeline::{Metrics, TrainingConfig, TrainingPipeline, TrainingResult};
pub use types::{Action, Cell, StateIndex};
