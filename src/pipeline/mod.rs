//! Training and evaluation pipeline abstractions
//!
//! This module provides composable pipelines for:
//! - Training a learner for a fixed number of episodes
//! - Recording per-episode metrics
//! - Comparing the control algorithms on one lake
//! - Recording observations during training

pub mod comparison;
pub mod metrics;
pub mod observers;
pub mod training;

pub use comparison::{ComparisonFramework, ComparisonResult};
pub use metrics::{Metrics, MetricsSummary};
// Re-export observer implementations (adapters)
pub use observers::{
    EpisodeObservation, JsonlObserver, LogObserver, MilestoneObserver, ProgressObserver,
};
pub use training::{TrainingConfig, TrainingPipeline, TrainingResult, TrainingSummary};

pub use crate::ports::{Learner, Observer};
