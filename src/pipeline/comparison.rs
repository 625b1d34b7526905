//! Side-by-side comparison of the control algorithms on one lake

use std::time::Duration;

use log::info;

use super::{
    metrics::MetricsSummary,
    training::{TrainingConfig, TrainingPipeline, TrainingResult},
};
use crate::{
    Result,
    lake::{FrozenLakeEnv, LakeConfig},
    learning::{Algorithm, Hyperparameters},
    ports::Observer,
};

/// Results of one comparison, in the order the algorithms were trained
#[derive(Debug, Clone)]
pub struct ComparisonResult {
    pub runs: Vec<(Algorithm, TrainingResult)>,
}

impl ComparisonResult {
    /// Look up the run of a given algorithm
    pub fn get(&self, algorithm: Algorithm) -> Option<&TrainingResult> {
        self.runs
            .iter()
            .find(|(a, _)| *a == algorithm)
            .map(|(_, result)| result)
    }

    /// Per-algorithm metrics digests
    pub fn summaries(&self) -> Vec<(Algorithm, MetricsSummary)> {
        self.runs
            .iter()
            .map(|(algorithm, result)| (*algorithm, result.metrics.summary()))
            .collect()
    }

    /// Per-algorithm wall-clock training time
    pub fn timings(&self) -> Vec<(Algorithm, Duration)> {
        self.runs
            .iter()
            .map(|(algorithm, result)| (*algorithm, result.elapsed))
            .collect()
    }

    /// Algorithm with the highest overall success rate (first on ties)
    pub fn best_by_success_rate(&self) -> Option<Algorithm> {
        self.runs
            .iter()
            .fold(None, |best: Option<(Algorithm, f64)>, (algorithm, result)| {
                let rate = result.metrics.success_rate();
                match best {
                    Some((_, best_rate)) if best_rate >= rate => best,
                    _ => Some((*algorithm, rate)),
                }
            })
            .map(|(algorithm, _)| algorithm)
    }
}

type ObserverFactory = Box<dyn Fn(Algorithm) -> Result<Vec<Box<dyn Observer>>>>;

/// Framework for training every algorithm under identical settings
///
/// Each algorithm trains a fresh learner against its own environment built
/// from the same [`LakeConfig`], so runs never share state.
pub struct ComparisonFramework {
    lake: LakeConfig,
    hyperparameters: Hyperparameters,
    training: TrainingConfig,
    algorithms: Vec<Algorithm>,
    observers: Option<ObserverFactory>,
}

impl ComparisonFramework {
    /// Create a new comparison framework over all algorithms
    pub fn new(lake: LakeConfig, hyperparameters: Hyperparameters, training: TrainingConfig) -> Self {
        Self {
            lake,
            hyperparameters,
            training,
            algorithms: Algorithm::ALL.to_vec(),
            observers: None,
        }
    }

    /// Restrict the comparison to a subset of algorithms
    pub fn with_algorithms(mut self, algorithms: impl IntoIterator<Item = Algorithm>) -> Self {
        self.algorithms = algorithms.into_iter().collect();
        self
    }

    /// Attach observers built per run
    pub fn with_observers<F>(mut self, factory: F) -> Self
    where
        F: Fn(Algorithm) -> Result<Vec<Box<dyn Observer>>> + 'static,
    {
        self.observers = Some(Box::new(factory));
        self
    }

    /// Train every configured algorithm sequentially.
    ///
    /// With a seed, run `i` uses `seed + i` so each learner draws its own
    /// stream while the whole comparison stays reproducible.
    pub fn run(&self) -> Result<ComparisonResult> {
        self.lake.validate()?;
        self.hyperparameters.validate()?;

        let mut runs = Vec::with_capacity(self.algorithms.len());
        for (i, &algorithm) in self.algorithms.iter().enumerate() {
            let seed = self.training.seed.map(|s| s.wrapping_add(i as u64));
            let mut env = FrozenLakeEnv::new(self.lake.clone())?;
            let mut learner = algorithm.build(self.hyperparameters.clone(), seed)?;

            let mut pipeline = TrainingPipeline::new(TrainingConfig {
                num_episodes: self.training.num_episodes,
                seed,
            });
            if let Some(factory) = &self.observers {
                for observer in factory(algorithm)? {
                    pipeline = pipeline.with_observer(observer);
                }
            }

            let result = pipeline.run(learner.as_mut(), &mut env)?;
            runs.push((algorithm, result));
        }

        let result = ComparisonResult { runs };
        if let Some(best) = result.best_by_success_rate() {
            info!("comparison finished; best success rate: {best}");
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Cell;

    fn small_lake() -> LakeConfig {
        LakeConfig::new(2, 2, Cell::new(0, 0), Cell::new(1, 1))
    }

    #[test]
    fn test_runs_every_algorithm_in_order() {
        let framework = ComparisonFramework::new(
            small_lake(),
            Hyperparameters::default().with_max_steps(20),
            TrainingConfig {
                num_episodes: 5,
                seed: Some(3),
            },
        );
        let result = framework.run().unwrap();

        let order: Vec<_> = result.runs.iter().map(|(a, _)| *a).collect();
        assert_eq!(order, Algorithm::ALL.to_vec());
        for (algorithm, run) in &result.runs {
            assert_eq!(run.learner, algorithm.name());
            assert_eq!(run.metrics.len(), 5);
        }
        assert!(result.get(Algorithm::Sarsa).is_some());
    }

    #[test]
    fn test_subset_and_seeded_reproducibility() {
        let build = || {
            ComparisonFramework::new(
                small_lake(),
                Hyperparameters::default().with_max_steps(20),
                TrainingConfig {
                    num_episodes: 8,
                    seed: Some(11),
                },
            )
            .with_algorithms([Algorithm::QLearning])
        };

        let first = build().run().unwrap();
        let second = build().run().unwrap();
        assert_eq!(first.runs.len(), 1);
        let (a, b) = (&first.runs[0].1, &second.runs[0].1);
        assert_eq!(a.metrics, b.metrics);
        assert_eq!(a.q_table, b.q_table);
    }
}
