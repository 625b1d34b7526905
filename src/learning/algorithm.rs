//! Algorithm identifiers and learner construction

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::{
    hyperparameters::Hyperparameters, monte_carlo::MonteCarloControl, q_learning::QLearner,
    sarsa::SarsaLearner,
};
use crate::{Error, Result, ports::Learner};

/// The three control algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    MonteCarlo,
    Sarsa,
    QLearning,
}

impl Algorithm {
    /// Every algorithm, in the order they are compared.
    pub const ALL: [Algorithm; 3] = [Algorithm::MonteCarlo, Algorithm::Sarsa, Algorithm::QLearning];

    /// Get human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::MonteCarlo => "Monte Carlo",
            Algorithm::Sarsa => "SARSA",
            Algorithm::QLearning => "Q-Learning",
        }
    }

    /// Get short label
    pub fn label(&self) -> &'static str {
        match self {
            Algorithm::MonteCarlo => "monte-carlo",
            Algorithm::Sarsa => "sarsa",
            Algorithm::QLearning => "q-learning",
        }
    }

    /// Build a fresh learner for this algorithm.
    pub fn build(&self, hyperparameters: Hyperparameters, seed: Option<u64>) -> Result<Box<dyn Learner>> {
        let learner: Box<dyn Learner> = match self {
            Algorithm::MonteCarlo => {
                let learner = MonteCarloControl::new(hyperparameters)?;
                Box::new(match seed {
                    Some(seed) => learner.with_seed(seed),
                    None => learner,
                })
            }
            Algorithm::Sarsa => {
                let learner = SarsaLearner::new(hyperparameters)?;
                Box::new(match seed {
                    Some(seed) => learner.with_seed(seed),
                    None => learner,
                })
            }
            Algorithm::QLearning => {
                let learner = QLearner::new(hyperparameters)?;
                Box::new(match seed {
                    Some(seed) => learner.with_seed(seed),
                    None => learner,
                })
            }
        };
        Ok(learner)
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "monte-carlo" | "mc" | "montecarlo" => Ok(Algorithm::MonteCarlo),
            "sarsa" => Ok(Algorithm::Sarsa),
            "q-learning" | "qlearning" | "q" => Ok(Algorithm::QLearning),
            _ => Err(Error::ParseAlgorithm {
                input: s.to_string(),
                expected: "monte-carlo, sarsa, q-learning".to_string(),
            }),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
