//! Shared configuration arguments for CLI commands

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::{
    lake::LakeConfig,
    learning::{EpsilonSchedule, Hyperparameters},
};

/// Where the lake layout comes from
#[derive(Args, Debug, Clone, Default)]
pub struct LakeArgs {
    /// JSON lake layout (defaults to the built-in 10x10 lake)
    #[arg(long)]
    pub lake: Option<PathBuf>,
}

impl LakeArgs {
    /// Load and validate the selected layout.
    pub fn load(&self) -> Result<LakeConfig> {
        let config = match &self.lake {
            Some(path) => LakeConfig::load(path)
                .with_context(|| format!("Failed to load lake layout from {}", path.display()))?,
            None => LakeConfig::default(),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Hyperparameters shared by every learner
#[derive(Args, Debug, Clone)]
pub struct LearningArgs {
    /// Steps allowed per episode before it is cut off
    #[arg(long, default_value_t = 1000)]
    pub max_steps: usize,

    /// Discount factor γ, in (0, 1]
    #[arg(long, default_value_t = 0.99)]
    pub discount: f64,

    /// TD learning rate α for SARSA and Q-learning, in (0, 1]
    #[arg(long, default_value_t = 0.05)]
    pub alpha: f64,

    /// Incremental-average step size for Monte Carlo control, in (0, 1]
    #[arg(long, default_value_t = 0.01)]
    pub mc_step_size: f64,

    /// Exploration schedule: `0.1`, `linear:1.0,0.05,5000` or `exp:1.0,0.999,0.01`
    #[arg(long, default_value = "0.01")]
    pub epsilon: String,
}

impl Default for LearningArgs {
    fn default() -> Self {
        let defaults = Hyperparameters::default();
        Self {
            max_steps: defaults.max_steps,
            discount: defaults.discount,
            alpha: defaults.learning_rate,
            mc_step_size: defaults.monte_carlo_step_size,
            epsilon: defaults.exploration.to_string(),
        }
    }
}

impl LearningArgs {
    /// Build validated hyperparameters.
    pub fn hyperparameters(&self) -> Result<Hyperparameters> {
        let exploration: EpsilonSchedule = self
            .epsilon
            .parse()
            .with_context(|| format!("Invalid --epsilon value '{}'", self.epsilon))?;

        let hyperparameters = Hyperparameters::default()
            .with_max_steps(self.max_steps)
            .with_discount(self.discount)
            .with_learning_rate(self.alpha)
            .with_monte_carlo_step_size(self.mc_step_size)
            .with_exploration(exploration);
        hyperparameters.validate()?;
        Ok(hyperparameters)
    }
}
