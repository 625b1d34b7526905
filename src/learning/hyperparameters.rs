//! Learner hyperparameters

use serde::{Deserialize, Serialize};

use super::exploration::EpsilonSchedule;
use crate::{Error, Result};

/// Hyperparameters shared by all three learners.
///
/// Defaults reproduce the reference experiment: γ = 0.99, α = 0.05, a Monte
/// Carlo step size of 0.01, ε = 0.01 throughout, and 1000 steps per episode.
///
/// # Examples
///
/// ```
/// use frozen_lake::learning::{EpsilonSchedule, Hyperparameters};
///
/// let hyperparameters = Hyperparameters::default()
///     .with_discount(0.9)
///     .with_learning_rate(0.5)
///     .with_exploration(EpsilonSchedule::constant(0.0))
///     .with_max_steps(50);
/// assert!(hyperparameters.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hyperparameters {
    /// Discount factor γ, in (0, 1]
    pub discount: f64,
    /// TD step size α, in (0, 1]
    pub learning_rate: f64,
    /// Incremental-average step size for Monte Carlo control, in (0, 1]
    pub monte_carlo_step_size: f64,
    /// Exploration rate per episode
    pub exploration: EpsilonSchedule,
    /// Hard cutoff on steps per episode
    pub max_steps: usize,
}

impl Hyperparameters {
    pub fn with_discount(mut self, discount: f64) -> Self {
        self.discount = discount;
        self
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_monte_carlo_step_size(mut self, step_size: f64) -> Self {
        self.monte_carlo_step_size = step_size;
        self
    }

    pub fn with_exploration(mut self, exploration: EpsilonSchedule) -> Self {
        self.exploration = exploration;
        self
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Check every parameter against its admissible range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidHyperparameter`] naming the first offending
    /// parameter, or [`Error::InvalidConfiguration`] for a zero step budget.
    pub fn validate(&self) -> Result<()> {
        unit_interval("discount", self.discount)?;
        unit_interval("learning rate", self.learning_rate)?;
        unit_interval("monte carlo step size", self.monte_carlo_step_size)?;
        self.exploration.validate()?;
        if self.max_steps == 0 {
            return Err(Error::InvalidConfiguration {
                message: "max_steps must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

fn unit_interval(name: &str, value: f64) -> Result<()> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(Error::InvalidHyperparameter {
            name: name.to_string(),
            value,
            range: "(0, 1]".to_string(),
        })
    }
}

impl Default for Hyperparameters {
    fn default() -> Self {
        Self {
            discount: 0.99,
            learning_rate: 0.05,
            monte_carlo_step_size: 0.01,
            exploration: EpsilonSchedule::default(),
            max_steps: 1000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Hyperparameters::default().validate().is_ok());
    }

    #[test]
    fn test_zero_discount_rejected() {
        let result = Hyperparameters::default().with_discount(0.0).validate();
        match result {
            Err(Error::InvalidHyperparameter { name, .. }) => assert_eq!(name, "discount"),
            other => panic!("expected InvalidHyperparameter, got {other:?}"),
        }
    }

    #[test]
    fn test_learning_rate_above_one_rejected() {
        assert!(
            Hyperparameters::default()
                .with_learning_rate(1.5)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn test_zero_step_budget_rejected() {
        assert!(matches!(
            Hyperparameters::default().with_max_steps(0).validate(),
            Err(Error::InvalidConfiguration { .. })
        ));
    }
}
