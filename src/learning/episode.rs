//! Per-episode records produced by the learners

use serde::{Deserialize, Serialize};

use crate::types::{Action, StateIndex};

/// Why an episode stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// Reached the goal cell
    Goal,
    /// Fell into a hole
    Hole,
    /// Ran out of steps before reaching a terminal cell
    BudgetExhausted,
}

impl Termination {
    /// Classify a terminal transition by its reward sign.
    pub fn from_terminal_reward(reward: f64) -> Self {
        if reward > 0.0 {
            Termination::Goal
        } else {
            Termination::Hole
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Termination::Goal => "goal",
            Termination::Hole => "hole",
            Termination::BudgetExhausted => "budget",
        }
    }
}

/// One (state, action, reward) triple of a Monte Carlo trajectory
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectoryStep {
    pub state: StateIndex,
    pub action: Action,
    pub reward: f64,
}

/// A single environment interaction, as reported to observers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    /// Step number within the episode (0-based)
    pub step: usize,
    pub state: StateIndex,
    pub action: Action,
    pub reward: f64,
    pub next_state: StateIndex,
    pub done: bool,
}

/// Outcome of one training episode
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpisodeSummary {
    /// Episode number (0-based)
    pub episode: usize,
    /// Sum of rewards collected
    pub total_reward: f64,
    /// Number of steps taken
    pub steps: usize,
    /// Whether the goal was reached
    pub success: bool,
    pub termination: Termination,
}
