//! Per-episode learning metrics

use serde::{Deserialize, Serialize};

use crate::{
    learning::EpisodeSummary,
    utils::{cumulative_rate, moving_average},
};

/// Reward, step count and success flag of every completed episode.
///
/// The three sequences are append-only and always the same length.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    rewards: Vec<f64>,
    steps: Vec<usize>,
    success: Vec<bool>,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(episodes: usize) -> Self {
        Self {
            rewards: Vec::with_capacity(episodes),
            steps: Vec::with_capacity(episodes),
            success: Vec::with_capacity(episodes),
        }
    }

    /// Append one episode.
    pub fn record(&mut self, summary: &EpisodeSummary) {
        self.rewards.push(summary.total_reward);
        self.steps.push(summary.steps);
        self.success.push(summary.success);
    }

    pub fn rewards(&self) -> &[f64] {
        &self.rewards
    }

    pub fn steps(&self) -> &[usize] {
        &self.steps
    }

    pub fn success(&self) -> &[bool] {
        &self.success
    }

    /// Number of recorded episodes
    pub fn len(&self) -> usize {
        self.rewards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rewards.is_empty()
    }

    pub fn success_count(&self) -> usize {
        self.success.iter().filter(|&&s| s).count()
    }

    pub fn failure_count(&self) -> usize {
        self.len() - self.success_count()
    }

    /// Get overall success rate
    pub fn success_rate(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.success_count() as f64 / self.len() as f64
        }
    }

    /// Get average episode reward
    pub fn mean_reward(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.rewards.iter().sum::<f64>() / self.len() as f64
        }
    }

    /// Get average episode length
    pub fn mean_steps(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.steps.iter().sum::<usize>() as f64 / self.len() as f64
        }
    }

    /// Success rate over the last `window` episodes (all of them if fewer).
    pub fn recent_success_rate(&self, window: usize) -> f64 {
        let start = self.len().saturating_sub(window);
        let recent = &self.success[start..];
        if recent.is_empty() {
            0.0
        } else {
            recent.iter().filter(|&&s| s).count() as f64 / recent.len() as f64
        }
    }

    /// Smoothed reward curve.
    pub fn moving_average_rewards(&self, window: usize) -> Vec<f64> {
        moving_average(self.rewards.iter().copied(), window)
    }

    /// Smoothed episode-length curve.
    pub fn moving_average_steps(&self, window: usize) -> Vec<f64> {
        moving_average(self.steps.iter().map(|&s| s as f64), window)
    }

    /// Success rate of episodes `0..=i`, for every `i`.
    pub fn cumulative_success_rate(&self) -> Vec<f64> {
        cumulative_rate(&self.success)
    }

    /// Get metrics summary
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            episodes: self.len(),
            successes: self.success_count(),
            failures: self.failure_count(),
            success_rate: self.success_rate(),
            mean_reward: self.mean_reward(),
            mean_steps: self.mean_steps(),
        }
    }
}

/// Summary of training metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub episodes: usize,
    pub successes: usize,
    pub failures: usize,
    pub success_rate: f64,
    pub mean_reward: f64,
    pub mean_steps: f64,
}
