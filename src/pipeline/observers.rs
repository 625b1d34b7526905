//! Observer pattern for training pipelines
//!
//! Observers allow composable data collection during training without coupling
//! training logic to specific output formats.

use std::{
    collections::VecDeque,
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    learning::{EpisodeSummary, StepRecord, Termination},
    ports::Observer,
};

/// Complete observation of a training episode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeObservation {
    /// Episode number
    pub episode: usize,
    /// Why the episode ended
    pub termination: Termination,
    /// Sum of rewards
    pub total_reward: f64,
    /// Transitions in order
    pub steps: Vec<StepRecord>,
}

/// Progress bar observer - Shows training progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    successes: usize,
    failures: usize,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            successes: 0,
            failures: 0,
        }
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, learner: &str, total_episodes: usize) -> Result<()> {
        let pb = ProgressBar::new(total_episodes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {prefix:>12} {bar:40.cyan/blue} {pos}/{len} episodes ({msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        pb.set_prefix(learner.to_string());
        self.successes = 0;
        self.failures = 0;
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_episode_end(&mut self, summary: &EpisodeSummary) -> Result<()> {
        if summary.success {
            self.successes += 1;
        } else {
            self.failures += 1;
        }

        if let Some(pb) = &self.progress_bar {
            pb.set_position(summary.episode as u64 + 1);
            // Counters refresh every 256 episodes and on finish.
            if summary.episode % 256 == 0 {
                pb.set_message(format!("S:{} F:{}", self.successes, self.failures));
            }
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = self.progress_bar.take() {
            pb.finish_with_message(format!("S:{} F:{}", self.successes, self.failures));
        }
        Ok(())
    }
}

/// Log observer - Periodically logs the recent success rate
pub struct LogObserver {
    interval: usize,
    learner: String,
    window: VecDeque<bool>,
}

impl LogObserver {
    /// Log every `interval` episodes, over a window of the same length
    pub fn new(interval: usize) -> Self {
        Self {
            interval: interval.max(1),
            learner: String::new(),
            window: VecDeque::new(),
        }
    }
}

impl Observer for LogObserver {
    fn on_training_start(&mut self, learner: &str, _total_episodes: usize) -> Result<()> {
        self.learner = learner.to_string();
        self.window.clear();
        Ok(())
    }

    fn on_episode_end(&mut self, summary: &EpisodeSummary) -> Result<()> {
        if self.window.len() == self.interval {
            self.window.pop_front();
        }
        self.window.push_back(summary.success);

        if (summary.episode + 1) % self.interval == 0 {
            let rate = self.window.iter().filter(|&&s| s).count() as f64 / self.window.len() as f64;
            info!(
                "{} episode {}: success rate {:.1}% over last {}",
                self.learner,
                summary.episode + 1,
                rate * 100.0,
                self.window.len()
            );
        }
        Ok(())
    }
}

/// JSONL observer - Exports episodes to JSON Lines format
pub struct JsonlObserver {
    writer: BufWriter<File>,
    current_steps: Vec<StepRecord>,
}

impl JsonlObserver {
    /// Create a new JSONL observer
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        Ok(Self {
            writer,
            current_steps: Vec::new(),
        })
    }
}

impl Observer for JsonlObserver {
    fn on_episode_start(&mut self, _episode: usize) -> Result<()> {
        self.current_steps.clear();
        Ok(())
    }

    fn on_step(&mut self, _episode: usize, step: &StepRecord) -> Result<()> {
        self.current_steps.push(*step);
        Ok(())
    }

    fn on_episode_end(&mut self, summary: &EpisodeSummary) -> Result<()> {
        let observation = EpisodeObservation {
            episode: summary.episode,
            termination: summary.termination,
            total_reward: summary.total_reward,
            steps: std::mem::take(&mut self.current_steps),
        };

        // Write as JSONL (one JSON object per line)
        serde_json::to_writer(&mut self.writer, &observation)?;
        writeln!(&mut self.writer)?;
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Milestone observer - Tracks key learning achievements
///
/// Records the first episode that reached the goal and the last episode that
/// did not, which bracket the point where the learned policy became reliable.
#[derive(Debug, Clone, Default)]
pub struct MilestoneObserver {
    learner: String,
    first_success: Option<usize>,
    last_failure: Option<usize>,
    episodes: usize,
}

impl MilestoneObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// First episode that reached the goal (if any)
    pub fn first_success(&self) -> Option<usize> {
        self.first_success
    }

    /// Last episode that ended in a hole or ran out of steps (if any)
    pub fn last_failure(&self) -> Option<usize> {
        self.last_failure
    }

    /// Number of episodes observed
    pub fn episodes(&self) -> usize {
        self.episodes
    }

    /// Episodes in a row that ended on the goal, counted from the end.
    pub fn trailing_success_streak(&self) -> usize {
        match self.last_failure {
            Some(last) => self.episodes - (last + 1),
            None => self.episodes,
        }
    }
}

impl Observer for MilestoneObserver {
    fn on_training_start(&mut self, learner: &str, _total_episodes: usize) -> Result<()> {
        *self = Self {
            learner: learner.to_string(),
            ..Self::default()
        };
        Ok(())
    }

    fn on_episode_end(&mut self, summary: &EpisodeSummary) -> Result<()> {
        self.episodes += 1;
        if summary.success {
            self.first_success.get_or_insert(summary.episode);
        } else {
            self.last_failure = Some(summary.episode);
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        match self.first_success {
            Some(first) => info!(
                "{}: first success at episode {}, last failure at {}, trailing streak {}",
                self.learner,
                first + 1,
                self.last_failure
                    .map(|e| (e + 1).to_string())
                    .unwrap_or_else(|| "none".to_string()),
                self.trailing_success_streak()
            ),
            None => info!("{}: goal never reached in {} episodes", self.learner, self.episodes),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(episode: usize, success: bool) -> EpisodeSummary {
        EpisodeSummary {
            episode,
            total_reward: if success { 1.0 } else { -1.0 },
            steps: 5,
            success,
            termination: if success {
                Termination::Goal
            } else {
                Termination::Hole
            },
        }
    }

    #[test]
    fn test_milestones() {
        let mut observer = MilestoneObserver::new();
        observer.on_training_start("SARSA", 5).unwrap();
        for (episode, success) in [false, true, false, true, true].into_iter().enumerate() {
            observer.on_episode_end(&summary(episode, success)).unwrap();
        }
        observer.on_training_end().unwrap();

        assert_eq!(observer.first_success(), Some(1));
        assert_eq!(observer.last_failure(), Some(2));
        assert_eq!(observer.trailing_success_streak(), 2);
        assert_eq!(observer.episodes(), 5);
    }

    #[test]
    fn test_milestones_without_success() {
        let mut observer = MilestoneObserver::new();
        observer.on_training_start("Q-Learning", 2).unwrap();
        observer.on_episode_end(&summary(0, false)).unwrap();
        observer.on_episode_end(&summary(1, false)).unwrap();

        assert_eq!(observer.first_success(), None);
        assert_eq!(observer.trailing_success_streak(), 0);
    }
}
