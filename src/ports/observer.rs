//! Observer port - abstraction for training observation and data collection
//!
//! This port defines the interface for observing training events,
//! allowing composable data collection without coupling training
//! logic to specific output formats or metrics.

use crate::{
    Result,
    learning::{EpisodeSummary, StepRecord},
};

/// Observer trait for monitoring training
///
/// # Event Sequence
///
/// 1. `on_training_start(learner, total_episodes)` - Once at the beginning
/// 2. For each episode:
///    - `on_episode_start(episode)`
///    - `on_step(episode, step)` - For each environment step
///    - `on_episode_end(summary)`
/// 3. `on_training_end()` - Once at the end
///
/// # Examples
///
/// ```no_run
/// use frozen_lake::{learning::EpisodeSummary, ports::Observer};
///
/// struct SuccessCounter {
///     successes: usize,
/// }
///
/// impl Observer for SuccessCounter {
///     fn on_episode_end(&mut self, summary: &EpisodeSummary) -> frozen_lake::Result<()> {
///         if summary.success {
///             self.successes += 1;
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Observer: Send {
    /// Called when training starts.
    ///
    /// # Parameters
    ///
    /// * `learner` - Name of the learner being trained
    /// * `total_episodes` - Number of episodes that will be run
    fn on_training_start(&mut self, _learner: &str, _total_episodes: usize) -> Result<()> {
        Ok(())
    }

    /// Called before the environment is reset for an episode.
    fn on_episode_start(&mut self, _episode: usize) -> Result<()> {
        Ok(())
    }

    /// Called after every environment step, before the learner moves on.
    fn on_step(&mut self, _episode: usize, _step: &StepRecord) -> Result<()> {
        Ok(())
    }

    /// Called once the episode is over and the learner has updated its table.
    fn on_episode_end(&mut self, _summary: &EpisodeSummary) -> Result<()> {
        Ok(())
    }

    /// Called when training completes.
    ///
    /// Use this to finalize outputs, close files, or display summaries.
    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl Observer for NoopObserver {}
