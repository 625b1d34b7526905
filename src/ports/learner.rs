//! Learner port - abstraction over the tabular control algorithms
//!
//! Each algorithm owns its episode loop, because the three differ in when
//! actions are drawn and when updates happen. The pipeline only sees whole
//! episodes.

use crate::{
    Result,
    lake::FrozenLakeEnv,
    learning::{ActionValueTable, EpisodeSummary},
    ports::Observer,
};

/// Learner trait - Unified interface for Monte Carlo, SARSA and Q-learning
///
/// # Examples
///
/// ```no_run
/// use frozen_lake::{
///     lake::FrozenLakeEnv,
///     ports::{Learner, NoopObserver},
/// };
///
/// fn train<L: Learner>(learner: &mut L, env: &mut FrozenLakeEnv, episodes: usize) -> frozen_lake::Result<()> {
///     for episode in 0..episodes {
///         learner.run_episode(env, episode, &mut NoopObserver)?;
///     }
///     Ok(())
/// }
/// ```
pub trait Learner: Send {
    /// Play one episode against `env`, updating the table as the algorithm
    /// prescribes.
    ///
    /// `episode` is the 0-based episode index; it drives the exploration
    /// schedule. Every environment step is reported to `observer` before the
    /// episode summary is returned.
    ///
    /// # Errors
    ///
    /// Only observer failures are propagated; step-budget exhaustion is a
    /// normal [`Termination`](crate::learning::Termination).
    fn run_episode(
        &mut self,
        env: &mut FrozenLakeEnv,
        episode: usize,
        observer: &mut dyn Observer,
    ) -> Result<EpisodeSummary>;

    /// The learner's action-value table.
    fn q_table(&self) -> &ActionValueTable;

    /// Get the learner's name.
    ///
    /// Used for identification in comparisons and logging.
    fn name(&self) -> &str;

    /// Forget everything learned and restart the random stream.
    fn reset(&mut self) -> Result<()>;

    /// Seed the learner's internal random number generator.
    ///
    /// Training pipelines call this method when supplied with a deterministic
    /// seed to ensure reproducible results.
    fn set_rng_seed(&mut self, seed: u64) -> Result<()>;

    /// Enable downcasting to concrete types.
    fn as_any(&self) -> &dyn std::any::Any;
}
