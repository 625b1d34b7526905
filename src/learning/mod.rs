//! Tabular control algorithms
//!
//! Three learners share one lazily populated [`ActionValueTable`] layout and
//! one epsilon-greedy behaviour policy, and differ only in when they update
//! and what target they update toward.
//!
//! | Aspect | Monte Carlo | SARSA | Q-learning |
//! |--------|-------------|-------|------------|
//! | Update timing | After the episode | Every step | Every step |
//! | Target | Realised return G | r + γ Q(s',a') | r + γ max_a' Q(s',a') |
//! | Bootstraps | No | Yes | Yes |
//! | Policy | On-policy | On-policy | Off-policy |
//!
//! ## Usage Example
//!
//! ```no_run
//! use frozen_lake::learning::{EpsilonSchedule, Hyperparameters, QLearner};
//!
//! let hyperparameters = Hyperparameters::default()
//!     .with_learning_rate(0.1)
//!     .with_exploration(EpsilonSchedule::linear(1.0, 0.05, 5_000));
//! let learner = QLearner::new(hyperparameters)?.with_seed(42);
//! # Ok::<(), frozen_lake::Error>(())
//! ```

pub mod algorithm;
pub mod episode;
pub mod exploration;
pub mod hyperparameters;
pub mod monte_carlo;
pub mod q_learning;
pub mod q_table;
pub mod sarsa;

pub use algorithm::Algorithm;
pub use episode::{EpisodeSummary, StepRecord, Termination, TrajectoryStep};
pub use exploration::{EpsilonSchedule, action_probabilities, select_action};
pub use hyperparameters::Hyperparameters;
pub use monte_carlo::MonteCarloControl;
pub use q_learning::QLearner;
pub use q_table::ActionValueTable;
pub use sarsa::SarsaLearner;
