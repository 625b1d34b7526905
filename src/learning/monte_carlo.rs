//! First-visit Monte Carlo control
//!
//! Episodes are played to completion under the ε-greedy policy, then the
//! realised discounted return is credited backwards. No bootstrapping.

use std::collections::HashSet;

use log::debug;
use rand::rngs::StdRng;

use super::{
    episode::{EpisodeSummary, StepRecord, Termination, TrajectoryStep},
    exploration::{build_rng, select_action},
    hyperparameters::Hyperparameters,
    q_table::ActionValueTable,
};
use crate::{
    Result,
    lake::FrozenLakeEnv,
    ports::{Learner, Observer},
    types::{Action, StateIndex},
};

/// Monte Carlo control learner (episode-batched, first-visit, incremental average)
#[derive(Debug, Clone)]
pub struct MonteCarloControl {
    hyperparameters: Hyperparameters,
    q_table: ActionValueTable,
    rng: StdRng,
    rng_seed: Option<u64>,
}

impl MonteCarloControl {
    /// Create a learner with an empty table.
    ///
    /// # Errors
    ///
    /// Returns the first hyperparameter validation failure.
    pub fn new(hyperparameters: Hyperparameters) -> Result<Self> {
        hyperparameters.validate()?;
        Ok(Self {
            hyperparameters,
            q_table: ActionValueTable::new(),
            rng: build_rng(None),
            rng_seed: None,
        })
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = build_rng(Some(seed));
        self.rng_seed = Some(seed);
        self
    }

    pub fn hyperparameters(&self) -> &Hyperparameters {
        &self.hyperparameters
    }

    pub fn into_q_table(self) -> ActionValueTable {
        self.q_table
    }

    /// Backward pass over a finished trajectory.
    ///
    /// Walks from the last step to the first keeping `G ← γG + r`, and moves
    /// Q(s,a) toward `G` the first time each pair is met, which is its
    /// chronologically last occurrence. Returns the number of pairs updated.
    pub fn apply_returns(
        q_table: &mut ActionValueTable,
        trajectory: &[TrajectoryStep],
        discount: f64,
        step_size: f64,
    ) -> usize {
        let mut ret = 0.0;
        let mut visited: HashSet<(StateIndex, Action)> = HashSet::with_capacity(trajectory.len());

        for step in trajectory.iter().rev() {
            ret = discount * ret + step.reward;
            if visited.insert((step.state, step.action)) {
                q_table.update_toward(step.state, step.action, ret, step_size);
            }
        }

        visited.len()
    }
}

impl Learner for MonteCarloControl {
    fn run_episode(
        &mut self,
        env: &mut FrozenLakeEnv,
        episode: usize,
        observer: &mut dyn Observer,
    ) -> Result<EpisodeSummary> {
        let epsilon = self.hyperparameters.exploration.epsilon(episode);
        let mut trajectory = Vec::new();
        let mut total_reward = 0.0;
        let mut termination = Termination::BudgetExhausted;

        let mut state = env.reset();
        for step in 0..self.hyperparameters.max_steps {
            let action = select_action(&mut self.q_table, state, epsilon, &mut self.rng);
            let transition = env.step(action);

            observer.on_step(
                episode,
                &StepRecord {
                    step,
                    state,
                    action,
                    reward: transition.reward,
                    next_state: transition.state,
                    done: transition.done,
                },
            )?;

            trajectory.push(TrajectoryStep {
                state,
                action,
                reward: transition.reward,
            });
            total_reward += transition.reward;
            state = transition.state;

            if transition.done {
                termination = Termination::from_terminal_reward(transition.reward);
                break;
            }
        }

        let updated = Self::apply_returns(
            &mut self.q_table,
            &trajectory,
            self.hyperparameters.discount,
            self.hyperparameters.monte_carlo_step_size,
        );
        debug!(
            "monte carlo episode {episode}: {} steps, {updated} pairs updated, {}",
            trajectory.len(),
            termination.label()
        );

        Ok(EpisodeSummary {
            episode,
            total_reward,
            steps: trajectory.len(),
            success: total_reward > 0.0,
            termination,
        })
    }

    fn q_table(&self) -> &ActionValueTable {
        &self.q_table
    }

    fn name(&self) -> &str {
        "Monte Carlo"
    }

    fn reset(&mut self) -> Result<()> {
        self.q_table.clear();
        self.rng = build_rng(self.rng_seed);
        Ok(())
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.rng = build_rng(Some(seed));
        self.rng_seed = Some(seed);
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        lake::LakeConfig,
        learning::EpsilonSchedule,
        ports::NoopObserver,
        types::Cell,
    };

    fn step(state: usize, action: Action, reward: f64) -> TrajectoryStep {
        TrajectoryStep {
            state: StateIndex::new(state),
            action,
            reward,
        }
    }

    #[test]
    fn test_first_visit_updates_each_pair_once() {
        let mut table = ActionValueTable::new();
        let trajectory = [
            step(0, Action::Right, 0.0),
            step(1, Action::Left, 0.0),
            step(0, Action::Right, 0.0),
            step(1, Action::Right, 1.0),
        ];

        let updated = MonteCarloControl::apply_returns(&mut table, &trajectory, 0.9, 0.5);

        assert_eq!(updated, 3);
        // Backward: G=1 for (1,R); 0.9 for (0,R); 0.81 for (1,L); (0,R) again is skipped.
        assert!((table.get(StateIndex::new(1), Action::Right) - 0.5).abs() < 1e-12);
        assert!((table.get(StateIndex::new(0), Action::Right) - 0.45).abs() < 1e-12);
        assert!((table.get(StateIndex::new(1), Action::Left) - 0.405).abs() < 1e-12);
    }

    #[test]
    fn test_returns_do_not_bootstrap() {
        let mut table = ActionValueTable::new();
        table.set(StateIndex::new(1), Action::Down, 100.0);
        let trajectory = [step(0, Action::Right, 0.0), step(1, Action::Up, -1.0)];

        MonteCarloControl::apply_returns(&mut table, &trajectory, 0.5, 1.0);

        assert_eq!(table.get(StateIndex::new(0), Action::Right), -0.5);
        assert_eq!(table.get(StateIndex::new(1), Action::Up), -1.0);
    }

    #[test]
    fn test_budget_exhausted_episode_is_reported() {
        let config = LakeConfig::new(5, 5, Cell::new(0, 0), Cell::new(4, 4));
        let mut env = FrozenLakeEnv::new(config).unwrap();
        let hyperparameters = Hyperparameters::default()
            .with_exploration(EpsilonSchedule::constant(1.0))
            .with_max_steps(3);
        let mut learner = MonteCarloControl::new(hyperparameters).unwrap().with_seed(9);

        let summary = learner.run_episode(&mut env, 0, &mut NoopObserver).unwrap();

        assert_eq!(summary.steps, 3);
        assert_eq!(summary.termination, Termination::BudgetExhausted);
        assert!(!summary.success);
        assert_eq!(summary.total_reward, 0.0);
    }
}
