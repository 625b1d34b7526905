//! Q-learning (off-policy one-step TD control)

use log::debug;
use rand::rngs::StdRng;

use super::{
    episode::{EpisodeSummary, StepRecord, Termination},
    exploration::{build_rng, select_action},
    hyperparameters::Hyperparameters,
    q_table::ActionValueTable,
};
use crate::{
    Result,
    lake::FrozenLakeEnv,
    ports::{Learner, Observer},
};

/// Q-learning learner
///
/// Learns Q* by always updating toward the maximum successor value,
/// regardless of the action actually taken next.
///
/// Budget-exhausted episodes are recorded like any other, with
/// `success = false`, so metrics stay one entry per episode.
#[derive(Debug, Clone)]
pub struct QLearner {
    hyperparameters: Hyperparameters,
    q_table: ActionValueTable,
    rng: StdRng,
    rng_seed: Option<u64>,
}

impl QLearner {
    /// Create a new Q-learning learner
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
}

impl Learner for QLearner {
    fn run_episode(
        &mut self,
        env: &mut FrozenLakeEnv,
        episode: usize,
        observer: &mut dyn Observer,
    ) -> Result<EpisodeSummary> {
        let Hyperparameters {
            discount,
            learning_rate,
            max_steps,
            ..
        } = self.hyperparameters;
        let epsilon = self.hyperparameters.exploration.epsilon(episode);

        let mut state = env.reset();
        let mut total_reward = 0.0;

        for step in 0..max_steps {
            let action = select_action(&mut self.q_table, state, epsilon, &mut self.rng);
            let transition = env.step(action);
            total_reward += transition.reward;

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

            self.q_table.q_learning_update(
                state,
                action,
                transition.reward,
                transition.state,
                learning_rate,
                discount,
            );
            state = transition.state;

            if transition.done {
                let termination = Termination::from_terminal_reward(transition.reward);
                debug!(
                    "q-learning episode {episode}: {} steps, {}",
                    step + 1,
                    termination.label()
                );
                return Ok(EpisodeSummary {
                    episode,
                    total_reward,
                    steps: step + 1,
                    success: termination == Termination::Goal,
                    termination,
                });
            }
        }

        debug!("q-learning episode {episode}: step budget of {max_steps} exhausted");
        Ok(EpisodeSummary {
            episode,
            total_reward,
            steps: max_steps,
            success: false,
            termination: Termination::BudgetExhausted,
        })
    }

    fn q_table(&self) -> &ActionValueTable {
        &self.q_table
    }

    fn name(&self) -> &str {
        "Q-Learning"
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
        types::{Action, Cell},
    };

    #[test]
    fn test_hole_step_is_penalised() {
        let config =
            LakeConfig::new(1, 3, Cell::new(0, 1), Cell::new(0, 2)).with_holes([Cell::new(0, 0)]);
        let mut env = FrozenLakeEnv::new(config).unwrap();
        let start = env.cell_to_index(Cell::new(0, 1));

        let hyperparameters = Hyperparameters::default()
            .with_learning_rate(0.5)
            .with_exploration(EpsilonSchedule::constant(0.0));
        let mut learner = QLearner::new(hyperparameters).unwrap().with_seed(4);
        // Make Left the unique greedy action so the episode falls in the hole.
        learner.q_table.set(start, Action::Left, 0.2);

        let summary = learner.run_episode(&mut env, 0, &mut NoopObserver).unwrap();

        assert_eq!(summary.termination, Termination::Hole);
        assert_eq!(summary.steps, 1);
        assert_eq!(summary.total_reward, -1.0);
        assert!(!summary.success);
        // 0.2 + 0.5 * (-1.0 + 0.99 * 0.0 - 0.2)
        assert!((learner.q_table().get(start, Action::Left) - (-0.4)).abs() < 1e-12);
    }

    #[test]
    fn test_every_step_updates_table() {
        let config = LakeConfig::new(1, 4, Cell::new(0, 0), Cell::new(0, 3));
        let mut env = FrozenLakeEnv::new(config).unwrap();
        let hyperparameters = Hyperparameters::default()
            .with_learning_rate(1.0)
            .with_discount(1.0)
            .with_exploration(EpsilonSchedule::constant(0.0));
        let mut learner = QLearner::new(hyperparameters).unwrap().with_seed(12);

        // Seed a path of positive values so the greedy walk is deterministic.
        let s0 = env.cell_to_index(Cell::new(0, 0));
        let s1 = env.cell_to_index(Cell::new(0, 1));
        let s2 = env.cell_to_index(Cell::new(0, 2));
        learner.q_table.set(s0, Action::Right, 0.1);
        learner.q_table.set(s1, Action::Right, 0.2);
        learner.q_table.set(s2, Action::Right, 0.3);

        let summary = learner.run_episode(&mut env, 0, &mut NoopObserver).unwrap();

        assert_eq!(summary.steps, 3);
        assert!(summary.success);
        // With α = γ = 1 each pair is overwritten by its target.
        assert_eq!(learner.q_table().get(s0, Action::Right), 0.2);
        assert_eq!(learner.q_table().get(s1, Action::Right), 0.3);
        assert_eq!(learner.q_table().get(s2, Action::Right), 1.0);
    }
}
