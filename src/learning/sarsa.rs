//! SARSA (on-policy one-step TD control)

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

/// SARSA learner
///
/// Learns Q^π for the ε-greedy policy it follows: the update target uses the
/// action that will actually be taken next.
#[derive(Debug, Clone)]
pub struct SarsaLearner {
    hyperparameters: Hyperparameters,
    q_table: ActionValueTable,
    rng: StdRng,
    rng_seed: Option<u64>,
}

impl SarsaLearner {
    /// Create a new SARSA learner
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

impl Learner for SarsaLearner {
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
        let mut action = select_action(&mut self.q_table, state, epsilon, &mut self.rng);
        let mut total_reward = 0.0;

        for step in 0..max_steps {
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

            if transition.done {
                self.q_table
                    .sarsa_update(state, action, transition.reward, None, learning_rate, discount);
                let termination = Termination::from_terminal_reward(transition.reward);
                debug!("sarsa episode {episode}: {} steps, {}", step + 1, termination.label());
                return Ok(EpisodeSummary {
                    episode,
                    total_reward,
                    steps: step + 1,
                    success: termination == Termination::Goal,
                    termination,
                });
            }

            let next_action =
                select_action(&mut self.q_table, transition.state, epsilon, &mut self.rng);
            self.q_table.sarsa_update(
                state,
                action,
                transition.reward,
                Some((transition.state, next_action)),
                learning_rate,
                discount,
            );

            state = transition.state;
            action = next_action;
        }

        debug!("sarsa episode {episode}: step budget of {max_steps} exhausted");
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
        "SARSA"
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
        types::{Action, Cell, StateIndex},
    };

    #[test]
    fn test_terminal_step_updates_without_bootstrap() {
        // Start right next to the goal with a value row that makes Right greedy.
        let config = LakeConfig::new(1, 2, Cell::new(0, 0), Cell::new(0, 1));
        let mut env = FrozenLakeEnv::new(config).unwrap();
        let start = env.cell_to_index(Cell::new(0, 0));
        let goal = env.cell_to_index(Cell::new(0, 1));

        let hyperparameters = Hyperparameters::default()
            .with_learning_rate(0.5)
            .with_discount(0.9)
            .with_exploration(EpsilonSchedule::constant(0.0));
        let mut learner = SarsaLearner::new(hyperparameters).unwrap().with_seed(1);
        learner.q_table.set(start, Action::Right, 0.1);
        learner.q_table.set(goal, Action::Up, 50.0);

        let summary = learner.run_episode(&mut env, 0, &mut NoopObserver).unwrap();

        assert_eq!(summary.steps, 1);
        assert!(summary.success);
        assert_eq!(summary.termination, Termination::Goal);
        // 0.1 + 0.5 * (1.0 - 0.1)
        assert!((learner.q_table().get(start, Action::Right) - 0.55).abs() < 1e-12);
    }

    /// Collects every reported transition.
    #[derive(Default)]
    struct StepLog(Vec<StepRecord>);

    impl Observer for StepLog {
        fn on_step(&mut self, _episode: usize, step: &StepRecord) -> Result<()> {
            self.0.push(*step);
            Ok(())
        }
    }

    #[test]
    fn test_update_bootstraps_from_sampled_next_action() {
        // Two steps from the centre of a 5x5 lake can neither leave the
        // start cell in place nor reach the goal.
        let config = LakeConfig::new(5, 5, Cell::new(2, 2), Cell::new(0, 0));
        let successor_row = [0.4, 0.3, 0.2, 0.1];
        let discount = 0.9;
        let mut off_greedy_draws = 0;

        for seed in 0..64 {
            let mut env = FrozenLakeEnv::new(config.clone()).unwrap();
            let start = env.cell_to_index(Cell::new(2, 2));
            let hyperparameters = Hyperparameters::default()
                .with_learning_rate(1.0)
                .with_discount(discount)
                .with_exploration(EpsilonSchedule::constant(1.0))
                .with_max_steps(2);
            let mut learner = SarsaLearner::new(hyperparameters).unwrap().with_seed(seed);
            for index in (0..env.num_states()).filter(|&i| i != start.value()) {
                *learner.q_table.entry(StateIndex::new(index)) = successor_row;
            }

            let mut log = StepLog::default();
            learner.run_episode(&mut env, 0, &mut log).unwrap();

            let &[first, second] = log.0.as_slice() else {
                panic!("expected two steps, got {}", log.0.len());
            };
            assert_eq!(first.state, start);
            assert_eq!(second.state, first.next_state);

            // With α = 1 the pair holds its target: the value of the action
            // actually taken next, not the successor's maximum.
            let expected = first.reward + discount * successor_row[second.action.index()];
            let value = learner.q_table().get(start, first.action);
            assert!(
                (value - expected).abs() < 1e-12,
                "seed {seed}: Q = {value}, expected {expected}"
            );

            if second.action != Action::Up {
                off_greedy_draws += 1;
                assert!((value - discount * 0.4).abs() > 1e-6);
            }
        }

        assert!(off_greedy_draws > 0);
    }

    #[test]
    fn test_budget_exhaustion_records_full_budget() {
        let config = LakeConfig::new(6, 6, Cell::new(0, 0), Cell::new(5, 5));
        let mut env = FrozenLakeEnv::new(config).unwrap();
        let hyperparameters = Hyperparameters::default().with_max_steps(4);
        let mut learner = SarsaLearner::new(hyperparameters).unwrap().with_seed(3);

        let summary = learner.run_episode(&mut env, 0, &mut NoopObserver).unwrap();

        assert_eq!(summary.steps, 4);
        assert!(!summary.success);
        assert_eq!(summary.termination, Termination::BudgetExhausted);
    }

    #[test]
    fn test_reset_clears_table() {
        let config = LakeConfig::new(2, 2, Cell::new(0, 0), Cell::new(1, 1));
        let mut env = FrozenLakeEnv::new(config).unwrap();
        let mut learner = SarsaLearner::new(Hyperparameters::default().with_max_steps(10))
            .unwrap()
            .with_seed(8);
        learner.run_episode(&mut env, 0, &mut NoopObserver).unwrap();
        assert!(!learner.q_table().is_empty());

        learner.reset().unwrap();
        assert!(learner.q_table().is_empty());
    }
}
