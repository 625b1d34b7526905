//! Behaviour shared by all three learners

use frozen_lake::{
    lake::{FrozenLakeEnv, LakeConfig},
    learning::{Algorithm, EpsilonSchedule, Hyperparameters, Termination},
    pipeline::{TrainingConfig, TrainingPipeline},
    ports::NoopObserver,
    types::Cell,
};

fn corridor() -> FrozenLakeEnv {
    FrozenLakeEnv::new(LakeConfig::new(1, 5, Cell::new(0, 0), Cell::new(0, 4))).unwrap()
}

#[test]
fn budget_exhausted_episodes_are_recorded_as_failures() {
    let hyperparameters = Hyperparameters::default().with_max_steps(1);

    for algorithm in Algorithm::ALL {
        let mut env = corridor();
        let mut learner = algorithm.build(hyperparameters.clone(), Some(5)).unwrap();
        let mut pipeline = TrainingPipeline::new(TrainingConfig {
            num_episodes: 20,
            seed: Some(5),
        });
        let result = pipeline.run(learner.as_mut(), &mut env).unwrap();

        assert_eq!(result.metrics.len(), 20, "{algorithm}");
        assert!(result.metrics.success().iter().all(|&s| !s), "{algorithm}");
        assert!(result.metrics.steps().iter().all(|&s| s == 1), "{algorithm}");
        assert!(result.metrics.rewards().iter().all(|&r| r == 0.0), "{algorithm}");
    }
}

#[test]
fn episode_summaries_respect_invariants() {
    let config = LakeConfig::new(4, 4, Cell::new(0, 0), Cell::new(3, 3))
        .with_holes([Cell::new(1, 1), Cell::new(2, 3), Cell::new(3, 0)]);
    let hyperparameters = Hyperparameters::default()
        .with_learning_rate(0.3)
        .with_monte_carlo_step_size(0.1)
        .with_exploration(EpsilonSchedule::linear(1.0, 0.05, 100))
        .with_max_steps(60);

    for algorithm in Algorithm::ALL {
        let mut env = FrozenLakeEnv::new(config.clone()).unwrap();
        let mut learner = algorithm.build(hyperparameters.clone(), Some(17)).unwrap();

        for episode in 0..200 {
            let summary = learner.run_episode(&mut env, episode, &mut NoopObserver).unwrap();
            assert_eq!(summary.episode, episode);
            assert!((1..=60).contains(&summary.steps), "{algorithm}: {summary:?}");
            match summary.termination {
                Termination::Goal => {
                    assert!(summary.success);
                    assert_eq!(summary.total_reward, 1.0);
                }
                Termination::Hole => {
                    assert!(!summary.success);
                    assert_eq!(summary.total_reward, -1.0);
                }
                Termination::BudgetExhausted => {
                    assert!(!summary.success);
                    assert_eq!(summary.steps, 60);
                    assert_eq!(summary.total_reward, 0.0);
                }
            }
        }

        // Terminal cells are never the source of an update.
        for terminal in [Cell::new(3, 3), Cell::new(1, 1), Cell::new(2, 3), Cell::new(3, 0)] {
            let state = env.cell_to_index(terminal);
            assert_eq!(learner.q_table().values(state), [0.0; 4], "{algorithm}");
        }
    }
}

#[test]
fn reset_restores_a_fresh_learner() {
    let hyperparameters = Hyperparameters::default()
        .with_exploration(EpsilonSchedule::constant(0.5))
        .with_max_steps(30);

    for algorithm in Algorithm::ALL {
        let mut env = corridor();
        let mut learner = algorithm.build(hyperparameters.clone(), Some(9)).unwrap();
        let first: Vec<_> = (0..5)
            .map(|e| learner.run_episode(&mut env, e, &mut NoopObserver).unwrap())
            .collect();

        learner.reset().unwrap();
        assert!(learner.q_table().is_empty(), "{algorithm}");
        let second: Vec<_> = (0..5)
            .map(|e| learner.run_episode(&mut env, e, &mut NoopObserver).unwrap())
            .collect();

        assert_eq!(first, second, "{algorithm}");
    }
}
