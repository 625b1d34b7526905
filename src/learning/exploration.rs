//! Epsilon-greedy behaviour policy and exploration-rate schedules

use std::{fmt, str::FromStr};

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use super::q_table::{ActionValueTable, greedy_set};
use crate::{
    Error, Result,
    types::{Action, StateIndex},
    utils::sample_categorical,
};

pub(crate) fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Exploration rate as a function of the episode index
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EpsilonSchedule {
    /// Same epsilon for every episode
    Constant { epsilon: f64 },
    /// Straight line from `start` down to `floor` over `decay_episodes`, then flat
    Linear {
        start: f64,
        floor: f64,
        decay_episodes: usize,
    },
    /// `start * decay^episode`, never below `floor`
    Exponential { start: f64, decay: f64, floor: f64 },
}

impl EpsilonSchedule {
    pub fn constant(epsilon: f64) -> Self {
        EpsilonSchedule::Constant { epsilon }
    }

    pub fn linear(start: f64, floor: f64, decay_episodes: usize) -> Self {
        EpsilonSchedule::Linear {
            start,
            floor,
            decay_episodes,
        }
    }

    pub fn exponential(start: f64, decay: f64, floor: f64) -> Self {
        EpsilonSchedule::Exponential { start, decay, floor }
    }

    /// Epsilon to use for every action draw of episode `episode`.
    pub fn epsilon(&self, episode: usize) -> f64 {
        match *self {
            EpsilonSchedule::Constant { epsilon } => epsilon,
            EpsilonSchedule::Linear {
                start,
                floor,
                decay_episodes,
            } => {
                if decay_episodes == 0 || episode >= decay_episodes {
                    return floor;
                }
                let progress = episode as f64 / decay_episodes as f64;
                (start - (start - floor) * progress).max(floor)
            }
            EpsilonSchedule::Exponential { start, decay, floor } => {
                let exponent = i32::try_from(episode).unwrap_or(i32::MAX);
                (start * decay.powi(exponent)).max(floor)
            }
        }
    }

    /// Check that every epsilon involved lies in [0, 1].
    pub fn validate(&self) -> Result<()> {
        let check = |name: &str, value: f64| -> Result<()> {
            if (0.0..=1.0).contains(&value) {
                Ok(())
            } else {
                Err(Error::InvalidHyperparameter {
                    name: name.to_string(),
                    value,
                    range: "[0, 1]".to_string(),
                })
            }
        };

        match *self {
            EpsilonSchedule::Constant { epsilon } => check("epsilon", epsilon),
            EpsilonSchedule::Linear { start, floor, .. } => {
                check("epsilon start", start)?;
                check("epsilon floor", floor)
            }
            EpsilonSchedule::Exponential { start, decay, floor } => {
                check("epsilon start", start)?;
                check("epsilon decay", decay)?;
                check("epsilon floor", floor)
            }
        }
    }
}

impl Default for EpsilonSchedule {
    fn default() -> Self {
        EpsilonSchedule::constant(0.01)
    }
}

/// Parses `0.1`, `constant:0.1`, `linear:START,FLOOR,EPISODES` or
/// `exponential:START,DECAY,FLOOR`.
impl FromStr for EpsilonSchedule {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let input = s.trim();
        let fail = |reason: &str| Error::ParseSchedule {
            input: s.to_string(),
            reason: reason.to_string(),
        };
        let parse_f64 = |token: &str| {
            token
                .trim()
                .parse::<f64>()
                .map_err(|_| fail(&format!("'{}' is not a number", token.trim())))
        };

        let (kind, params) = match input.split_once(':') {
            Some((kind, params)) => (kind.trim().to_ascii_lowercase(), params),
            None => ("constant".to_string(), input),
        };
        let parts: Vec<&str> = params.split(',').collect();

        let schedule = match kind.as_str() {
            "constant" | "const" => {
                if parts.len() != 1 {
                    return Err(fail("expected a single epsilon"));
                }
                EpsilonSchedule::constant(parse_f64(parts[0])?)
            }
            "linear" => {
                if parts.len() != 3 {
                    return Err(fail("expected START,FLOOR,EPISODES"));
                }
                let decay_episodes = parts[2]
                    .trim()
                    .parse::<usize>()
                    .map_err(|_| fail("decay episodes must be a non-negative integer"))?;
                EpsilonSchedule::linear(parse_f64(parts[0])?, parse_f64(parts[1])?, decay_episodes)
            }
            "exponential" | "exp" => {
                if parts.len() != 3 {
                    return Err(fail("expected START,DECAY,FLOOR"));
                }
                EpsilonSchedule::exponential(
                    parse_f64(parts[0])?,
                    parse_f64(parts[1])?,
                    parse_f64(parts[2])?,
                )
            }
            other => return Err(fail(&format!("unknown schedule kind '{other}'"))),
        };

        schedule.validate()?;
        Ok(schedule)
    }
}

impl fmt::Display for EpsilonSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EpsilonSchedule::Constant { epsilon } => write!(f, "constant:{epsilon}"),
            EpsilonSchedule::Linear {
                start,
                floor,
                decay_episodes,
            } => write!(f, "linear:{start},{floor},{decay_episodes}"),
            EpsilonSchedule::Exponential { start, decay, floor } => {
                write!(f, "exponential:{start},{decay},{floor}")
            }
        }
    }
}

/// Epsilon-soft distribution over [`Action::ALL`] with `greedy` as the favoured action.
///
/// The greedy action gets `1 - ε + ε/4`, every other action `ε/4`.
pub fn action_probabilities(greedy: Action, epsilon: f64) -> [f64; Action::COUNT] {
    let share = epsilon / Action::COUNT as f64;
    let mut probabilities = [share; Action::COUNT];
    probabilities[greedy.index()] = 1.0 - epsilon + share;
    probabilities
}

/// ε-greedy action selection
///
/// The state's row is materialized. Ties for the maximum are broken uniformly at
/// random on every call, then the final action is drawn from
/// [`action_probabilities`] with an independent draw.
pub fn select_action<R: Rng>(
    table: &mut ActionValueTable,
    state: StateIndex,
    epsilon: f64,
    rng: &mut R,
) -> Action {
    let row = *table.entry(state);
    let ties = greedy_set(&row);
    let greedy = match ties.len() {
        0 => Action::ALL[rng.random_range(0..Action::COUNT)],
        1 => ties[0],
        n => ties[rng.random_range(0..n)],
    };

    let probabilities = action_probabilities(greedy, epsilon);
    sample_categorical(rng, &probabilities)
        .and_then(|index| Action::try_from(index).ok())
        .unwrap_or(greedy)
}

#[cfg(test)]
mod tests {
    use super::*;

    const S: StateIndex = StateIndex::new(0);

    #[test]
    fn test_action_probabilities_sum_to_one() {
        for epsilon in [0.0, 0.01, 0.3, 1.0] {
            let probabilities = action_probabilities(Action::Left, epsilon);
            let total: f64 = probabilities.iter().sum();
            assert!((total - 1.0).abs() < 1e-12);
            assert!((probabilities[Action::Left.index()] - (1.0 - epsilon + epsilon / 4.0)).abs() < 1e-12);
        }
    }

    #[test]
    fn test_zero_epsilon_is_greedy() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut table = ActionValueTable::new();
        table.set(S, Action::Down, 0.7);
        for _ in 0..500 {
            assert_eq!(select_action(&mut table, S, 0.0, &mut rng), Action::Down);
        }
    }

    #[test]
    fn test_zero_epsilon_breaks_ties_among_maximal_actions() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut table = ActionValueTable::new();
        table.set(S, Action::Up, 0.4);
        table.set(S, Action::Right, 0.4);
        table.set(S, Action::Left, -1.0);

        let mut seen_up = false;
        let mut seen_right = false;
        for _ in 0..500 {
            match select_action(&mut table, S, 0.0, &mut rng) {
                Action::Up => seen_up = true,
                Action::Right => seen_right = true,
                other => panic!("non-maximal action {other} selected"),
            }
        }
        assert!(seen_up && seen_right);
    }

    #[test]
    fn test_full_exploration_is_uniform() {
        let mut rng = StdRng::seed_from_u64(2024);
        let mut table = ActionValueTable::new();
        table.set(S, Action::Right, 5.0);

        let draws = 40_000;
        let mut counts = [0usize; Action::COUNT];
        for _ in 0..draws {
            counts[select_action(&mut table, S, 1.0, &mut rng).index()] += 1;
        }
        for count in counts {
            let frequency = count as f64 / draws as f64;
            assert!((frequency - 0.25).abs() < 0.02, "frequency {frequency}");
        }
    }

    #[test]
    fn test_selection_materializes_state() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut table = ActionValueTable::new();
        select_action(&mut table, S, 0.5, &mut rng);
        assert!(table.contains(S));
    }

    #[test]
    fn test_constant_schedule() {
        let schedule = EpsilonSchedule::constant(0.2);
        assert_eq!(schedule.epsilon(0), 0.2);
        assert_eq!(schedule.epsilon(10_000), 0.2);
    }

    #[test]
    fn test_linear_schedule_decays_to_floor() {
        let schedule = EpsilonSchedule::linear(1.0, 0.1, 10);
        assert_eq!(schedule.epsilon(0), 1.0);
        assert!((schedule.epsilon(5) - 0.55).abs() < 1e-12);
        assert_eq!(schedule.epsilon(10), 0.1);
        assert_eq!(schedule.epsilon(500), 0.1);
    }

    #[test]
    fn test_exponential_schedule_respects_floor() {
        let schedule = EpsilonSchedule::exponential(1.0, 0.5, 0.2);
        assert_eq!(schedule.epsilon(0), 1.0);
        assert_eq!(schedule.epsilon(1), 0.5);
        assert_eq!(schedule.epsilon(2), 0.25);
        assert_eq!(schedule.epsilon(3), 0.2);
    }

    #[test]
    fn test_schedule_parsing() {
        assert_eq!(
            "0.1".parse::<EpsilonSchedule>().unwrap(),
            EpsilonSchedule::constant(0.1)
        );
        assert_eq!(
            "linear:1.0,0.05,5000".parse::<EpsilonSchedule>().unwrap(),
            EpsilonSchedule::linear(1.0, 0.05, 5000)
        );
        assert_eq!(
            "exp:1,0.995,0.01".parse::<EpsilonSchedule>().unwrap(),
            EpsilonSchedule::exponential(1.0, 0.995, 0.01)
        );
        assert!("linear:1.0,0.05".parse::<EpsilonSchedule>().is_err());
        assert!("cosine:1".parse::<EpsilonSchedule>().is_err());
        assert!(matches!(
            "1.5".parse::<EpsilonSchedule>(),
            Err(Error::InvalidHyperparameter { .. })
        ));
    }

    #[test]
    fn test_schedule_display_parses_back() {
        let schedule = EpsilonSchedule::linear(0.9, 0.05, 200);
        assert_eq!(schedule.to_string().parse::<EpsilonSchedule>().unwrap(), schedule);
    }
}
