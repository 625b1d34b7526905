//! Action-value table for tabular control

use std::collections::HashMap;

use crate::types::{Action, StateIndex};

/// Q-table mapping each state to the values of its four actions
///
/// States are materialized on first use; an absent state reads as four
/// zeros everywhere.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionValueTable {
    values: HashMap<StateIndex, [f64; Action::COUNT]>,
}

impl ActionValueTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Get-or-insert the value row of a state.
    pub fn entry(&mut self, state: StateIndex) -> &mut [f64; Action::COUNT] {
        self.values.entry(state).or_insert([0.0; Action::COUNT])
    }

    /// Value row of a state without materializing it.
    pub fn values(&self, state: StateIndex) -> [f64; Action::COUNT] {
        self.values
            .get(&state)
            .copied()
            .unwrap_or([0.0; Action::COUNT])
    }

    /// Get Q-value for a state-action pair
    pub fn get(&self, state: StateIndex, action: Action) -> f64 {
        self.values(state)[action.index()]
    }

    /// Set Q-value for a state-action pair
    pub fn set(&mut self, state: StateIndex, action: Action, value: f64) {
        self.entry(state)[action.index()] = value;
    }

    /// Whether the state has been materialized.
    pub fn contains(&self, state: StateIndex) -> bool {
        self.values.contains_key(&state)
    }

    /// Maximum value over the four actions
    pub fn max_value(&self, state: StateIndex) -> f64 {
        self.values(state)
            .into_iter()
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Every action attaining the maximum value, in ordinal order.
    pub fn greedy_actions(&self, state: StateIndex) -> Vec<Action> {
        greedy_set(&self.values(state))
    }

    /// Best action of a visited state, `None` for states never seen.
    ///
    /// Ties resolve to the first maximal action in [`Action::ALL`] order, so the
    /// answer is stable across calls.
    pub fn best_action(&self, state: StateIndex) -> Option<Action> {
        let row = self.values.get(&state)?;
        let mut best = Action::ALL[0];
        for action in Action::ALL.into_iter().skip(1) {
            if row[action.index()] > row[best.index()] {
                best = action;
            }
        }
        Some(best)
    }

    /// Move Q(s,a) a fraction `step_size` toward `target`, returning the new value.
    ///
    /// Q(s,a) ← Q(s,a) + step_size [target - Q(s,a)]
    pub fn update_toward(
        &mut self,
        state: StateIndex,
        action: Action,
        target: f64,
        step_size: f64,
    ) -> f64 {
        let slot = &mut self.entry(state)[action.index()];
        *slot += step_size * (target - *slot);
        *slot
    }

    /// Q-learning update: off-policy TD control
    ///
    /// Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)]
    ///
    /// The successor row is materialized, terminal or not. Terminal states are
    /// never acted from, so their row stays at zero and the bootstrap vanishes.
    pub fn q_learning_update(
        &mut self,
        state: StateIndex,
        action: Action,
        reward: f64,
        next_state: StateIndex,
        learning_rate: f64,
        discount: f64,
    ) -> f64 {
        let best_next = self
            .entry(next_state)
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);
        self.update_toward(state, action, reward + discount * best_next, learning_rate)
    }

    /// SARSA update: on-policy TD control
    ///
    /// Q(s,a) ← Q(s,a) + α[r + γ Q(s',a') - Q(s,a)], or
    /// Q(s,a) ← Q(s,a) + α[r - Q(s,a)] when `next` is `None` (terminal).
    pub fn sarsa_update(
        &mut self,
        state: StateIndex,
        action: Action,
        reward: f64,
        next: Option<(StateIndex, Action)>,
        learning_rate: f64,
        discount: f64,
    ) -> f64 {
        let target = match next {
            Some((next_state, next_action)) => {
                reward + discount * self.entry(next_state)[next_action.index()]
            }
            None => reward,
        };
        self.update_toward(state, action, target, learning_rate)
    }

    /// Iterate over materialized states and their value rows
    pub fn iter(&self) -> impl Iterator<Item = (StateIndex, &[f64; Action::COUNT])> {
        self.values.iter().map(|(state, row)| (*state, row))
    }

    /// Remove every state
    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Number of materialized states
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Actions whose value equals the row maximum.
pub(crate) fn greedy_set(row: &[f64; Action::COUNT]) -> Vec<Action> {
    let max = row.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    Action::ALL
        .into_iter()
        .filter(|action| row[action.index()] == max)
        .collect()
}
