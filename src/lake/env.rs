//! The Frozen Lake environment: reset/step over a clamped grid.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{config::LakeConfig, layout::Tile};
use crate::{
    Error, Result,
    types::{Action, Cell, StateIndex},
};

/// Reward for stepping onto the goal
pub const GOAL_REWARD: f64 = 1.0;
/// Reward for falling into a hole
pub const HOLE_REWARD: f64 = -1.0;
/// Reward for every other step
pub const STEP_REWARD: f64 = 0.0;

/// Result of a single environment step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    /// State after the move
    pub state: StateIndex,
    /// Reward for the move
    pub reward: f64,
    /// Whether the new state is terminal (goal or hole)
    pub done: bool,
}

/// Deterministic grid-world simulator.
///
/// The layout is fixed at construction; only the agent position changes.
#[derive(Debug, Clone)]
pub struct FrozenLakeEnv {
    config: LakeConfig,
    holes: HashSet<Cell>,
    position: Cell,
}

impl FrozenLakeEnv {
    /// Build an environment from a validated layout.
    ///
    /// # Errors
    ///
    /// Propagates [`LakeConfig::validate`] failures.
    pub fn new(config: LakeConfig) -> Result<Self> {
        config.validate()?;
        let holes = config.holes.iter().copied().collect();
        let position = config.start;
        Ok(Self {
            config,
            holes,
            position,
        })
    }

    /// Put the agent back on the start cell.
    pub fn reset(&mut self) -> StateIndex {
        self.position = self.config.start;
        self.cell_to_index(self.position)
    }

    /// Move the agent one cell.
    ///
    /// Each coordinate is clamped to the grid independently, so a move into
    /// the border leaves the agent where it was.
    pub fn step(&mut self, action: Action) -> Transition {
        let (dr, dc) = action.delta();
        let row = clamp_axis(self.position.row, dr, self.config.rows);
        let col = clamp_axis(self.position.col, dc, self.config.cols);
        self.position = Cell { row, col };

        let state = self.cell_to_index(self.position);
        if self.position == self.config.goal {
            Transition {
                state,
                reward: GOAL_REWARD,
                done: true,
            }
        } else if self.holes.contains(&self.position) {
            Transition {
                state,
                reward: HOLE_REWARD,
                done: true,
            }
        } else {
            Transition {
                state,
                reward: STEP_REWARD,
                done: false,
            }
        }
    }

    /// Step with a raw action ordinal.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAction`] for anything outside 0-3; the position
    /// is left untouched.
    pub fn step_index(&mut self, action: usize) -> Result<Transition> {
        let action = Action::try_from(action)?;
        Ok(self.step(action))
    }

    pub fn cell_to_index(&self, cell: Cell) -> StateIndex {
        StateIndex::new(cell.row * self.config.cols + cell.col)
    }

    pub fn index_to_cell(&self, state: StateIndex) -> Cell {
        let index = state.value();
        Cell {
            row: index / self.config.cols,
            col: index % self.config.cols,
        }
    }

    /// Checked variant of [`index_to_cell`](Self::index_to_cell).
    pub fn try_index_to_cell(&self, state: StateIndex) -> Result<Cell> {
        if state.value() < self.num_states() {
            Ok(self.index_to_cell(state))
        } else {
            Err(Error::StateOutOfRange {
                index: state.value(),
                states: self.num_states(),
            })
        }
    }

    pub fn rows(&self) -> usize {
        self.config.rows
    }

    pub fn cols(&self) -> usize {
        self.config.cols
    }

    pub fn num_states(&self) -> usize {
        self.config.num_states()
    }

    pub fn start(&self) -> Cell {
        self.config.start
    }

    pub fn goal(&self) -> Cell {
        self.config.goal
    }

    pub fn holes(&self) -> &HashSet<Cell> {
        &self.holes
    }

    pub fn is_hole(&self, cell: Cell) -> bool {
        self.holes.contains(&cell)
    }

    pub fn is_goal(&self, cell: Cell) -> bool {
        cell == self.config.goal
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.config.rows && cell.col < self.config.cols
    }

    /// Current agent position.
    pub fn position(&self) -> Cell {
        self.position
    }

    pub fn config(&self) -> &LakeConfig {
        &self.config
    }

    /// Tile type of a cell. Goal takes precedence over hole, hole over start.
    pub fn tile(&self, cell: Cell) -> Tile {
        if cell == self.config.goal {
            Tile::Goal
        } else if self.holes.contains(&cell) {
            Tile::Hole
        } else if cell == self.config.start {
            Tile::Start
        } else {
            Tile::Frozen
        }
    }

    /// Row-major tile grid.
    pub fn tiles(&self) -> Vec<Vec<Tile>> {
        (0..self.config.rows)
            .map(|row| {
                (0..self.config.cols)
                    .map(|col| self.tile(Cell { row, col }))
                    .collect()
            })
            .collect()
    }
}

fn clamp_axis(value: usize, delta: isize, len: usize) -> usize {
    value.saturating_add_signed(delta).min(len - 1)
}
