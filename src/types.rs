//! Newtype wrappers and small value types shared across the crate.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// A grid coordinate, 0-indexed from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Apply an action's movement vector without any boundary handling.
    ///
    /// Returns `None` when the move would leave the non-negative quadrant.
    pub fn offset(self, action: Action) -> Option<Cell> {
        let (dr, dc) = action.delta();
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        Some(Cell { row, col })
    }
}

impl From<(usize, usize)> for Cell {
    fn from((row, col): (usize, usize)) -> Self {
        Cell { row, col }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Flat index of a cell (`row * cols + col`), used as the action-value table key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StateIndex(usize);

impl StateIndex {
    pub const fn new(value: usize) -> Self {
        StateIndex(value)
    }

    /// Get the inner value.
    pub fn value(&self) -> usize {
        self.0
    }
}

impl From<StateIndex> for usize {
    fn from(state: StateIndex) -> Self {
        state.0
    }
}

impl fmt::Display for StateIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One of the four compass moves available in every state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
}

impl Action {
    /// Number of actions.
    pub const COUNT: usize = 4;

    /// All actions in ordinal order. Table rows are laid out in this order.
    pub const ALL: [Action; Action::COUNT] = [Action::Up, Action::Down, Action::Left, Action::Right];

    /// Movement vector as (Δrow, Δcol).
    pub fn delta(self) -> (isize, isize) {
        match self {
            Action::Up => (-1, 0),
            Action::Down => (1, 0),
            Action::Left => (0, -1),
            Action::Right => (0, 1),
        }
    }

    /// Position of this action in [`Action::ALL`].
    pub fn index(self) -> usize {
        match self {
            Action::Up => 0,
            Action::Down => 1,
            Action::Left => 2,
            Action::Right => 3,
        }
    }

    /// Arrow glyph used when rendering policies.
    pub fn arrow(self) -> char {
        match self {
            Action::Up => '↑',
            Action::Down => '↓',
            Action::Left => '←',
            Action::Right => '→',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Action::Up => "UP",
            Action::Down => "DOWN",
            Action::Left => "LEFT",
            Action::Right => "RIGHT",
        }
    }
}

impl TryFrom<usize> for Action {
    type Error = crate::Error;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Action::ALL
            .get(index)
            .copied()
            .ok_or(crate::Error::InvalidAction { index })
    }
}

impl FromStr for Action {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" | "u" => Ok(Action::Up),
            "down" | "d" => Ok(Action::Down),
            "left" | "l" => Ok(Action::Left),
            "right" | "r" => Ok(Action::Right),
            _ => Err(crate::Error::ParseAction {
                input: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
