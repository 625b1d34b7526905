//! Greedy policy views over the lake

use std::{collections::HashSet, fmt};

use serde::{Deserialize, Serialize};

use crate::{
    lake::{FrozenLakeEnv, Tile},
    learning::ActionValueTable,
    types::Cell,
};

/// Placeholder for states the learner never visited.
pub const UNVISITED: char = '·';

/// Marker for cells on a traced path.
pub const PATH_MARK: char = '*';

/// Why a greedy trace stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PathStop {
    /// The last cell is the goal.
    ReachedGoal,
    /// The greedy action leads back to a cell already on the path.
    Loop,
    /// The last cell has no entry in the table.
    Unlearned,
    /// The greedy action points off the grid.
    OffGrid,
    /// The greedy action leads into a hole.
    Hole,
}

impl PathStop {
    pub fn description(self) -> &'static str {
        match self {
            PathStop::ReachedGoal => "reached the goal",
            PathStop::Loop => "stuck in a loop",
            PathStop::Unlearned => "reached an unvisited state",
            PathStop::OffGrid => "greedy action leaves the grid",
            PathStop::Hole => "greedy action leads into a hole",
        }
    }
}

impl fmt::Display for PathStop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Cells visited by following the greedy policy from the start cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GreedyPath {
    /// Start cell first; never contains a hole or a repeated cell.
    pub cells: Vec<Cell>,
    pub stop: PathStop,
}

impl GreedyPath {
    pub fn reached_goal(&self) -> bool {
        self.stop == PathStop::ReachedGoal
    }

    /// Number of moves taken.
    pub fn len(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Render the greedy policy as a grid of arrows.
///
/// The goal shows `G`, holes show `H`, and states absent from the table show
/// [`UNVISITED`]. Each cell takes three columns.
pub fn render_policy(table: &ActionValueTable, env: &FrozenLakeEnv) -> String {
    let mut out = String::new();
    for row in 0..env.rows() {
        for col in 0..env.cols() {
            let cell = Cell::new(row, col);
            let symbol = match env.tile(cell) {
                Tile::Goal => 'G',
                Tile::Hole => 'H',
                Tile::Start | Tile::Frozen => table
                    .best_action(env.cell_to_index(cell))
                    .map_or(UNVISITED, |action| action.arrow()),
            };
            out.push(' ');
            out.push(symbol);
            out.push(' ');
        }
        out.push('\n');
    }
    out
}

/// Follow the greedy policy from the start cell without clamping moves.
///
/// The trace stops at the goal, on an unvisited state, when the greedy move
/// leaves the grid or enters a hole, or when it would revisit a cell. It never
/// takes more than `rows * cols` moves.
pub fn trace_greedy_path(table: &ActionValueTable, env: &FrozenLakeEnv) -> GreedyPath {
    let mut current = env.start();
    let mut cells = vec![current];
    let mut seen = HashSet::from([current]);

    let stop = loop {
        if env.is_goal(current) {
            break PathStop::ReachedGoal;
        }
        let Some(action) = table.best_action(env.cell_to_index(current)) else {
            break PathStop::Unlearned;
        };
        let Some(next) = current.offset(action).filter(|&cell| env.contains(cell)) else {
            break PathStop::OffGrid;
        };
        if env.is_hole(next) {
            break PathStop::Hole;
        }
        if !seen.insert(next) {
            break PathStop::Loop;
        }
        cells.push(next);
        current = next;
    };

    GreedyPath { cells, stop }
}

/// Render the lake layout with the cells of `path` marked.
///
/// Start and goal keep their letters; other path cells show [`PATH_MARK`].
pub fn render_path(env: &FrozenLakeEnv, path: &GreedyPath) -> String {
    let on_path: HashSet<Cell> = path.cells.iter().copied().collect();
    let mut out = String::new();
    for (row, tiles) in env.tiles().into_iter().enumerate() {
        for (col, tile) in tiles.into_iter().enumerate() {
            let symbol = match tile {
                Tile::Frozen if on_path.contains(&Cell::new(row, col)) => PATH_MARK,
                tile => tile.symbol(),
            };
            out.push(' ');
            out.push(symbol);
            out.push(' ');
        }
        out.push('\n');
    }
    out
}
