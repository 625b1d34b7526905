//! Tile classification and the plain-text map view.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::env::FrozenLakeEnv;

/// What occupies a grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tile {
    Frozen,
    Start,
    Goal,
    Hole,
}

impl Tile {
    pub fn symbol(self) -> char {
        match self {
            Tile::Frozen => 'F',
            Tile::Start => 'S',
            Tile::Goal => 'G',
            Tile::Hole => 'H',
        }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Render the S/F/H/G map, one line per row.
pub fn render_layout(env: &FrozenLakeEnv) -> String {
    let mut out = String::with_capacity(env.rows() * (env.cols() * 3 + 1));
    for row in env.tiles() {
        for tile in row {
            out.push(' ');
            out.push(tile.symbol());
            out.push(' ');
        }
        out.push('\n');
    }
    out
}
