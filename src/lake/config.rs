//! Lake geometry: grid size, start, goal and holes.

use std::{collections::HashSet, path::Path};

use log::warn;
use serde::{Deserialize, Serialize};

use crate::{Error, Result, types::Cell};

/// Immutable layout of a Frozen Lake instance.
///
/// # Examples
///
/// ```
/// use frozen_lake::lake::LakeConfig;
/// use frozen_lake::types::Cell;
///
/// let config = LakeConfig::new(3, 3, Cell::new(0, 0), Cell::new(2, 2))
///     .with_holes([Cell::new(1, 1)]);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LakeConfig {
    /// Number of grid rows
    pub rows: usize,
    /// Number of grid columns
    pub cols: usize,
    /// Cell the agent is placed on by `reset`
    pub start: Cell,
    /// Terminal cell worth +1
    pub goal: Cell,
    /// Terminal cells worth -1
    #[serde(default)]
    pub holes: Vec<Cell>,
}

impl LakeConfig {
    /// Create a lake with no holes.
    pub fn new(rows: usize, cols: usize, start: Cell, goal: Cell) -> Self {
        Self {
            rows,
            cols,
            start,
            goal,
            holes: Vec::new(),
        }
    }

    /// Set the hole cells, replacing any previous ones.
    pub fn with_holes<I>(mut self, holes: I) -> Self
    where
        I: IntoIterator<Item = Cell>,
    {
        self.holes = holes.into_iter().collect();
        self
    }

    /// Check dimensions and that every configured cell is on the grid.
    ///
    /// Overlapping start/goal/hole cells are allowed but logged, since the
    /// reward rules still give them a well-defined meaning (goal wins over hole).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidGrid`] for a zero dimension and
    /// [`Error::CellOutOfBounds`] for an off-grid cell.
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(Error::InvalidGrid {
                rows: self.rows,
                cols: self.cols,
            });
        }

        self.check_bounds("start", self.start)?;
        self.check_bounds("goal", self.goal)?;
        for &hole in &self.holes {
            self.check_bounds("hole", hole)?;
        }

        if self.start == self.goal {
            warn!("start and goal share cell {}", self.start);
        }
        let holes: HashSet<Cell> = self.holes.iter().copied().collect();
        if holes.contains(&self.start) {
            warn!("start cell {} is also a hole", self.start);
        }
        if holes.contains(&self.goal) {
            warn!("goal cell {} is also a hole; the goal reward takes precedence", self.goal);
        }

        Ok(())
    }

    fn check_bounds(&self, role: &str, cell: Cell) -> Result<()> {
        if cell.row < self.rows && cell.col < self.cols {
            Ok(())
        } else {
            Err(Error::CellOutOfBounds {
                role: role.to_string(),
                cell,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    /// Total number of states (`rows * cols`).
    pub fn num_states(&self) -> usize {
        self.rows * self.cols
    }

    /// Load a layout from a JSON file and validate it.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| Error::Io {
            operation: format!("open lake config {}", path.display()),
            source,
        })?;
        let config: LakeConfig = serde_json::from_reader(std::io::BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    /// Save the layout as pretty-printed JSON.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
}

impl Default for LakeConfig {
    /// The 10x10 reference lake: start top-left, goal bottom-right, 25 holes.
    fn default() -> Self {
        const HOLES: [(usize, usize); 25] = [
            (1, 1),
            (1, 3),
            (2, 3),
            (3, 0),
            (0, 7),
            (1, 5),
            (2, 7),
            (2, 6),
            (3, 3),
            (3, 6),
            (4, 2),
            (4, 3),
            (4, 8),
            (5, 8),
            (5, 0),
            (6, 2),
            (6, 1),
            (7, 4),
            (7, 0),
            (7, 9),
            (8, 6),
            (8, 2),
            (9, 3),
            (9, 0),
            (9, 2),
        ];

        LakeConfig::new(10, 10, Cell::new(0, 0), Cell::new(9, 9))
            .with_holes(HOLES.iter().map(|&cell| Cell::from(cell)))
    }
}
