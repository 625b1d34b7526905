//! Frozen Lake grid world
//!
//! A deterministic finite MDP: the agent starts on a fixed cell, moves one
//! cell per step (clamped at the border), and the episode ends on the goal
//! (+1) or in a hole (-1).

pub mod config;
pub mod env;
pub mod layout;

pub use config::LakeConfig;
pub use env::{FrozenLakeEnv, GOAL_REWARD, HOLE_REWARD, STEP_REWARD, Transition};
pub use layout::{Tile, render_layout};
