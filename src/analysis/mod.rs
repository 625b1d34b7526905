//! Analysis tools for inspecting learned action-value tables
//!
//! This module turns a learned table into things a person can read: the
//! greedy policy drawn over the lake, and the path that policy follows from
//! the start cell.

pub mod policy;

pub use policy::{GreedyPath, PathStop, render_path, render_policy, trace_greedy_path};
