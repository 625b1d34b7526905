//! CLI infrastructure for the frozen lake toolkit
//!
//! This module provides the command-line interface for training a single
//! learner, comparing all three control algorithms, and inspecting lake
//! layouts.

pub mod commands;
pub mod config;
pub mod output;
