//! Subcommand implementations

pub mod compare;
pub mod layout;
pub mod train;
