//! Error types for the frozen-lake crate

use thiserror::Error;

use crate::types::Cell;

/// Main error type for the frozen-lake crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid action index {index} (expected 0-3)")]
    InvalidAction { index: usize },

    #[error("invalid action '{input}'. Expected one of: up, down, left, right")]
    ParseAction { input: String },

    #[error("invalid grid size {rows}x{cols}: both dimensions must be positive")]
    InvalidGrid { rows: usize, cols: usize },

    #[error("{role} cell {cell} lies outside the {rows}x{cols} grid")]
    CellOutOfBounds {
        role: String,
        cell: Cell,
        rows: usize,
        cols: usize,
    },

    #[error("state index {index} is out of range (grid has {states} states)")]
    StateOutOfRange { index: usize, states: usize },

    #[error("hyperparameter {name} = {value} is outside {range}")]
    InvalidHyperparameter {
        name: String,
        value: f64,
        range: String,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("invalid exploration schedule '{input}': {reason}")]
    ParseSchedule { input: String, reason: String },

    #[error("invalid algorithm '{input}'. Expected one of: {expected}")]
    ParseAlgorithm { input: String, expected: String },

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
