//! Export functionality for analysis and plotting
//!
//! This module writes training data to CSV so learning curves and value
//! tables can be inspected outside the crate.

mod metrics_csv;

pub use metrics_csv::{MetricsRecord, QTableRecord, write_metrics_csv, write_q_table_csv};
