//! CSV export of per-episode metrics and action-value tables

use std::path::Path;

use serde::Serialize;

use crate::{
    Result,
    lake::FrozenLakeEnv,
    learning::ActionValueTable,
    pipeline::Metrics,
    types::Action,
};

/// A single row in the metrics CSV export
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsRecord<'a> {
    pub algorithm: &'a str,
    pub episode: usize,
    pub reward: f64,
    pub steps: usize,
    pub success: bool,
    pub cumulative_success_rate: f64,
}

/// A single row in the action-value CSV export
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QTableRecord {
    pub state: usize,
    pub row: usize,
    pub col: usize,
    pub up: f64,
    pub down: f64,
    pub left: f64,
    pub right: f64,
    pub greedy: Option<&'static str>,
}

/// Write one row per episode for every named run.
///
/// Runs are written one after another, so the file can be grouped by the
/// `algorithm` column when plotting.
///
/// # Returns
/// Number of rows written
pub fn write_metrics_csv<P: AsRef<Path>>(path: P, runs: &[(&str, &Metrics)]) -> Result<usize> {
    let mut writer = csv::Writer::from_path(path)?;
    let mut rows = 0;

    for &(algorithm, metrics) in runs {
        let cumulative = metrics.cumulative_success_rate();
        let episodes = metrics
            .rewards()
            .iter()
            .zip(metrics.steps())
            .zip(metrics.success())
            .zip(cumulative);

        for (episode, (((&reward, &steps), &success), cumulative_success_rate)) in
            episodes.enumerate()
        {
            writer.serialize(MetricsRecord {
                algorithm,
                episode,
                reward,
                steps,
                success,
                cumulative_success_rate,
            })?;
            rows += 1;
        }
    }

    writer.flush()?;
    Ok(rows)
}

/// Write every visited state of `table`, ordered by state index.
///
/// # Returns
/// Number of rows written
pub fn write_q_table_csv<P: AsRef<Path>>(
    path: P,
    table: &ActionValueTable,
    env: &FrozenLakeEnv,
) -> Result<usize> {
    let mut states: Vec<_> = table.iter().map(|(state, _)| state).collect();
    states.sort_unstable();

    let mut writer = csv::Writer::from_path(path)?;
    for &state in &states {
        let cell = env.try_index_to_cell(state)?;
        let values = table.values(state);
        writer.serialize(QTableRecord {
            state: state.value(),
            row: cell.row,
            col: cell.col,
            up: values[Action::Up.index()],
            down: values[Action::Down.index()],
            left: values[Action::Left.index()],
            right: values[Action::Right.index()],
            greedy: table.best_action(state).map(|a| a.name()),
        })?;
    }

    writer.flush()?;
    Ok(states.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        lake::LakeConfig,
        learning::{EpisodeSummary, Termination},
        types::Cell,
    };

    #[test]
    fn test_metrics_csv_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metrics.csv");

        let mut metrics = Metrics::new();
        for (episode, termination) in [Termination::Hole, Termination::Goal].into_iter().enumerate() {
            metrics.record(&EpisodeSummary {
                episode,
                total_reward: if termination == Termination::Goal { 1.0 } else { -1.0 },
                steps: 3,
                success: termination == Termination::Goal,
                termination,
            });
        }

        let rows = write_metrics_csv(&path, &[("sarsa", &metrics), ("q-learning", &metrics)]).unwrap();
        assert_eq!(rows, 4);

        let contents = std::fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(
            lines.next(),
            Some("algorithm,episode,reward,steps,success,cumulative_success_rate")
        );
        assert_eq!(lines.next(), Some("sarsa,0,-1.0,3,false,0.0"));
        assert_eq!(lines.next(), Some("sarsa,1,1.0,3,true,0.5"));
        assert_eq!(contents.lines().count(), 5);
    }

    #[test]
    fn test_q_table_csv_sorted_by_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("q.csv");
        let env = FrozenLakeEnv::new(LakeConfig::new(2, 2, Cell::new(0, 0), Cell::new(1, 1))).unwrap();

        let mut table = ActionValueTable::new();
        table.set(env.cell_to_index(Cell::new(1, 0)), Action::Right, 0.5);
        table.set(env.cell_to_index(Cell::new(0, 0)), Action::Down, 0.25);

        assert_eq!(write_q_table_csv(&path, &table, &env).unwrap(), 2);
        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(lines[0], "state,row,col,up,down,left,right,greedy");
        assert_eq!(lines[1], "0,0,0,0.0,0.25,0.0,0.0,DOWN");
        assert_eq!(lines[2], "2,1,0,0.0,0.0,0.0,0.5,RIGHT");
    }
}
