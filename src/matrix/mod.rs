//! Worker × task processing-time matrix.
//!
//! Rows are tasks (in dataset registration order), columns are workers plus
//! one capacity column. The matrix is always rebuilt from the full set of
//! datasets; it is never patched in place.

use crate::dataset::TaskDataset;
use crate::error::{AssignError, Result};
use std::collections::HashSet;

/// One task row of the matrix.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TaskRow {
    /// Task name.
    pub name: String,
    /// Hours per unit, indexed by worker.
    pub processing_times: Vec<f64>,
    /// Hours available for the task.
    pub capacity: f64,
    /// Difficulty rating (1–10).
    pub difficulty: u8,
}

/// Processing times of every worker on every task, plus task capacities.
///
/// # Examples
///
/// ```
/// use u_assign::dataset::TaskDataset;
/// use u_assign::matrix::ProcessingTimeMatrix;
///
/// let matrix = ProcessingTimeMatrix::build(&[
///     TaskDataset::new("printing", vec![1.0, 2.0, 1.5], 40.0, 3),
///     TaskDataset::new("cutting", vec![0.5, 0.8, 1.0], 30.0, 6),
/// ])
/// .unwrap();
///
/// assert_eq!(matrix.task_count(), 2);
/// assert_eq!(matrix.worker_count(), 3);
/// assert_eq!(matrix.processing_time(1, 2), 1.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProcessingTimeMatrix {
    rows: Vec<TaskRow>,
    workers: usize,
}

impl ProcessingTimeMatrix {
    /// Builds the matrix from task datasets.
    ///
    /// Rejects an empty dataset set, invalid task names or values, duplicate
    /// task names and datasets whose worker counts differ. Nothing is built
    /// when any check fails.
    pub fn build(datasets: &[TaskDataset]) -> Result<Self> {
        let first = datasets.first().ok_or_else(|| {
            AssignError::Configuration("no task datasets registered".into())
        })?;
        let workers = first.worker_count();

        let mut seen = HashSet::new();
        for dataset in datasets {
            dataset.validate()?;
            if !seen.insert(dataset.name.as_str()) {
                return Err(AssignError::Configuration(format!(
                    "duplicate task name `{}`",
                    dataset.name
                )));
            }
            if dataset.worker_count() != workers {
                return Err(AssignError::Configuration(format!(
                    "task `{}` has {} workers, expected {workers}",
                    dataset.name,
                    dataset.worker_count()
                )));
            }
        }

        let rows = datasets
            .iter()
            .map(|d| TaskRow {
                name: d.name.clone(),
                processing_times: d.unit_processing_times.clone(),
                capacity: d.capacity,
                difficulty: d.difficulty,
            })
            .collect::<Vec<_>>();

        tracing::debug!(
            component = "matrix",
            operation = "build",
            tasks = rows.len(),
            workers,
            "Built processing-time matrix"
        );
        Ok(Self { rows, workers })
    }

    /// Number of task rows.
    pub fn task_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of worker columns (capacity column excluded).
    pub fn worker_count(&self) -> usize {
        self.workers
    }

    /// All task rows in order.
    pub fn rows(&self) -> &[TaskRow] {
        &self.rows
    }

    /// Row of task `task`.
    pub fn row(&self, task: usize) -> &TaskRow {
        &self.rows[task]
    }

    /// Task names in row order.
    pub fn task_names(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|r| r.name.as_str())
    }

    /// Row index of a task by name.
    pub fn task_index(&self, name: &str) -> Option<usize> {
        self.rows.iter().position(|r| r.name == name)
    }

    /// Hours per unit of `task` for `worker`.
    pub fn processing_time(&self, task: usize, worker: usize) -> f64 {
        self.rows[task].processing_times[worker]
    }

    /// Capacity (hours) of `task`.
    pub fn capacity(&self, task: usize) -> f64 {
        self.rows[task].capacity
    }

    /// Difficulty rating of `task`.
    pub fn difficulty(&self, task: usize) -> u8 {
        self.rows[task].difficulty
    }
}
