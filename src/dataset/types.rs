//! Task dataset types.

use crate::error::{AssignError, Result};

/// Lowest difficulty rating a task may carry.
pub const MIN_DIFFICULTY: u8 = 1;
/// Highest difficulty rating a task may carry.
pub const MAX_DIFFICULTY: u8 = 10;

/// Monthly production record of one worker on one task.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorkerRecord {
    /// Units produced, defective ones included.
    pub units_processed: u32,
    /// Defective units among `units_processed`.
    pub number_of_defects: u32,
    /// Hours on the clock during the month.
    pub total_labor_hours: f64,
    /// Share of clock hours spent working (breaks, lunch excluded).
    pub efficiency_factor: f64,
}

impl WorkerRecord {
    /// Non-defective units produced.
    pub fn good_units(&self) -> u32 {
        self.units_processed.saturating_sub(self.number_of_defects)
    }

    /// Effective hours per non-defective unit.
    ///
    /// `hours * efficiency / (units - defects)`
    pub fn unit_processing_time(&self) -> f64 {
        self.total_labor_hours * self.efficiency_factor / self.good_units() as f64
    }

    /// Non-defective units per effective hour (inverse of the processing time).
    pub fn productivity(&self) -> f64 {
        self.good_units() as f64 / (self.total_labor_hours * self.efficiency_factor)
    }
}

/// Processing-time data for one task across every worker.
///
/// Worker identity is the position in `unit_processing_times`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TaskDataset {
    /// Task name. Letters and punctuation only: no digits, no whitespace.
    pub name: String,
    /// Hours per unit for each worker, indexed by worker.
    pub unit_processing_times: Vec<f64>,
    /// Hours available for this task.
    pub capacity: f64,
    /// Difficulty rating in `1..=10`.
    pub difficulty: u8,
}

impl TaskDataset {
    /// Creates a dataset from raw processing times.
    pub fn new(
        name: impl Into<String>,
        unit_processing_times: Vec<f64>,
        capacity: f64,
        difficulty: u8,
    ) -> Self {
        Self {
            name: name.into(),
            unit_processing_times,
            capacity,
            difficulty,
        }
    }

    /// Creates a dataset from per-worker production records.
    pub fn from_records(
        name: impl Into<String>,
        records: &[WorkerRecord],
        capacity: f64,
        difficulty: u8,
    ) -> Self {
        Self::new(
            name,
            records.iter().map(WorkerRecord::unit_processing_time).collect(),
            capacity,
            difficulty,
        )
    }

    /// Number of workers covered by this dataset.
    pub fn worker_count(&self) -> usize {
        self.unit_processing_times.len()
    }

    /// Validates the dataset in isolation.
    pub fn validate(&self) -> Result<()> {
        validate_task_name(&self.name)?;
        if self.unit_processing_times.is_empty() {
            return Err(AssignError::Configuration(format!(
                "task `{}` has no workers",
                self.name
            )));
        }
        if let Some((worker, time)) = self
            .unit_processing_times
            .iter()
            .enumerate()
            .find(|(_, t)| !(t.is_finite() && **t > 0.0))
        {
            return Err(AssignError::Configuration(format!(
                "task `{}`: worker {worker} has non-positive processing time {time}",
                self.name
            )));
        }
        if !(self.capacity.is_finite() && self.capacity > 0.0) {
            return Err(AssignError::Configuration(format!(
                "task `{}`: capacity must be positive, got {}",
                self.name, self.capacity
            )));
        }
        if !(MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&self.difficulty) {
            return Err(AssignError::Configuration(format!(
                "task `{}`: difficulty must be in {MIN_DIFFICULTY}..={MAX_DIFFICULTY}, got {}",
                self.name, self.difficulty
            )));
        }
        Ok(())
    }
}

/// Checks that a task name can label decision variables unambiguously.
pub fn validate_task_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(AssignError::Configuration("task name is empty".into()));
    }
    if name.chars().any(|c| c.is_ascii_digit() || c.is_whitespace()) {
        return Err(AssignError::Configuration(format!(
            "task name `{name}` must not contain digits or whitespace"
        )));
    }
    Ok(())
}
