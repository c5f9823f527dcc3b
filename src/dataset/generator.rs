//! Synthetic monthly production data.
//!
//! Each generated record models one worker's month on a task: units
//! processed, defects, clocked hours derived from the business days of the
//! month minus leave, and an efficiency factor.

use super::types::{TaskDataset, WorkerRecord};
use crate::error::{AssignError, Result};
use crate::random::rng_from;
use chrono::{Datelike, Local, NaiveDate, Weekday};
use rand::Rng;

/// Configuration for synthetic dataset generation.
///
/// # Examples
///
/// ```
/// use u_assign::dataset::GeneratorConfig;
///
/// let config = GeneratorConfig::default()
///     .with_month(2024, 3)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Calendar year of the simulated month.
    pub year: i32,
    /// Calendar month (1–12).
    pub month: u32,
    /// Inclusive lower bound on units processed.
    pub min_units: u32,
    /// Inclusive upper bound on units processed.
    pub max_units: u32,
    /// Maximum share of processed units that may be defective.
    pub max_defect_ratio: f64,
    /// Lower bound of the efficiency factor (inclusive).
    pub min_efficiency: f64,
    /// Upper bound of the efficiency factor (exclusive).
    pub max_efficiency: f64,
    /// Maximum number of leave days per worker.
    pub max_leave_days: usize,
    /// Clocked hours per business day.
    pub hours_per_day: f64,
    /// Public holidays excluded from business days.
    pub holidays: Vec<NaiveDate>,
    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        let today = Local::now().date_naive();
        Self {
            year: today.year(),
            month: today.month(),
            min_units: 100,
            max_units: 300,
            max_defect_ratio: 0.1,
            min_efficiency: 0.8,
            max_efficiency: 1.0,
            max_leave_days: 5,
            hours_per_day: 8.0,
            holidays: Vec::new(),
            seed: None,
        }
    }
}

impl GeneratorConfig {
    pub fn with_month(mut self, year: i32, month: u32) -> Self {
        self.year = year;
        self.month = month;
        self
    }

    pub fn with_units_range(mut self, min: u32, max: u32) -> Self {
        self.min_units = min;
        self.max_units = max;
        self
    }

    pub fn with_max_defect_ratio(mut self, ratio: f64) -> Self {
        self.max_defect_ratio = ratio;
        self
    }

    pub fn with_efficiency_range(mut self, min: f64, max: f64) -> Self {
        self.min_efficiency = min;
        self.max_efficiency = max;
        self
    }

    pub fn with_max_leave_days(mut self, n: usize) -> Self {
        self.max_leave_days = n;
        self
    }

    pub fn with_holidays(mut self, holidays: Vec<NaiveDate>) -> Self {
        self.holidays = holidays;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if NaiveDate::from_ymd_opt(self.year, self.month, 1).is_none() {
            return Err(format!("invalid month {}-{}", self.year, self.month));
        }
        if self.min_units == 0 || self.min_units > self.max_units {
            return Err(format!(
                "units range must satisfy 0 < min <= max, got {}..={}",
                self.min_units, self.max_units
            ));
        }
        if !(0.0..1.0).contains(&self.max_defect_ratio) {
            return Err(format!(
                "max_defect_ratio must be in [0, 1), got {}",
                self.max_defect_ratio
            ));
        }
        if !(self.min_efficiency > 0.0
            && self.min_efficiency < self.max_efficiency
            && self.max_efficiency <= 1.0)
        {
            return Err(format!(
                "efficiency range must satisfy 0 < min < max <= 1, got {}..{}",
                self.min_efficiency, self.max_efficiency
            ));
        }
        if self.max_leave_days > 31 {
            return Err(format!(
                "max_leave_days must be at most 31, got {}",
                self.max_leave_days
            ));
        }
        if !(self.hours_per_day.is_finite() && self.hours_per_day > 0.0) {
            return Err("hours_per_day must be positive".into());
        }
        Ok(())
    }
}

/// Counts Monday–Friday dates of a month that are neither leave days nor holidays.
///
/// `leave_days` are day-of-month numbers; days past the end of the month are ignored.
pub fn business_days(year: i32, month: u32, leave_days: &[u32], holidays: &[NaiveDate]) -> u32 {
    (1..=31)
        .map_while(|day| NaiveDate::from_ymd_opt(year, month, day))
        .filter(|date| !matches!(date.weekday(), Weekday::Sat | Weekday::Sun))
        .filter(|date| !holidays.contains(date))
        .filter(|date| !leave_days.contains(&date.day()))
        .count() as u32
}

/// Generates one production record per worker.
pub fn generate_records(workers: usize, config: &GeneratorConfig) -> Result<Vec<WorkerRecord>> {
    config.validate().map_err(AssignError::Configuration)?;
    if workers == 0 {
        return Err(AssignError::Configuration(
            "number of workers must be at least 1".into(),
        ));
    }

    let mut rng = rng_from(config.seed);
    let records = (0..workers)
        .map(|_| {
            let units_processed = rng.random_range(config.min_units..=config.max_units);
            let max_defects = (units_processed as f64 * config.max_defect_ratio) as u32;
            let number_of_defects = rng.random_range(0..=max_defects);

            let leave_count = rng.random_range(0..=config.max_leave_days);
            let leave_days: Vec<u32> = rand::seq::index::sample(&mut rng, 31, leave_count)
                .iter()
                .map(|i| i as u32 + 1)
                .collect();
            let days = business_days(config.year, config.month, &leave_days, &config.holidays);

            let efficiency_factor = rng.random_range(config.min_efficiency..config.max_efficiency);

            WorkerRecord {
                units_processed,
                number_of_defects,
                total_labor_hours: days as f64 * config.hours_per_day,
                efficiency_factor,
            }
        })
        .collect();

    tracing::debug!(
        component = "dataset",
        operation = "generate_records",
        workers,
        year = config.year,
        month = config.month,
        "Generated synthetic worker records"
    );
    Ok(records)
}

/// Generates a complete task dataset.
pub fn generate_dataset(
    name: impl Into<String>,
    workers: usize,
    capacity: f64,
    difficulty: u8,
    config: &GeneratorConfig,
) -> Result<TaskDataset> {
    let records = generate_records(workers, config)?;
    let dataset = TaskDataset::from_records(name, &records, capacity, difficulty);
    dataset.validate()?;
    Ok(dataset)
}
