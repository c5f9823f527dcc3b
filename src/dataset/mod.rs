//! Task datasets: the raw input of an optimization run.
//!
//! A [`TaskDataset`] holds one task's per-worker unit processing times
//! together with the task's capacity (hours) and difficulty rating. Datasets
//! can be built from measured [`WorkerRecord`]s or generated synthetically.
//!
//! # Unit processing time
//!
//! ```text
//! unit_processing_time = total_labor_hours * efficiency_factor / (units_processed - defects)
//! ```

mod generator;
mod types;

pub use generator::{business_days, generate_dataset, generate_records, GeneratorConfig};
pub use types::{validate_task_name, TaskDataset, WorkerRecord, MAX_DIFFICULTY, MIN_DIFFICULTY};
