//! Solution decoding.
//!
//! Turns a solved [`LpModel`] back into domain terms: units of each task
//! allocated to each worker, the constraint values grouped by family, and
//! the production totals.
//!
//! Decoding is pure: the same model and solution always decode to the same
//! [`DecodedSolution`].

use crate::error::{AssignError, Result};
use crate::lp::{ConstraintFamily, LinearConstraint, LpModel, LpSolution};
use crate::matrix::ProcessingTimeMatrix;

/// Evaluated constraint: label, left-hand side value and bound.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConstraintValue {
    /// Constraint label, e.g. `min_hours[worker 2]`.
    pub label: String,
    /// Left-hand side at the solution, without slack.
    pub value: f64,
    /// Right-hand side constant.
    pub bound: f64,
}

/// Units of every task allocated to every worker.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Allocation {
    tasks: Vec<String>,
    units: Vec<Vec<u64>>,
}

impl Allocation {
    /// Task names in matrix row order.
    pub fn tasks(&self) -> &[String] {
        &self.tasks
    }

    /// Number of workers.
    pub fn worker_count(&self) -> usize {
        self.units.first().map_or(0, Vec::len)
    }

    /// Units of row `task` completed by each worker.
    pub fn task_units(&self, task: usize) -> &[u64] {
        &self.units[task]
    }

    /// Units of the named task completed by `worker`.
    pub fn units(&self, task: &str, worker: usize) -> Option<u64> {
        let t = self.tasks.iter().position(|name| name == task)?;
        self.units[t].get(worker).copied()
    }

    /// Iterates `(task name, units per worker)` in row order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[u64])> {
        self.tasks
            .iter()
            .map(String::as_str)
            .zip(self.units.iter().map(Vec::as_slice))
    }
}

/// A solved model in domain terms.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecodedSolution {
    /// Units per task per worker.
    pub allocation: Allocation,
    /// Equal-completion constraints (`tasks - 1`).
    pub equality: Vec<ConstraintValue>,
    /// Task capacity constraints (`tasks`).
    pub capacity: Vec<ConstraintValue>,
    /// Minimum-hours constraints (`workers`).
    pub min_hours: Vec<ConstraintValue>,
    /// Maximum-hours constraints (`workers`).
    pub max_hours: Vec<ConstraintValue>,
    /// Objective value: total task completions.
    pub objective_value: f64,
    /// Finished pieces: objective value divided by the number of tasks.
    pub total_units: f64,
    /// Hours worked by all workers together.
    pub total_hours: f64,
}

/// Decodes solved assignment models.
pub struct SolutionDecoder;

impl SolutionDecoder {
    /// Decodes `solution` of `model`, built from `matrix`.
    ///
    /// Fails with [`AssignError::Precondition`] when the solution is not
    /// optimal and with [`AssignError::DecoderContract`] when the model does
    /// not have the shape the formulation guarantees.
    pub fn decode(
        matrix: &ProcessingTimeMatrix,
        model: &LpModel,
        solution: &LpSolution,
    ) -> Result<DecodedSolution> {
        if !solution.status.is_optimal() {
            return Err(AssignError::Precondition(format!(
                "cannot decode a model with status {}",
                solution.status
            )));
        }
        let tasks = matrix.task_count();
        let workers = matrix.worker_count();

        check_count("variable", tasks * workers, model.variable_count())?;
        if solution.values.len() != model.variable_count() {
            return Err(AssignError::Precondition(format!(
                "solution has {} values for {} variables",
                solution.values.len(),
                model.variable_count()
            )));
        }

        let mut units = vec![vec![0u64; workers]; tasks];
        let mut seen = vec![vec![false; workers]; tasks];
        for (var, &value) in model.variables.iter().zip(&solution.values) {
            let (t, w) = (var.key.task, var.key.worker);
            if t >= tasks || w >= workers || seen[t][w] {
                return Err(AssignError::DecoderContract {
                    family: "variable",
                    expected: tasks * workers,
                    actual: model.variable_count(),
                });
            }
            seen[t][w] = true;
            units[t][w] = value.round().max(0.0) as u64;
        }

        let family = |f: ConstraintFamily, expected: usize| -> Result<Vec<ConstraintValue>> {
            let values: Vec<ConstraintValue> = model
                .constraints_of(f)
                .map(|c| evaluate(c, &solution.values))
                .collect();
            check_count(f.as_str(), expected, values.len())?;
            Ok(values)
        };
        let equality = family(ConstraintFamily::Equality, tasks.saturating_sub(1))?;
        let capacity = family(ConstraintFamily::Capacity, tasks)?;
        let min_hours = family(ConstraintFamily::MinHours, workers)?;
        let max_hours = family(ConstraintFamily::MaxHours, workers)?;

        let objective_value = solution
            .objective_value
            .unwrap_or_else(|| solution.values.iter().sum());
        let total_hours = min_hours.iter().map(|c| c.value).sum();

        Ok(DecodedSolution {
            allocation: Allocation {
                tasks: matrix.task_names().map(str::to_owned).collect(),
                units,
            },
            equality,
            capacity,
            min_hours,
            max_hours,
            objective_value,
            total_units: objective_value / tasks as f64,
            total_hours,
        })
    }
}

fn evaluate(constraint: &LinearConstraint, values: &[f64]) -> ConstraintValue {
    ConstraintValue {
        label: constraint.label.clone(),
        value: constraint.lhs_value(values),
        bound: constraint.rhs,
    }
}

fn check_count(family: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(AssignError::DecoderContract {
            family,
            expected,
            actual,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::TaskDataset;
    use crate::lp::{MicroLpSolver, SolverStatus};
    use crate::optimizer::{AssignmentOptimizer, OptimizationRun, OptimizerConfig};

    fn matrix() -> ProcessingTimeMatrix {
        ProcessingTimeMatrix::build(&[
            TaskDataset::new("printing", vec![1.0; 3], 10.0, 5),
            TaskDataset::new("cutting", vec![1.0; 3], 10.0, 2),
        ])
        .unwrap()
    }

    fn solved(m: &ProcessingTimeMatrix) -> OptimizationRun {
        let config = OptimizerConfig::default()
            .with_min_hours_worked(1.0)
            .with_max_hours_worked(8.0);
        AssignmentOptimizer::run(m, &config, &MicroLpSolver).unwrap()
    }

    #[test]
    fn test_decode_uniform_fixture() {
        let m = matrix();
        let run = solved(&m);
        let decoded = SolutionDecoder::decode(&m, &run.model, &run.solution).unwrap();

        assert_eq!(decoded.equality.len(), 1);
        assert_eq!(decoded.capacity.len(), 2);
        assert_eq!(decoded.min_hours.len(), 3);
        assert_eq!(decoded.max_hours.len(), 3);

        assert_eq!(decoded.total_units, 10.0);
        assert_eq!(decoded.total_units.fract(), 0.0);
        assert!((decoded.total_hours - 20.0).abs() < 1e-9);

        let max_total: f64 = decoded.max_hours.iter().map(|c| c.value).sum();
        assert!((max_total - decoded.total_hours).abs() < 1e-9);

        assert_eq!(decoded.allocation.tasks(), &["printing", "cutting"]);
        for (_, units) in decoded.allocation.iter() {
            assert_eq!(units.iter().sum::<u64>(), 10);
        }
        assert!(decoded.equality[0].value.abs() < 1e-9);
        assert_eq!(decoded.capacity[0].label, "capacity[printing]");
        assert_eq!(decoded.capacity[0].bound, 10.0);
    }

    #[test]
    fn test_decode_is_deterministic() {
        let m = matrix();
        let run = solved(&m);
        let a = SolutionDecoder::decode(&m, &run.model, &run.solution).unwrap();
        let b = SolutionDecoder::decode(&m, &run.model, &run.solution).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_allocation_lookup() {
        let m = matrix();
        let run = solved(&m);
        let decoded = SolutionDecoder::decode(&m, &run.model, &run.solution).unwrap();
        let alloc = &decoded.allocation;

        assert_eq!(alloc.worker_count(), 3);
        let by_name: u64 = (0..3).filter_map(|w| alloc.units("cutting", w)).sum();
        assert_eq!(by_name, alloc.task_units(1).iter().sum::<u64>());
        assert_eq!(alloc.units("welding", 0), None);
        assert_eq!(alloc.units("cutting", 9), None);
    }

    #[test]
    fn test_missing_constraint_fails_loudly() {
        let m = matrix();
        let mut run = solved(&m);
        let pos = run
            .model
            .constraints
            .iter()
            .position(|c| c.family == ConstraintFamily::MaxHours)
            .unwrap();
        run.model.constraints.remove(pos);

        let err = SolutionDecoder::decode(&m, &run.model, &run.solution).unwrap_err();
        assert_eq!(
            err,
            AssignError::DecoderContract {
                family: "max_hours",
                expected: 3,
                actual: 2
            }
        );
    }

    #[test]
    fn test_mislabeled_constraint_fails_loudly() {
        let m = matrix();
        let mut run = solved(&m);
        run.model.constraints[0].family = ConstraintFamily::Capacity;
        assert!(matches!(
            SolutionDecoder::decode(&m, &run.model, &run.solution),
            Err(AssignError::DecoderContract { family: "equality", .. })
        ));
    }

    #[test]
    fn test_duplicate_variable_key_fails() {
        let m = matrix();
        let mut run = solved(&m);
        run.model.variables[1].key = run.model.variables[0].key;
        assert!(matches!(
            SolutionDecoder::decode(&m, &run.model, &run.solution),
            Err(AssignError::DecoderContract { family: "variable", .. })
        ));
    }

    #[test]
    fn test_non_optimal_rejected() {
        let m = matrix();
        let mut run = solved(&m);
        run.solution = LpSolution::empty(SolverStatus::Infeasible);
        assert!(matches!(
            SolutionDecoder::decode(&m, &run.model, &run.solution),
            Err(AssignError::Precondition(_))
        ));
    }
}
