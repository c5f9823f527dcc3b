//! Integer-program formulation of the assignment problem.

use super::config::OptimizerConfig;
use crate::error::{AssignError, Result};
use crate::lp::{ConstraintFamily, DecisionVar, LinearConstraint, LpModel, Objective, Relation};
use crate::matrix::ProcessingTimeMatrix;

/// Index of `x[task][worker]` in the model's variable list (task-major).
fn var_index(task: usize, worker: usize, workers: usize) -> usize {
    task * workers + worker
}

/// Builds the production-maximizing model for a matrix.
///
/// Variables are created task-major. Constraints are added in a fixed
/// order: `tasks - 1` equality, `tasks` capacity, then one minimum-hours and
/// one maximum-hours constraint per worker, interleaved.
pub fn build_model(matrix: &ProcessingTimeMatrix, config: &OptimizerConfig) -> Result<LpModel> {
    config.validate().map_err(AssignError::Configuration)?;

    let tasks = matrix.task_count();
    let workers = matrix.worker_count();
    let mut model = LpModel::new(config.model_name.clone());

    for (t, row) in matrix.rows().iter().enumerate() {
        for w in 0..workers {
            model.add_variable(DecisionVar::new(t, &row.name, w));
        }
    }

    model.set_objective(Objective::Maximize {
        terms: (0..tasks * workers).map(|i| (i, 1.0)).collect(),
    });

    // A piece needs every task done once, so all task totals match the first.
    for t in 1..tasks {
        let terms = (0..workers)
            .map(|w| (var_index(t, w, workers), 1.0))
            .chain((0..workers).map(|w| (var_index(0, w, workers), -1.0)))
            .collect();
        model.add_constraint(LinearConstraint {
            family: ConstraintFamily::Equality,
            label: format!("equality[{}]", matrix.row(t).name),
            terms,
            relation: Relation::Equal,
            rhs: 0.0,
        });
    }

    for (t, row) in matrix.rows().iter().enumerate() {
        let terms = (0..workers)
            .map(|w| (var_index(t, w, workers), row.processing_times[w]))
            .collect();
        model.add_constraint(LinearConstraint {
            family: ConstraintFamily::Capacity,
            label: format!("capacity[{}]", row.name),
            terms,
            relation: Relation::LessEq,
            rhs: row.capacity,
        });
    }

    for w in 0..workers {
        let hours: Vec<(usize, f64)> = (0..tasks)
            .map(|t| (var_index(t, w, workers), matrix.processing_time(t, w)))
            .collect();
        model.add_constraint(LinearConstraint {
            family: ConstraintFamily::MinHours,
            label: format!("min_hours[worker {w}]"),
            terms: hours.clone(),
            relation: Relation::GreaterEq,
            rhs: config.min_hours_worked,
        });
        model.add_constraint(LinearConstraint {
            family: ConstraintFamily::MaxHours,
            label: format!("max_hours[worker {w}]"),
            terms: hours,
            relation: Relation::LessEq,
            rhs: config.max_hours_worked,
        });
    }

    tracing::debug!(
        component = "optimizer",
        operation = "build_model",
        tasks,
        workers,
        variables = model.variable_count(),
        constraints = model.constraint_count(),
        "Built assignment model"
    );
    Ok(model)
}
