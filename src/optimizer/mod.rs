//! Task-assignment optimizer.
//!
//! Formulates the assignment of task units to workers as an integer program
//! and solves it through a pluggable [`LpSolver`].
//!
//! # Formulation
//!
//! For every task `t` and worker `w`, `x[t][w] >= 0` (integer) counts the
//! units of `t` that `w` completes.
//!
//! ```text
//! maximize    sum_t sum_w x[t][w]
//! subject to  sum_w x[t][w]            == sum_w x[0][w]     for t in 1..tasks
//!             sum_w x[t][w] * p[t][w]  <= capacity[t]       for every task t
//!             sum_t x[t][w] * p[t][w]  >= min_hours_worked  for every worker w
//!             sum_t x[t][w] * p[t][w]  <= max_hours_worked  for every worker w
//! ```
//!
//! Fairness between tasks and workers lives entirely in the constraints;
//! the objective is unweighted.

mod config;
mod formulation;

pub use config::OptimizerConfig;
pub use formulation::build_model;

use crate::error::Result;
use crate::lp::{LpModel, LpSolution, LpSolver};
use crate::matrix::ProcessingTimeMatrix;

/// A built model together with the solver's answer.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptimizationRun {
    /// The formulated model.
    pub model: LpModel,
    /// The solver's result. The status is reported verbatim.
    pub solution: LpSolution,
}

/// Builds and solves assignment models.
pub struct AssignmentOptimizer;

impl AssignmentOptimizer {
    /// Builds the model for `matrix` and solves it once.
    ///
    /// A non-optimal status is returned as-is: no retry, no bound changes.
    pub fn run<S: LpSolver + ?Sized>(
        matrix: &ProcessingTimeMatrix,
        config: &OptimizerConfig,
        solver: &S,
    ) -> Result<OptimizationRun> {
        let model = build_model(matrix, config)?;
        let solution = solver.solve(&model);

        if solution.status.is_optimal() {
            tracing::info!(
                component = "optimizer",
                operation = "run",
                status = solution.status.as_str(),
                objective = solution.objective_value.unwrap_or_default(),
                solve_seconds = solution.solve_seconds(),
                "Optimization finished"
            );
        } else {
            tracing::warn!(
                component = "optimizer",
                operation = "run",
                status = solution.status.as_str(),
                code = solution.status.code(),
                "Optimization finished without an optimal solution"
            );
        }
        Ok(OptimizationRun { model, solution })
    }
}
