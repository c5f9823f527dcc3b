//! Solver interface and the `good_lp` backend.

use super::model::{LpModel, Objective, Relation};
use good_lp::{
    constraint, default_solver, variable, Expression, ProblemVariables, ResolutionError,
    Solution, SolverModel, Variable,
};
use std::fmt;
use std::time::{Duration, Instant};

/// Status of the solver after execution.
///
/// Each status keeps the numeric code of the classic LP status set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolverStatus {
    /// The model has not been solved yet.
    NotSolved,
    /// Proven optimal solution found.
    Optimal,
    /// No feasible solution exists.
    Infeasible,
    /// The objective can grow without bound.
    Unbounded,
    /// The solver stopped without a conclusive answer.
    Undefined,
}

impl SolverStatus {
    /// Numeric status code (NOT_SOLVED=0, OPTIMAL=1, INFEASIBLE=-1, UNBOUNDED=-2, UNDEFINED=-3).
    pub fn code(self) -> i32 {
        match self {
            SolverStatus::NotSolved => 0,
            SolverStatus::Optimal => 1,
            SolverStatus::Infeasible => -1,
            SolverStatus::Unbounded => -2,
            SolverStatus::Undefined => -3,
        }
    }

    /// Display name.
    pub fn as_str(self) -> &'static str {
        match self {
            SolverStatus::NotSolved => "Not Solved",
            SolverStatus::Optimal => "Optimal",
            SolverStatus::Infeasible => "Infeasible",
            SolverStatus::Unbounded => "Unbounded",
            SolverStatus::Undefined => "Undefined",
        }
    }

    /// What the user should do about this outcome.
    pub fn guidance(self) -> &'static str {
        match self {
            SolverStatus::NotSolved => {
                "The model has not been solved yet. Build the matrix and run the solver."
            }
            SolverStatus::Optimal => {
                "An optimal assignment was found. Leaderboards can be created from it."
            }
            SolverStatus::Infeasible => {
                "No assignment satisfies every constraint. Check that the minimum hours do not \
                 exceed the maximum hours and that task capacities can absorb the minimum hours."
            }
            SolverStatus::Unbounded => {
                "Production can grow without limit. Check that every task has a finite capacity."
            }
            SolverStatus::Undefined => {
                "The solver could not reach a conclusion. Try smaller datasets or rerun the solve."
            }
        }
    }

    /// Whether the status is [`SolverStatus::Optimal`].
    pub fn is_optimal(self) -> bool {
        self == SolverStatus::Optimal
    }
}

impl fmt::Display for SolverStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Solution from an LP solver.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LpSolution {
    /// Solver status.
    pub status: SolverStatus,
    /// Objective function value (present when a solution was found).
    pub objective_value: Option<f64>,
    /// Variable values, parallel to [`LpModel::variables`]. Empty without a solution.
    pub values: Vec<f64>,
    /// Wall-clock solve time.
    pub solve_time: Duration,
}

impl LpSolution {
    /// Creates an empty solution with the given status.
    pub fn empty(status: SolverStatus) -> Self {
        Self {
            status,
            objective_value: None,
            values: Vec::new(),
            solve_time: Duration::ZERO,
        }
    }

    /// Solve time in seconds.
    pub fn solve_seconds(&self) -> f64 {
        self.solve_time.as_secs_f64()
    }

    /// Whether a solution was found.
    pub fn is_solution_found(&self) -> bool {
        self.status.is_optimal() && !self.values.is_empty()
    }
}

/// Trait for integer-program solver implementations.
///
/// The solve call is synchronous and may run for a long time on large
/// models; there is no internal timeout. Callers needing bounded latency
/// run it off the latency-sensitive path and treat a deadline as
/// [`SolverStatus::Undefined`].
pub trait LpSolver {
    /// Solves the model and returns a solution.
    fn solve(&self, model: &LpModel) -> LpSolution;
}

/// Mixed-integer solver backed by `good_lp` with the pure-Rust `microlp` engine.
///
/// Every variable is a non-negative integer. Returned values are rounded to
/// the nearest integer to remove solver round-off.
#[derive(Debug, Clone, Copy, Default)]
pub struct MicroLpSolver;

impl MicroLpSolver {
    pub fn new() -> Self {
        Self
    }
}

fn linear_expression(terms: &[(usize, f64)], handles: &[Variable]) -> Expression {
    terms
        .iter()
        .fold(Expression::from(0.0), |acc, &(i, coef)| acc + handles[i] * coef)
}

impl LpSolver for MicroLpSolver {
    fn solve(&self, model: &LpModel) -> LpSolution {
        if let Err(reason) = model.validate() {
            tracing::warn!(
                component = "solver",
                operation = "solve",
                model = model.name.as_str(),
                reason = reason.as_str(),
                "Rejected invalid model"
            );
            return LpSolution::empty(SolverStatus::Undefined);
        }
        let Some(objective) = &model.objective else {
            return LpSolution::empty(SolverStatus::Undefined);
        };

        let start_time = Instant::now();

        let mut vars = ProblemVariables::new();
        let handles: Vec<Variable> = model
            .variables
            .iter()
            .map(|v| vars.add(variable().integer().min(0).name(v.name.clone())))
            .collect();

        let unsolved = match objective {
            Objective::Maximize { terms } => vars.maximise(linear_expression(terms, &handles)),
            Objective::Minimize { terms } => vars.minimise(linear_expression(terms, &handles)),
        };
        let mut problem = unsolved.using(default_solver);

        for c in &model.constraints {
            let lhs = linear_expression(&c.terms, &handles);
            let rhs = Expression::from(c.rhs);
            problem = problem.with(match c.relation {
                Relation::LessEq => constraint::leq(lhs, rhs),
                Relation::GreaterEq => constraint::leq(rhs, lhs),
                Relation::Equal => constraint::eq(lhs, rhs),
            });
        }

        let outcome = problem.solve();
        let solve_time = start_time.elapsed();

        let solution = match outcome {
            Ok(raw) => {
                let values: Vec<f64> = handles.iter().map(|&h| raw.value(h).round()).collect();
                LpSolution {
                    status: SolverStatus::Optimal,
                    objective_value: Some(objective.value(&values)),
                    values,
                    solve_time,
                }
            }
            Err(err) => {
                let status = match err {
                    ResolutionError::Infeasible => SolverStatus::Infeasible,
                    ResolutionError::Unbounded => SolverStatus::Unbounded,
                    _ => SolverStatus::Undefined,
                };
                tracing::warn!(
                    component = "solver",
                    operation = "solve",
                    model = model.name.as_str(),
                    status = status.as_str(),
                    error = %err,
                    "Solver finished without an optimal solution"
                );
                LpSolution {
                    solve_time,
                    ..LpSolution::empty(status)
                }
            }
        };

        tracing::debug!(
            component = "solver",
            operation = "solve",
            model = model.name.as_str(),
            variables = model.variable_count(),
            constraints = model.constraint_count(),
            status = solution.status.as_str(),
            elapsed_ms = solve_time.as_millis() as u64,
            "Solve finished"
        );
        solution
    }
}
