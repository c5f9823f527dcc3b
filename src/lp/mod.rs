//! Integer linear programming layer.
//!
//! Provides a solver-agnostic model for integer programs over non-negative
//! integer decision variables, with labeled constraints.
//!
//! # Key Components
//!
//! - **Variables**: [`DecisionVar`] with a structured [`VarKey`] (task, worker)
//! - **Constraints**: [`LinearConstraint`] tagged with a [`ConstraintFamily`]
//! - **Model**: [`LpModel`]: container for variables, constraints, objective
//! - **Solver**: [`LpSolver`] trait, the interface for solver implementations,
//!   with [`MicroLpSolver`] as the bundled backend
//!
//! # Design
//!
//! Model construction and solution decoding only see [`LpModel`] and
//! [`LpSolution`]; the concrete solver is swappable behind [`LpSolver`].

mod model;
mod solver;
mod variables;

pub use model::{ConstraintFamily, LinearConstraint, LpModel, Objective, Relation};
pub use solver::{LpSolution, LpSolver, MicroLpSolver, SolverStatus};
pub use variables::{DecisionVar, VarKey};
