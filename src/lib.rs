//! Task-assignment optimization with gamified leaderboards.
//!
//! Assigns recurring production tasks to a pool of workers so as to maximize
//! completed output under capacity and workload constraints, then turns the
//! optimized assignment into rank-ordered scoring reports.
//!
//! - **Datasets**: per-task worker processing times, measured or generated.
//! - **Matrix**: the worker × task processing-time matrix with capacities.
//! - **LP**: solver-agnostic integer programs with labeled constraints and a
//!   pluggable solver (bundled: `good_lp` with `microlp`).
//! - **Optimizer**: the production-maximizing formulation.
//! - **Decoder**: allocation per task and worker, constraint values by
//!   family, production totals.
//! - **Leaderboard**: productivity, qualitative and combined rankings with
//!   deterministic tie-breaks and ordinal placements.
//! - **Session**: versioned, immutable state record driving the workflow.
//!
//! # Pipeline
//!
//! ```text
//! TaskDataset* -> ProcessingTimeMatrix -> LpModel -> LpSolution
//!              -> DecodedSolution -> Leaderboards
//! ```
//!
//! The library logs through `tracing` and never installs a subscriber.

pub mod dataset;
pub mod decoder;
pub mod error;
pub mod leaderboard;
pub mod lp;
pub mod matrix;
pub mod optimizer;
pub mod session;

mod random;

pub use error::{AssignError, Result};
