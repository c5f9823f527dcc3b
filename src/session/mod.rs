//! Versioned session state.
//!
//! A [`Session`] is an immutable record of everything an interactive
//! workflow has produced: registered datasets, the built matrix, the last
//! optimization run and the last leaderboards. Every action takes the
//! current record and returns a new one; a failed action returns an error
//! and leaves the caller's record untouched.
//!
//! Staleness is tracked with generation counters. Each dataset change bumps
//! the dataset version; a matrix remembers the version it was built from,
//! and a run remembers the matrix generation it was solved against. A
//! session is *dirty* when its matrix is missing or older than the datasets.

use crate::dataset::{generate_dataset, GeneratorConfig, TaskDataset};
use crate::decoder::{DecodedSolution, SolutionDecoder};
use crate::error::{AssignError, Result};
use crate::leaderboard::{LeaderboardEngine, Leaderboards, ScoringConfig};
use crate::lp::{LpSolver, SolverStatus};
use crate::matrix::ProcessingTimeMatrix;
use crate::optimizer::{AssignmentOptimizer, OptimizationRun, OptimizerConfig};

/// A matrix and the dataset version it was built from.
#[derive(Debug, Clone, PartialEq)]
struct MatrixSnapshot {
    matrix: ProcessingTimeMatrix,
    generation: u64,
}

/// An optimization run and the matrix generation it was solved against.
#[derive(Debug, Clone, PartialEq)]
struct SolvedRun {
    run: OptimizationRun,
    decoded: Option<DecodedSolution>,
    generation: u64,
}

/// Summary of the last optimization run.
#[derive(Debug, Clone, Copy)]
pub struct OptimizationReport<'a> {
    /// Solver status, verbatim.
    pub status: SolverStatus,
    /// Objective value, when a solution exists.
    pub objective_value: Option<f64>,
    /// Wall-clock solve time in seconds.
    pub solve_seconds: f64,
    /// Decoded solution, present only for optimal runs.
    pub decoded: Option<&'a DecodedSolution>,
}

impl OptimizationReport<'_> {
    /// Guidance text for the status.
    pub fn guidance(&self) -> &'static str {
        self.status.guidance()
    }

    /// Finished pieces, when optimal.
    pub fn total_units(&self) -> Option<f64> {
        self.decoded.map(|d| d.total_units)
    }

    /// Hours worked by all workers, when optimal.
    pub fn total_hours(&self) -> Option<f64> {
        self.decoded.map(|d| d.total_hours)
    }
}

/// Immutable, versioned record of a planning session.
///
/// # Examples
///
/// ```
/// use u_assign::dataset::TaskDataset;
/// use u_assign::leaderboard::ScoringConfig;
/// use u_assign::lp::{MicroLpSolver, SolverStatus};
/// use u_assign::optimizer::OptimizerConfig;
/// use u_assign::session::Session;
///
/// let session = Session::new()
///     .register_dataset(TaskDataset::new("printing", vec![1.0, 2.0], 20.0, 4))?
///     .register_dataset(TaskDataset::new("cutting", vec![0.5, 1.0], 20.0, 2))?
///     .build_matrix()?;
/// let config = OptimizerConfig::default()
///     .with_min_hours_worked(1.0)
///     .with_max_hours_worked(10.0);
/// let session = session.solve(&config, &MicroLpSolver)?;
/// assert_eq!(session.report().unwrap().status, SolverStatus::Optimal);
///
/// let session = session.create_leaderboards(&ScoringConfig::default().with_seed(1))?;
/// assert_eq!(session.leaderboards().unwrap().combined.len(), 2);
/// # Ok::<(), u_assign::AssignError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Session {
    datasets: Vec<TaskDataset>,
    dataset_version: u64,
    matrix: Option<MatrixSnapshot>,
    run: Option<SolvedRun>,
    leaderboards: Option<Leaderboards>,
}

impl Session {
    /// Creates an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registered datasets in registration order.
    pub fn datasets(&self) -> &[TaskDataset] {
        &self.datasets
    }

    /// Number of workers shared by all datasets, if any are registered.
    pub fn worker_count(&self) -> Option<usize> {
        self.datasets.first().map(TaskDataset::worker_count)
    }

    /// Version counter of the dataset registry.
    pub fn dataset_version(&self) -> u64 {
        self.dataset_version
    }

    /// The built matrix, if any.
    pub fn matrix(&self) -> Option<&ProcessingTimeMatrix> {
        self.matrix.as_ref().map(|s| &s.matrix)
    }

    /// The last optimization run, if any.
    pub fn run(&self) -> Option<&OptimizationRun> {
        self.run.as_ref().map(|r| &r.run)
    }

    /// The decoded solution of the last run, if it was optimal.
    pub fn decoded(&self) -> Option<&DecodedSolution> {
        self.run.as_ref().and_then(|r| r.decoded.as_ref())
    }

    /// The last leaderboards, if any.
    pub fn leaderboards(&self) -> Option<&Leaderboards> {
        self.leaderboards.as_ref()
    }

    /// Whether the datasets changed since the matrix was built (or no matrix exists).
    pub fn is_dirty(&self) -> bool {
        self.matrix
            .as_ref()
            .map_or(true, |s| s.generation != self.dataset_version)
    }

    /// Summary of the last optimization run.
    pub fn report(&self) -> Option<OptimizationReport<'_>> {
        self.run.as_ref().map(|r| OptimizationReport {
            status: r.run.solution.status,
            objective_value: r.run.solution.objective_value,
            solve_seconds: r.run.solution.solve_seconds(),
            decoded: r.decoded.as_ref(),
        })
    }

    /// Registers a dataset, replacing any dataset with the same task name.
    ///
    /// The dataset must cover as many workers as the datasets already
    /// registered. Marks the matrix stale.
    pub fn register_dataset(&self, dataset: TaskDataset) -> Result<Session> {
        dataset.validate()?;
        if let Some(workers) = self.worker_count() {
            let replaces_only = self.datasets.len() == 1 && self.datasets[0].name == dataset.name;
            if dataset.worker_count() != workers && !replaces_only {
                return Err(AssignError::Configuration(format!(
                    "task `{}` has {} workers, the session has {workers}",
                    dataset.name,
                    dataset.worker_count()
                )));
            }
        }

        let mut next = self.clone();
        match next.datasets.iter_mut().find(|d| d.name == dataset.name) {
            Some(existing) => *existing = dataset,
            None => next.datasets.push(dataset),
        }
        next.dataset_version += 1;

        tracing::debug!(
            component = "session",
            operation = "register_dataset",
            datasets = next.datasets.len(),
            version = next.dataset_version,
            "Registered dataset"
        );
        Ok(next)
    }

    /// Generates a synthetic dataset and registers it.
    pub fn generate_dataset(
        &self,
        name: &str,
        workers: usize,
        capacity: f64,
        difficulty: u8,
        config: &GeneratorConfig,
    ) -> Result<Session> {
        let dataset = generate_dataset(name, workers, capacity, difficulty, config)?;
        self.register_dataset(dataset)
    }

    /// Removes every dataset. Marks the matrix stale.
    pub fn clear_datasets(&self) -> Result<Session> {
        if self.datasets.is_empty() {
            return Err(AssignError::Precondition("no datasets to delete".into()));
        }
        let mut next = self.clone();
        next.datasets.clear();
        next.dataset_version += 1;
        Ok(next)
    }

    /// Rebuilds the matrix from the registered datasets.
    ///
    /// Discards the previous run and leaderboards and clears the dirty state.
    pub fn build_matrix(&self) -> Result<Session> {
        let matrix = ProcessingTimeMatrix::build(&self.datasets)?;
        let mut next = self.clone();
        next.matrix = Some(MatrixSnapshot {
            matrix,
            generation: self.dataset_version,
        });
        next.run = None;
        next.leaderboards = None;

        tracing::info!(
            component = "session",
            operation = "build_matrix",
            generation = self.dataset_version,
            "Rebuilt matrix; previous run and leaderboards discarded"
        );
        Ok(next)
    }

    /// Builds and solves the model for the current matrix.
    ///
    /// Requires an up-to-date matrix. A non-optimal status is stored and
    /// reported, not raised. Previous leaderboards are discarded.
    pub fn solve<S: LpSolver + ?Sized>(
        &self,
        config: &OptimizerConfig,
        solver: &S,
    ) -> Result<Session> {
        let snapshot = self.matrix.as_ref().ok_or_else(|| {
            AssignError::Precondition("build the matrix before solving".into())
        })?;
        if self.is_dirty() {
            return Err(AssignError::Precondition(
                "datasets changed since the matrix was built; rebuild it before solving".into(),
            ));
        }

        let run = AssignmentOptimizer::run(&snapshot.matrix, config, solver)?;
        let decoded = if run.solution.status.is_optimal() {
            Some(SolutionDecoder::decode(
                &snapshot.matrix,
                &run.model,
                &run.solution,
            )?)
        } else {
            None
        };

        let mut next = self.clone();
        next.run = Some(SolvedRun {
            run,
            decoded,
            generation: snapshot.generation,
        });
        next.leaderboards = None;
        Ok(next)
    }

    /// Builds the three leaderboards from the last optimal run.
    pub fn create_leaderboards(&self, config: &ScoringConfig) -> Result<Session> {
        let snapshot = self.matrix.as_ref().ok_or_else(|| {
            AssignError::Precondition("build the matrix and solve before ranking".into())
        })?;
        let solved = self.run.as_ref().ok_or_else(|| {
            AssignError::Precondition("solve the model before creating leaderboards".into())
        })?;
        if self.is_dirty() || solved.generation != snapshot.generation {
            return Err(AssignError::Precondition(
                "the solved model is stale; rebuild the matrix and solve again".into(),
            ));
        }
        let decoded = solved.decoded.as_ref().ok_or_else(|| {
            AssignError::Precondition(format!(
                "leaderboards need an optimal model, the last solve was {}",
                solved.run.solution.status
            ))
        })?;

        let boards = LeaderboardEngine::build(&snapshot.matrix, decoded, config)?;
        let mut next = self.clone();
        next.leaderboards = Some(boards);
        Ok(next)
    }
}
