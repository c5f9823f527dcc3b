//! Point distribution and leaderboard construction.

use super::config::ScoringConfig;
use super::rank::{rank_indices, RankFinalizer, RankRule};
use super::types::{Leaderboard, LeaderboardKind, Leaderboards, ScoreRow};
use crate::decoder::DecodedSolution;
use crate::error::{AssignError, Result};
use crate::matrix::ProcessingTimeMatrix;
use crate::random::rng_from;
use rand::Rng;

/// Qualitative factors drawn for every worker.
pub const QUALITATIVE_FACTORS: [&str; 2] = ["Self-assessment deviation", "Engagement"];

/// Breakdown columns of the combined leaderboard.
pub const COMBINED_COLUMNS: [&str; 2] = ["Productivity", "Qualitative"];

/// Splits a task's points among `n` ranked workers.
///
/// The worker at rank `i` (1-based, fastest first) receives
/// `round(points / i)`: with 50 points, ranks 1, 2, 3 get 50, 25, 17.
pub fn rank_points(points: f64, n: usize) -> Vec<i64> {
    (1..=n).map(|i| (points / i as f64).round() as i64).collect()
}

/// (worker, unit processing time) of a worker on one task.
type Participant = (usize, f64);

/// Shortest unit processing time first.
struct FastestWorker;

impl RankRule<Participant> for FastestWorker {
    fn name(&self) -> &str {
        "FastestWorker"
    }

    fn score(&self, item: &Participant) -> f64 {
        item.1
    }
}

/// Builds the productivity, qualitative and combined leaderboards.
pub struct LeaderboardEngine;

impl LeaderboardEngine {
    /// Builds all three leaderboards from a decoded solution.
    pub fn build(
        matrix: &ProcessingTimeMatrix,
        decoded: &DecodedSolution,
        config: &ScoringConfig,
    ) -> Result<Leaderboards> {
        config.validate().map_err(AssignError::Configuration)?;

        let productivity = Self::productivity(matrix, decoded, config)?;
        let mut rng = rng_from(config.seed);
        let qualitative = Self::qualitative(matrix.worker_count(), config, &mut rng);
        let combined = Self::combined(&productivity, &qualitative, config);

        tracing::info!(
            component = "leaderboard",
            operation = "build",
            workers = matrix.worker_count(),
            tasks = matrix.task_count(),
            productivity_weight = config.productivity_weight,
            "Built leaderboards"
        );
        Ok(Leaderboards {
            productivity,
            qualitative,
            combined,
        })
    }

    /// Ranks workers by points earned on the tasks they were allocated.
    ///
    /// Each task distributes `points_per_star * difficulty` among the workers
    /// with a positive allocation, fastest first (ties by worker index). One
    /// breakdown column per task. Workers with no allocation score 0.
    pub fn productivity(
        matrix: &ProcessingTimeMatrix,
        decoded: &DecodedSolution,
        config: &ScoringConfig,
    ) -> Result<Leaderboard> {
        let allocation = &decoded.allocation;
        let workers = matrix.worker_count();
        if !allocation.tasks().iter().map(String::as_str).eq(matrix.task_names())
            || allocation.worker_count() != workers
        {
            return Err(AssignError::Precondition(
                "decoded solution does not belong to the current matrix".into(),
            ));
        }

        let tasks = matrix.task_count();
        let mut points = vec![vec![0i64; tasks]; workers];

        for (t, row) in matrix.rows().iter().enumerate() {
            let participants: Vec<Participant> = allocation
                .task_units(t)
                .iter()
                .enumerate()
                .filter(|(_, &units)| units > 0)
                .map(|(w, _)| (w, row.processing_times[w]))
                .collect();
            if participants.is_empty() {
                continue;
            }

            let to_distribute = config.points_per_star * f64::from(row.difficulty);
            let shares = rank_points(to_distribute, participants.len());
            for (rank, i) in rank_indices(&participants, &[&FastestWorker])
                .into_iter()
                .enumerate()
            {
                points[participants[i].0][t] = shares[rank];
            }

            tracing::debug!(
                component = "leaderboard",
                operation = "productivity",
                task = row.name.as_str(),
                participants = participants.len(),
                points = to_distribute,
                "Distributed task points"
            );
        }

        let rows = points
            .into_iter()
            .enumerate()
            .map(|(worker, per_task)| ScoreRow {
                worker,
                total_points: per_task.iter().sum(),
                points: per_task,
            })
            .collect();
        let columns = matrix.task_names().map(str::to_owned).collect();
        Ok(RankFinalizer::finalize(LeaderboardKind::Productivity, columns, rows))
    }

    /// Ranks workers by randomly drawn qualitative factors.
    ///
    /// Each factor is an independent uniform integer in
    /// `[min_qualitative, max_qualitative)`. Not derived from the solution.
    pub fn qualitative<R: Rng>(workers: usize, config: &ScoringConfig, rng: &mut R) -> Leaderboard {
        let rows = (0..workers)
            .map(|worker| {
                let points: Vec<i64> = QUALITATIVE_FACTORS
                    .iter()
                    .map(|_| rng.random_range(config.min_qualitative..config.max_qualitative))
                    .collect();
                ScoreRow {
                    worker,
                    total_points: points.iter().sum(),
                    points,
                }
            })
            .collect();
        let columns = QUALITATIVE_FACTORS.iter().map(|s| s.to_string()).collect();
        RankFinalizer::finalize(LeaderboardKind::Qualitative, columns, rows)
    }

    /// Blends productivity and qualitative totals per worker.
    ///
    /// `total = round(productivity * w + qualitative * (1 - w))`.
    pub fn combined(
        productivity: &Leaderboard,
        qualitative: &Leaderboard,
        config: &ScoringConfig,
    ) -> Leaderboard {
        let workers = productivity.len().max(qualitative.len());
        let rows = (0..workers)
            .map(|worker| {
                let prod = productivity.total_for(worker);
                let qual = qualitative.total_for(worker);
                let total = prod as f64 * config.productivity_weight
                    + qual as f64 * config.qualitative_weight();
                ScoreRow {
                    worker,
                    points: vec![prod, qual],
                    total_points: total.round() as i64,
                }
            })
            .collect();
        let columns = COMBINED_COLUMNS.iter().map(|s| s.to_string()).collect();
        RankFinalizer::finalize(LeaderboardKind::Combined, columns, rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::TaskDataset;
    use crate::decoder::SolutionDecoder;
    use crate::lp::{MicroLpSolver, SolverStatus};
    use crate::optimizer::{AssignmentOptimizer, OptimizerConfig};
    use crate::random::create_rng;

    /// Decodes a hand-made optimal solution for `matrix` with the given units.
    fn decoded_with(matrix: &ProcessingTimeMatrix, units: &[Vec<f64>]) -> DecodedSolution {
        let model =
            crate::optimizer::build_model(matrix, &OptimizerConfig::default()).unwrap();
        let values: Vec<f64> = units.iter().flatten().copied().collect();
        let solution = crate::lp::LpSolution {
            status: SolverStatus::Optimal,
            objective_value: Some(values.iter().sum()),
            values,
            solve_time: std::time::Duration::ZERO,
        };
        SolutionDecoder::decode(matrix, &model, &solution).unwrap()
    }

    #[test]
    fn test_rank_points_worked_example() {
        assert_eq!(rank_points(50.0, 3), vec![50, 25, 17]);
        assert_eq!(rank_points(50.0, 1), vec![50]);
        assert!(rank_points(50.0, 0).is_empty());
    }

    #[test]
    fn test_productivity_worked_example() {
        // difficulty 5, 10 points per star: fastest 50, second 25, third 17.
        let matrix = ProcessingTimeMatrix::build(&[TaskDataset::new(
            "printing",
            vec![3.0, 1.0, 2.0, 0.5],
            100.0,
            5,
        )])
        .unwrap();
        // Worker 3 is the fastest but did no work.
        let decoded = decoded_with(&matrix, &[vec![4.0, 2.0, 1.0, 0.0]]);
        let config = ScoringConfig::default().with_points_per_star(10.0);

        let board = LeaderboardEngine::productivity(&matrix, &decoded, &config).unwrap();
        assert_eq!(board.total_for(1), 50);
        assert_eq!(board.total_for(2), 25);
        assert_eq!(board.total_for(0), 17);
        assert_eq!(board.total_for(3), 0);
        assert_eq!(board.points_for(2, "printing"), Some(25));

        let order: Vec<usize> = board.entries().iter().map(|e| e.worker).collect();
        assert_eq!(order, vec![1, 2, 0, 3]);
        assert_eq!(board.entries()[3].placement, "4th");
    }

    #[test]
    fn test_productivity_sums_across_tasks() {
        let matrix = ProcessingTimeMatrix::build(&[
            TaskDataset::new("printing", vec![1.0, 2.0], 100.0, 2),
            TaskDataset::new("cutting", vec![2.0, 1.0], 100.0, 4),
        ])
        .unwrap();
        let decoded = decoded_with(&matrix, &[vec![1.0, 1.0], vec![1.0, 1.0]]);
        let config = ScoringConfig::default().with_points_per_star(10.0);

        let board = LeaderboardEngine::productivity(&matrix, &decoded, &config).unwrap();
        // printing: 20 points, worker 0 fastest. cutting: 40 points, worker 1 fastest.
        assert_eq!(board.points_for(0, "printing"), Some(20));
        assert_eq!(board.points_for(1, "printing"), Some(10));
        assert_eq!(board.points_for(0, "cutting"), Some(20));
        assert_eq!(board.points_for(1, "cutting"), Some(40));
        assert_eq!(board.total_for(0), 40);
        assert_eq!(board.total_for(1), 50);
    }

    #[test]
    fn test_productivity_speed_ties_break_by_worker() {
        let matrix = ProcessingTimeMatrix::build(&[TaskDataset::new(
            "sewing",
            vec![1.0, 1.0, 1.0],
            100.0,
            3,
        )])
        .unwrap();
        let decoded = decoded_with(&matrix, &[vec![1.0, 1.0, 1.0]]);
        let config = ScoringConfig::default().with_points_per_star(10.0);

        let board = LeaderboardEngine::productivity(&matrix, &decoded, &config).unwrap();
        assert_eq!(board.total_for(0), 30);
        assert_eq!(board.total_for(1), 15);
        assert_eq!(board.total_for(2), 10);
    }

    #[test]
    fn test_task_without_participants_distributes_nothing() {
        let matrix = ProcessingTimeMatrix::build(&[TaskDataset::new(
            "ironing",
            vec![1.0, 2.0],
            100.0,
            9,
        )])
        .unwrap();
        let decoded = decoded_with(&matrix, &[vec![0.0, 0.0]]);
        let board =
            LeaderboardEngine::productivity(&matrix, &decoded, &ScoringConfig::default()).unwrap();
        assert!(board.entries().iter().all(|e| e.total_points == 0));
        let order: Vec<usize> = board.entries().iter().map(|e| e.worker).collect();
        assert_eq!(order, vec![0, 1]);
    }

    #[test]
    fn test_productivity_rejects_foreign_solution() {
        let a = ProcessingTimeMatrix::build(&[TaskDataset::new("a", vec![1.0], 10.0, 1)]).unwrap();
        let b = ProcessingTimeMatrix::build(&[TaskDataset::new("b", vec![1.0], 10.0, 1)]).unwrap();
        let decoded = decoded_with(&a, &[vec![1.0]]);
        assert!(matches!(
            LeaderboardEngine::productivity(&b, &decoded, &ScoringConfig::default()),
            Err(AssignError::Precondition(_))
        ));
    }

    #[test]
    fn test_qualitative_range_and_shape() {
        let config = ScoringConfig::default().with_qualitative_range(3, 7);
        let mut rng = create_rng(42);
        let board = LeaderboardEngine::qualitative(25, &config, &mut rng);

        assert_eq!(board.len(), 25);
        assert_eq!(board.columns(), &QUALITATIVE_FACTORS);
        for e in board.entries() {
            assert!(e.points.iter().all(|p| (3..7).contains(p)));
            assert_eq!(e.total_points, e.points.iter().sum::<i64>());
        }
    }

    #[test]
    fn test_qualitative_seeded_is_reproducible() {
        let config = ScoringConfig::default();
        let a = LeaderboardEngine::qualitative(10, &config, &mut create_rng(5));
        let b = LeaderboardEngine::qualitative(10, &config, &mut create_rng(5));
        assert_eq!(a, b);
    }

    #[test]
    fn test_combined_weighting() {
        let matrix = ProcessingTimeMatrix::build(&[TaskDataset::new(
            "printing",
            vec![1.0, 2.0],
            100.0,
            5,
        )])
        .unwrap();
        let decoded = decoded_with(&matrix, &[vec![1.0, 1.0]]);
        let config = ScoringConfig::default()
            .with_points_per_star(10.0)
            .with_productivity_weight(0.75);

        let productivity = LeaderboardEngine::productivity(&matrix, &decoded, &config).unwrap();
        let qualitative = LeaderboardEngine::qualitative(2, &config, &mut create_rng(1));
        let combined = LeaderboardEngine::combined(&productivity, &qualitative, &config);

        assert_eq!(combined.columns(), &COMBINED_COLUMNS);
        for w in 0..2 {
            let prod = productivity.total_for(w);
            let qual = qualitative.total_for(w);
            let expected = (prod as f64 * 0.75 + qual as f64 * 0.25).round() as i64;
            assert_eq!(combined.total_for(w), expected);
            assert_eq!(combined.points_for(w, "Productivity"), Some(prod));
            assert_eq!(combined.points_for(w, "Qualitative"), Some(qual));
        }
    }

    #[test]
    fn test_build_from_solved_model() {
        let matrix = ProcessingTimeMatrix::build(&[
            TaskDataset::new("printing", vec![1.0, 2.0, 1.5], 12.0, 5),
            TaskDataset::new("cutting", vec![0.5, 1.0, 2.0], 12.0, 3),
        ])
        .unwrap();
        let run = AssignmentOptimizer::run(
            &matrix,
            &OptimizerConfig::default()
                .with_min_hours_worked(1.0)
                .with_max_hours_worked(10.0),
            &MicroLpSolver,
        )
        .unwrap();
        let decoded = SolutionDecoder::decode(&matrix, &run.model, &run.solution).unwrap();
        let config = ScoringConfig::default().with_seed(3);

        let boards = LeaderboardEngine::build(&matrix, &decoded, &config).unwrap();
        for kind in [
            LeaderboardKind::Productivity,
            LeaderboardKind::Qualitative,
            LeaderboardKind::Combined,
        ] {
            let board = boards.get(kind);
            assert_eq!(board.kind(), kind);
            assert_eq!(board.len(), 3);
        }

        // Every task has at least one participant, so its fastest one earns full points.
        let best: i64 = boards
            .productivity
            .entries()
            .iter()
            .map(|e| e.points[0])
            .max()
            .unwrap();
        assert_eq!(best, 50);
    }

    #[test]
    fn test_build_rejects_invalid_config() {
        let matrix =
            ProcessingTimeMatrix::build(&[TaskDataset::new("a", vec![1.0], 10.0, 1)]).unwrap();
        let decoded = decoded_with(&matrix, &[vec![1.0]]);
        let config = ScoringConfig::default().with_qualitative_range(9, 1);
        assert!(matches!(
            LeaderboardEngine::build(&matrix, &decoded, &config),
            Err(AssignError::Configuration(_))
        ));
    }
}
