//! Ranking, tie-breaking and ordinal placement labels.

use super::types::{Leaderboard, LeaderboardEntry, LeaderboardKind, ScoreRow};
use std::cmp::Ordering;

/// A scoring rule used to order items.
///
/// Lower scores rank first. Rules are applied in sequence: a later rule is
/// only consulted when every earlier rule ties (within epsilon). Items that
/// tie on every rule keep their input order.
pub trait RankRule<T> {
    /// Returns the name of this rule.
    fn name(&self) -> &str;

    /// Computes the ranking score of an item.
    fn score(&self, item: &T) -> f64;
}

const EPSILON: f64 = 1e-9;

/// Sorts items by the given rules and returns their indices in rank order.
pub fn rank_indices<T>(items: &[T], rules: &[&dyn RankRule<T>]) -> Vec<usize> {
    let scores: Vec<Vec<f64>> = items
        .iter()
        .map(|item| rules.iter().map(|r| r.score(item)).collect())
        .collect();

    let mut indices: Vec<usize> = (0..items.len()).collect();
    indices.sort_by(|&a, &b| {
        for (va, vb) in scores[a].iter().zip(&scores[b]) {
            if (va - vb).abs() > EPSILON {
                return va.partial_cmp(vb).unwrap_or(Ordering::Equal);
            }
        }
        a.cmp(&b)
    });
    indices
}

/// Highest total points first.
struct MostPoints;

impl RankRule<ScoreRow> for MostPoints {
    fn name(&self) -> &str {
        "MostPoints"
    }

    fn score(&self, row: &ScoreRow) -> f64 {
        -(row.total_points as f64)
    }
}

/// Lowest worker index first.
struct LowestWorker;

impl RankRule<ScoreRow> for LowestWorker {
    fn name(&self) -> &str {
        "LowestWorker"
    }

    fn score(&self, row: &ScoreRow) -> f64 {
        row.worker as f64
    }
}

/// Returns `n` with its English ordinal suffix ("1st", "12th", "23rd", ...).
pub fn ordinal(n: usize) -> String {
    let suffix = if (11..=20).contains(&(n % 100)) {
        "th"
    } else {
        match n % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        }
    };
    format!("{n}{suffix}")
}

/// Turns unordered score rows into a ranked leaderboard.
///
/// Every leaderboard goes through the same routine, so ordering, tie-breaks
/// and labels are identical across kinds.
pub struct RankFinalizer;

impl RankFinalizer {
    /// Sorts rows by total points (descending), then worker index
    /// (ascending), and labels positions `1st`, `2nd`, ...
    pub fn finalize(
        kind: LeaderboardKind,
        columns: Vec<String>,
        rows: Vec<ScoreRow>,
    ) -> Leaderboard {
        let order = rank_indices(&rows, &[&MostPoints, &LowestWorker]);

        let mut slots: Vec<Option<ScoreRow>> = rows.into_iter().map(Some).collect();
        let entries = order
            .into_iter()
            .filter_map(|i| slots[i].take())
            .enumerate()
            .map(|(i, row)| LeaderboardEntry {
                position: i + 1,
                placement: ordinal(i + 1),
                worker: row.worker,
                points: row.points,
                total_points: row.total_points,
            })
            .collect();

        Leaderboard::new(kind, columns, entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn row(worker: usize, total: i64) -> ScoreRow {
        ScoreRow {
            worker,
            points: vec![total],
            total_points: total,
        }
    }

    #[test]
    fn test_ordinals() {
        let cases = [
            (1, "1st"),
            (2, "2nd"),
            (3, "3rd"),
            (4, "4th"),
            (11, "11th"),
            (12, "12th"),
            (13, "13th"),
            (21, "21st"),
            (101, "101st"),
            (111, "111th"),
        ];
        for (n, expected) in cases {
            assert_eq!(ordinal(n), expected);
        }
        assert_eq!(ordinal(20), "20th");
        assert_eq!(ordinal(22), "22nd");
        assert_eq!(ordinal(113), "113th");
        assert_eq!(ordinal(1002), "1002nd");
    }

    #[test]
    fn test_finalize_orders_and_labels() {
        let board = RankFinalizer::finalize(
            LeaderboardKind::Productivity,
            vec!["Total".into()],
            vec![row(0, 10), row(1, 30), row(2, 20)],
        );
        let workers: Vec<usize> = board.entries().iter().map(|e| e.worker).collect();
        assert_eq!(workers, vec![1, 2, 0]);
        let labels: Vec<&str> = board.entries().iter().map(|e| e.placement.as_str()).collect();
        assert_eq!(labels, vec!["1st", "2nd", "3rd"]);
        assert_eq!(board.entries()[0].player(), 2);
    }

    #[test]
    fn test_ties_break_by_worker_index() {
        // Input order deliberately scrambled.
        let rows = vec![row(4, 50), row(2, 50), row(3, 70), row(0, 50)];
        for _ in 0..5 {
            let board = RankFinalizer::finalize(
                LeaderboardKind::Combined,
                vec!["Total".into()],
                rows.clone(),
            );
            let workers: Vec<usize> = board.entries().iter().map(|e| e.worker).collect();
            assert_eq!(workers, vec![3, 0, 2, 4]);
        }
    }

    #[test]
    fn test_rank_indices_sequential_rules() {
        struct ByFirst;
        impl RankRule<(f64, f64)> for ByFirst {
            fn name(&self) -> &str {
                "ByFirst"
            }
            fn score(&self, item: &(f64, f64)) -> f64 {
                item.0
            }
        }
        struct BySecond;
        impl RankRule<(f64, f64)> for BySecond {
            fn name(&self) -> &str {
                "BySecond"
            }
            fn score(&self, item: &(f64, f64)) -> f64 {
                item.1
            }
        }

        let items = [(2.0, 0.0), (1.0, 5.0), (1.0, 3.0), (1.0, 3.0)];
        assert_eq!(rank_indices(&items, &[&ByFirst]), vec![1, 2, 3, 0]);
        assert_eq!(rank_indices(&items, &[&ByFirst, &BySecond]), vec![2, 3, 1, 0]);
        assert_eq!(rank_indices(&items, &[]), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_empty_leaderboard() {
        let board = RankFinalizer::finalize(LeaderboardKind::Qualitative, vec![], vec![]);
        assert!(board.is_empty());
    }

    proptest! {
        #[test]
        fn prop_ordinal_suffix(n in 1usize..100_000) {
            let label = ordinal(n);
            prop_assert!(label.starts_with(&n.to_string()));
            let suffix = &label[n.to_string().len()..];
            prop_assert!(["st", "nd", "rd", "th"].contains(&suffix));
            if (11..=13).contains(&(n % 100)) {
                prop_assert_eq!(suffix, "th");
            }
        }

        #[test]
        fn prop_finalize_is_sorted(totals in proptest::collection::vec(0i64..20, 0..30)) {
            let rows: Vec<ScoreRow> =
                totals.iter().enumerate().rev().map(|(w, &t)| row(w, t)).collect();
            let board =
                RankFinalizer::finalize(LeaderboardKind::Productivity, vec!["Total".into()], rows);
            prop_assert_eq!(board.len(), totals.len());
            for (i, pair) in board.entries().windows(2).enumerate() {
                let (a, b) = (&pair[0], &pair[1]);
                prop_assert!(
                    a.total_points > b.total_points
                        || (a.total_points == b.total_points && a.worker < b.worker)
                );
                prop_assert_eq!(a.position, i + 1);
            }
        }
    }
}
