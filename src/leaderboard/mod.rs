//! Gamified leaderboards.
//!
//! Converts an optimized allocation into ranked point totals:
//!
//! - **Productivity**: every task distributes `points_per_star * difficulty`
//!   points among the workers allocated to it. Workers are ranked by unit
//!   processing time (fastest first) and rank `i` receives `round(points / i)`.
//! - **Qualitative**: randomized "self-assessment deviation" and
//!   "engagement" scores, independent of the solution.
//! - **Combined**: `round(productivity * w + qualitative * (1 - w))`.
//!
//! All three go through [`RankFinalizer`]: total points descending, worker
//! index ascending on ties, ordinal placement labels.

mod config;
mod engine;
mod rank;
mod types;

pub use config::ScoringConfig;
pub use engine::{rank_points, LeaderboardEngine, COMBINED_COLUMNS, QUALITATIVE_FACTORS};
pub use rank::{ordinal, rank_indices, RankFinalizer, RankRule};
pub use types::{Leaderboard, LeaderboardEntry, LeaderboardKind, Leaderboards, ScoreRow};
