//! Leaderboard data types.

use std::fmt;

/// The three leaderboards built from one optimization run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LeaderboardKind {
    /// Points earned from the optimized task allocation.
    Productivity,
    /// Randomized qualitative factors.
    Qualitative,
    /// Weighted blend of productivity and qualitative totals.
    Combined,
}

impl LeaderboardKind {
    pub fn as_str(self) -> &'static str {
        match self {
            LeaderboardKind::Productivity => "Productivity",
            LeaderboardKind::Qualitative => "Qualitative",
            LeaderboardKind::Combined => "Combined",
        }
    }
}

impl fmt::Display for LeaderboardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unranked score row of one worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreRow {
    /// Worker index.
    pub worker: usize,
    /// Points per category, parallel to the leaderboard's columns.
    pub points: Vec<i64>,
    /// Total points.
    pub total_points: i64,
}

/// One ranked row of a leaderboard.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LeaderboardEntry {
    /// 1-based position.
    pub position: usize,
    /// Ordinal label of the position ("1st", "2nd", ...).
    pub placement: String,
    /// Worker index.
    pub worker: usize,
    /// Points per category, parallel to [`Leaderboard::columns`].
    pub points: Vec<i64>,
    /// Total points.
    pub total_points: i64,
}

impl LeaderboardEntry {
    /// 1-based player number shown to users.
    pub fn player(&self) -> usize {
        self.worker + 1
    }
}

/// Rank-ordered leaderboard. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Leaderboard {
    kind: LeaderboardKind,
    columns: Vec<String>,
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub(crate) fn new(
        kind: LeaderboardKind,
        columns: Vec<String>,
        entries: Vec<LeaderboardEntry>,
    ) -> Self {
        Self {
            kind,
            columns,
            entries,
        }
    }

    /// Which leaderboard this is.
    pub fn kind(&self) -> LeaderboardKind {
        self.kind
    }

    /// Category names of the point breakdown.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Entries in rank order.
    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    /// Number of ranked workers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry of `worker`, if ranked.
    pub fn entry_for(&self, worker: usize) -> Option<&LeaderboardEntry> {
        self.entries.iter().find(|e| e.worker == worker)
    }

    /// Total points of `worker`, or 0 when not ranked.
    pub fn total_for(&self, worker: usize) -> i64 {
        self.entry_for(worker).map_or(0, |e| e.total_points)
    }

    /// Points of `worker` in the named category.
    pub fn points_for(&self, worker: usize, column: &str) -> Option<i64> {
        let c = self.columns.iter().position(|name| name == column)?;
        self.entry_for(worker).map(|e| e.points[c])
    }
}

/// The productivity, qualitative and combined leaderboards of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Leaderboards {
    pub productivity: Leaderboard,
    pub qualitative: Leaderboard,
    pub combined: Leaderboard,
}

impl Leaderboards {
    /// Leaderboard of the given kind.
    pub fn get(&self, kind: LeaderboardKind) -> &Leaderboard {
        match kind {
            LeaderboardKind::Productivity => &self.productivity,
            LeaderboardKind::Qualitative => &self.qualitative,
            LeaderboardKind::Combined => &self.combined,
        }
    }
}
