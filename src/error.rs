//! Error taxonomy shared by every action.
//!
//! Solver outcomes other than optimal are not errors: they travel as
//! [`SolverStatus`](crate::lp::SolverStatus) values.

use thiserror::Error;

/// Errors raised by dataset ingestion, optimization and leaderboard actions.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AssignError {
    /// Invalid input rejected before any model is built.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// The action requires state that is absent or stale.
    #[error("precondition not met: {0}")]
    Precondition(String),

    /// A constraint family does not have the size the formulation guarantees.
    #[error("decoder contract violated: expected {expected} {family} constraints, found {actual}")]
    DecoderContract {
        family: &'static str,
        expected: usize,
        actual: usize,
    },

    /// The solver backend failed in a way that is not a status.
    #[error("solver failure: {0}")]
    Solver(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AssignError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_actionable() {
        let err = AssignError::Configuration("task name `a 1` contains digits".into());
        assert_eq!(
            err.to_string(),
            "invalid configuration: task name `a 1` contains digits"
        );

        let err = AssignError::DecoderContract {
            family: "capacity",
            expected: 3,
            actual: 2,
        };
        assert_eq!(
            err.to_string(),
            "decoder contract violated: expected 3 capacity constraints, found 2"
        );
    }
}
