//! Error types for the rule engine.

use derive_more::{Display, Error};

/// Failures the engine reports to its caller.
///
/// Rejected swaps are not errors: the controller ignores them or reports
/// them through [`crate::controller::GameObserver::on_invalid_swap`].
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum EngineError {
    /// A grid access fell outside the board.
    #[display("cell ({row}, {col}) is outside the board")]
    OutOfBounds {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
    },

    /// The initial fill kept producing matches or deadlocks until the retry cap ran out.
    #[display("no playable match-free board found after {attempts} attempts")]
    UnsatisfiableBoard {
        /// Number of full re-rolls tried.
        attempts: u32,
    },

    /// A `GameConfig` value is unusable.
    #[display("invalid configuration: {message}")]
    InvalidConfig {
        /// What was wrong.
        message: String,
    },

    /// A prepared board is not a settled, playable position.
    #[display("board is not at rest: {message}")]
    InvalidBoard {
        /// Which at-rest condition failed.
        message: String,
    },

    /// A text board could not be parsed.
    #[display("invalid board: {message}")]
    ParseBoard {
        /// What was wrong, with the offending row/column.
        message: String,
    },
}
