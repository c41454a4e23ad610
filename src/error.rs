//! Error types for the puzzle library.

use thiserror::Error;

/// Errors raised while building boards, parsing input, or running a bounded search.
#[derive(Debug, Error)]
pub enum PuzzleError {
    /// The tiles handed to a constructor do not describe a valid square board.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Text input could not be read as a board.
    #[error("parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Reading a board file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The search expanded more nodes than `SolveOptions::expansion_limit` allows.
    #[error("search stopped after expanding {expanded} nodes")]
    ExpansionLimit { expanded: u64 },

    /// The cancellation flag in `SolveOptions` was raised.
    #[error("search was cancelled")]
    Cancelled,
}

/// Result type alias for puzzle operations.
pub type Result<T> = std::result::Result<T, PuzzleError>;
