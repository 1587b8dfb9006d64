//! Error taxonomy for the quiz core.
//!
//! Recoverable, caller-facing conditions get their own variants here;
//! everything at the application edge (process spawning, config I/O)
//! flows through `anyhow` instead.

use thiserror::Error;

/// Errors surfaced by the session orchestrator.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuizError {
    /// The guess is unusable and the round is still open for another
    /// attempt.
    #[error("invalid guess: {reason}")]
    InvalidGuess {
        /// What was wrong with the guess
        reason: String,
    },

    /// A session operation was called in a state that does not allow
    /// it. Indicates a caller bug, not player input.
    #[error("session misuse: {reason}")]
    SessionMisuse {
        /// What the caller did wrong
        reason: String,
    },
}
