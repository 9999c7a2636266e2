//! Engine error types.
//!
//! Every variant is a validation error: the caller passed input the engine
//! refuses. None of them are fatal, and the engine's state is left exactly
//! as it was before the failing call. "Nothing to do" outcomes (no active
//! attempt to end, no history entry) are expressed as `Option` instead.

use thiserror::Error;
use uuid::Uuid;

/// Errors raised by question construction and answer submission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    /// The correct option index does not point at one of the options.
    #[error("correct option index {index} is out of bounds for {len} option(s)")]
    CorrectIndexOutOfBounds { index: usize, len: usize },

    /// An attempt was constructed with no questions.
    #[error("a quiz attempt must have at least one question")]
    EmptyAttempt,

    /// The attempt has already been completed or ended.
    #[error("quiz attempt is already completed")]
    AttemptCompleted,

    /// Every question in the attempt has been answered.
    #[error("no more questions in this quiz attempt")]
    NoCurrentQuestion,

    /// The answer references a question other than the current one.
    #[error("question id mismatch: expected {expected}, got {got}")]
    QuestionMismatch { expected: Uuid, got: Uuid },

    /// The chosen option does not exist on the current question.
    #[error("chosen option index {index} is out of bounds for {len} option(s)")]
    ChosenIndexOutOfBounds { index: usize, len: usize },

    /// The player has no quiz in progress.
    #[error("no active quiz for player '{player}'")]
    NoActiveAttempt { player: String },
}

impl QuizError {
    /// Returns `true` if the error came from answering a question out of turn
    /// rather than from a malformed value.
    pub fn is_sequence_error(&self) -> bool {
        matches!(
            self,
            QuizError::AttemptCompleted
                | QuizError::NoCurrentQuestion
                | QuizError::QuestionMismatch { .. }
                | QuizError::NoActiveAttempt { .. }
        )
    }
}

/// Result alias for engine operations.
pub type Result<T> = std::result::Result<T, QuizError>;
