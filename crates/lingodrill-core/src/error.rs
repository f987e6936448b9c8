//! Quiz error types.
//!
//! Returned by the quiz engines when an input does not fit the current
//! state. None of these are fatal: the engine is left unchanged and the
//! caller can show the message and carry on.

use thiserror::Error;

/// Errors raised by quiz state machines and drills.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    /// The run is over (finished or game over).
    #[error("the quiz is already over")]
    Finished,

    /// An answer was given while no question is waiting for one.
    #[error("no question is waiting for an answer")]
    NotPresenting,

    /// A flashcard was graded before it was turned over.
    #[error("the card has not been turned over yet")]
    NotRevealed,

    /// Submitting an incomplete test without the learner's confirmation.
    #[error("{unanswered} question(s) are still unanswered")]
    Unanswered { unanswered: usize },

    /// A drill that can only be checked once was checked again.
    #[error("this exercise has already been checked")]
    AlreadyChecked,

    /// The test has no questions to present.
    #[error("the test has no questions")]
    EmptyTest,
}
