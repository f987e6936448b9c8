//! Streak drill: typing until the first mistake.

use crate::error::QuizError;
use crate::model::VocabItem;

use super::check_typing;

/// A run of typed answers that ends on the first wrong one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreakRun {
    streak: usize,
    broken: bool,
}

impl StreakRun {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check a typed answer. A wrong answer ends the run; answering after
    /// that is refused.
    pub fn answer(&mut self, vocab: &VocabItem, answer: &str) -> Result<bool, QuizError> {
        if self.broken {
            return Err(QuizError::Finished);
        }
        let correct = check_typing(vocab, answer);
        if correct {
            self.streak += 1;
        } else {
            self.broken = true;
        }
        Ok(correct)
    }

    /// Correct answers in a row so far.
    pub fn streak(&self) -> usize {
        self.streak
    }

    pub fn is_broken(&self) -> bool {
        self.broken
    }

    /// Start over after a broken run.
    pub fn restart(&mut self) {
        *self = Self::default();
    }
}
