//! Interactive quiz state machines.
//!
//! Every engine walks a list of [`TestQuestion`]s and owns exactly one
//! [`TimerSlot`](crate::timer::TimerSlot). Moving to another question,
//! accepting an answer and terminating all cancel or re-arm that slot, so a
//! timeout can only ever land on the question it was armed for.

pub mod challenge;
pub mod paced;
pub mod speed_round;
pub mod time_attack;

use serde::{Deserialize, Serialize};

use crate::error::QuizError;
use crate::grader::GradeResult;
use crate::model::TestQuestion;
use crate::timer::{PendingTimer, TimerToken};

pub use challenge::{ChallengeQuiz, ChallengeResult};
pub use paced::PacedQuiz;
pub use speed_round::{SpeedRound, SpeedRoundResult};
pub use time_attack::{TimeAttackQuiz, TimeAttackResult};

/// Where a quiz is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// A question is shown and waiting for an answer.
    Presenting,
    /// The current question has been answered.
    Answered,
    /// Ran to the end (or the session timer expired).
    Finished,
    /// Too many strikes.
    GameOver,
}

impl Phase {
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Finished | Phase::GameOver)
    }
}

/// Whether the learner confirmed submitting a test with blanks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitConfirmation {
    Confirmed,
    Unconfirmed,
}

/// Result of one accepted answer or timeout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerOutcome {
    pub question_id: String,
    pub answer: String,
    pub correct: bool,
    pub timed_out: bool,
    pub correct_answer: String,
    /// Points this answer added to the running score.
    pub points: f64,
}

/// Read-only view of a running quiz for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizRunState {
    pub phase: Phase,
    /// Zero-based position of the current question.
    pub index: usize,
    pub total_questions: usize,
    pub answered: usize,
    pub correct: usize,
    pub incorrect: usize,
    pub score: f64,
    /// Consecutive correct answers (time-attack).
    pub combo: u32,
    /// Strikes so far (challenge).
    pub wrong_count: u32,
    /// Score multiplier (challenge).
    pub difficulty: f64,
    /// Limit the current question was armed with, in seconds.
    pub time_limit_secs: Option<f64>,
    /// Seconds left on the armed timer.
    pub remaining_secs: Option<f64>,
}

impl QuizRunState {
    pub(crate) fn new(phase: Phase, index: usize, total_questions: usize) -> Self {
        Self {
            phase,
            index,
            total_questions,
            answered: 0,
            correct: 0,
            incorrect: 0,
            score: 0.0,
            combo: 0,
            wrong_count: 0,
            difficulty: 1.0,
            time_limit_secs: None,
            remaining_secs: None,
        }
    }
}

/// Final result of a quiz, one variant per engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum QuizOutcome {
    Paced(GradeResult),
    Challenge(ChallengeResult),
    TimeAttack(TimeAttackResult),
    SpeedRound(SpeedRoundResult),
}

/// Common interface of the quiz state machines.
///
/// Engines that move on by themselves after every answer keep the default
/// `advance` and `back`. The default `finish` ends the run where it stands.
pub trait QuizEngine: Send {
    /// Question waiting for an answer, if any.
    fn current(&self) -> Option<&TestQuestion>;

    /// Answer the current question.
    fn submit(&mut self, answer: &str) -> Result<AnswerOutcome, QuizError>;

    /// Deliver a timeout. Stale tokens are ignored and yield `None`.
    fn on_timeout(&mut self, token: TimerToken) -> Option<AnswerOutcome>;

    /// The one armed timer, if any.
    fn pending_timer(&self) -> Option<PendingTimer>;

    fn phase(&self) -> Phase;

    fn snapshot(&self) -> QuizRunState;

    /// Final result once the phase is terminal.
    fn outcome(&self) -> Option<QuizOutcome>;

    /// Tear down: cancel the timer and stop accepting input.
    fn abandon(&mut self);

    fn advance(&mut self) -> Result<(), QuizError> {
        if self.phase().is_terminal() {
            return Err(QuizError::Finished);
        }
        Ok(())
    }

    fn back(&mut self) -> Result<(), QuizError> {
        if self.phase().is_terminal() {
            return Err(QuizError::Finished);
        }
        Ok(())
    }

    fn finish(&mut self, _confirmation: SubmitConfirmation) -> Result<(), QuizError> {
        if self.phase().is_terminal() {
            return Err(QuizError::Finished);
        }
        self.abandon();
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::model::{SourceType, TestQuestion};

    pub fn question(id: &str, correct: &str) -> TestQuestion {
        TestQuestion {
            id: id.into(),
            source_type: SourceType::Vocab,
            prompt_text: format!("meaning of {id}"),
            pinyin_hint: None,
            options: None,
            correct_answer: correct.into(),
            render_content: None,
            content_kind: None,
        }
    }

    /// `n` vocab questions whose answers are `a0`, `a1`, ...
    pub fn questions(n: usize) -> Vec<TestQuestion> {
        (0..n)
            .map(|i| question(&format!("q{i}"), &format!("a{i}")))
            .collect()
    }
}
