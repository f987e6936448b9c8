//! Standard paced quiz: free navigation under one session-wide countdown.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::error::QuizError;
use crate::grader::{self, GradeResult};
use crate::model::{AnswerRecord, TestQuestion};
use crate::timer::{Clock, PendingTimer, TimerSlot, TimerToken};

use super::{AnswerOutcome, Phase, QuizEngine, QuizOutcome, QuizRunState, SubmitConfirmation};

/// Session length used by the timed exam modes.
pub const DEFAULT_SESSION: Duration = Duration::from_secs(20 * 60);

/// A timed test the learner can move back and forth through.
///
/// The session timer is armed once when the quiz starts. When it expires
/// the test is graded as it stands, whatever is still blank.
pub struct PacedQuiz {
    questions: Vec<TestQuestion>,
    answers: AnswerRecord,
    index: usize,
    timer: TimerSlot,
    clock: Arc<dyn Clock>,
    result: Option<GradeResult>,
}

impl PacedQuiz {
    pub fn new(
        questions: Vec<TestQuestion>,
        session: Duration,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::EmptyTest);
        }
        let mut timer = TimerSlot::new();
        timer.arm(clock.now(), session);
        Ok(Self {
            questions,
            answers: AnswerRecord::new(),
            index: 0,
            timer,
            clock,
            result: None,
        })
    }

    pub fn answers(&self) -> &AnswerRecord {
        &self.answers
    }

    pub fn questions(&self) -> &[TestQuestion] {
        &self.questions
    }

    /// Number of questions without a non-blank answer.
    pub fn unanswered(&self) -> usize {
        self.questions
            .iter()
            .filter(|q| {
                self.answers
                    .get(&q.id)
                    .map_or(true, |a| a.trim().is_empty())
            })
            .count()
    }

    fn grade_now(&mut self) {
        self.timer.cancel();
        let result = grader::grade(&self.questions, &self.answers);
        info!(
            score = result.score,
            correct = result.correct,
            total = result.total,
            "paced test graded"
        );
        self.result = Some(result);
    }

    fn ensure_running(&self) -> Result<(), QuizError> {
        if self.result.is_some() {
            Err(QuizError::Finished)
        } else {
            Ok(())
        }
    }
}

impl QuizEngine for PacedQuiz {
    fn current(&self) -> Option<&TestQuestion> {
        if self.result.is_some() {
            return None;
        }
        self.questions.get(self.index)
    }

    /// Record (or overwrite) the answer to the current question. Whether it
    /// was right is reported, but nothing is scored until the test is graded.
    fn submit(&mut self, answer: &str) -> Result<AnswerOutcome, QuizError> {
        self.ensure_running()?;
        let question = &self.questions[self.index];
        let correct = grader::answers_match(question, answer);
        let outcome = AnswerOutcome {
            question_id: question.id.clone(),
            answer: answer.to_string(),
            correct,
            timed_out: false,
            correct_answer: question.correct_answer.clone(),
            points: 0.0,
        };
        self.answers.insert(question.id.clone(), answer.to_string());
        Ok(outcome)
    }

    fn on_timeout(&mut self, token: TimerToken) -> Option<AnswerOutcome> {
        if self.result.is_none() && self.timer.fire(token) {
            info!(unanswered = self.unanswered(), "session time is up");
            self.grade_now();
        }
        None
    }

    fn pending_timer(&self) -> Option<PendingTimer> {
        self.timer.pending()
    }

    fn phase(&self) -> Phase {
        if self.result.is_some() {
            return Phase::Finished;
        }
        let answered = self
            .answers
            .get(&self.questions[self.index].id)
            .is_some_and(|a| !a.trim().is_empty());
        if answered {
            Phase::Answered
        } else {
            Phase::Presenting
        }
    }

    fn snapshot(&self) -> QuizRunState {
        let mut state = QuizRunState::new(self.phase(), self.index, self.questions.len());
        state.answered = self.questions.len() - self.unanswered();
        if let Some(result) = &self.result {
            state.correct = result.correct;
            state.incorrect = result.incorrect;
            state.score = f64::from(result.score);
        }
        let remaining = self.timer.remaining(self.clock.now());
        state.remaining_secs = remaining.map(|d| d.as_secs_f64());
        state
    }

    fn outcome(&self) -> Option<QuizOutcome> {
        self.result.clone().map(QuizOutcome::Paced)
    }

    fn abandon(&mut self) {
        if self.result.is_none() {
            self.grade_now();
        }
    }

    /// Move to the next question. On the last question this stays put;
    /// the test ends through [`QuizEngine::finish`] or the session timer.
    fn advance(&mut self) -> Result<(), QuizError> {
        self.ensure_running()?;
        if self.index + 1 < self.questions.len() {
            self.index += 1;
        }
        Ok(())
    }

    fn back(&mut self) -> Result<(), QuizError> {
        self.ensure_running()?;
        self.index = self.index.saturating_sub(1);
        Ok(())
    }

    /// Submit the whole test. Blanks need the learner's confirmation.
    fn finish(&mut self, confirmation: SubmitConfirmation) -> Result<(), QuizError> {
        self.ensure_running()?;
        let unanswered = self.unanswered();
        if unanswered > 0 && confirmation == SubmitConfirmation::Unconfirmed {
            return Err(QuizError::Unanswered { unanswered });
        }
        self.grade_now();
        Ok(())
    }
}
