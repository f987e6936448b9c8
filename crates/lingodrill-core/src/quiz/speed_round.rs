//! Speed round: one vocabulary item at a time under a short deadline.
//!
//! The engine never picks the next item itself. The host loads one with
//! [`SpeedRound::load`] and is told about expired deadlines through the
//! `on_time_up` hook.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::QuizError;
use crate::generator::vocab_question;
use crate::grader::{self, percentage};
use crate::model::{TestQuestion, VocabItem};
use crate::timer::{Clock, PendingTimer, TimerSlot, TimerToken};

use super::{AnswerOutcome, Phase, QuizEngine, QuizOutcome, QuizRunState};

pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(2);

/// Called once per item whose deadline passes unanswered.
pub type TimeUpHook = Box<dyn FnMut(&AnswerOutcome) + Send>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeedRoundResult {
    pub total: usize,
    pub correct: usize,
    pub incorrect: usize,
    /// How many of the incorrect answers were timeouts.
    pub timeouts: usize,
}

impl SpeedRoundResult {
    pub fn percent(&self) -> u32 {
        percentage(self.correct, self.total)
    }
}

pub struct SpeedRound {
    deadline: Duration,
    clock: Arc<dyn Clock>,
    timer: TimerSlot,
    question: Option<TestQuestion>,
    checked: bool,
    finished: bool,
    on_time_up: Option<TimeUpHook>,
    tally: SpeedRoundResult,
}

impl fmt::Debug for SpeedRound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpeedRound")
            .field("deadline", &self.deadline)
            .field("question", &self.question)
            .field("checked", &self.checked)
            .field("finished", &self.finished)
            .field("tally", &self.tally)
            .finish()
    }
}

impl SpeedRound {
    pub fn new(deadline: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            deadline,
            clock,
            timer: TimerSlot::new(),
            question: None,
            checked: false,
            finished: false,
            on_time_up: None,
            tally: SpeedRoundResult::default(),
        }
    }

    pub fn with_time_up(mut self, hook: TimeUpHook) -> Self {
        self.on_time_up = Some(hook);
        self
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    /// Present the next item and restart the deadline.
    pub fn load(&mut self, vocab: &VocabItem) -> Result<(), QuizError> {
        if self.finished {
            return Err(QuizError::Finished);
        }
        self.question = Some(vocab_question(vocab));
        self.checked = false;
        self.timer.arm(self.clock.now(), self.deadline);
        debug!(id = %vocab.id, "speed round item loaded");
        Ok(())
    }

    pub fn tally(&self) -> &SpeedRoundResult {
        &self.tally
    }

    fn record(&mut self, answer: &str, timed_out: bool) -> Result<AnswerOutcome, QuizError> {
        let question = self.question.as_ref().ok_or(QuizError::NotPresenting)?;
        let correct = !timed_out && grader::answers_match(question, answer);
        let outcome = AnswerOutcome {
            question_id: question.id.clone(),
            answer: answer.trim().to_string(),
            correct,
            timed_out,
            correct_answer: question.correct_answer.clone(),
            points: if correct { 1.0 } else { 0.0 },
        };

        self.timer.cancel();
        self.checked = true;
        self.tally.total += 1;
        if correct {
            self.tally.correct += 1;
        } else {
            self.tally.incorrect += 1;
        }
        if timed_out {
            self.tally.timeouts += 1;
        }
        Ok(outcome)
    }
}

impl QuizEngine for SpeedRound {
    fn current(&self) -> Option<&TestQuestion> {
        if self.finished || self.checked {
            return None;
        }
        self.question.as_ref()
    }

    fn submit(&mut self, answer: &str) -> Result<AnswerOutcome, QuizError> {
        if self.finished {
            return Err(QuizError::Finished);
        }
        if self.checked {
            return Err(QuizError::AlreadyChecked);
        }
        self.record(answer, false)
    }

    fn on_timeout(&mut self, token: TimerToken) -> Option<AnswerOutcome> {
        if self.finished || self.checked || !self.timer.fire(token) {
            return None;
        }
        let outcome = self.record("", true).ok()?;
        if let Some(hook) = self.on_time_up.as_mut() {
            hook(&outcome);
        }
        Some(outcome)
    }

    fn pending_timer(&self) -> Option<PendingTimer> {
        self.timer.pending()
    }

    fn phase(&self) -> Phase {
        if self.finished {
            Phase::Finished
        } else if self.checked {
            Phase::Answered
        } else {
            Phase::Presenting
        }
    }

    fn snapshot(&self) -> QuizRunState {
        let mut state = QuizRunState::new(self.phase(), self.tally.total, self.tally.total);
        state.answered = self.tally.total;
        state.correct = self.tally.correct;
        state.incorrect = self.tally.incorrect;
        state.score = self.tally.correct as f64;
        state.time_limit_secs = Some(self.deadline.as_secs_f64());
        state.remaining_secs = self
            .timer
            .remaining(self.clock.now())
            .map(|d| d.as_secs_f64());
        state
    }

    fn outcome(&self) -> Option<QuizOutcome> {
        self.finished
            .then(|| QuizOutcome::SpeedRound(self.tally.clone()))
    }

    fn abandon(&mut self) {
        self.timer.cancel();
        self.finished = true;
    }
}
