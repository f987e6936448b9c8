//! Session/result aggregation.
//!
//! [`SessionStats`] keeps the running counters shown while studying.
//! [`SessionTelemetry`] reports the same events to a [`SessionSink`]
//! without ever letting a reporting failure interrupt the learner.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::grader::percentage;
use crate::timer::Clock;
use crate::traits::{AnswerEvent, SessionSink};

/// Running counters for one study session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionStats {
    pub total: usize,
    pub correct: usize,
    pub incorrect: usize,
    /// Consecutive correct answers.
    pub streak: usize,
    pub best_streak: usize,
    started: Instant,
}

impl SessionStats {
    pub fn new(clock: &dyn Clock) -> Self {
        Self {
            total: 0,
            correct: 0,
            incorrect: 0,
            streak: 0,
            best_streak: 0,
            started: clock.now(),
        }
    }

    /// Count one answer.
    pub fn record(&mut self, correct: bool) {
        self.record_batch(1, usize::from(correct));
    }

    /// Count a batch of answers (e.g. a whole match board) in one update.
    /// The streak continues only if every item in the batch was correct.
    pub fn record_batch(&mut self, total: usize, correct: usize) {
        if total == 0 {
            return;
        }
        let correct = correct.min(total);
        self.total += total;
        self.correct += correct;
        self.incorrect += total - correct;
        if correct == total {
            self.streak += 1;
            self.best_streak = self.best_streak.max(self.streak);
        } else {
            self.streak = 0;
        }
    }

    /// Rounded percentage of correct answers, 0 before any answer.
    pub fn accuracy(&self) -> u32 {
        percentage(self.correct, self.total)
    }

    /// Time since the session started, computed from the start timestamp.
    pub fn elapsed(&self, clock: &dyn Clock) -> Duration {
        clock.now().saturating_duration_since(self.started)
    }

    /// Clear all counters and restart the clock.
    pub fn reset(&mut self, clock: &dyn Clock) {
        *self = Self::new(clock);
    }
}

/// Fire-and-forget session reporting.
///
/// Every call logs and swallows sink errors. Answers reported while no
/// session is open (creation failed or never happened) are skipped.
pub struct SessionTelemetry {
    sink: Arc<dyn SessionSink>,
    session_id: Option<String>,
}

impl SessionTelemetry {
    pub fn new(sink: Arc<dyn SessionSink>) -> Self {
        Self {
            sink,
            session_id: None,
        }
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    pub async fn start(&mut self, mode: &str) {
        match self.sink.create_session(mode).await {
            Ok(id) => {
                info!(session_id = %id, mode, "study session started");
                self.session_id = Some(id);
            }
            Err(e) => {
                warn!(mode, error = %e, "could not create study session");
                self.session_id = None;
            }
        }
    }

    pub async fn answer(
        &self,
        question_id: &str,
        question_type: &str,
        user_answer: &str,
        correct: bool,
    ) {
        let Some(session_id) = &self.session_id else {
            return;
        };
        let event = AnswerEvent {
            session_id: session_id.clone(),
            question_id: question_id.to_string(),
            question_type: question_type.to_string(),
            user_answer: user_answer.to_string(),
            correct,
        };
        if let Err(e) = self.sink.record_answer(&event).await {
            warn!(%session_id, question_id, error = %e, "could not record answer");
        }
    }

    /// Close the session. Later answers are skipped.
    pub async fn complete(&mut self) {
        let Some(session_id) = self.session_id.take() else {
            return;
        };
        match self.sink.complete_session(&session_id).await {
            Ok(()) => info!(%session_id, "study session completed"),
            Err(e) => warn!(%session_id, error = %e, "could not complete study session"),
        }
    }
}
