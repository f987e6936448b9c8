//! Time-attack mode: answer fast, build a combo, no strike limit.

use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::QuizError;
use crate::grader::{self, percentage};
use crate::model::TestQuestion;
use crate::timer::{secs, Clock, PendingTimer, TimerSlot, TimerToken};

use super::{AnswerOutcome, Phase, QuizEngine, QuizOutcome, QuizRunState};

const START_LIMIT_SECS: f64 = 15.0;
const LIMIT_STEP_SECS: f64 = 0.5;
const LIMIT_FLOOR_SECS: f64 = 5.0;
const BASE_POINTS: u32 = 10;
const COMBO_POINTS: u32 = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeAttackResult {
    pub score: u32,
    pub total: usize,
    pub correct: usize,
    pub incorrect: usize,
    /// Wall-clock duration of the whole run.
    pub time_secs: f64,
}

impl TimeAttackResult {
    pub fn percent(&self) -> u32 {
        percentage(self.correct, self.total)
    }
}

/// Points for a correct answer: base, speed bonus and combo bonus. `combo`
/// already includes this answer.
pub fn answer_points(time_limit: f64, time_taken: f64, combo: u32) -> u32 {
    let speed = ((time_limit - time_taken).floor() as i64).max(1) as u32;
    BASE_POINTS + speed + combo * COMBO_POINTS
}

pub struct TimeAttackQuiz {
    questions: Vec<TestQuestion>,
    index: usize,
    timer: TimerSlot,
    clock: Arc<dyn Clock>,
    time_limit: f64,
    started: Instant,
    question_started: Instant,
    ended: Option<Instant>,
    combo: u32,
    score: u32,
    correct: usize,
    answered: usize,
    phase: Phase,
}

impl TimeAttackQuiz {
    pub fn new(questions: Vec<TestQuestion>, clock: Arc<dyn Clock>) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::EmptyTest);
        }
        let now = clock.now();
        let mut quiz = Self {
            questions,
            index: 0,
            timer: TimerSlot::new(),
            clock,
            time_limit: START_LIMIT_SECS,
            started: now,
            question_started: now,
            ended: None,
            combo: 0,
            score: 0,
            correct: 0,
            answered: 0,
            phase: Phase::Presenting,
        };
        quiz.arm();
        Ok(quiz)
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn time_limit(&self) -> f64 {
        self.time_limit
    }

    fn arm(&mut self) {
        self.question_started = self.clock.now();
        self.timer.arm(self.question_started, secs(self.time_limit));
    }

    fn end(&mut self) {
        self.timer.cancel();
        self.ended = Some(self.clock.now());
        self.phase = Phase::Finished;
    }

    fn record(&mut self, answer: &str, timed_out: bool) -> AnswerOutcome {
        let now = self.clock.now();
        let taken = now.duration_since(self.question_started).as_secs_f64();
        let question = &self.questions[self.index];
        let correct = !timed_out && grader::answers_match(question, answer);
        let mut outcome = AnswerOutcome {
            question_id: question.id.clone(),
            answer: answer.to_string(),
            correct,
            timed_out,
            correct_answer: question.correct_answer.clone(),
            points: 0.0,
        };

        self.answered += 1;
        if correct {
            self.combo += 1;
            let points = answer_points(self.time_limit, taken, self.combo);
            self.score += points;
            outcome.points = f64::from(points);
            self.correct += 1;
            self.time_limit = (self.time_limit - LIMIT_STEP_SECS).max(LIMIT_FLOOR_SECS);
        } else {
            self.combo = 0;
        }

        if self.index + 1 >= self.questions.len() {
            self.end();
            info!(score = self.score, correct = self.correct, "time attack completed");
        } else {
            self.index += 1;
            self.arm();
        }
        outcome
    }

    fn elapsed_secs(&self) -> f64 {
        let end = self.ended.unwrap_or_else(|| self.clock.now());
        end.duration_since(self.started).as_secs_f64()
    }
}

impl QuizEngine for TimeAttackQuiz {
    fn current(&self) -> Option<&TestQuestion> {
        if self.phase.is_terminal() {
            return None;
        }
        self.questions.get(self.index)
    }

    fn submit(&mut self, answer: &str) -> Result<AnswerOutcome, QuizError> {
        if self.phase.is_terminal() {
            return Err(QuizError::Finished);
        }
        Ok(self.record(answer, false))
    }

    fn on_timeout(&mut self, token: TimerToken) -> Option<AnswerOutcome> {
        if self.phase.is_terminal() || !self.timer.fire(token) {
            return None;
        }
        Some(self.record("", true))
    }

    fn pending_timer(&self) -> Option<PendingTimer> {
        self.timer.pending()
    }

    fn phase(&self) -> Phase {
        self.phase
    }

    fn snapshot(&self) -> QuizRunState {
        let mut state = QuizRunState::new(self.phase, self.index, self.questions.len());
        state.answered = self.answered;
        state.correct = self.correct;
        state.incorrect = self.answered - self.correct;
        state.score = f64::from(self.score);
        state.combo = self.combo;
        state.time_limit_secs = Some(self.time_limit);
        state.remaining_secs = self
            .timer
            .remaining(self.clock.now())
            .map(|d| d.as_secs_f64());
        state
    }

    fn outcome(&self) -> Option<QuizOutcome> {
        if !self.phase.is_terminal() {
            return None;
        }
        Some(QuizOutcome::TimeAttack(TimeAttackResult {
            score: self.score,
            total: self.answered,
            correct: self.correct,
            incorrect: self.answered - self.correct,
            time_secs: self.elapsed_secs(),
        }))
    }

    fn abandon(&mut self) {
        if self.phase.is_terminal() {
            self.timer.cancel();
        } else {
            self.end();
        }
    }
}
