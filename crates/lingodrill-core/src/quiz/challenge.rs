//! Challenge mode: shrinking per-question timer, rising multiplier, three
//! strikes and the run is over.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::QuizError;
use crate::grader::{self, percentage};
use crate::model::TestQuestion;
use crate::timer::{secs, Clock, PendingTimer, TimerSlot, TimerToken};

use super::{AnswerOutcome, Phase, QuizEngine, QuizOutcome, QuizRunState};

const START_LIMIT_SECS: f64 = 30.0;
const CORRECT_STEP_SECS: f64 = 1.0;
const CORRECT_FLOOR_SECS: f64 = 10.0;
const WRONG_STEP_SECS: f64 = 2.0;
const WRONG_FLOOR_SECS: f64 = 5.0;
const DIFFICULTY_STEP: f64 = 0.5;
pub const MAX_STRIKES: u32 = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChallengeResult {
    /// Sum of the multiplier at each correct answer.
    pub score: f64,
    /// Questions answered, timeouts included.
    pub total: usize,
    pub correct: usize,
    pub incorrect: usize,
    pub game_over: bool,
}

impl ChallengeResult {
    pub fn percent(&self) -> u32 {
        percentage(self.correct, self.total)
    }
}

pub struct ChallengeQuiz {
    questions: Vec<TestQuestion>,
    index: usize,
    timer: TimerSlot,
    clock: Arc<dyn Clock>,
    time_limit: f64,
    difficulty: f64,
    score: f64,
    wrong_count: u32,
    correct: usize,
    answered: usize,
    phase: Phase,
}

impl ChallengeQuiz {
    pub fn new(questions: Vec<TestQuestion>, clock: Arc<dyn Clock>) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::EmptyTest);
        }
        let mut quiz = Self {
            questions,
            index: 0,
            timer: TimerSlot::new(),
            clock,
            time_limit: START_LIMIT_SECS,
            difficulty: 1.0,
            score: 0.0,
            wrong_count: 0,
            correct: 0,
            answered: 0,
            phase: Phase::Presenting,
        };
        quiz.arm();
        Ok(quiz)
    }

    /// Seconds the current question was given.
    pub fn time_limit(&self) -> f64 {
        self.time_limit
    }

    fn arm(&mut self) {
        self.timer.arm(self.clock.now(), secs(self.time_limit));
    }

    fn record(&mut self, answer: &str, timed_out: bool) -> AnswerOutcome {
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
            outcome.points = self.difficulty;
            self.score += self.difficulty;
            self.difficulty += DIFFICULTY_STEP;
            self.correct += 1;
            self.time_limit = (self.time_limit - CORRECT_STEP_SECS).max(CORRECT_FLOOR_SECS);
        } else {
            self.wrong_count += 1;
            self.time_limit = (self.time_limit - WRONG_STEP_SECS).max(WRONG_FLOOR_SECS);
        }

        if self.wrong_count >= MAX_STRIKES {
            self.timer.cancel();
            self.phase = Phase::GameOver;
            info!(score = self.score, answered = self.answered, "challenge game over");
        } else if self.index + 1 >= self.questions.len() {
            self.timer.cancel();
            self.phase = Phase::Finished;
            info!(score = self.score, answered = self.answered, "challenge completed");
        } else {
            self.index += 1;
            self.arm();
            debug!(index = self.index, limit = self.time_limit, "next challenge question");
        }
        outcome
    }
}

impl QuizEngine for ChallengeQuiz {
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
        state.score = self.score;
        state.wrong_count = self.wrong_count;
        state.difficulty = self.difficulty;
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
        Some(QuizOutcome::Challenge(ChallengeResult {
            score: self.score,
            total: self.answered,
            correct: self.correct,
            incorrect: self.answered - self.correct,
            game_over: self.phase == Phase::GameOver,
        }))
    }

    fn abandon(&mut self) {
        self.timer.cancel();
        if !self.phase.is_terminal() {
            self.phase = Phase::Finished;
        }
    }
}
