//! Random reading test: one unit, a handful of its questions, graded on the
//! client once every question has an answer.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::QuizError;
use crate::generator::reading_question;
use crate::grader::{grade_reading_unit, GradeResult};
use crate::model::{AnswerRecord, ReadingQuestion, ReadingUnit, TestQuestion};

pub const QUESTIONS_PER_TEST: usize = 5;

/// Pick the unit to test.
pub fn pick_unit<'a, R: Rng + ?Sized>(units: &'a [ReadingUnit], rng: &mut R) -> Option<&'a ReadingUnit> {
    units.choose(rng)
}

#[derive(Debug, Clone)]
pub struct RandomReadingTest {
    unit: ReadingUnit,
    questions: Vec<TestQuestion>,
    answers: AnswerRecord,
    index: usize,
    result: Option<GradeResult>,
}

impl RandomReadingTest {
    /// Build from a unit and its questions, keeping at most
    /// [`QUESTIONS_PER_TEST`] of them.
    pub fn new(unit: ReadingUnit, questions: &[ReadingQuestion]) -> Result<Self, QuizError> {
        let questions: Vec<TestQuestion> = questions
            .iter()
            .take(QUESTIONS_PER_TEST)
            .map(|rq| {
                let mut rq = rq.clone();
                if rq.unit.is_none() {
                    rq.unit = Some(unit.clone());
                }
                reading_question(&rq)
            })
            .collect();
        if questions.is_empty() {
            return Err(QuizError::EmptyTest);
        }
        Ok(Self {
            unit,
            questions,
            answers: AnswerRecord::new(),
            index: 0,
            result: None,
        })
    }

    pub fn unit(&self) -> &ReadingUnit {
        &self.unit
    }

    pub fn questions(&self) -> &[TestQuestion] {
        &self.questions
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Option<&TestQuestion> {
        if self.result.is_some() {
            return None;
        }
        self.questions.get(self.index)
    }

    pub fn answer(&mut self, answer: &str) -> Result<(), QuizError> {
        let question = self.current().ok_or(QuizError::Finished)?;
        let id = question.id.clone();
        self.answers.insert(id, answer.to_string());
        Ok(())
    }

    pub fn advance(&mut self) {
        if self.index + 1 < self.questions.len() {
            self.index += 1;
        }
    }

    pub fn back(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    /// Grade the test. Every question must have an answer first.
    pub fn submit(&mut self) -> Result<&GradeResult, QuizError> {
        if self.result.is_some() {
            return Err(QuizError::Finished);
        }
        let unanswered = self
            .questions
            .iter()
            .filter(|q| !self.answers.contains_key(&q.id))
            .count();
        if unanswered > 0 {
            return Err(QuizError::Unanswered { unanswered });
        }
        Ok(self
            .result
            .insert(grade_reading_unit(&self.questions, &self.answers)))
    }

    pub fn result(&self) -> Option<&GradeResult> {
        self.result.as_ref()
    }
}
