//! Generated tests saved to disk between `generate`, `take` and `grade`.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use lingodrill_core::error::QuizError;
use lingodrill_core::grader::{grade, grade_reading_unit, GradeResult};
use lingodrill_core::mode::TestMode;
use lingodrill_core::model::{AnswerRecord, ReadingQuestion, ReadingUnit, TestQuestion};
use lingodrill_core::reading::{RandomReadingTest, QUESTIONS_PER_TEST};

/// The unit and raw questions a random reading test was built from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadingSource {
    pub unit: ReadingUnit,
    pub questions: Vec<ReadingQuestion>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedTest {
    pub id: Uuid,
    pub mode: TestMode,
    pub created_at: DateTime<Utc>,
    pub questions: Vec<TestQuestion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reading: Option<ReadingSource>,
}

impl GeneratedTest {
    pub fn new(mode: TestMode, questions: Vec<TestQuestion>) -> Self {
        Self {
            id: Uuid::new_v4(),
            mode,
            created_at: Utc::now(),
            questions,
            reading: None,
        }
    }

    /// A random reading test over one unit.
    pub fn random_reading(unit: ReadingUnit, questions: Vec<ReadingQuestion>) -> Result<Self> {
        let questions: Vec<ReadingQuestion> =
            questions.into_iter().take(QUESTIONS_PER_TEST).collect();
        let test = RandomReadingTest::new(unit.clone(), &questions)?;
        let mut generated = Self::new(TestMode::RandomReading, test.questions().to_vec());
        generated.reading = Some(ReadingSource { unit, questions });
        Ok(generated)
    }

    /// Rebuild the interactive reading test, for random reading tests.
    pub fn reading_test(&self) -> Option<Result<RandomReadingTest, QuizError>> {
        self.reading
            .as_ref()
            .map(|source| RandomReadingTest::new(source.unit.clone(), &source.questions))
    }

    /// Grade answers the way this test's mode grades them.
    pub fn grade(&self, answers: &AnswerRecord) -> GradeResult {
        match self.mode {
            TestMode::RandomReading => grade_reading_unit(&self.questions, answers),
            _ => grade(&self.questions, answers),
        }
    }

    /// Save the test as JSON.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize test")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write test to {}", path.display()))?;
        Ok(())
    }

    /// Load a test from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read test from {}", path.display()))?;
        let test: GeneratedTest =
            serde_json::from_str(&content).context("failed to parse test JSON")?;
        Ok(test)
    }
}

/// Load an answer sheet: a JSON object of question id to answer.
pub fn load_answers(path: &Path) -> Result<AnswerRecord> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read answers from {}", path.display()))?;
    serde_json::from_str(&content).context("failed to parse answers JSON (expected {\"id\": \"answer\"})")
}
