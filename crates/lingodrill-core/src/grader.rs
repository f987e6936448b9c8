//! Grading engine.
//!
//! Pure functions over `(questions, answers)`: the same inputs always give
//! the same [`GradeResult`].

use serde::{Deserialize, Serialize};

use crate::model::{AnswerRecord, ReadingKind, SourceType, TestQuestion};

/// Correct/total for one question category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTally {
    pub total: usize,
    pub correct: usize,
}

impl CategoryTally {
    fn add(&mut self, correct: bool) {
        self.total += 1;
        if correct {
            self.correct += 1;
        }
    }

    /// Rounded percentage, 0 for an empty category.
    pub fn percent(&self) -> u32 {
        percentage(self.correct, self.total)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakdown {
    pub vocab: CategoryTally,
    pub sentence: CategoryTally,
    pub reading: CategoryTally,
}

impl Breakdown {
    fn tally_mut(&mut self, source: SourceType) -> &mut CategoryTally {
        match source {
            SourceType::Vocab => &mut self.vocab,
            SourceType::Sentence => &mut self.sentence,
            SourceType::Reading => &mut self.reading,
        }
    }
}

/// Outcome for a single question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionResult {
    pub id: String,
    pub source_type: SourceType,
    pub prompt_text: String,
    pub user_answer: String,
    pub correct_answer: String,
    pub correct: bool,
}

/// Graded test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeResult {
    /// Rounded percentage, 0..=100.
    pub score: u32,
    pub total: usize,
    pub correct: usize,
    pub incorrect: usize,
    pub breakdown: Breakdown,
    pub per_question: Vec<QuestionResult>,
}

impl GradeResult {
    /// Questions answered wrongly, in test order.
    pub fn misses(&self) -> impl Iterator<Item = &QuestionResult> {
        self.per_question.iter().filter(|r| !r.correct)
    }
}

/// `round(correct / total * 100)`, 0 when `total` is 0.
pub fn percentage(correct: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (correct as f64 / total as f64 * 100.0).round() as u32
}

fn same_exact(a: &str, b: &str) -> bool {
    a.trim() == b.trim()
}

fn same_ignoring_case(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

/// Whether `answer` is accepted for `question`.
///
/// Vocab answers are hanzi and compared exactly after trimming; sentence
/// translations ignore case; reading questions are exact when answered from
/// options and case-insensitive otherwise.
pub fn answers_match(question: &TestQuestion, answer: &str) -> bool {
    match question.source_type {
        SourceType::Vocab => same_exact(answer, &question.correct_answer),
        SourceType::Sentence => same_ignoring_case(answer, &question.correct_answer),
        SourceType::Reading if question.is_multiple_choice() => {
            same_exact(answer, &question.correct_answer)
        }
        SourceType::Reading => same_ignoring_case(answer, &question.correct_answer),
    }
}

/// Grade a composite test. Missing answers count as empty strings.
pub fn grade(questions: &[TestQuestion], answers: &AnswerRecord) -> GradeResult {
    let mut breakdown = Breakdown::default();

    let per_question: Vec<QuestionResult> = questions
        .iter()
        .map(|q| {
            let user_answer = answers.get(&q.id).cloned().unwrap_or_default();
            let correct = answers_match(q, &user_answer);
            breakdown.tally_mut(q.source_type).add(correct);
            QuestionResult {
                id: q.id.clone(),
                source_type: q.source_type,
                prompt_text: q.prompt_text.clone(),
                user_answer,
                correct_answer: q.correct_answer.clone(),
                correct,
            }
        })
        .collect();

    let total = per_question.len();
    let correct = per_question.iter().filter(|r| r.correct).count();

    GradeResult {
        score: percentage(correct, total),
        total,
        correct,
        incorrect: total - correct,
        breakdown,
        per_question,
    }
}

/// Grade one reading unit on the client: `mcq` questions match exactly,
/// everything else ignores case. Only the reading tally is populated.
pub fn grade_reading_unit(questions: &[TestQuestion], answers: &AnswerRecord) -> GradeResult {
    let mut breakdown = Breakdown::default();
    let per_question: Vec<QuestionResult> = questions
        .iter()
        .map(|q| {
            let user_answer = answers.get(&q.id).cloned().unwrap_or_default();
            let correct = if q.content_kind == Some(ReadingKind::Mcq) {
                same_exact(&user_answer, &q.correct_answer)
            } else {
                same_ignoring_case(&user_answer, &q.correct_answer)
            };
            breakdown.reading.add(correct);
            QuestionResult {
                id: q.id.clone(),
                source_type: SourceType::Reading,
                prompt_text: q.prompt_text.clone(),
                user_answer,
                correct_answer: q.correct_answer.clone(),
                correct,
            }
        })
        .collect();

    let total = per_question.len();
    let correct = breakdown.reading.correct;
    GradeResult {
        score: percentage(correct, total),
        total,
        correct,
        incorrect: total - correct,
        breakdown,
        per_question,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: &str, source_type: SourceType, correct: &str) -> TestQuestion {
        TestQuestion {
            id: id.into(),
            source_type,
            prompt_text: format!("prompt {id}"),
            pinyin_hint: None,
            options: None,
            correct_answer: correct.into(),
            render_content: None,
            content_kind: None,
        }
    }

    fn answers(pairs: &[(&str, &str)]) -> AnswerRecord {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn empty_test_scores_zero() {
        let result = grade(&[], &AnswerRecord::new());
        assert_eq!(result.score, 0);
        assert_eq!(result.total, 0);
        assert_eq!(result.correct, 0);
        assert_eq!(result.incorrect, 0);
        assert_eq!(result.breakdown, Breakdown::default());
    }

    #[test]
    fn vocab_trims_but_keeps_case() {
        let q = question("v1", SourceType::Vocab, "你好 ");
        assert!(answers_match(&q, "你好"));

        let latin = question("v2", SourceType::Vocab, "hello");
        assert!(!answers_match(&latin, "Hello"));
    }

    #[test]
    fn sentence_ignores_case() {
        let q = question("s1", SourceType::Sentence, "hello");
        assert!(answers_match(&q, " Hello"));
    }

    #[test]
    fn reading_case_rule_depends_on_options() {
        let mut q = question("r1", SourceType::Reading, "Đúng");
        assert!(answers_match(&q, "đúng"));

        q.options = Some(vec!["Đúng".into(), "Sai".into()]);
        assert!(!answers_match(&q, "đúng"));
        assert!(answers_match(&q, "Đúng "));
    }

    #[test]
    fn missing_answers_are_wrong_unless_expected_answer_is_empty() {
        let qs = vec![
            question("a", SourceType::Reading, "x"),
            question("b", SourceType::Reading, ""),
        ];
        let result = grade(&qs, &AnswerRecord::new());
        assert!(!result.per_question[0].correct);
        assert!(result.per_question[1].correct);
        assert_eq!(result.per_question[0].user_answer, "");
    }

    #[test]
    fn breakdown_and_score() {
        let qs = vec![
            question("v1", SourceType::Vocab, "猫"),
            question("v2", SourceType::Vocab, "狗"),
            question("s1", SourceType::Sentence, "tôi là sinh viên"),
            question("r1", SourceType::Reading, "A"),
        ];
        let given = answers(&[("v1", "猫"), ("v2", "鸟"), ("s1", "Tôi là sinh viên"), ("r1", "a")]);

        let result = grade(&qs, &given);

        assert_eq!(result.total, 4);
        assert_eq!(result.correct, 3);
        assert_eq!(result.incorrect, 1);
        assert_eq!(result.score, 75);
        assert_eq!(result.breakdown.vocab, CategoryTally { total: 2, correct: 1 });
        assert_eq!(result.breakdown.sentence, CategoryTally { total: 1, correct: 1 });
        assert_eq!(result.breakdown.reading.percent(), 100);
        assert_eq!(result.misses().map(|r| r.id.as_str()).collect::<Vec<_>>(), vec!["v2"]);
    }

    #[test]
    fn score_rounds_to_nearest_percent() {
        let qs: Vec<_> = (0..3)
            .map(|i| question(&format!("q{i}"), SourceType::Vocab, "是"))
            .collect();
        let result = grade(&qs, &answers(&[("q0", "是"), ("q1", "是")]));
        assert_eq!(result.score, 67);
    }

    #[test]
    fn grading_is_idempotent() {
        let qs = vec![
            question("v1", SourceType::Vocab, "水"),
            question("s1", SourceType::Sentence, "nước"),
        ];
        let given = answers(&[("v1", "水"), ("s1", "NƯỚC")]);
        assert_eq!(grade(&qs, &given), grade(&qs, &given));
    }

    #[test]
    fn correct_answer_fed_back_is_accepted_for_every_type() {
        let mut mc = question("r2", SourceType::Reading, "B");
        mc.options = Some(vec!["A".into(), "B".into()]);
        let qs = vec![
            question("v1", SourceType::Vocab, "学生"),
            question("s1", SourceType::Sentence, "Học sinh"),
            question("r1", SourceType::Reading, "Đọc"),
            mc,
        ];
        let given: AnswerRecord = qs
            .iter()
            .map(|q| (q.id.clone(), q.correct_answer.clone()))
            .collect();
        assert_eq!(grade(&qs, &given).score, 100);
    }

    #[test]
    fn reading_unit_uses_question_kind() {
        let mut mcq = question("r1", SourceType::Reading, "Hà Nội");
        mcq.content_kind = Some(ReadingKind::Mcq);
        let mut fill = question("r2", SourceType::Reading, "Bắc Kinh");
        fill.content_kind = Some(ReadingKind::Fill);

        let result = grade_reading_unit(&[mcq, fill], &answers(&[("r1", "hà nội"), ("r2", "bắc kinh")]));

        assert_eq!(result.correct, 1);
        assert_eq!(result.score, 50);
        assert_eq!(result.breakdown.reading.total, 2);
        assert_eq!(result.breakdown.vocab.total, 0);
    }
}
