//! Weighted test generator.
//!
//! Samples a proportioned random subset of each item pool and turns every
//! sampled item into a [`TestQuestion`]. Category sizes are
//! `round(target * ratio)` clamped to the pool size, so a test built from
//! small pools comes out shorter than requested.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::model::{
    Language, ReadingKind, ReadingQuestion, RenderContent, SentenceItem, SourceType,
    TestQuestion, VocabItem,
};

/// Share of the target size drawn from each pool. Need not sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TestRatios {
    pub vocab: f64,
    pub sentence: f64,
    pub reading: f64,
}

impl Default for TestRatios {
    fn default() -> Self {
        Self {
            vocab: 0.4,
            sentence: 0.3,
            reading: 0.3,
        }
    }
}

/// Number of items a category contributes before clamping to its pool.
pub fn category_quota(target_count: usize, ratio: f64) -> usize {
    let quota = (target_count as f64 * ratio).round();
    if quota.is_finite() && quota > 0.0 {
        quota as usize
    } else {
        0
    }
}

/// Generate a test using the thread-local RNG.
pub fn generate(
    vocabs: &[VocabItem],
    sentences: &[SentenceItem],
    reading: &[ReadingQuestion],
    target_count: usize,
    ratios: TestRatios,
) -> Vec<TestQuestion> {
    generate_with_rng(
        vocabs,
        sentences,
        reading,
        target_count,
        ratios,
        &mut rand::thread_rng(),
    )
}

/// Generate a test with a caller-supplied RNG.
pub fn generate_with_rng<R: Rng + ?Sized>(
    vocabs: &[VocabItem],
    sentences: &[SentenceItem],
    reading: &[ReadingQuestion],
    target_count: usize,
    ratios: TestRatios,
    rng: &mut R,
) -> Vec<TestQuestion> {
    let mut questions: Vec<TestQuestion> = Vec::new();

    questions.extend(
        sample(vocabs, category_quota(target_count, ratios.vocab), rng)
            .into_iter()
            .map(vocab_question),
    );
    questions.extend(
        sample(sentences, category_quota(target_count, ratios.sentence), rng)
            .into_iter()
            .map(sentence_question),
    );
    questions.extend(
        sample(reading, category_quota(target_count, ratios.reading), rng)
            .into_iter()
            .map(reading_question),
    );

    questions.shuffle(rng);
    questions.truncate(target_count);

    tracing::debug!(
        target_count,
        generated = questions.len(),
        "generated test"
    );
    questions
}

/// Uniform sample without replacement: shuffle, then keep the first `n`.
fn sample<'a, T, R: Rng + ?Sized>(pool: &'a [T], n: usize, rng: &mut R) -> Vec<&'a T> {
    let mut picked: Vec<&T> = pool.iter().collect();
    picked.shuffle(rng);
    picked.truncate(n.min(pool.len()));
    picked
}

/// Meaning in, hanzi out; pinyin is shown as a hint.
pub fn vocab_question(vocab: &VocabItem) -> TestQuestion {
    TestQuestion {
        id: vocab.id.clone(),
        source_type: SourceType::Vocab,
        prompt_text: vocab.meaning.clone(),
        pinyin_hint: Some(vocab.pinyin.clone()).filter(|p| !p.is_empty()),
        options: None,
        correct_answer: vocab.hanzi.clone(),
        render_content: None,
        content_kind: None,
    }
}

/// Multiple choice when the sentence has options and a known correct one,
/// otherwise a free-text translation into Vietnamese.
pub fn sentence_question(sentence: &SentenceItem) -> TestQuestion {
    let choice = sentence
        .options
        .as_ref()
        .filter(|opts| !opts.is_empty())
        .and_then(|opts| mc_answer(sentence, opts).map(|answer| (opts.clone(), answer)));

    let (options, correct_answer) = match choice {
        Some((opts, answer)) => (Some(opts), answer),
        None => {
            if sentence.has_options() {
                tracing::debug!(
                    id = %sentence.id,
                    "sentence options carry no known answer, asking for a translation instead"
                );
            }
            (None, sentence.meaning.clone())
        }
    };

    TestQuestion {
        id: sentence.id.clone(),
        source_type: SourceType::Sentence,
        prompt_text: sentence.hanzi.clone(),
        pinyin_hint: None,
        options,
        correct_answer,
        render_content: None,
        content_kind: None,
    }
}

/// The explicit correct answer, or the translation when it is one of the
/// options. Option order carries no meaning.
fn mc_answer(sentence: &SentenceItem, options: &[String]) -> Option<String> {
    if let Some(explicit) = sentence.correct_answer.as_ref().filter(|a| !a.is_empty()) {
        return Some(explicit.clone());
    }
    options
        .iter()
        .find(|o| o.trim() == sentence.meaning.trim())
        .cloned()
}

pub fn reading_question(rq: &ReadingQuestion) -> TestQuestion {
    let (zh, vi) = rq
        .unit
        .as_ref()
        .map(|u| (u.zh_paragraph.clone(), u.vi_paragraph.clone()))
        .unwrap_or_default();

    let render_content = match rq.question_type {
        Some(ReadingKind::Fill) => {
            let asked = rq
                .prompt_language
                .or_else(|| infer_prompt_language(&rq.question_text));
            // Show the paragraph in the language the learner is NOT writing in.
            match asked {
                Some(Language::Vi) => RenderContent::Text(zh),
                Some(Language::Zh) | None => RenderContent::Text(vi),
            }
        }
        Some(ReadingKind::Mcq) => RenderContent::Bilingual { zh, vi },
        _ => RenderContent::Text(rq.question_text.clone()),
    };

    TestQuestion {
        id: rq.id.clone(),
        source_type: SourceType::Reading,
        prompt_text: rq.question_text.clone(),
        pinyin_hint: None,
        options: rq.options.clone(),
        correct_answer: rq.answer.clone(),
        render_content: Some(render_content),
        content_kind: rq.question_type,
    }
}

/// Guess the requested answer language from the instruction text.
///
/// Heuristic for questions imported without an explicit `prompt_language`:
/// it matches the fixed Vietnamese phrasing of the importer ("... tiếng
/// Trung" / "... tiếng Việt") and nothing else.
pub fn infer_prompt_language(question_text: &str) -> Option<Language> {
    if question_text.contains("tiếng trung") || question_text.contains("tiếng Trung") {
        Some(Language::Zh)
    } else if question_text.contains("tiếng việt") || question_text.contains("tiếng Việt") {
        Some(Language::Vi)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ReadingUnit;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn vocab(i: usize) -> VocabItem {
        VocabItem {
            id: format!("v{i}"),
            hanzi: format!("字{i}"),
            pinyin: format!("zi{i}"),
            meaning: format!("chữ {i}"),
            unit_tag: None,
        }
    }

    fn sentence(i: usize) -> SentenceItem {
        SentenceItem {
            id: format!("s{i}"),
            hanzi: format!("句子{i}"),
            meaning: format!("câu {i}"),
            pinyin: None,
            options: None,
            correct_answer: None,
            lesson_id: None,
            lesson_title: None,
        }
    }

    fn unit() -> ReadingUnit {
        ReadingUnit {
            id: "u1".into(),
            title: "Unit 1".into(),
            zh_paragraph: "中文段落".into(),
            vi_paragraph: "đoạn tiếng Việt".into(),
        }
    }

    fn reading_q(i: usize, kind: Option<ReadingKind>, text: &str) -> ReadingQuestion {
        ReadingQuestion {
            id: format!("r{i}"),
            question_text: text.into(),
            options: None,
            answer: format!("answer {i}"),
            question_type: kind,
            prompt_language: None,
            unit: Some(unit()),
        }
    }

    fn count(questions: &[TestQuestion], ty: SourceType) -> usize {
        questions.iter().filter(|q| q.source_type == ty).count()
    }

    #[test]
    fn default_ratios_split_a_fifty_question_test() {
        let vocabs: Vec<_> = (0..100).map(vocab).collect();
        let sentences: Vec<_> = (0..100).map(sentence).collect();
        let reading: Vec<_> = (0..100)
            .map(|i| reading_q(i, Some(ReadingKind::Translate), "Q"))
            .collect();
        let mut rng = StdRng::seed_from_u64(7);

        let test = generate_with_rng(&vocabs, &sentences, &reading, 50, TestRatios::default(), &mut rng);

        assert_eq!(test.len(), 50);
        assert_eq!(count(&test, SourceType::Vocab), 20);
        assert_eq!(count(&test, SourceType::Sentence), 15);
        assert_eq!(count(&test, SourceType::Reading), 15);
    }

    #[test]
    fn small_pools_under_fill_the_test() {
        let vocabs: Vec<_> = (0..3).map(vocab).collect();
        let test = generate(&vocabs, &[], &[], 50, TestRatios::default());
        assert_eq!(test.len(), 3);
        assert!(test.iter().all(|q| q.source_type == SourceType::Vocab));
    }

    #[test]
    fn empty_pools_give_an_empty_test() {
        assert!(generate(&[], &[], &[], 10, TestRatios::default()).is_empty());
    }

    #[test]
    fn ratios_above_one_are_truncated_to_target() {
        let vocabs: Vec<_> = (0..30).map(vocab).collect();
        let sentences: Vec<_> = (0..30).map(sentence).collect();
        let ratios = TestRatios {
            vocab: 1.0,
            sentence: 1.0,
            reading: 0.0,
        };
        let test = generate(&vocabs, &sentences, &[], 10, ratios);
        assert_eq!(test.len(), 10);
    }

    #[test]
    fn sampling_never_repeats_an_item() {
        let vocabs: Vec<_> = (0..20).map(vocab).collect();
        let test = generate(&vocabs, &[], &[], 20, TestRatios { vocab: 1.0, sentence: 0.0, reading: 0.0 });
        let mut ids: Vec<_> = test.iter().map(|q| q.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 20);
    }

    #[test]
    fn vocab_question_asks_meaning_and_expects_hanzi() {
        let q = vocab_question(&vocab(1));
        assert_eq!(q.prompt_text, "chữ 1");
        assert_eq!(q.correct_answer, "字1");
        assert_eq!(q.pinyin_hint.as_deref(), Some("zi1"));
    }

    #[test]
    fn sentence_with_explicit_answer_is_multiple_choice() {
        let mut s = sentence(1);
        s.options = Some(vec!["sai".into(), "đúng".into()]);
        s.correct_answer = Some("đúng".into());
        let q = sentence_question(&s);
        assert!(q.is_multiple_choice());
        assert_eq!(q.correct_answer, "đúng");
    }

    #[test]
    fn sentence_options_never_assume_first_is_correct() {
        let mut s = sentence(1);
        s.options = Some(vec!["wrong first".into(), "câu 1".into()]);
        let q = sentence_question(&s);
        assert_eq!(q.correct_answer, "câu 1");

        s.options = Some(vec!["a".into(), "b".into()]);
        let q = sentence_question(&s);
        assert!(!q.is_multiple_choice());
        assert_eq!(q.correct_answer, "câu 1");
    }

    #[test]
    fn sentence_without_options_is_translation() {
        let q = sentence_question(&sentence(2));
        assert_eq!(q.prompt_text, "句子2");
        assert_eq!(q.correct_answer, "câu 2");
        assert!(q.options.is_none());
    }

    #[test]
    fn fill_question_shows_the_other_language() {
        let to_zh = reading_question(&reading_q(1, Some(ReadingKind::Fill), "Viết thành câu tiếng Trung"));
        assert_eq!(to_zh.render_content, Some(RenderContent::Text("đoạn tiếng Việt".into())));

        let to_vi = reading_question(&reading_q(2, Some(ReadingKind::Fill), "Viết thành câu tiếng việt"));
        assert_eq!(to_vi.render_content, Some(RenderContent::Text("中文段落".into())));

        let unknown = reading_question(&reading_q(3, Some(ReadingKind::Fill), "Điền vào chỗ trống"));
        assert_eq!(unknown.render_content, Some(RenderContent::Text("đoạn tiếng Việt".into())));
    }

    #[test]
    fn explicit_prompt_language_beats_the_heuristic() {
        let mut rq = reading_q(1, Some(ReadingKind::Fill), "Viết thành câu tiếng Trung");
        rq.prompt_language = Some(Language::Vi);
        let q = reading_question(&rq);
        assert_eq!(q.render_content, Some(RenderContent::Text("中文段落".into())));
    }

    #[test]
    fn mcq_shows_both_paragraphs_and_other_kinds_show_question() {
        let mcq = reading_question(&reading_q(1, Some(ReadingKind::Mcq), "Chọn đáp án"));
        assert_eq!(
            mcq.render_content,
            Some(RenderContent::Bilingual {
                zh: "中文段落".into(),
                vi: "đoạn tiếng Việt".into()
            })
        );
        assert_eq!(mcq.content_kind, Some(ReadingKind::Mcq));

        let other = reading_question(&reading_q(2, None, "Dịch câu này"));
        assert_eq!(other.render_content, Some(RenderContent::Text("Dịch câu này".into())));
    }

    #[test]
    fn reading_without_unit_renders_empty_paragraphs() {
        let mut rq = reading_q(1, Some(ReadingKind::Mcq), "Q");
        rq.unit = None;
        let q = reading_question(&rq);
        assert_eq!(
            q.render_content,
            Some(RenderContent::Bilingual { zh: String::new(), vi: String::new() })
        );
    }

    proptest! {
        #[test]
        fn generated_size_respects_quota_and_pools(
            n_vocab in 0usize..40,
            n_sentence in 0usize..40,
            n_reading in 0usize..40,
            target in 0usize..60,
            rv in 0.0f64..1.5,
            rs in 0.0f64..1.5,
            rr in 0.0f64..1.5,
            seed in any::<u64>(),
        ) {
            let vocabs: Vec<_> = (0..n_vocab).map(vocab).collect();
            let sentences: Vec<_> = (0..n_sentence).map(sentence).collect();
            let reading: Vec<_> = (0..n_reading)
                .map(|i| reading_q(i, Some(ReadingKind::Translate), "Q"))
                .collect();
            let ratios = TestRatios { vocab: rv, sentence: rs, reading: rr };
            let mut rng = StdRng::seed_from_u64(seed);

            let test = generate_with_rng(&vocabs, &sentences, &reading, target, ratios, &mut rng);

            prop_assert!(test.len() <= target);
            prop_assert!(count(&test, SourceType::Vocab) <= category_quota(target, rv).min(n_vocab));
            prop_assert!(count(&test, SourceType::Sentence) <= category_quota(target, rs).min(n_sentence));
            prop_assert!(count(&test, SourceType::Reading) <= category_quota(target, rr).min(n_reading));
        }
    }
}
