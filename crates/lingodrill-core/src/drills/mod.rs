//! Vocabulary and lesson drills.
//!
//! Unlike the quiz engines these are untimed, single-item exercises. Each
//! check yields a plain `bool` that the caller feeds into
//! [`SessionStats`](crate::session::SessionStats).

pub mod choice;
pub mod cloze;
pub mod flashcard;
pub mod match_game;
pub mod streak;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::model::{SentenceItem, VocabItem};

pub use choice::{ChoiceQuestion, ChoiceTarget};
pub use cloze::{ArrangeWords, Cloze};
pub use flashcard::Flashcard;
pub use match_game::{MatchBoard, MatchOutcome};
pub use streak::StreakRun;

/// Order in which study items are presented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StudyOrder {
    /// Unit by unit, in the order the units were selected.
    #[default]
    Sequential,
    Random,
}

/// Arrange vocabulary for a study session.
///
/// `Sequential` keeps only words tagged with one of `units` and lists them
/// unit by unit. `Random` shuffles everything it was given.
pub fn arrange_vocab<R: Rng + ?Sized>(
    vocabs: &[VocabItem],
    units: &[String],
    order: StudyOrder,
    rng: &mut R,
) -> Vec<VocabItem> {
    match order {
        StudyOrder::Sequential => {
            let mut ordered = Vec::new();
            for unit in units {
                ordered.extend(
                    vocabs
                        .iter()
                        .filter(|v| v.unit_tag.as_deref() == Some(unit.as_str()))
                        .cloned(),
                );
            }
            ordered
        }
        StudyOrder::Random => {
            let mut all = vocabs.to_vec();
            all.shuffle(rng);
            all
        }
    }
}

/// Typed hanzi for a vocab item.
pub fn check_typing(vocab: &VocabItem, answer: &str) -> bool {
    answer.trim() == vocab.hanzi.trim()
}

/// Vietnamese to Chinese translation of a lesson sentence.
pub fn check_translation(sentence: &SentenceItem, answer: &str) -> bool {
    answer.trim() == sentence.hanzi.trim()
}

/// Role-play reply to a Chinese line: the line itself, trimmed and without
/// case. `None` for a blank reply, which is not checked at all.
pub fn check_role_play(sentence: &SentenceItem, reply: &str) -> Option<bool> {
    let reply = reply.trim();
    if reply.is_empty() {
        return None;
    }
    Some(reply.to_lowercase() == sentence.hanzi.trim().to_lowercase())
}

/// The option a lesson multiple-choice question expects.
pub fn lesson_choice_answer(sentence: &SentenceItem) -> &str {
    sentence
        .correct_answer
        .as_deref()
        .filter(|a| !a.is_empty())
        .unwrap_or(&sentence.meaning)
}

pub fn check_lesson_choice(sentence: &SentenceItem, selected: &str) -> bool {
    selected == lesson_choice_answer(sentence)
}


#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::test_support::{sentence, vocab};
    use super::*;

    #[test]
    fn sequential_follows_unit_selection_order() {
        let vocabs = vec![vocab(1, "U1"), vocab(2, "U2"), vocab(3, "U1"), vocab(4, "U3")];
        let units = vec!["U2".to_string(), "U1".to_string()];
        let mut rng = StdRng::seed_from_u64(1);

        let ordered = arrange_vocab(&vocabs, &units, StudyOrder::Sequential, &mut rng);
        let ids: Vec<_> = ordered.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["v2", "v1", "v3"]);
    }

    #[test]
    fn random_keeps_everything() {
        let vocabs: Vec<_> = (0..10).map(|i| vocab(i, "U1")).collect();
        let mut rng = StdRng::seed_from_u64(9);
        let shuffled = arrange_vocab(&vocabs, &[], StudyOrder::Random, &mut rng);
        assert_eq!(shuffled.len(), 10);
        for v in &vocabs {
            assert!(shuffled.contains(v));
        }
    }

    #[test]
    fn typing_and_translation_trim_only() {
        assert!(check_typing(&vocab(1, "U1"), " 字1 "));
        assert!(!check_typing(&vocab(1, "U1"), "字2"));

        let s = sentence("我是学生");
        assert!(check_translation(&s, "我是学生 "));
        assert!(!check_translation(&s, "我是老师"));
    }

    #[test]
    fn role_play_ignores_case_and_blank_replies() {
        let s = sentence("你好 Lisa");
        assert_eq!(check_role_play(&s, " 你好 lisa "), Some(true));
        assert_eq!(check_role_play(&s, "你好"), Some(false));
        assert_eq!(check_role_play(&s, "   "), None);
    }

    #[test]
    fn lesson_choice_prefers_explicit_answer() {
        let mut s = sentence("我是学生");
        assert!(check_lesson_choice(&s, "Tôi là học sinh"));

        s.correct_answer = Some("Tôi là sinh viên".into());
        assert!(check_lesson_choice(&s, "Tôi là sinh viên"));
        assert!(!check_lesson_choice(&s, "Tôi là học sinh"));
        // Exact: no case folding.
        assert!(!check_lesson_choice(&s, "tôi là sinh viên"));
    }
}
