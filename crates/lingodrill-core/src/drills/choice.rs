//! Four-option vocabulary multiple choice.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::model::VocabItem;

const DISTRACTORS: usize = 3;

/// What the learner picks: the characters or the romanisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChoiceTarget {
    Hanzi,
    Pinyin,
}

impl ChoiceTarget {
    fn of(self, vocab: &VocabItem) -> &str {
        match self {
            ChoiceTarget::Hanzi => &vocab.hanzi,
            ChoiceTarget::Pinyin => &vocab.pinyin,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceQuestion {
    pub vocab_id: String,
    /// Vietnamese meaning shown to the learner.
    pub prompt: String,
    pub target: ChoiceTarget,
    pub options: Vec<String>,
    pub correct: String,
}

impl ChoiceQuestion {
    /// One correct option plus up to three distractors taken from the other
    /// items in `pool`, shuffled.
    pub fn build<R: Rng + ?Sized>(
        vocab: &VocabItem,
        pool: &[VocabItem],
        target: ChoiceTarget,
        rng: &mut R,
    ) -> Self {
        let correct = target.of(vocab).to_string();

        let mut candidates: Vec<&str> = pool
            .iter()
            .filter(|v| v.id != vocab.id)
            .map(|v| target.of(v))
            .filter(|o| !o.is_empty() && *o != correct)
            .collect();
        candidates.sort_unstable();
        candidates.dedup();
        candidates.shuffle(rng);

        let mut options: Vec<String> = candidates
            .into_iter()
            .take(DISTRACTORS)
            .map(str::to_string)
            .collect();
        options.push(correct.clone());
        options.shuffle(rng);

        Self {
            vocab_id: vocab.id.clone(),
            prompt: vocab.meaning.clone(),
            target,
            options,
            correct,
        }
    }

    /// Hanzi must match exactly; pinyin ignores case.
    pub fn check(&self, selected: &str) -> bool {
        match self.target {
            ChoiceTarget::Hanzi => selected.trim() == self.correct.trim(),
            ChoiceTarget::Pinyin => {
                selected.trim().to_lowercase() == self.correct.trim().to_lowercase()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::drills::test_support::vocab;

    #[test]
    fn four_distinct_options_with_the_answer() {
        let pool: Vec<_> = (0..10).map(|i| vocab(i, "U1")).collect();
        let mut rng = StdRng::seed_from_u64(3);

        let q = ChoiceQuestion::build(&pool[2], &pool, ChoiceTarget::Hanzi, &mut rng);

        assert_eq!(q.options.len(), 4);
        assert!(q.options.contains(&"字2".to_string()));
        let mut unique = q.options.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), 4);
        assert!(q.check("字2"));
        assert!(!q.check("字3"));
    }

    #[test]
    fn small_pool_gives_fewer_options() {
        let pool = vec![vocab(0, "U1"), vocab(1, "U1")];
        let mut rng = StdRng::seed_from_u64(5);
        let q = ChoiceQuestion::build(&pool[0], &pool, ChoiceTarget::Pinyin, &mut rng);
        assert_eq!(q.options.len(), 2);

        let alone = ChoiceQuestion::build(&pool[0], &pool[..1], ChoiceTarget::Hanzi, &mut rng);
        assert_eq!(alone.options, vec!["字0".to_string()]);
    }

    #[test]
    fn pinyin_ignores_case() {
        let pool: Vec<_> = (0..4).map(|i| vocab(i, "U1")).collect();
        let mut rng = StdRng::seed_from_u64(11);
        let q = ChoiceQuestion::build(&pool[1], &pool, ChoiceTarget::Pinyin, &mut rng);
        assert!(q.check("zi1"));
        assert!(q.check(" ZI1"));
    }
}
