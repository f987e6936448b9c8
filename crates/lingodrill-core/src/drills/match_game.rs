//! Match game: pair Chinese words with their Vietnamese meanings.

use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::QuizError;
use crate::model::VocabItem;

pub const MAX_PAIRS: usize = 8;

/// Result of a finished board, recorded as one batched update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub total_pairs: usize,
    pub correct_pairs: usize,
}

impl MatchOutcome {
    pub fn all_correct(&self) -> bool {
        self.correct_pairs == self.total_pairs
    }
}

/// Selection state of a match board.
///
/// Selecting a word on one side and then a word on the other links them.
/// Selecting the same word twice clears the selection. Once every word is
/// linked the board is checked automatically.
#[derive(Debug, Clone)]
pub struct MatchBoard {
    left: Vec<String>,
    right: Vec<String>,
    expected: HashMap<String, String>,
    links: HashMap<String, String>,
    selected_left: Option<String>,
    selected_right: Option<String>,
    outcome: Option<MatchOutcome>,
}

impl MatchBoard {
    /// Build a board of up to [`MAX_PAIRS`] words. Words whose hanzi or
    /// meaning repeats one already on the board are left out, since two
    /// identical cards could never both be linked.
    pub fn new<R: Rng + ?Sized>(vocabs: &[VocabItem], rng: &mut R) -> Self {
        let mut shuffled: Vec<&VocabItem> = vocabs.iter().collect();
        shuffled.shuffle(rng);
        let mut picked: Vec<&VocabItem> = Vec::new();
        for vocab in shuffled {
            if picked.len() == MAX_PAIRS {
                break;
            }
            let repeats = picked
                .iter()
                .any(|p| p.hanzi == vocab.hanzi || p.meaning == vocab.meaning);
            if !repeats {
                picked.push(vocab);
            }
        }

        let left: Vec<String> = picked.iter().map(|v| v.hanzi.clone()).collect();
        let mut right: Vec<String> = picked.iter().map(|v| v.meaning.clone()).collect();
        right.shuffle(rng);
        let expected = picked
            .iter()
            .map(|v| (v.hanzi.clone(), v.meaning.clone()))
            .collect();

        Self {
            left,
            right,
            expected,
            links: HashMap::new(),
            selected_left: None,
            selected_right: None,
            outcome: None,
        }
    }

    /// Chinese words, in display order.
    pub fn left(&self) -> &[String] {
        &self.left
    }

    /// Vietnamese meanings not yet linked, in display order.
    pub fn remaining_right(&self) -> Vec<&str> {
        self.right
            .iter()
            .filter(|m| !self.links.values().any(|linked| linked == *m))
            .map(String::as_str)
            .collect()
    }

    pub fn links(&self) -> &HashMap<String, String> {
        &self.links
    }

    pub fn outcome(&self) -> Option<MatchOutcome> {
        self.outcome
    }

    pub fn select_left(&mut self, hanzi: &str) -> Option<MatchOutcome> {
        if self.outcome.is_some()
            || self.links.contains_key(hanzi)
            || !self.left.iter().any(|h| h == hanzi)
        {
            return None;
        }
        if self.selected_left.as_deref() == Some(hanzi) {
            self.selected_left = None;
            return None;
        }
        match self.selected_right.take() {
            Some(meaning) => self.link(hanzi.to_string(), meaning),
            None => {
                self.selected_left = Some(hanzi.to_string());
                None
            }
        }
    }

    pub fn select_right(&mut self, meaning: &str) -> Option<MatchOutcome> {
        if self.outcome.is_some()
            || self.links.values().any(|m| m == meaning)
            || !self.right.iter().any(|m| m == meaning)
        {
            return None;
        }
        if self.selected_right.as_deref() == Some(meaning) {
            self.selected_right = None;
            return None;
        }
        match self.selected_left.take() {
            Some(hanzi) => self.link(hanzi, meaning.to_string()),
            None => {
                self.selected_right = Some(meaning.to_string());
                None
            }
        }
    }

    fn link(&mut self, hanzi: String, meaning: String) -> Option<MatchOutcome> {
        self.selected_left = None;
        self.selected_right = None;
        self.links.insert(hanzi, meaning);
        if self.links.len() == self.left.len() {
            return Some(self.score());
        }
        None
    }

    /// Check the board explicitly. Every word must be linked first.
    pub fn check(&mut self) -> Result<MatchOutcome, QuizError> {
        if self.outcome.is_some() {
            return Err(QuizError::AlreadyChecked);
        }
        let unanswered = self.left.len() - self.links.len();
        if unanswered > 0 {
            return Err(QuizError::Unanswered { unanswered });
        }
        Ok(self.score())
    }

    fn score(&mut self) -> MatchOutcome {
        let correct_pairs = self
            .links
            .iter()
            .filter(|(hanzi, meaning)| self.expected.get(*hanzi) == Some(*meaning))
            .count();
        let outcome = MatchOutcome {
            total_pairs: self.left.len(),
            correct_pairs,
        };
        self.outcome = Some(outcome);
        outcome
    }
}
