//! Sentence reconstruction drills: fill the blanks and arrange the words.

use rand::seq::{index, SliceRandom};
use rand::Rng;

use crate::error::QuizError;

const MAX_BLANKS: usize = 2;
const BLANK_RATIO: f64 = 0.3;
const BLANK: &str = "＿";

/// A sentence with a few characters hidden.
#[derive(Debug, Clone)]
pub struct Cloze {
    chars: Vec<char>,
    /// Positions in `chars`, ascending.
    blanks: Vec<usize>,
    checked: bool,
}

impl Cloze {
    /// Hide `min(2, floor(n * 0.3))` of the sentence's `n` non-space
    /// characters.
    pub fn new<R: Rng + ?Sized>(sentence: &str, rng: &mut R) -> Self {
        let chars: Vec<char> = sentence.chars().collect();
        let visible: Vec<usize> = chars
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.is_whitespace())
            .map(|(i, _)| i)
            .collect();

        let count = MAX_BLANKS.min((visible.len() as f64 * BLANK_RATIO).floor() as usize);
        let mut blanks: Vec<usize> = index::sample(rng, visible.len(), count)
            .into_iter()
            .map(|i| visible[i])
            .collect();
        blanks.sort_unstable();

        Self {
            chars,
            blanks,
            checked: false,
        }
    }

    pub fn blank_count(&self) -> usize {
        self.blanks.len()
    }

    /// The sentence with every hidden character replaced by a blank.
    pub fn display(&self) -> String {
        self.chars
            .iter()
            .enumerate()
            .map(|(i, c)| {
                if self.blanks.contains(&i) {
                    BLANK.to_string()
                } else {
                    c.to_string()
                }
            })
            .collect()
    }

    /// Hidden characters in blank order.
    pub fn solution(&self) -> Vec<String> {
        self.blanks.iter().map(|&i| self.chars[i].to_string()).collect()
    }

    /// Correct only if every blank is filled with its character. A missing
    /// answer counts as wrong. Can be checked once.
    pub fn check(&mut self, answers: &[&str]) -> Result<bool, QuizError> {
        if self.checked {
            return Err(QuizError::AlreadyChecked);
        }
        self.checked = true;
        let solution = self.solution();
        Ok(solution
            .iter()
            .enumerate()
            .all(|(i, expected)| answers.get(i).is_some_and(|a| a.trim() == expected)))
    }
}

/// Whitespace-separated words to be put back in order.
#[derive(Debug, Clone)]
pub struct ArrangeWords {
    sentence: String,
    pool: Vec<String>,
    selected: Vec<String>,
    checked: bool,
}

impl ArrangeWords {
    pub fn new<R: Rng + ?Sized>(sentence: &str, rng: &mut R) -> Self {
        let mut pool: Vec<String> = sentence.split_whitespace().map(str::to_string).collect();
        pool.shuffle(rng);
        Self {
            sentence: sentence.to_string(),
            pool,
            selected: Vec::new(),
            checked: false,
        }
    }

    /// Words still available, in display order.
    pub fn pool(&self) -> &[String] {
        &self.pool
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    /// Move the word at `index` in the pool to the end of the selection.
    pub fn pick(&mut self, index: usize) {
        if !self.checked && index < self.pool.len() {
            let word = self.pool.remove(index);
            self.selected.push(word);
        }
    }

    /// Move the word at `index` in the selection back to the pool.
    pub fn unpick(&mut self, index: usize) {
        if !self.checked && index < self.selected.len() {
            let word = self.selected.remove(index);
            self.pool.push(word);
        }
    }

    pub fn check(&mut self) -> Result<bool, QuizError> {
        if self.checked {
            return Err(QuizError::AlreadyChecked);
        }
        self.checked = true;
        Ok(self.selected.join(" ") == self.sentence)
    }
}
