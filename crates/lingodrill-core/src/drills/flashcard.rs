//! Flashcards graded by the learner.

use crate::error::QuizError;
use crate::model::{Language, VocabItem};

/// One card: one side shown, the other revealed on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flashcard {
    pub vocab_id: String,
    front: String,
    back: String,
    revealed: bool,
    assessed: bool,
}

impl Flashcard {
    /// A card showing `front` first. Vietnamese fronts hide the hanzi and
    /// Chinese fronts hide the meaning.
    pub fn new(vocab: &VocabItem, front: Language) -> Self {
        let (front_text, back_text) = match front {
            Language::Vi => (&vocab.meaning, &vocab.hanzi),
            Language::Zh => (&vocab.hanzi, &vocab.meaning),
        };
        Self {
            vocab_id: vocab.id.clone(),
            front: front_text.clone(),
            back: back_text.clone(),
            revealed: false,
            assessed: false,
        }
    }

    pub fn front(&self) -> &str {
        &self.front
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Turn the card over.
    pub fn reveal(&mut self) -> &str {
        self.revealed = true;
        &self.back
    }

    /// Record whether the learner knew the back side. Only once, and only
    /// after the card was turned over.
    pub fn assess(&mut self, knew_it: bool) -> Result<bool, QuizError> {
        if self.assessed {
            return Err(QuizError::AlreadyChecked);
        }
        if !self.revealed {
            return Err(QuizError::NotRevealed);
        }
        self.assessed = true;
        Ok(knew_it)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drills::test_support::vocab;

    #[test]
    fn front_language_picks_sides() {
        let mut vi = Flashcard::new(&vocab(1, "U1"), Language::Vi);
        assert_eq!(vi.front(), "chữ 1");
        assert_eq!(vi.reveal(), "字1");

        let mut zh = Flashcard::new(&vocab(1, "U1"), Language::Zh);
        assert_eq!(zh.front(), "字1");
        assert_eq!(zh.reveal(), "chữ 1");
    }

    #[test]
    fn assessed_once_after_reveal() {
        let mut card = Flashcard::new(&vocab(1, "U1"), Language::Vi);
        assert_eq!(card.assess(true), Err(QuizError::NotRevealed));

        card.reveal();
        assert!(card.is_revealed());
        assert_eq!(card.assess(false), Ok(false));
        assert_eq!(card.assess(true), Err(QuizError::AlreadyChecked));
    }
}
