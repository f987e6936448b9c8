//! Core data model types for lingodrill.
//!
//! Content items arrive from the Content API already normalized (see
//! [`crate::normalize`]); generated tests and grade results are built from
//! them and never mutated afterwards.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A vocabulary entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocabItem {
    /// Unique identifier.
    pub id: String,
    /// The word written in Chinese characters.
    pub hanzi: String,
    /// Romanized pronunciation.
    #[serde(default)]
    pub pinyin: String,
    /// Vietnamese meaning.
    pub meaning: String,
    /// Unit the word belongs to (the API's `source_tag`).
    #[serde(default)]
    pub unit_tag: Option<String>,
}

/// A lesson sentence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentenceItem {
    pub id: String,
    pub hanzi: String,
    /// Vietnamese translation.
    pub meaning: String,
    #[serde(default)]
    pub pinyin: Option<String>,
    /// Answer options for multiple-choice use.
    #[serde(default)]
    pub options: Option<Vec<String>>,
    /// The correct option. Never inferred from option order.
    #[serde(default)]
    pub correct_answer: Option<String>,
    #[serde(default)]
    pub lesson_id: Option<String>,
    #[serde(default)]
    pub lesson_title: Option<String>,
}

impl SentenceItem {
    /// Whether the sentence carries at least one option.
    pub fn has_options(&self) -> bool {
        self.options.as_ref().is_some_and(|o| !o.is_empty())
    }
}

/// A reading unit: a bilingual paragraph that questions refer to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingUnit {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub zh_paragraph: String,
    #[serde(default)]
    pub vi_paragraph: String,
}

/// How a reading question expects to be answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadingKind {
    Mcq,
    Fill,
    Translate,
}

impl fmt::Display for ReadingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadingKind::Mcq => write!(f, "mcq"),
            ReadingKind::Fill => write!(f, "fill"),
            ReadingKind::Translate => write!(f, "translate"),
        }
    }
}

impl FromStr for ReadingKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mcq" => Ok(ReadingKind::Mcq),
            "fill" => Ok(ReadingKind::Fill),
            "translate" => Ok(ReadingKind::Translate),
            other => Err(format!("unknown question type: {other}")),
        }
    }
}

/// The two languages the content is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Zh,
    Vi,
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "zh" | "chinese" => Ok(Language::Zh),
            "vi" | "vietnamese" => Ok(Language::Vi),
            other => Err(format!("unknown language: {other}")),
        }
    }
}

/// A reading-comprehension question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingQuestion {
    pub id: String,
    pub question_text: String,
    #[serde(default)]
    pub options: Option<Vec<String>>,
    /// Always a plain string; polymorphic API shapes are collapsed on ingestion.
    #[serde(default)]
    pub answer: String,
    #[serde(default)]
    pub question_type: Option<ReadingKind>,
    /// Language the learner is asked to write in, when the source states it.
    #[serde(default)]
    pub prompt_language: Option<Language>,
    #[serde(default)]
    pub unit: Option<ReadingUnit>,
}

/// Which pool a generated question came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    Vocab,
    Sentence,
    Reading,
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceType::Vocab => write!(f, "vocab"),
            SourceType::Sentence => write!(f, "sentence"),
            SourceType::Reading => write!(f, "reading"),
        }
    }
}

/// Extra material shown alongside a reading question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RenderContent {
    Text(String),
    Bilingual { zh: String, vi: String },
}

/// A generated question, uniform across source types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestQuestion {
    pub id: String,
    pub source_type: SourceType,
    pub prompt_text: String,
    #[serde(default)]
    pub pinyin_hint: Option<String>,
    #[serde(default)]
    pub options: Option<Vec<String>>,
    pub correct_answer: String,
    #[serde(default)]
    pub render_content: Option<RenderContent>,
    #[serde(default)]
    pub content_kind: Option<ReadingKind>,
}

impl TestQuestion {
    /// Whether the question is answered by picking one of its options.
    pub fn is_multiple_choice(&self) -> bool {
        self.options.as_ref().is_some_and(|o| !o.is_empty())
    }
}

/// Learner answers keyed by question id. Re-answering overwrites.
pub type AnswerRecord = HashMap<String, String>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reading_kind_display_and_parse() {
        assert_eq!(ReadingKind::Fill.to_string(), "fill");
        assert_eq!("MCQ".parse::<ReadingKind>().unwrap(), ReadingKind::Mcq);
        assert!("essay".parse::<ReadingKind>().is_err());
    }

    #[test]
    fn language_parse_accepts_names() {
        assert_eq!("vietnamese".parse::<Language>().unwrap(), Language::Vi);
        assert_eq!("ZH".parse::<Language>().unwrap(), Language::Zh);
    }

    #[test]
    fn render_content_serializes_untagged() {
        let text = serde_json::to_value(RenderContent::Text("段落".into())).unwrap();
        assert_eq!(text, serde_json::json!("段落"));

        let both = RenderContent::Bilingual {
            zh: "你好".into(),
            vi: "xin chào".into(),
        };
        let json = serde_json::to_string(&both).unwrap();
        let back: RenderContent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, both);
    }

    #[test]
    fn multiple_choice_requires_non_empty_options() {
        let mut q = TestQuestion {
            id: "q1".into(),
            source_type: SourceType::Reading,
            prompt_text: "?".into(),
            pinyin_hint: None,
            options: Some(vec![]),
            correct_answer: "a".into(),
            render_content: None,
            content_kind: None,
        };
        assert!(!q.is_multiple_choice());
        q.options = Some(vec!["a".into(), "b".into()]);
        assert!(q.is_multiple_choice());
    }
}
