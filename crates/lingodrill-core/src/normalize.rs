//! Item pool normalizer.
//!
//! Coerces raw Content API payloads into the uniform model types. Payloads
//! may be a bare array or an envelope object, and entries use several field
//! spellings (`_id`/`id`, `zh`/`hanzi`, ...). Nothing here fails: entries
//! that are not objects or carry no id are dropped, missing optional fields
//! fall back to empty values.

use serde_json::{Map, Value};

use crate::model::{Language, ReadingQuestion, ReadingUnit, SentenceItem, VocabItem};

const ID_KEYS: &[&str] = &["_id", "id"];
const FALLBACK_ENVELOPES: &[&str] = &["data", "items"];

/// Load state of one content pool.
///
/// Keeps "not fetched yet" apart from "fetched and empty" so a zero-question
/// test is never presented as if it were intentional.
#[derive(Debug, Clone, PartialEq)]
pub enum PoolState<T> {
    Loading,
    Ready(Vec<T>),
    Failed(String),
}

impl<T> PoolState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, PoolState::Loading)
    }

    /// Items if the pool finished loading; a failed pool reads as empty.
    pub fn items(&self) -> Option<&[T]> {
        match self {
            PoolState::Loading => None,
            PoolState::Ready(items) => Some(items),
            PoolState::Failed(_) => Some(&[]),
        }
    }
}

/// Borrowed view over a JSON object with alias-aware lookups.
struct Fields<'a>(&'a Map<String, Value>);

impl<'a> Fields<'a> {
    fn value(&self, keys: &[&str]) -> Option<&'a Value> {
        keys.iter()
            .filter_map(|k| self.0.get(*k))
            .find(|v| !v.is_null())
    }

    fn text(&self, keys: &[&str]) -> Option<String> {
        self.value(keys).and_then(scalar_to_string)
    }

    fn text_or_empty(&self, keys: &[&str]) -> String {
        self.text(keys).unwrap_or_default()
    }

    fn string_list(&self, keys: &[&str]) -> Option<Vec<String>> {
        let items = self.value(keys)?.as_array()?;
        Some(items.iter().filter_map(scalar_to_string).collect())
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Locate the entry array inside a payload: a bare array, or an array under
/// one of the envelope keys.
fn entries<'a>(payload: &'a Value, envelope_keys: &[&str]) -> &'a [Value] {
    match payload {
        Value::Array(items) => items,
        Value::Object(map) => envelope_keys
            .iter()
            .chain(FALLBACK_ENVELOPES)
            .find_map(|k| map.get(*k).and_then(Value::as_array))
            .map(Vec::as_slice)
            .unwrap_or(&[]),
        _ => &[],
    }
}

fn decode_all<T>(
    payload: &Value,
    envelope_keys: &[&str],
    kind: &str,
    decode: impl Fn(Fields<'_>) -> Option<T>,
) -> Vec<T> {
    let raw = entries(payload, envelope_keys);
    let decoded: Vec<T> = raw
        .iter()
        .filter_map(|entry| entry.as_object().map(Fields))
        .filter_map(&decode)
        .collect();
    if decoded.len() < raw.len() {
        tracing::debug!(
            kind,
            dropped = raw.len() - decoded.len(),
            "dropped malformed pool entries"
        );
    }
    decoded
}

/// Normalize a vocabulary payload (`{vocabs: [...]}` or `[...]`).
pub fn normalize_vocabs(payload: &Value) -> Vec<VocabItem> {
    decode_all(payload, &["vocabs"], "vocab", |f| {
        Some(VocabItem {
            id: f.text(ID_KEYS)?,
            hanzi: f.text_or_empty(&["zh", "hanzi"]),
            pinyin: f.text_or_empty(&["pinyin"]),
            meaning: f.text_or_empty(&["vi", "meaning"]),
            unit_tag: f.text(&["source_tag", "unitTag", "unit_tag"]),
        })
    })
}

/// Normalize a sentence payload (`{sentences: [...]}` or `[...]`).
pub fn normalize_sentences(payload: &Value) -> Vec<SentenceItem> {
    decode_all(payload, &["sentences"], "sentence", |f| {
        let (lesson_id, lesson_title) = lesson_ref(f.value(&["lessonId", "lesson_id", "lesson"]));
        Some(SentenceItem {
            id: f.text(ID_KEYS)?,
            hanzi: f.text_or_empty(&["zh", "hanzi"]),
            meaning: f.text_or_empty(&["vi", "meaning"]),
            pinyin: f.text(&["pinyin"]),
            options: f.string_list(&["options"]),
            correct_answer: f.text(&["correctAnswer", "correct_answer"]),
            lesson_id,
            lesson_title: lesson_title.or_else(|| f.text(&["lessonTitle", "lesson_title"])),
        })
    })
}

/// A sentence's lesson is either an id or a populated lesson document.
fn lesson_ref(value: Option<&Value>) -> (Option<String>, Option<String>) {
    match value {
        Some(Value::Object(map)) => {
            let f = Fields(map);
            (f.text(ID_KEYS), f.text(&["title"]))
        }
        Some(other) => (scalar_to_string(other), None),
        None => (None, None),
    }
}

fn decode_unit(f: &Fields<'_>) -> Option<ReadingUnit> {
    Some(ReadingUnit {
        id: f.text(ID_KEYS)?,
        title: f.text_or_empty(&["unit_title", "title", "unitTitle"]),
        zh_paragraph: f.text_or_empty(&["zh_paragraph", "zhParagraph"]),
        vi_paragraph: f.text_or_empty(&["vi_paragraph", "viParagraph"]),
    })
}

/// Normalize a reading-unit list (`{units: [...]}` or `[...]`).
pub fn normalize_reading_units(payload: &Value) -> Vec<ReadingUnit> {
    decode_all(payload, &["units", "readingUnits"], "reading unit", |f| {
        decode_unit(&f)
    })
}

/// Normalize a single reading unit, bare or wrapped as `{unit: {...}}`.
pub fn normalize_reading_unit(payload: &Value) -> Option<ReadingUnit> {
    let map = payload.as_object()?;
    match map.get("unit").and_then(Value::as_object) {
        Some(inner) => decode_unit(&Fields(inner)),
        None => decode_unit(&Fields(map)),
    }
}

/// Normalize a reading-question payload (`{questions: [...]}` or `[...]`).
pub fn normalize_reading_questions(payload: &Value) -> Vec<ReadingQuestion> {
    decode_all(payload, &["questions"], "reading question", |f| {
        let unit = match f.value(&["unitId", "unit_id", "unit"]) {
            Some(Value::Object(map)) => decode_unit(&Fields(map)),
            _ => None,
        };
        Some(ReadingQuestion {
            id: f.text(ID_KEYS)?,
            question_text: f.text_or_empty(&["question", "questionText", "question_text"]),
            options: f.string_list(&["options"]),
            answer: answer_text(f.value(&["answer", "correctAnswer", "correct_answer"])),
            question_type: f
                .text(&["question_type", "questionType"])
                .and_then(|s| s.parse().ok()),
            prompt_language: f
                .text(&["prompt_language", "promptLanguage"])
                .and_then(|s| s.parse::<Language>().ok()),
            unit,
        })
    })
}

/// Collapse the polymorphic answer field (`"x"` or `{text: "x"}`) to a string.
fn answer_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::Object(map)) => Fields(map).text_or_empty(&["text", "value"]),
        Some(other) => scalar_to_string(other).unwrap_or_default(),
        None => String::new(),
    }
}

/// Populate the unit on questions that only referenced it by id.
pub fn attach_unit(questions: &mut [ReadingQuestion], unit: &ReadingUnit) {
    for q in questions.iter_mut().filter(|q| q.unit.is_none()) {
        q.unit = Some(unit.clone());
    }
}

/// Sentences of one lesson.
#[derive(Debug, Clone, PartialEq)]
pub struct LessonGroup {
    pub lesson_id: String,
    pub title: String,
    pub sentences: Vec<SentenceItem>,
}

/// Group sentences by lesson, keeping first-seen lesson order. Sentences
/// without a lesson are left out.
pub fn group_by_lesson(sentences: &[SentenceItem]) -> Vec<LessonGroup> {
    let mut groups: Vec<LessonGroup> = Vec::new();
    for sentence in sentences {
        let Some(lesson_id) = &sentence.lesson_id else {
            continue;
        };
        match groups.iter_mut().find(|g| &g.lesson_id == lesson_id) {
            Some(group) => group.sentences.push(sentence.clone()),
            None => {
                let title = sentence.lesson_title.clone().unwrap_or_else(|| {
                    let short: String = lesson_id.chars().take(8).collect();
                    format!("Lesson {short}")
                });
                groups.push(LessonGroup {
                    lesson_id: lesson_id.clone(),
                    title,
                    sentences: vec![sentence.clone()],
                });
            }
        }
    }
    groups
}
