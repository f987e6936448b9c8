//! In-memory content source for tests and offline demos.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use lingodrill_core::model::{ReadingQuestion, ReadingUnit, SentenceItem, VocabItem};
use lingodrill_core::traits::{AnswerEvent, ContentSource, SessionSink};

/// A mock content source and session sink that never touches the network.
///
/// Pools are fixed at construction; a pool can be made to fail to exercise
/// partial-load handling. Session calls are recorded for inspection.
#[derive(Default)]
pub struct MockContentSource {
    vocabs: Vec<VocabItem>,
    sentences: Vec<SentenceItem>,
    units: Vec<ReadingUnit>,
    questions: HashMap<String, Vec<ReadingQuestion>>,
    failing: Vec<String>,
    /// Number of content calls made.
    call_count: AtomicU32,
    sessions: Mutex<Vec<String>>,
    answers: Mutex<Vec<AnswerEvent>>,
    completed: Mutex<Vec<String>>,
}

impl MockContentSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_vocabs(mut self, vocabs: Vec<VocabItem>) -> Self {
        self.vocabs = vocabs;
        self
    }

    pub fn with_sentences(mut self, sentences: Vec<SentenceItem>) -> Self {
        self.sentences = sentences;
        self
    }

    pub fn with_unit(mut self, unit: ReadingUnit, questions: Vec<ReadingQuestion>) -> Self {
        self.questions.insert(unit.id.clone(), questions);
        self.units.push(unit);
        self
    }

    /// Make a pool (`vocab`, `sentence`, `units`) or one unit id fail.
    pub fn failing(mut self, what: &str) -> Self {
        self.failing.push(what.to_string());
        self
    }

    /// Get the number of content calls made to this source.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    pub fn sessions(&self) -> Vec<String> {
        lock(&self.sessions).clone()
    }

    pub fn answers(&self) -> Vec<AnswerEvent> {
        lock(&self.answers).clone()
    }

    pub fn completed(&self) -> Vec<String> {
        lock(&self.completed).clone()
    }

    fn check(&self, what: &str) -> anyhow::Result<()> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        if self.failing.iter().any(|f| f == what) {
            anyhow::bail!("mock failure: {what}");
        }
        Ok(())
    }
}

fn lock<T>(m: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|e| e.into_inner())
}

#[async_trait]
impl ContentSource for MockContentSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn vocabs(&self, limit: usize, source_tags: &[String]) -> anyhow::Result<Vec<VocabItem>> {
        self.check("vocab")?;
        Ok(self
            .vocabs
            .iter()
            .filter(|v| {
                source_tags.is_empty()
                    || v.unit_tag
                        .as_ref()
                        .is_some_and(|tag| source_tags.contains(tag))
            })
            .take(limit)
            .cloned()
            .collect())
    }

    async fn sentences(&self, limit: usize) -> anyhow::Result<Vec<SentenceItem>> {
        self.check("sentence")?;
        Ok(self.sentences.iter().take(limit).cloned().collect())
    }

    async fn reading_units(&self) -> anyhow::Result<Vec<ReadingUnit>> {
        self.check("units")?;
        Ok(self.units.clone())
    }

    async fn unit_questions(
        &self,
        unit_id: &str,
        count: usize,
    ) -> anyhow::Result<Vec<ReadingQuestion>> {
        self.check(unit_id)?;
        Ok(self
            .questions
            .get(unit_id)
            .map(|qs| qs.iter().take(count).cloned().collect())
            .unwrap_or_default())
    }
}

#[async_trait]
impl SessionSink for MockContentSource {
    async fn create_session(&self, _mode: &str) -> anyhow::Result<String> {
        let id = uuid::Uuid::new_v4().to_string();
        lock(&self.sessions).push(id.clone());
        Ok(id)
    }

    async fn record_answer(&self, event: &AnswerEvent) -> anyhow::Result<()> {
        lock(&self.answers).push(event.clone());
        Ok(())
    }

    async fn complete_session(&self, session_id: &str) -> anyhow::Result<()> {
        lock(&self.completed).push(session_id.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use lingodrill_core::normalize::PoolState;
    use lingodrill_core::session::SessionTelemetry;
    use lingodrill_core::traits::{load_pools, PoolLimits};

    use super::*;

    fn vocab(id: &str, tag: &str) -> VocabItem {
        VocabItem {
            id: id.into(),
            hanzi: "字".into(),
            pinyin: "zì".into(),
            meaning: "chữ".into(),
            unit_tag: Some(tag.into()),
        }
    }

    fn unit(id: &str) -> ReadingUnit {
        ReadingUnit {
            id: id.into(),
            title: id.to_uppercase(),
            zh_paragraph: String::new(),
            vi_paragraph: String::new(),
        }
    }

    fn question(id: &str) -> ReadingQuestion {
        ReadingQuestion {
            id: id.into(),
            question_text: "?".into(),
            options: None,
            answer: "a".into(),
            question_type: None,
            prompt_language: None,
            unit: None,
        }
    }

    #[tokio::test]
    async fn filters_vocab_by_tag_and_limit() {
        let source = MockContentSource::new().with_vocabs(vec![
            vocab("v1", "HSK1"),
            vocab("v2", "HSK2"),
            vocab("v3", "HSK1"),
        ]);

        let hsk1 = source.vocabs(10, &["HSK1".to_string()]).await.unwrap();
        assert_eq!(hsk1.len(), 2);
        assert_eq!(source.vocabs(1, &[]).await.unwrap().len(), 1);
        assert_eq!(source.call_count(), 2);
    }

    #[tokio::test]
    async fn failing_unit_is_skipped_by_pool_loader() {
        let source = MockContentSource::new()
            .with_unit(unit("u1"), vec![question("r1"), question("r2")])
            .with_unit(unit("u2"), vec![question("r3")])
            .failing("u2")
            .failing("sentence");

        let pools = load_pools(&source, &PoolLimits::default()).await;

        assert!(matches!(pools.sentences, PoolState::Failed(_)));
        let reading = pools.reading.items().unwrap();
        assert_eq!(reading.len(), 2);
        assert!(reading.iter().all(|q| q.unit.as_ref().unwrap().title == "U1"));
        // vocab + sentence + units + two unit fetches
        assert_eq!(source.call_count(), 5);
    }

    #[tokio::test]
    async fn records_session_telemetry() {
        let source = Arc::new(MockContentSource::new());
        let mut telemetry = SessionTelemetry::new(source.clone());

        telemetry.start("vocab").await;
        telemetry.answer("v1", "vocab", "字", true).await;
        telemetry.complete().await;

        let sessions = source.sessions();
        assert_eq!(sessions.len(), 1);
        assert_eq!(source.answers()[0].session_id, sessions[0]);
        assert_eq!(source.completed(), sessions);
    }
}
