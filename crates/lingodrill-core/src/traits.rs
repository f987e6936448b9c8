//! Seams to the outside world: where content comes from and where session
//! telemetry goes.
//!
//! These async traits are implemented by the `lingodrill-content` crate
//! (HTTP API, in-memory mock, JSON files on disk).

use async_trait::async_trait;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::generator::TestRatios;
use crate::model::{ReadingQuestion, ReadingUnit, SentenceItem, TestQuestion, VocabItem};
use crate::normalize::{attach_unit, PoolState};

// ---------------------------------------------------------------------------
// Content source trait
// ---------------------------------------------------------------------------

/// Anything that can serve learning content, already normalized.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Human-readable source name (e.g. "api", "files").
    fn name(&self) -> &str;

    /// Vocabulary, optionally restricted to some unit tags.
    async fn vocabs(&self, limit: usize, source_tags: &[String]) -> anyhow::Result<Vec<VocabItem>>;

    async fn sentences(&self, limit: usize) -> anyhow::Result<Vec<SentenceItem>>;

    async fn reading_units(&self) -> anyhow::Result<Vec<ReadingUnit>>;

    /// Up to `count` questions of one unit.
    async fn unit_questions(
        &self,
        unit_id: &str,
        count: usize,
    ) -> anyhow::Result<Vec<ReadingQuestion>>;
}

// ---------------------------------------------------------------------------
// Session sink trait
// ---------------------------------------------------------------------------

/// One answer as reported to the session log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerEvent {
    pub session_id: String,
    pub question_id: String,
    /// `vocab`, `sentence`, `reading`, or a drill name.
    pub question_type: String,
    pub user_answer: String,
    pub correct: bool,
}

/// Receiver of study-session telemetry.
#[async_trait]
pub trait SessionSink: Send + Sync {
    /// Open a session and return its id.
    async fn create_session(&self, mode: &str) -> anyhow::Result<String>;

    async fn record_answer(&self, event: &AnswerEvent) -> anyhow::Result<()>;

    async fn complete_session(&self, session_id: &str) -> anyhow::Result<()>;
}

// ---------------------------------------------------------------------------
// Pool loading
// ---------------------------------------------------------------------------

/// How much to fetch when loading pools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolLimits {
    pub vocab_limit: usize,
    pub sentence_limit: usize,
    pub questions_per_unit: usize,
    #[serde(default)]
    pub source_tags: Vec<String>,
}

impl Default for PoolLimits {
    fn default() -> Self {
        Self {
            vocab_limit: 10_000,
            sentence_limit: 10_000,
            questions_per_unit: 100,
            source_tags: Vec::new(),
        }
    }
}

/// The three content pools plus the units the reading questions belong to.
#[derive(Debug, Clone, PartialEq)]
pub struct Pools {
    pub vocabs: PoolState<VocabItem>,
    pub sentences: PoolState<SentenceItem>,
    pub reading: PoolState<ReadingQuestion>,
    pub units: Vec<ReadingUnit>,
}

impl Default for Pools {
    fn default() -> Self {
        Self {
            vocabs: PoolState::Loading,
            sentences: PoolState::Loading,
            reading: PoolState::Loading,
            units: Vec::new(),
        }
    }
}

impl Pools {
    /// Whether any pool has not finished loading.
    pub fn is_loading(&self) -> bool {
        self.vocabs.is_loading() || self.sentences.is_loading() || self.reading.is_loading()
    }

    /// Names of pools that failed, with the reason.
    pub fn failures(&self) -> Vec<(&'static str, &str)> {
        let mut failed = Vec::new();
        if let PoolState::Failed(e) = &self.vocabs {
            failed.push(("vocab", e.as_str()));
        }
        if let PoolState::Failed(e) = &self.sentences {
            failed.push(("sentence", e.as_str()));
        }
        if let PoolState::Failed(e) = &self.reading {
            failed.push(("reading", e.as_str()));
        }
        failed
    }

    /// Generate a composite test from whatever has loaded.
    pub fn generate(&self, target_count: usize, ratios: TestRatios) -> Vec<TestQuestion> {
        crate::generator::generate(
            self.vocabs.items().unwrap_or_default(),
            self.sentences.items().unwrap_or_default(),
            self.reading.items().unwrap_or_default(),
            target_count,
            ratios,
        )
    }
}

fn settle<T>(pool: &str, result: anyhow::Result<Vec<T>>) -> PoolState<T> {
    match result {
        Ok(items) => {
            debug!(pool, count = items.len(), "pool loaded");
            PoolState::Ready(items)
        }
        Err(e) => {
            warn!(pool, error = %e, "pool failed to load, treating it as empty");
            PoolState::Failed(format!("{e:#}"))
        }
    }
}

/// Fetch every pool. A failed fetch leaves that pool `Failed` (read as
/// empty) instead of failing the whole load; a unit whose questions cannot
/// be fetched is skipped.
pub async fn load_pools(source: &dyn ContentSource, limits: &PoolLimits) -> Pools {
    let (vocabs, sentences, units) = futures::join!(
        source.vocabs(limits.vocab_limit, &limits.source_tags),
        source.sentences(limits.sentence_limit),
        source.reading_units(),
    );

    let vocabs = settle("vocab", vocabs);
    let sentences = settle("sentence", sentences);

    let (reading, units) = match units {
        Ok(units) => {
            let fetches = units
                .iter()
                .map(|unit| source.unit_questions(&unit.id, limits.questions_per_unit));
            let mut questions = Vec::new();
            for (unit, result) in units.iter().zip(join_all(fetches).await) {
                match result {
                    Ok(mut fetched) => {
                        attach_unit(&mut fetched, unit);
                        questions.extend(fetched);
                    }
                    Err(e) => {
                        warn!(unit = %unit.id, error = %e, "skipping reading unit");
                    }
                }
            }
            debug!(units = units.len(), questions = questions.len(), "reading pool loaded");
            (PoolState::Ready(questions), units)
        }
        Err(e) => (settle::<ReadingQuestion>("reading", Err(e)), Vec::new()),
    };

    Pools {
        vocabs,
        sentences,
        reading,
        units,
    }
}
