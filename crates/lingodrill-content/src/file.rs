//! Content pools stored as JSON files in a directory.
//!
//! `lingodrill fetch` writes a snapshot with [`save_pools`]; every other
//! command can then run offline from it. Files are read through the same
//! normalizer as API responses, so a raw API dump works too.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use lingodrill_core::model::{ReadingQuestion, ReadingUnit, SentenceItem, VocabItem};
use lingodrill_core::normalize::{
    normalize_reading_questions, normalize_reading_units, normalize_sentences, normalize_vocabs,
};
use lingodrill_core::traits::{ContentSource, Pools};

pub const VOCABS_FILE: &str = "vocabs.json";
pub const SENTENCES_FILE: &str = "sentences.json";
pub const UNITS_FILE: &str = "units.json";
/// Reading questions of every unit, each carrying its unit.
pub const READING_FILE: &str = "reading.json";

/// Reads pools from a snapshot directory.
pub struct FileContentSource {
    dir: PathBuf,
}

impl FileContentSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    async fn read(&self, name: &str) -> Result<Value> {
        let path = self.dir.join(name);
        let content = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))
    }
}

#[async_trait]
impl ContentSource for FileContentSource {
    fn name(&self) -> &str {
        "files"
    }

    async fn vocabs(&self, limit: usize, source_tags: &[String]) -> Result<Vec<VocabItem>> {
        let payload = self.read(VOCABS_FILE).await?;
        Ok(normalize_vocabs(&payload)
            .into_iter()
            .filter(|v| {
                source_tags.is_empty()
                    || v.unit_tag
                        .as_ref()
                        .is_some_and(|tag| source_tags.contains(tag))
            })
            .take(limit)
            .collect())
    }

    async fn sentences(&self, limit: usize) -> Result<Vec<SentenceItem>> {
        let payload = self.read(SENTENCES_FILE).await?;
        let mut sentences = normalize_sentences(&payload);
        sentences.truncate(limit);
        Ok(sentences)
    }

    async fn reading_units(&self) -> Result<Vec<ReadingUnit>> {
        let payload = self.read(UNITS_FILE).await?;
        Ok(normalize_reading_units(&payload))
    }

    async fn unit_questions(&self, unit_id: &str, count: usize) -> Result<Vec<ReadingQuestion>> {
        let payload = self.read(READING_FILE).await?;
        Ok(normalize_reading_questions(&payload)
            .into_iter()
            .filter(|q| q.unit.as_ref().is_some_and(|u| u.id == unit_id))
            .take(count)
            .collect())
    }
}

async fn write_json<T: Serialize + ?Sized>(dir: &Path, name: &str, value: &T) -> Result<()> {
    let path = dir.join(name);
    let json = serde_json::to_string_pretty(value)?;
    tokio::fs::write(&path, json)
        .await
        .with_context(|| format!("failed to write {}", path.display()))
}

/// Write loaded pools as a snapshot. Pools that are not ready are written
/// as empty so the snapshot is always complete.
pub async fn save_pools(dir: &Path, pools: &Pools) -> Result<()> {
    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("failed to create {}", dir.display()))?;

    let vocabs = pools.vocabs.items().unwrap_or_default();
    let sentences = pools.sentences.items().unwrap_or_default();
    let reading = pools.reading.items().unwrap_or_default();

    write_json(dir, VOCABS_FILE, vocabs).await?;
    write_json(dir, SENTENCES_FILE, sentences).await?;
    write_json(dir, UNITS_FILE, &pools.units).await?;
    write_json(dir, READING_FILE, reading).await?;

    debug!(
        dir = %dir.display(),
        vocabs = vocabs.len(),
        sentences = sentences.len(),
        units = pools.units.len(),
        reading = reading.len(),
        "pool snapshot written"
    );
    Ok(())
}
