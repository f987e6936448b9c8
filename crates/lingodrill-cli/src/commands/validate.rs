//! The `lingodrill validate` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use lingodrill_content::FileContentSource;
use lingodrill_core::model::SentenceItem;
use lingodrill_core::normalize::{group_by_lesson, PoolState};
use lingodrill_core::traits::{load_pools, PoolLimits};

pub async fn execute(pools_dir: PathBuf) -> Result<()> {
    anyhow::ensure!(
        pools_dir.is_dir(),
        "pool directory {} not found",
        pools_dir.display()
    );
    let source = FileContentSource::new(&pools_dir);
    let pools = load_pools(&source, &PoolLimits::default()).await;

    let mut table = Table::new();
    table.set_header(vec!["Pool", "Items", "Status"]);
    table.add_row(pool_row("Vocabulary", &pools.vocabs));
    table.add_row(pool_row("Sentences", &pools.sentences));
    table.add_row(pool_row("Reading", &pools.reading));
    println!("{table}");

    let mut warnings = Vec::new();
    if let Some(vocabs) = pools.vocabs.items() {
        let untagged = vocabs.iter().filter(|v| v.unit_tag.is_none()).count();
        if untagged > 0 {
            warnings.push(format!("{untagged} vocabulary item(s) have no unit tag"));
        }
        let no_pinyin = vocabs.iter().filter(|v| v.pinyin.is_empty()).count();
        if no_pinyin > 0 {
            warnings.push(format!("{no_pinyin} vocabulary item(s) have no pinyin"));
        }
    }
    if let Some(sentences) = pools.sentences.items() {
        print_lessons(sentences);
        let loose = sentences.iter().filter(|s| s.lesson_id.is_none()).count();
        if loose > 0 {
            warnings.push(format!("{loose} sentence(s) belong to no lesson"));
        }
    }
    if let Some(reading) = pools.reading.items() {
        println!("Reading units: {}", pools.units.len());
        let empty = pools
            .units
            .iter()
            .filter(|u| !reading.iter().any(|q| q.unit.as_ref().is_some_and(|qu| qu.id == u.id)))
            .count();
        if empty > 0 {
            warnings.push(format!("{empty} reading unit(s) have no questions"));
        }
    }

    for w in &warnings {
        println!("  WARNING: {w}");
    }

    let failures = pools.failures();
    if !failures.is_empty() {
        let names: Vec<_> = failures.iter().map(|(pool, _)| *pool).collect();
        anyhow::bail!("failed to load pool(s): {}", names.join(", "));
    }

    if warnings.is_empty() {
        println!("All pools valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}

fn pool_row<T>(name: &str, pool: &PoolState<T>) -> Vec<Cell> {
    match pool {
        PoolState::Ready(items) => vec![Cell::new(name), Cell::new(items.len()), Cell::new("ok")],
        PoolState::Failed(e) => vec![Cell::new(name), Cell::new("-"), Cell::new(format!("FAIL: {e}"))],
        PoolState::Loading => vec![Cell::new(name), Cell::new("-"), Cell::new("loading")],
    }
}

fn print_lessons(sentences: &[SentenceItem]) {
    let lessons = group_by_lesson(sentences);
    if lessons.is_empty() {
        return;
    }
    println!("Lessons: {}", lessons.len());
    for lesson in &lessons {
        println!("  {} ({} sentences)", lesson.title, lesson.sentences.len());
    }
}
