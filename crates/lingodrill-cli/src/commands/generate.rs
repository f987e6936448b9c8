//! The `lingodrill generate` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use lingodrill_content::config::load_config_from;
use lingodrill_core::mode::TestMode;
use lingodrill_core::model::{ReadingQuestion, ReadingUnit, SourceType};
use lingodrill_core::reading::pick_unit;
use lingodrill_core::traits::Pools;

use crate::test_file::GeneratedTest;

pub async fn execute(
    pools_dir: PathBuf,
    mode_str: String,
    count: Option<usize>,
    out: PathBuf,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let mode: TestMode = mode_str.parse().map_err(anyhow::Error::msg)?;
    let config = load_config_from(config_path.as_deref())?;
    let pools = super::load_snapshot(&pools_dir, &config).await?;

    let test = if mode.uses_generator() {
        let target = count.unwrap_or(match mode {
            TestMode::ClassicExam => config.test.count,
            _ => mode.question_count(),
        });
        anyhow::ensure!(target >= 1, "count must be at least 1");
        let questions = pools.generate(target, config.ratios());
        anyhow::ensure!(
            !questions.is_empty(),
            "no questions could be generated from {}",
            pools_dir.display()
        );
        if questions.len() < target {
            eprintln!(
                "Warning: only {} of {target} questions available",
                questions.len()
            );
        }
        GeneratedTest::new(mode, questions)
    } else {
        let (unit, questions) = random_unit(&pools)?;
        eprintln!("Reading unit: {}", unit.title);
        GeneratedTest::random_reading(unit, questions)?
    };

    test.save_json(&out)?;
    print_summary(&test);
    println!("Test saved to: {}", out.display());
    Ok(())
}

/// A random unit that has at least one question, with its questions.
fn random_unit(pools: &Pools) -> Result<(ReadingUnit, Vec<ReadingQuestion>)> {
    let reading = pools.reading.items().unwrap_or_default();
    let of_unit = |unit: &ReadingUnit| -> Vec<ReadingQuestion> {
        reading
            .iter()
            .filter(|q| q.unit.as_ref().is_some_and(|u| u.id == unit.id))
            .cloned()
            .collect()
    };
    let candidates: Vec<ReadingUnit> = pools
        .units
        .iter()
        .filter(|u| !of_unit(u).is_empty())
        .cloned()
        .collect();
    let unit = pick_unit(&candidates, &mut rand::thread_rng())
        .cloned()
        .context("no reading unit has any questions")?;
    let questions = of_unit(&unit);
    Ok((unit, questions))
}

fn print_summary(test: &GeneratedTest) {
    use comfy_table::{Cell, Table};

    let count = |kind: SourceType| test.questions.iter().filter(|q| q.source_type == kind).count();

    let mut table = Table::new();
    table.set_header(vec!["Mode", "Questions", "Vocab", "Sentence", "Reading"]);
    table.add_row(vec![
        Cell::new(test.mode),
        Cell::new(test.questions.len()),
        Cell::new(count(SourceType::Vocab)),
        Cell::new(count(SourceType::Sentence)),
        Cell::new(count(SourceType::Reading)),
    ]);
    println!("{table}");
}
