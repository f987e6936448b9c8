//! The `lingodrill grade` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use lingodrill_core::grader::{CategoryTally, GradeResult};
use lingodrill_report::{generate_html, RunSummary, ScoreBand};

use crate::test_file::{load_answers, GeneratedTest};

pub fn execute(
    test_path: PathBuf,
    answers_path: PathBuf,
    format: String,
    out: Option<PathBuf>,
) -> Result<()> {
    let test = GeneratedTest::load_json(&test_path)?;
    let answers = load_answers(&answers_path)?;

    let unknown = answers
        .keys()
        .filter(|id| !test.questions.iter().any(|q| &q.id == *id))
        .count();
    if unknown > 0 {
        eprintln!("Warning: {unknown} answer(s) do not match any question in the test");
    }

    let result = test.grade(&answers);

    let output = match format.as_str() {
        "text" => render_text(&result),
        "json" => serde_json::to_string_pretty(&result).context("failed to serialize result")?,
        "html" => generate_html(&result, &RunSummary::new(test.mode)),
        other => anyhow::bail!("unknown format '{other}' (expected text, json or html)"),
    };

    match out {
        Some(path) => {
            std::fs::write(&path, output)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("Result written to: {}", path.display());
        }
        None => println!("{output}"),
    }
    Ok(())
}

/// Score line, per-category table and the list of misses.
pub(crate) fn render_text(result: &GradeResult) -> String {
    let mut table = Table::new();
    table.set_header(vec!["Category", "Correct", "Total", "Score"]);
    let categories = [
        ("Vocabulary", result.breakdown.vocab),
        ("Sentences", result.breakdown.sentence),
        ("Reading", result.breakdown.reading),
    ];
    for (name, tally) in categories.iter().filter(|(_, t)| t.total > 0) {
        table.add_row(tally_row(name, tally));
    }

    let mut text = format!(
        "Score: {}% ({}/{} correct) - {}\n\n{table}\n",
        result.score,
        result.correct,
        result.total,
        ScoreBand::of(result.score).label()
    );

    let misses: Vec<_> = result.misses().collect();
    if !misses.is_empty() {
        text.push_str("\nReview:\n");
        for miss in misses {
            let given = if miss.user_answer.is_empty() {
                "(no answer)"
            } else {
                miss.user_answer.as_str()
            };
            text.push_str(&format!(
                "  [{}] {}\n    your answer: {given}\n    correct:     {}\n",
                miss.id, miss.prompt_text, miss.correct_answer
            ));
        }
    }
    text
}

fn tally_row(name: &str, tally: &CategoryTally) -> Vec<Cell> {
    vec![
        Cell::new(name),
        Cell::new(tally.correct),
        Cell::new(tally.total),
        Cell::new(format!("{}%", tally.percent())),
    ]
}
