//! HTML result page generator.
//!
//! Produces a self-contained HTML file with all CSS inlined.

use anyhow::Result;
use std::path::Path;

use lingodrill_core::grader::{percentage, Breakdown, CategoryTally, GradeResult};
use lingodrill_core::quiz::QuizOutcome;

use crate::run::{RunSummary, ScoreBand};

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

fn open_page(html: &mut String, run: &RunSummary) {
    html.push_str("<!DOCTYPE html>\n<html lang=\"vi\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>lingodrill result: {}</title>\n",
        html_escape(run.mode.id())
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    html.push_str("<header>\n");
    html.push_str("<h1>lingodrill result</h1>\n");
    let elapsed = run
        .elapsed_secs
        .map(|s| format!(" | {}m {:02}s", s / 60, s % 60))
        .unwrap_or_default();
    html.push_str(&format!(
        "<p class=\"meta\">Mode: <strong>{}</strong> | {}{}</p>\n",
        html_escape(run.mode.id()),
        run.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
        elapsed
    ));
    html.push_str("</header>\n");
}

fn score_card(html: &mut String, score: u32, detail: &str) {
    let band = ScoreBand::of(score);
    html.push_str(&format!(
        "<section class=\"score {}\">\n<p class=\"big\" style=\"color: {}\">{}%</p>\n<p>{} | {}</p>\n</section>\n",
        band.class(),
        band.color(),
        score,
        band.label(),
        html_escape(detail)
    ));
}

fn close_page(html: &mut String, raw: &impl serde::Serialize) {
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(&html_escape(
        &serde_json::to_string_pretty(raw).unwrap_or_default(),
    ));
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");
    html.push_str("</body>\n</html>");
}

/// Generate a result page for a graded test.
pub fn generate_html(result: &GradeResult, run: &RunSummary) -> String {
    let mut html = String::new();
    open_page(&mut html, run);

    score_card(
        &mut html,
        result.score,
        &format!(
            "{} correct, {} incorrect, {} questions",
            result.correct, result.incorrect, result.total
        ),
    );

    // Per-category breakdown
    html.push_str("<section class=\"breakdown\">\n");
    html.push_str("<h2>Breakdown</h2>\n");
    html.push_str("<table class=\"summary\">\n");
    html.push_str("<thead><tr><th>Category</th><th>Correct</th><th>Total</th><th>Score</th></tr></thead>\n");
    html.push_str("<tbody>\n");
    for (name, tally) in categories(&result.breakdown) {
        if tally.total == 0 {
            continue;
        }
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}%</td></tr>\n",
            name,
            tally.correct,
            tally.total,
            tally.percent()
        ));
    }
    html.push_str("</tbody></table>\n");
    html.push_str(&generate_bar_chart(&result.breakdown));
    html.push_str("</section>\n");

    // Misses
    html.push_str("<section class=\"results\">\n");
    html.push_str("<h2>Review</h2>\n");
    let misses: Vec<_> = result.misses().collect();
    if misses.is_empty() {
        html.push_str("<p class=\"pass\">Every answer was correct.</p>\n");
    } else {
        html.push_str("<table class=\"results-table\">\n");
        html.push_str("<thead><tr><th>Type</th><th>Question</th><th>Your answer</th><th>Correct answer</th></tr></thead>\n");
        html.push_str("<tbody>\n");
        for miss in misses {
            let answer = if miss.user_answer.trim().is_empty() {
                "<em>(no answer)</em>".to_string()
            } else {
                html_escape(&miss.user_answer)
            };
            html.push_str(&format!(
                "<tr class=\"fail\"><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                miss.source_type,
                html_escape(&miss.prompt_text),
                answer,
                html_escape(&miss.correct_answer)
            ));
        }
        html.push_str("</tbody></table>\n");
    }
    html.push_str("</section>\n");

    close_page(&mut html, result);
    html
}

/// Generate a result page for any quiz outcome.
pub fn generate_outcome_html(outcome: &QuizOutcome, run: &RunSummary) -> String {
    let rows: Vec<(&str, String)> = match outcome {
        QuizOutcome::Paced(result) => return generate_html(result, run),
        QuizOutcome::Challenge(r) => vec![
            ("Score", format!("{:.1}", r.score)),
            ("Answered", r.total.to_string()),
            ("Correct", r.correct.to_string()),
            ("Incorrect", r.incorrect.to_string()),
            ("Ended by", if r.game_over { "three strikes" } else { "last question" }.to_string()),
        ],
        QuizOutcome::TimeAttack(r) => vec![
            ("Points", r.score.to_string()),
            ("Answered", r.total.to_string()),
            ("Correct", r.correct.to_string()),
            ("Incorrect", r.incorrect.to_string()),
            ("Time", format!("{:.1}s", r.time_secs)),
        ],
        QuizOutcome::SpeedRound(r) => vec![
            ("Answered", r.total.to_string()),
            ("Correct", r.correct.to_string()),
            ("Incorrect", r.incorrect.to_string()),
            ("Timed out", r.timeouts.to_string()),
        ],
    };
    let (correct, total) = match outcome {
        QuizOutcome::Paced(r) => (r.correct, r.total),
        QuizOutcome::Challenge(r) => (r.correct, r.total),
        QuizOutcome::TimeAttack(r) => (r.correct, r.total),
        QuizOutcome::SpeedRound(r) => (r.correct, r.total),
    };

    let mut html = String::new();
    open_page(&mut html, run);
    score_card(
        &mut html,
        percentage(correct, total),
        &format!("{correct} of {total} correct"),
    );

    html.push_str("<section class=\"breakdown\">\n<table class=\"summary\">\n<tbody>\n");
    for (label, value) in rows {
        html.push_str(&format!(
            "<tr><th>{}</th><td>{}</td></tr>\n",
            label,
            html_escape(&value)
        ));
    }
    html.push_str("</tbody></table>\n</section>\n");

    close_page(&mut html, outcome);
    html
}

/// Write a result page to a file.
pub fn write_html_report(html: &str, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

fn categories(breakdown: &Breakdown) -> [(&'static str, CategoryTally); 3] {
    [
        ("Vocabulary", breakdown.vocab),
        ("Sentences", breakdown.sentence),
        ("Reading", breakdown.reading),
    ]
}

fn generate_bar_chart(breakdown: &Breakdown) -> String {
    let bar_height = 30;
    let max_width = 400;
    let padding = 10;
    let label_width = 120;

    let rows: Vec<(&str, u32)> = categories(breakdown)
        .into_iter()
        .filter(|(_, tally)| tally.total > 0)
        .map(|(name, tally)| (name, tally.percent()))
        .collect();
    if rows.is_empty() {
        return String::new();
    }

    let total_height = rows.len() * (bar_height + padding) + padding;

    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        label_width + max_width + 60,
        total_height
    );

    for (i, (name, score)) in rows.iter().enumerate() {
        let y = i * (bar_height + padding) + padding;
        let width = *score as usize * max_width / 100;

        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"14\" fill=\"currentColor\" text-anchor=\"end\" dominant-baseline=\"middle\">{}</text>\n",
            label_width - 10,
            y + bar_height / 2,
            name
        ));
        svg.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" rx=\"4\"/>\n",
            label_width,
            y,
            width,
            bar_height,
            ScoreBand::of(*score).color()
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" dominant-baseline=\"middle\">{}%</text>\n",
            label_width + width + 8,
            y + bar_height / 2,
            score
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --pass: #dcfce7; --fail: #fde2e2; --fair: #fef9c3; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --pass: #064e3b; --fail: #7f1d1d; --fair: #713f12; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
.score { border-radius: 8px; padding: 1rem 2rem; margin: 1rem 0; text-align: center; }
.score.good { background: var(--pass); }
.score.fair { background: var(--fair); }
.score.poor { background: var(--fail); }
.big { font-size: 3rem; font-weight: bold; margin: 0; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); }
.pass { background: var(--pass); }
.fail { background: var(--fail); }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
svg { margin: 1rem 0; }
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use lingodrill_core::grader::QuestionResult;
    use lingodrill_core::mode::TestMode;
    use lingodrill_core::model::SourceType;
    use lingodrill_core::quiz::ChallengeResult;

    fn make_result() -> GradeResult {
        GradeResult {
            score: 67,
            total: 3,
            correct: 2,
            incorrect: 1,
            breakdown: Breakdown {
                vocab: CategoryTally {
                    total: 2,
                    correct: 2,
                },
                sentence: CategoryTally::default(),
                reading: CategoryTally {
                    total: 1,
                    correct: 0,
                },
            },
            per_question: vec![
                QuestionResult {
                    id: "v1".into(),
                    source_type: SourceType::Vocab,
                    prompt_text: "xin chào".into(),
                    user_answer: "你好".into(),
                    correct_answer: "你好".into(),
                    correct: true,
                },
                QuestionResult {
                    id: "v2".into(),
                    source_type: SourceType::Vocab,
                    prompt_text: "cảm ơn".into(),
                    user_answer: "谢谢".into(),
                    correct_answer: "谢谢".into(),
                    correct: true,
                },
                QuestionResult {
                    id: "r1".into(),
                    source_type: SourceType::Reading,
                    prompt_text: "<b>Ai</b> là giáo viên?".into(),
                    user_answer: String::new(),
                    correct_answer: "他".into(),
                    correct: false,
                },
            ],
        }
    }

    #[test]
    fn html_report_contains_required_elements() {
        let html = generate_html(&make_result(), &RunSummary::new(TestMode::QuickTest));

        assert!(html.contains("<html"));
        assert!(html.contains("</html>"));
        assert!(html.contains("67%"));
        assert!(html.contains("Fair"));
        assert!(html.contains("quick-test"));
        assert!(html.contains("Vocabulary"));
        // Empty categories are left out.
        assert!(!html.contains("<td>Sentences</td>"));
        assert!(html.contains("(no answer)"));
    }

    #[test]
    fn question_text_is_escaped() {
        let html = generate_html(&make_result(), &RunSummary::new(TestMode::ClassicExam));
        assert!(html.contains("&lt;b&gt;Ai&lt;/b&gt;"));
        assert!(!html.contains("<b>Ai</b>"));
    }

    #[test]
    fn perfect_score_has_no_review_table() {
        let mut result = make_result();
        result.per_question.truncate(2);
        result.score = 100;
        let html = generate_html(&result, &RunSummary::new(TestMode::QuickTest).with_elapsed(75));
        assert!(html.contains("Every answer was correct."));
        assert!(html.contains("1m 15s"));
        assert!(html.contains("class=\"score good\""));
    }

    #[test]
    fn challenge_outcome_page() {
        let outcome = QuizOutcome::Challenge(ChallengeResult {
            score: 3.5,
            total: 5,
            correct: 2,
            incorrect: 3,
            game_over: true,
        });
        let html = generate_outcome_html(&outcome, &RunSummary::new(TestMode::Challenge));
        assert!(html.contains("three strikes"));
        assert!(html.contains("40%"));
        assert!(html.contains("Needs work"));
    }

    #[test]
    fn html_report_write_to_file() {
        let html = generate_html(&make_result(), &RunSummary::new(TestMode::QuickTest));
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("result.html");

        write_html_report(&html, &path).unwrap();
        assert!(path.exists());

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<html"));
    }
}
