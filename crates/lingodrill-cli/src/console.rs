//! Terminal input and question rendering.

use tokio::sync::mpsc;

use lingodrill_core::driver::QuizInput;
use lingodrill_core::model::{RenderContent, TestQuestion};
use lingodrill_core::quiz::SubmitConfirmation;

/// Read stdin lines on a plain thread and forward them parsed.
///
/// A blocking read cannot be cancelled, so it must not live on the runtime:
/// the thread simply dies with the process.
pub fn spawn_stdin<T, F>(parse: F) -> mpsc::Receiver<T>
where
    T: Send + 'static,
    F: Fn(&str) -> T + Send + 'static,
{
    let (tx, rx) = mpsc::channel(16);
    std::thread::spawn(move || {
        for line in std::io::stdin().lines() {
            let Ok(line) = line else { break };
            if tx.blocking_send(parse(&line)).is_err() {
                break;
            }
        }
    });
    rx
}

/// One line typed during a quiz.
pub fn parse_quiz_input(line: &str) -> QuizInput {
    match line.trim() {
        ":next" | ":n" => QuizInput::Next,
        ":back" | ":b" => QuizInput::Back,
        ":submit" => QuizInput::Finish(SubmitConfirmation::Unconfirmed),
        ":submit!" => QuizInput::Finish(SubmitConfirmation::Confirmed),
        ":quit" | ":q" => QuizInput::Quit,
        answer => QuizInput::Answer(answer.to_string()),
    }
}

pub fn render_question(question: &TestQuestion, index: usize, total: usize) {
    println!();
    println!("[{}/{}] ({})", index + 1, total, question.source_type);
    if let Some(content) = &question.render_content {
        match content {
            RenderContent::Text(text) => println!("  {text}"),
            RenderContent::Bilingual { zh, vi } => {
                println!("  {zh}");
                println!("  {vi}");
            }
        }
    }
    println!("  {}", question.prompt_text);
    if let Some(hint) = &question.pinyin_hint {
        println!("  ({hint})");
    }
    if let Some(options) = question.options.as_ref().filter(|o| !o.is_empty()) {
        for (i, option) in options.iter().enumerate() {
            println!("    {}. {option}", i + 1);
        }
    }
}

/// Resolve a typed option number to the option text.
pub fn resolve_option(question: &TestQuestion, answer: &str) -> String {
    question
        .options
        .as_ref()
        .and_then(|options| {
            let n: usize = answer.trim().parse().ok()?;
            options.get(n.checked_sub(1)?).cloned()
        })
        .unwrap_or_else(|| answer.to_string())
}
