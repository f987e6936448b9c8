//! The `lingodrill speed-round` command.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use rand::seq::SliceRandom;

use lingodrill_content::config::load_config_from;
use lingodrill_core::driver::{drive, DriverEvent};
use lingodrill_core::quiz::{AnswerOutcome, QuizEngine, QuizOutcome, SpeedRound};
use lingodrill_core::timer::TokioClock;

use crate::console::{parse_quiz_input, spawn_stdin};

pub async fn execute(
    pools_dir: PathBuf,
    deadline_secs: Option<f64>,
    count: usize,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let deadline = match deadline_secs {
        Some(secs) => Duration::try_from_secs_f64(secs)
            .ok()
            .filter(|d| !d.is_zero())
            .ok_or_else(|| anyhow::anyhow!("invalid deadline: {secs}"))?,
        None => config.deadline(),
    };
    anyhow::ensure!(count >= 1, "count must be at least 1");

    let pools = super::load_snapshot(&pools_dir, &config).await?;
    let mut items = pools.vocabs.items().unwrap_or_default().to_vec();
    anyhow::ensure!(!items.is_empty(), "the vocabulary pool is empty");
    items.shuffle(&mut rand::thread_rng());
    items.truncate(count);

    println!(
        "Speed round: {} words, {:.1}s each. Type the hanzi for each meaning.",
        items.len(),
        deadline.as_secs_f64()
    );

    let clock = Arc::new(TokioClock);
    let mut round = SpeedRound::new(deadline, clock.clone()).with_time_up(Box::new(|outcome: &AnswerOutcome| {
        println!("  Time's up! {}", outcome.correct_answer);
    }));

    let mut queue = items.into_iter();
    if let Some(first) = queue.next() {
        round.load(&first)?;
        prompt(&round);
    }

    let inputs = spawn_stdin(parse_quiz_input);
    let outcome = drive(&mut round, inputs, clock.as_ref(), |round, event| {
        match event {
            DriverEvent::Answered(outcome) if outcome.correct => println!("  Correct!"),
            DriverEvent::Answered(outcome) => println!("  Wrong. {}", outcome.correct_answer),
            DriverEvent::TimedOut(_) => {}
            DriverEvent::Moved | DriverEvent::Rejected(_) => return,
        }
        match queue.next() {
            Some(next) => {
                if round.load(&next).is_ok() {
                    prompt(round);
                }
            }
            None => round.abandon(),
        }
    })
    .await;

    if let Some(QuizOutcome::SpeedRound(tally)) = outcome {
        println!(
            "\nCorrect: {}/{} ({}%), timeouts: {}",
            tally.correct,
            tally.total,
            tally.percent(),
            tally.timeouts
        );
    }
    Ok(())
}

fn prompt(round: &SpeedRound) {
    if let Some(question) = round.current() {
        println!("\n[{}] {}", round.tally().total + 1, question.prompt_text);
    }
}
