//! The `lingodrill take` command.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use lingodrill_content::config::load_config_from;
use lingodrill_core::driver::{drive, DriverEvent, QuizInput};
use lingodrill_core::error::QuizError;
use lingodrill_core::grader::GradeResult;
use lingodrill_core::mode::TestMode;
use lingodrill_core::model::TestQuestion;
use lingodrill_core::quiz::{
    AnswerOutcome, ChallengeQuiz, PacedQuiz, Phase, QuizEngine, QuizOutcome, QuizRunState,
    SubmitConfirmation, TimeAttackQuiz,
};
use lingodrill_core::session::SessionTelemetry;
use lingodrill_core::timer::{Clock, PendingTimer, TimerToken, TokioClock};
use lingodrill_report::{generate_outcome_html, write_html_report, RunSummary};

use crate::console::{parse_quiz_input, render_question, resolve_option, spawn_stdin};
use crate::test_file::GeneratedTest;

pub async fn execute(
    test_path: PathBuf,
    report: Option<PathBuf>,
    track: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let test = GeneratedTest::load_json(&test_path)?;
    let config = load_config_from(config_path.as_deref())?;
    let mut telemetry = super::telemetry(track, &config)?;
    if let Some(t) = telemetry.as_mut() {
        t.start(test.mode.id()).await;
    }

    let clock = Arc::new(TokioClock);
    let started = clock.now();

    println!("{} ({} questions)", test.mode, test.questions.len());
    println!("Type an answer or option number. Commands: :next :back :submit :quit");

    let (outcome, answered) = match test.mode {
        TestMode::RandomReading => (take_reading(&test).await?, Vec::new()),
        mode => {
            let questions = test.questions.clone();
            let engine: Box<dyn QuizEngine> = match mode {
                TestMode::Challenge => Box::new(ChallengeQuiz::new(questions, clock.clone())?),
                TestMode::TimeAttack => Box::new(TimeAttackQuiz::new(questions, clock.clone())?),
                _ => Box::new(PacedQuiz::new(
                    questions,
                    config.session_duration(),
                    clock.clone(),
                )?),
            };
            run_engine(engine, mode, clock.as_ref()).await
        }
    };

    let Some(outcome) = outcome else {
        println!("\nTest abandoned.");
        if let Some(t) = telemetry.as_mut() {
            t.complete().await;
        }
        return Ok(());
    };

    if let Some(t) = telemetry.as_mut() {
        report_answers(t, &test.questions, &outcome, &answered).await;
        t.complete().await;
    }

    print_outcome(&outcome);

    if let Some(path) = report {
        let elapsed = clock.now().saturating_duration_since(started).as_secs();
        let run = RunSummary::new(test.mode).with_elapsed(elapsed);
        write_html_report(&generate_outcome_html(&outcome, &run), &path)?;
        eprintln!("HTML report: {}", path.display());
    }

    Ok(())
}

/// Drive a timed engine from stdin until it ends. Returns the outcome and
/// every answer or timeout recorded along the way.
async fn run_engine(
    engine: Box<dyn QuizEngine>,
    mode: TestMode,
    clock: &dyn Clock,
) -> (Option<QuizOutcome>, Vec<AnswerOutcome>) {
    let paced = mode.session_duration().is_some();
    let mut engine = OptionNumbers(engine);
    let mut answered = Vec::new();

    show(&engine);
    let inputs = spawn_stdin(parse_quiz_input);
    let outcome = drive(&mut engine, inputs, clock, |engine, event| {
        match event {
            DriverEvent::Answered(outcome) => {
                if paced {
                    println!("  saved");
                    // The paced engine waits for an explicit move.
                    if let Err(e) = engine.advance() {
                        println!("  {e}");
                    }
                } else {
                    reveal(&outcome);
                }
                answered.push(outcome);
            }
            DriverEvent::TimedOut(Some(outcome)) => {
                println!("  Time's up! Answer: {}", outcome.correct_answer);
                answered.push(outcome);
            }
            DriverEvent::TimedOut(None) => println!("\nTime is up, the test was submitted."),
            DriverEvent::Moved => {}
            DriverEvent::Rejected(QuizError::Unanswered { unanswered }) => {
                println!("  {unanswered} question(s) unanswered. Type :submit! to submit anyway.");
                return;
            }
            DriverEvent::Rejected(e) => {
                println!("  {e}");
                return;
            }
        }
        if engine.phase() == Phase::GameOver {
            println!("\nThree strikes, game over.");
        }
        show(&*engine);
    })
    .await;

    (outcome, answered)
}

/// Walk a random reading test from stdin. `None` if abandoned.
async fn take_reading(test: &GeneratedTest) -> Result<Option<QuizOutcome>> {
    let mut reading = test
        .reading_test()
        .context("test file has no reading unit")??;
    println!("\n{}", reading.unit().title);

    let total = reading.questions().len();
    let mut inputs = spawn_stdin(parse_quiz_input);
    loop {
        if let Some(q) = reading.current() {
            render_question(q, reading.index(), total);
        }
        let Some(input) = inputs.recv().await else {
            return Ok(None);
        };
        match input {
            QuizInput::Answer(answer) => {
                let Some(q) = reading.current() else { continue };
                let answer = resolve_option(q, &answer);
                reading.answer(&answer)?;
                reading.advance();
            }
            QuizInput::Next => reading.advance(),
            QuizInput::Back => reading.back(),
            QuizInput::Finish(_) => match reading.submit() {
                Ok(result) => return Ok(Some(QuizOutcome::Paced(result.clone()))),
                Err(e) => println!("  {e}"),
            },
            QuizInput::Quit => return Ok(None),
        }
    }
}

fn show<E: QuizEngine + ?Sized>(engine: &E) {
    let Some(question) = engine.current() else {
        return;
    };
    let state = engine.snapshot();
    render_question(question, state.index, state.total_questions);
    status_line(&state);
}

fn status_line(state: &QuizRunState) {
    let mut parts = Vec::new();
    if let Some(limit) = state.time_limit_secs {
        parts.push(format!("{limit:.0}s"));
    }
    if state.wrong_count > 0 {
        parts.push(format!("strikes {}", state.wrong_count));
    }
    if state.combo > 1 {
        parts.push(format!("combo x{}", state.combo));
    }
    if state.score > 0.0 {
        parts.push(format!("score {}", state.score));
    }
    if !parts.is_empty() {
        println!("  [{}]", parts.join(" | "));
    }
}

fn reveal(outcome: &AnswerOutcome) {
    if outcome.correct {
        println!("  Correct! (+{})", outcome.points);
    } else {
        println!("  Wrong. Answer: {}", outcome.correct_answer);
    }
}

async fn report_answers(
    telemetry: &SessionTelemetry,
    questions: &[TestQuestion],
    outcome: &QuizOutcome,
    answered: &[AnswerOutcome],
) {
    let kind = |id: &str| {
        questions
            .iter()
            .find(|q| q.id == id)
            .map(|q| q.source_type.to_string())
            .unwrap_or_default()
    };
    match outcome {
        QuizOutcome::Paced(result) => {
            for r in &result.per_question {
                telemetry
                    .answer(&r.id, &r.source_type.to_string(), &r.user_answer, r.correct)
                    .await;
            }
        }
        _ => {
            for a in answered {
                telemetry
                    .answer(&a.question_id, &kind(&a.question_id), &a.answer, a.correct)
                    .await;
            }
        }
    }
}

fn print_outcome(outcome: &QuizOutcome) {
    println!();
    match outcome {
        QuizOutcome::Paced(result) => print_grade(result),
        QuizOutcome::Challenge(r) => {
            let mut table = Table::new();
            table.set_header(vec!["Score", "Correct", "Total", "Accuracy", "Result"]);
            table.add_row(vec![
                Cell::new(format!("{:.1}", r.score)),
                Cell::new(r.correct),
                Cell::new(r.total),
                Cell::new(format!("{}%", r.percent())),
                Cell::new(if r.game_over { "game over" } else { "finished" }),
            ]);
            println!("{table}");
        }
        QuizOutcome::TimeAttack(r) => {
            let mut table = Table::new();
            table.set_header(vec!["Score", "Correct", "Total", "Accuracy", "Time"]);
            table.add_row(vec![
                Cell::new(r.score),
                Cell::new(r.correct),
                Cell::new(r.total),
                Cell::new(format!("{}%", r.percent())),
                Cell::new(format!("{:.1}s", r.time_secs)),
            ]);
            println!("{table}");
        }
        QuizOutcome::SpeedRound(r) => {
            println!(
                "Correct: {}/{} ({}%), timeouts: {}",
                r.correct,
                r.total,
                r.percent(),
                r.timeouts
            );
        }
    }
}

fn print_grade(result: &GradeResult) {
    print!("{}", super::grade::render_text(result));
}

/// Accepts option numbers for multiple-choice questions.
struct OptionNumbers(Box<dyn QuizEngine>);

impl QuizEngine for OptionNumbers {
    fn current(&self) -> Option<&TestQuestion> {
        self.0.current()
    }

    fn submit(&mut self, answer: &str) -> Result<AnswerOutcome, QuizError> {
        let answer = match self.0.current() {
            Some(q) => resolve_option(q, answer),
            None => answer.to_string(),
        };
        self.0.submit(&answer)
    }

    fn on_timeout(&mut self, token: TimerToken) -> Option<AnswerOutcome> {
        self.0.on_timeout(token)
    }

    fn pending_timer(&self) -> Option<PendingTimer> {
        self.0.pending_timer()
    }

    fn phase(&self) -> Phase {
        self.0.phase()
    }

    fn snapshot(&self) -> QuizRunState {
        self.0.snapshot()
    }

    fn outcome(&self) -> Option<QuizOutcome> {
        self.0.outcome()
    }

    fn abandon(&mut self) {
        self.0.abandon()
    }

    fn advance(&mut self) -> Result<(), QuizError> {
        self.0.advance()
    }

    fn back(&mut self) -> Result<(), QuizError> {
        self.0.back()
    }

    fn finish(&mut self, confirmation: SubmitConfirmation) -> Result<(), QuizError> {
        self.0.finish(confirmation)
    }
}
