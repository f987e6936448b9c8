//! Async driver for the quiz state machines.
//!
//! One task owns the engine. It waits on whichever comes first: the next
//! learner input or the deadline of the engine's single armed timer, and
//! forwards timeouts with the token they were armed with.

use tokio::sync::mpsc;
use tracing::debug;

use crate::error::QuizError;
use crate::quiz::{AnswerOutcome, QuizEngine, QuizOutcome, SubmitConfirmation};
use crate::timer::{Clock, TimerToken};

/// Learner input forwarded to an engine.
#[derive(Debug, Clone, PartialEq)]
pub enum QuizInput {
    Answer(String),
    Next,
    Back,
    Finish(SubmitConfirmation),
    Quit,
}

/// What happened in one step, reported to the host.
#[derive(Debug, Clone, PartialEq)]
pub enum DriverEvent {
    Answered(AnswerOutcome),
    /// A timer expired. Per-question timeouts carry the recorded outcome;
    /// a session timeout carries none.
    TimedOut(Option<AnswerOutcome>),
    /// Navigation succeeded.
    Moved,
    /// The engine refused the input; its state is unchanged.
    Rejected(QuizError),
}

enum Step {
    Input(Option<QuizInput>),
    Timeout(TimerToken),
}

/// Run `engine` until it reaches a terminal phase, the learner quits, or the
/// input channel closes. `on_event` sees every step together with the engine
/// so the host can render it or load the next item.
pub async fn drive<E, F>(
    engine: &mut E,
    mut inputs: mpsc::Receiver<QuizInput>,
    clock: &dyn Clock,
    mut on_event: F,
) -> Option<QuizOutcome>
where
    E: QuizEngine + ?Sized,
    F: FnMut(&mut E, DriverEvent),
{
    while !engine.phase().is_terminal() {
        let step = match engine.pending_timer() {
            Some(timer) => {
                let wait = timer.deadline.saturating_duration_since(clock.now());
                tokio::select! {
                    input = inputs.recv() => Step::Input(input),
                    _ = tokio::time::sleep(wait) => Step::Timeout(timer.token),
                }
            }
            None => Step::Input(inputs.recv().await),
        };

        let event = match step {
            Step::Timeout(token) => {
                let outcome = engine.on_timeout(token);
                if outcome.is_none() && !engine.phase().is_terminal() {
                    debug!("ignored stale timeout");
                    continue;
                }
                DriverEvent::TimedOut(outcome)
            }
            Step::Input(None) | Step::Input(Some(QuizInput::Quit)) => {
                debug!("quiz abandoned");
                engine.abandon();
                break;
            }
            Step::Input(Some(QuizInput::Answer(answer))) => match engine.submit(&answer) {
                Ok(outcome) => DriverEvent::Answered(outcome),
                Err(e) => DriverEvent::Rejected(e),
            },
            Step::Input(Some(QuizInput::Next)) => moved(engine.advance()),
            Step::Input(Some(QuizInput::Back)) => moved(engine.back()),
            Step::Input(Some(QuizInput::Finish(confirmation))) => moved(engine.finish(confirmation)),
        };
        on_event(engine, event);
    }
    engine.outcome()
}

fn moved(result: Result<(), QuizError>) -> DriverEvent {
    match result {
        Ok(()) => DriverEvent::Moved,
        Err(e) => DriverEvent::Rejected(e),
    }
}
