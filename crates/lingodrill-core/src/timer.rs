//! Clocks and the single cancellable timer each quiz owns.
//!
//! State machines never sleep. They arm a [`TimerSlot`] with a deadline and
//! hand out a [`TimerToken`]; whoever drives them (see [`crate::driver`])
//! waits for the deadline and reports back with that token. Re-arming or
//! cancelling bumps the slot's generation, so a timeout that was already in
//! flight for an earlier question is recognised as stale and dropped.

use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Clock backed by tokio's time source, so paused test time applies.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

impl Clock for TokioClock {
    fn now(&self) -> Instant {
        tokio::time::Instant::now().into_std()
    }
}

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    base: Instant,
    offset: Mutex<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            base: Instant::now(),
            offset: Mutex::new(Duration::ZERO),
        }
    }

    /// Move the clock forward.
    pub fn advance(&self, by: Duration) {
        let mut offset = self.offset.lock().unwrap_or_else(|e| e.into_inner());
        *offset += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        let offset = *self.offset.lock().unwrap_or_else(|e| e.into_inner());
        self.base + offset
    }
}

/// Identifies one arming of a [`TimerSlot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(u64);

/// The timer currently armed on a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingTimer {
    pub token: TimerToken,
    pub deadline: Instant,
}

/// At most one outstanding timer.
#[derive(Debug, Default)]
pub struct TimerSlot {
    generation: u64,
    armed: Option<PendingTimer>,
}

impl TimerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel whatever is armed and start a new timer.
    pub fn arm(&mut self, now: Instant, duration: Duration) -> TimerToken {
        self.generation += 1;
        let token = TimerToken(self.generation);
        self.armed = Some(PendingTimer {
            token,
            deadline: now + duration,
        });
        token
    }

    pub fn cancel(&mut self) {
        if self.armed.take().is_some() {
            self.generation += 1;
        }
    }

    pub fn pending(&self) -> Option<PendingTimer> {
        self.armed
    }

    /// Consume a timeout. Returns `false` (and changes nothing) when the
    /// token does not belong to the armed timer.
    pub fn fire(&mut self, token: TimerToken) -> bool {
        match self.armed {
            Some(pending) if pending.token == token => {
                self.armed = None;
                true
            }
            _ => false,
        }
    }

    /// Time left before the armed deadline, if any.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.armed
            .map(|pending| pending.deadline.saturating_duration_since(now))
    }
}

/// Seconds as a `Duration`, clamping negatives to zero.
pub(crate) fn secs(value: f64) -> Duration {
    Duration::from_secs_f64(value.max(0.0))
}
