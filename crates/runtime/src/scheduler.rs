//! Timer slots on the tokio clock.

use std::time::Duration;

use blockfall_core::scheduler::{Scheduler, TimerHandle, TimerKind, TimerTable};
use tokio::time::Instant;

/// [`Scheduler`] whose deadlines are `tokio::time::Instant`s.
///
/// It does not spawn anything itself: the driver sleeps until
/// [`Scheduler::next_deadline`] and then lets the session pump due timers. Under a paused
/// test runtime the clock auto-advances to the next deadline.
#[derive(Debug, Clone, Default)]
pub struct TokioScheduler {
    table: TimerTable<Instant>,
}

impl TokioScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live_count(&self) -> usize {
        self.table.live_count()
    }
}

impl Scheduler for TokioScheduler {
    type Instant = Instant;

    fn schedule_repeating(&mut self, kind: TimerKind, period: Duration) -> TimerHandle {
        self.table.arm(kind, period, Instant::now())
    }

    fn cancel(&mut self, handle: TimerHandle) -> bool {
        self.table.cancel(handle)
    }

    fn next_due(&mut self) -> Option<TimerHandle> {
        self.table.pop_due(Instant::now())
    }

    fn is_live(&self, handle: TimerHandle) -> bool {
        self.table.is_live(handle)
    }

    fn next_deadline(&self) -> Option<Instant> {
        self.table.next_deadline()
    }
}
