//! Scheduled tasks for the session's periodic timers
//!
//! A session owns two repeating timers: the fall timer and, in duo, the one-second
//! countdown. Each armed timer is identified by a [`TimerHandle`] carrying a unique
//! generation id, which doubles as its cancellation token: once a handle is cancelled or
//! replaced it is never yielded again, and the session ignores it if it shows up late.
//!
//! [`TimerTable`] keeps one slot per [`TimerKind`], so two live timers of the same kind
//! cannot exist. It is generic over the instant type so the same bookkeeping backs the
//! virtual clock used in tests ([`ManualScheduler`]) and real-time drivers.

use std::ops::Add;
use std::time::Duration;

/// Shortest period a timer can be armed with; a zero period would fire forever.
pub const MIN_PERIOD: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TimerKind {
    Fall,
    Countdown,
}

impl TimerKind {
    fn slot(self) -> usize {
        match self {
            TimerKind::Fall => 0,
            TimerKind::Countdown => 1,
        }
    }
}

/// Identity of one armed timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle {
    kind: TimerKind,
    id: u64,
}

impl TimerHandle {
    pub fn kind(&self) -> TimerKind {
        self.kind
    }

    pub fn id(&self) -> u64 {
        self.id
    }
}

/// Timer service a session is driven by.
pub trait Scheduler {
    /// Point in time the scheduler measures deadlines in.
    type Instant: Copy + Ord;

    /// Arm a repeating timer whose first fire is one `period` from now.
    ///
    /// Any live timer of the same kind is cancelled first.
    fn schedule_repeating(&mut self, kind: TimerKind, period: Duration) -> TimerHandle;

    /// Cancel `handle`. Returns false if it was already cancelled or replaced.
    fn cancel(&mut self, handle: TimerHandle) -> bool;

    /// Pop the earliest timer whose deadline has passed and re-arm it one period later.
    fn next_due(&mut self) -> Option<TimerHandle>;

    /// Whether `handle` is still armed.
    fn is_live(&self, handle: TimerHandle) -> bool;

    /// Earliest pending deadline, if any timer is armed.
    fn next_deadline(&self) -> Option<Self::Instant>;
}

#[derive(Debug, Clone, Copy)]
struct Armed<T> {
    handle: TimerHandle,
    deadline: T,
    period: Duration,
}

/// One slot per timer kind, deadlines in `T`.
#[derive(Debug, Clone)]
pub struct TimerTable<T> {
    slots: [Option<Armed<T>>; 2],
    next_id: u64,
}

impl<T> TimerTable<T>
where
    T: Copy + Ord + Add<Duration, Output = T>,
{
    pub fn new() -> Self {
        Self {
            slots: [None, None],
            next_id: 1,
        }
    }

    pub fn arm(&mut self, kind: TimerKind, period: Duration, now: T) -> TimerHandle {
        let period = period.max(MIN_PERIOD);
        let handle = TimerHandle {
            kind,
            id: self.next_id,
        };
        self.next_id += 1;
        self.slots[kind.slot()] = Some(Armed {
            handle,
            deadline: now + period,
            period,
        });
        handle
    }

    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let slot = &mut self.slots[handle.kind.slot()];
        match slot {
            Some(armed) if armed.handle == handle => {
                *slot = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_live(&self, handle: TimerHandle) -> bool {
        matches!(&self.slots[handle.kind.slot()], Some(armed) if armed.handle == handle)
    }

    /// Earliest pending deadline.
    pub fn next_deadline(&self) -> Option<T> {
        self.slots.iter().flatten().map(|armed| armed.deadline).min()
    }

    /// Earliest due timer at `now`; ties go to the fall timer.
    ///
    /// The timer is re-armed one period after its deadline. If that is still not in the
    /// future the missed periods are skipped rather than replayed.
    pub fn pop_due(&mut self, now: T) -> Option<TimerHandle> {
        let armed = self
            .slots
            .iter_mut()
            .flatten()
            .filter(|armed| armed.deadline <= now)
            .min_by_key(|armed| (armed.deadline, armed.handle.kind))?;

        let next = armed.deadline + armed.period;
        armed.deadline = if next > now { next } else { now + armed.period };
        Some(armed.handle)
    }

    pub fn clear(&mut self) {
        self.slots = [None, None];
    }

    /// Number of armed timers.
    pub fn live_count(&self) -> usize {
        self.slots.iter().flatten().count()
    }
}

impl<T> Default for TimerTable<T>
where
    T: Copy + Ord + Add<Duration, Output = T>,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Virtual-clock scheduler for deterministic tests and headless simulation.
///
/// Time only moves when [`ManualScheduler::set_now`] is called; a session built on it can
/// be stepped with `GameSession::advance`.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    now: Duration,
    table: TimerTable<Duration>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed on the virtual clock.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Move the virtual clock. Going backwards is ignored.
    pub fn set_now(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }

    pub fn live_count(&self) -> usize {
        self.table.live_count()
    }
}

impl Scheduler for ManualScheduler {
    type Instant = Duration;

    fn schedule_repeating(&mut self, kind: TimerKind, period: Duration) -> TimerHandle {
        self.table.arm(kind, period, self.now)
    }

    fn cancel(&mut self, handle: TimerHandle) -> bool {
        self.table.cancel(handle)
    }

    fn next_due(&mut self) -> Option<TimerHandle> {
        self.table.pop_due(self.now)
    }

    fn is_live(&self, handle: TimerHandle) -> bool {
        self.table.is_live(handle)
    }

    fn next_deadline(&self) -> Option<Duration> {
        self.table.next_deadline()
    }
}
