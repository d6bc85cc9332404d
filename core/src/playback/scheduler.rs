//! Timer capability for playback
//!
//! The player never sleeps or spawns anything itself. It asks a scheduler
//! to start and cancel repeating timers and periodically drains the timers
//! that have fired. Tests use [`ManualScheduler`], whose clock only moves
//! when told to; interactive drivers use [`ClockScheduler`].

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use log::{trace, warn};

/// Handle to a started timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// Repeating-timer capability injected into a player
pub trait Scheduler {
    /// Starts a timer that fires every `interval`, first after one interval.
    fn start(&mut self, interval: Duration) -> TimerId;

    /// Stops a timer. Unknown or already cancelled ids are ignored.
    fn cancel(&mut self, id: TimerId);

    /// Drains firings that are due, in firing order. A timer that fell
    /// several intervals behind appears once per missed interval.
    fn due(&mut self) -> Vec<TimerId>;

    /// Time until the earliest pending firing, if any timer is active.
    fn until_next(&self) -> Option<Duration>;
}

impl<S: Scheduler + ?Sized> Scheduler for Box<S> {
    fn start(&mut self, interval: Duration) -> TimerId {
        (**self).start(interval)
    }

    fn cancel(&mut self, id: TimerId) {
        (**self).cancel(id)
    }

    fn due(&mut self) -> Vec<TimerId> {
        (**self).due()
    }

    fn until_next(&self) -> Option<Duration> {
        (**self).until_next()
    }
}

/// Firings one timer may report per drain before it skips ahead
const MAX_CATCH_UP: usize = 1024;

#[derive(Debug, Clone, Copy)]
struct Interval {
    period: Duration,
    next: Duration,
}

/// Timer bookkeeping against an abstract monotonic "now"
#[derive(Debug, Default)]
struct TimerTable {
    next_id: u64,
    timers: BTreeMap<TimerId, Interval>,
}

impl TimerTable {
    fn start(&mut self, now: Duration, interval: Duration) -> TimerId {
        let period = interval.max(Duration::from_nanos(1));
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.insert(id, Interval { period, next: now + period });
        trace!("timer {:?} started with period {:?}", id, period);
        id
    }

    fn cancel(&mut self, id: TimerId) {
        if self.timers.remove(&id).is_some() {
            trace!("timer {:?} cancelled", id);
        }
    }

    fn drain(&mut self, now: Duration) -> Vec<TimerId> {
        let mut fired = Vec::new();
        for (&id, interval) in self.timers.iter_mut() {
            let mut count = 0;
            while interval.next <= now {
                if count == MAX_CATCH_UP {
                    warn!("timer {:?} fell behind, skipping missed firings", id);
                    interval.next = now + interval.period;
                    break;
                }
                fired.push((interval.next, id));
                interval.next += interval.period;
                count += 1;
            }
        }
        fired.sort();
        fired.into_iter().map(|(_, id)| id).collect()
    }

    fn until_next(&self, now: Duration) -> Option<Duration> {
        self.timers
            .values()
            .map(|interval| interval.next.saturating_sub(now))
            .min()
    }

    fn is_active(&self, id: TimerId) -> bool {
        self.timers.contains_key(&id)
    }

    fn active(&self) -> usize {
        self.timers.len()
    }
}

/// Scheduler on a virtual clock that only moves through [`advance`](Self::advance)
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    table: TimerTable,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, dt: Duration) {
        self.now += dt;
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn is_active(&self, id: TimerId) -> bool {
        self.table.is_active(id)
    }

    /// Number of timers currently running
    pub fn active_timers(&self) -> usize {
        self.table.active()
    }
}

impl Scheduler for ManualScheduler {
    fn start(&mut self, interval: Duration) -> TimerId {
        self.table.start(self.now, interval)
    }

    fn cancel(&mut self, id: TimerId) {
        self.table.cancel(id)
    }

    fn due(&mut self) -> Vec<TimerId> {
        self.table.drain(self.now)
    }

    fn until_next(&self) -> Option<Duration> {
        self.table.until_next(self.now)
    }
}

/// Scheduler on the monotonic wall clock, polled by the caller
#[derive(Debug)]
pub struct ClockScheduler {
    origin: Instant,
    table: TimerTable,
}

impl ClockScheduler {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            table: TimerTable::default(),
        }
    }

    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    pub fn active_timers(&self) -> usize {
        self.table.active()
    }
}

impl Default for ClockScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for ClockScheduler {
    fn start(&mut self, interval: Duration) -> TimerId {
        let now = self.now();
        self.table.start(now, interval)
    }

    fn cancel(&mut self, id: TimerId) {
        self.table.cancel(id)
    }

    fn due(&mut self) -> Vec<TimerId> {
        let now = self.now();
        self.table.drain(now)
    }

    fn until_next(&self) -> Option<Duration> {
        self.table.until_next(self.now())
    }
}
