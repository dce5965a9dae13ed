//! Owned recurring timer with generation-checked firings.

use std::time::{Duration, Instant};

/// One due timer firing.  Only accepted by the [`Ticker`] arming that
/// produced it; see [`Ticker::accepts`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TickerFiring {
    generation: u64,
    due:        Instant,
}

impl TickerFiring {
    /// The instant this firing was scheduled for.
    #[inline]
    pub fn due(&self) -> Instant {
        self.due
    }

    /// The arming generation that produced this firing.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// A fixed-interval timer driven by explicit `poll(now)` calls.
///
/// The ticker holds no thread and no callback: it only records when the next
/// firing is due.  [`arm`][Self::arm] and [`cancel`][Self::cancel] both bump
/// the generation, which invalidates every firing handed out earlier.
#[derive(Debug)]
pub struct Ticker {
    interval:   Duration,
    generation: u64,
    next_due:   Option<Instant>,
}

impl Ticker {
    /// Create a disarmed ticker.
    ///
    /// # Panics
    /// Panics if `interval` is zero.
    pub fn new(interval: Duration) -> Self {
        assert!(!interval.is_zero(), "ticker interval must be non-zero");
        Self { interval, generation: 0, next_due: None }
    }

    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[inline]
    pub fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    /// When the next firing becomes due, if armed.
    #[inline]
    pub fn next_due(&self) -> Option<Instant> {
        self.next_due
    }

    /// Start a new arming: the first firing is due one interval after `now`.
    /// Re-arming an armed ticker restarts it.
    pub fn arm(&mut self, now: Instant) {
        self.generation += 1;
        self.next_due = Some(now + self.interval);
    }

    /// Stop the ticker.  Returns `true` if it was armed.
    pub fn cancel(&mut self) -> bool {
        let was_armed = self.next_due.take().is_some();
        self.generation += 1;
        was_armed
    }

    /// Hand out the next firing if it is due by `now`.
    ///
    /// Call repeatedly to drain a backlog: each overdue interval yields its
    /// own firing, in schedule order.
    pub fn poll(&mut self, now: Instant) -> Option<TickerFiring> {
        let due = self.next_due?;
        if due > now {
            return None;
        }
        self.next_due = Some(due + self.interval);
        Some(TickerFiring { generation: self.generation, due })
    }

    /// `true` if `firing` came from the current arming.
    #[inline]
    pub fn accepts(&self, firing: TickerFiring) -> bool {
        self.is_armed() && firing.generation == self.generation
    }
}
