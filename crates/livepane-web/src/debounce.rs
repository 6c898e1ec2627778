#![forbid(unsafe_code)]

//! Host-driven time and the debounced script task.
//!
//! There are no timers here. The host advances a [`HostClock`] (from
//! `performance.now()`, or by fixed steps in tests) and the runtime polls
//! [`DebouncedTask`] against it.
//!
//! # Invariants
//!
//! 1. Scheduling while a task is pending replaces its deadline
//!    (last-write-wins); at most one firing is ever pending.
//! 2. [`DebouncedTask::poll`] fires at most once per schedule.
//! 3. [`HostClock`] never moves backwards.

use core::time::Duration;

/// Monotonic clock advanced explicitly by the host.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HostClock {
    now: Duration,
}

impl HostClock {
    /// A clock starting at `0`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now: Duration::ZERO,
        }
    }

    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Move to `now`. Earlier instants are ignored.
    pub fn set(&mut self, now: Duration) {
        if now > self.now {
            self.now = now;
        }
    }

    /// Move to `ms` milliseconds. Non-finite or negative values are ignored;
    /// values past [`Duration::MAX`] saturate.
    pub fn set_ms(&mut self, ms: f64) {
        if ms.is_finite() && ms >= 0.0 {
            self.set(Duration::try_from_secs_f64(ms / 1000.0).unwrap_or(Duration::MAX));
        }
    }

    /// Advance by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.now = self.now.saturating_add(dt);
    }
}

/// A cancellable delayed task with last-write-wins rescheduling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebouncedTask {
    delay: Duration,
    deadline: Option<Duration>,
}

impl DebouncedTask {
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// (Re)start the quiet period at `now`.
    pub fn schedule(&mut self, now: Duration) {
        self.deadline = Some(now.saturating_add(self.delay));
    }

    /// Drop any pending firing. Returns `true` if one was pending.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Time left before the task fires, if pending.
    #[must_use]
    pub fn remaining(&self, now: Duration) -> Option<Duration> {
        self.deadline.map(|deadline| deadline.saturating_sub(now))
    }

    /// Returns `true` exactly once when the deadline has been reached.
    pub fn poll(&mut self, now: Duration) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
