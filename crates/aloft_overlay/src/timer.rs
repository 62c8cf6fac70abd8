//! Cancellable one-shot timers and leading/trailing throttles.
//!
//! Time is a monotonic [`Duration`] supplied by the host on every call.
//! Nothing here sleeps or spawns; hosts call `tick(now)` and the owner
//! checks what came due.

use std::time::Duration;

/// A one-shot deadline that can be cancelled before it fires.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timer {
    deadline: Option<Duration>,
}

impl Timer {
    /// Creates an idle timer.
    #[must_use]
    pub const fn new() -> Self {
        Self { deadline: None }
    }

    /// Arms the timer to fire `after` from `now`, replacing any pending run.
    pub fn arm(&mut self, now: Duration, after: Duration) {
        self.deadline = Some(now + after);
    }

    /// Drops the pending run. Returns true if one was pending.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    /// Returns true while a run is pending.
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// The pending deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    /// Disarms and returns true if the deadline has passed.
    pub fn fire_if_due(&mut self, now: Duration) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Bounds how often a reaction runs.
///
/// The first hit after a quiet window runs at once. Hits inside the window
/// collapse into a single trailing run at the window's end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Throttle {
    window: Duration,
    last_run: Option<Duration>,
    trailing: Timer,
}

impl Throttle {
    /// Creates a throttle with the given window.
    #[must_use]
    pub const fn new(window: Duration) -> Self {
        Self {
            window,
            last_run: None,
            trailing: Timer::new(),
        }
    }

    /// Records a hit. Returns true if the reaction should run now.
    pub fn hit(&mut self, now: Duration) -> bool {
        match self.last_run {
            Some(last) if now < last + self.window => {
                if !self.trailing.is_armed() {
                    self.trailing.arm(last, self.window);
                }
                false
            }
            _ => {
                self.trailing.cancel();
                self.last_run = Some(now);
                true
            }
        }
    }

    /// Returns true if a trailing run came due; the owner should run then.
    pub fn poll(&mut self, now: Duration) -> bool {
        if self.trailing.fire_if_due(now) {
            self.last_run = Some(now);
            true
        } else {
            false
        }
    }

    /// When the pending trailing run is due.
    #[must_use]
    pub const fn deadline(&self) -> Option<Duration> {
        self.trailing.deadline()
    }

    /// Forgets history and drops any trailing run.
    pub fn reset(&mut self) {
        self.last_run = None;
        self.trailing.cancel();
    }
}

/// Earliest of two optional deadlines.
#[must_use]
pub fn earliest(a: Option<Duration>, b: Option<Duration>) -> Option<Duration> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, None) => a,
        (None, b) => b,
    }
}
