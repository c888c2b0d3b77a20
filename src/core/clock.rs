//! Time sources for driving timelines
//!
//! Timelines never read the wall clock themselves; the host passes `now`
//! on every tick. The browser uses `performance.now()`, tests use
//! [`ManualClock`].

use std::cell::Cell;
use std::time::Duration;

/// Monotonic time source measured from an arbitrary origin
pub trait Clock {
    fn now(&self) -> Duration;
}

/// Virtual clock advanced by hand
///
/// # Example
/// ```
/// # use heropage::core::clock::{Clock, ManualClock};
/// # use std::time::Duration;
/// let clock = ManualClock::new();
/// clock.advance(Duration::from_millis(16));
/// assert_eq!(clock.now(), Duration::from_millis(16));
/// ```
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward by `delta`
    pub fn advance(&self, delta: Duration) {
        self.now.set(self.now.get() + delta);
    }

    /// Jump to an absolute time. Going backwards is ignored.
    pub fn set(&self, now: Duration) {
        if now > self.now.get() {
            self.now.set(now);
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}
