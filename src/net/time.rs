//! Time sources for expiring cached state.

use std::fmt::Debug;
use std::time::{
    Duration,
    Instant,
};

/// A monotonic time source.
pub trait Clock: Clone + Debug {
    fn now(&self) -> Instant;
}

/// Reads the system monotonic clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock which stands still until advanced by hand.
#[derive(Clone, Debug)]
pub struct ManualClock {
    now: Instant,
}

impl Default for ManualClock {
    fn default() -> ManualClock {
        ManualClock {
            now: Instant::now(),
        }
    }
}

impl ManualClock {
    pub fn advance(&mut self, duration: Duration) {
        self.now += duration;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now
    }
}
