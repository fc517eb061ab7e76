//! Controllable clock for tests

use crate::clock::Clock;
use parking_lot::Mutex;
use slog_core::{Error, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Clock that only moves when told to
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Mutex<Duration>,
    failing: AtomicBool,
}

impl ManualClock {
    pub fn new(start: Duration) -> Self {
        Self {
            now: Mutex::new(start),
            failing: AtomicBool::new(false),
        }
    }

    pub fn set(&self, now: Duration) {
        *self.now.lock() = now;
    }

    pub fn advance(&self, by: Duration) {
        *self.now.lock() += by;
    }

    /// Make every read fail until cleared
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Result<Duration> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(Error::clock("manual clock set to fail"));
        }
        Ok(*self.now.lock())
    }
}
