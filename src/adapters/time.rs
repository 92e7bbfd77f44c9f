//! Host time adapter.
//!
//! Monotonic time comes from `std::time::Instant`, wall-clock time from
//! `chrono::Local`, and sleeping blocks the calling thread.

use core::time::Duration;
use std::time::Instant;

use chrono::NaiveDateTime;
use embedded_hal::delay::DelayNs;

use crate::app::ports::Clock;

/// Real clock for the Pi.
pub struct SystemClock {
    start: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl DelayNs for SystemClock {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(Duration::from_nanos(u64::from(ns)));
    }

    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(Duration::from_millis(u64::from(ms)));
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.start.elapsed()
    }

    fn local_time(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }

    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
