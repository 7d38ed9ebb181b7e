use std::{cell::Cell, time::Instant};

/// Wall-clock source in milliseconds. All motion math is derived from these timestamps.
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Monotonic clock anchored at construction.
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Synthetic clock advanced explicitly; used for headless rendering and tests.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    pub fn new(start_ms: f64) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    pub fn set(&self, ms: f64) {
        self.now.set(ms);
    }

    /// Move forward by `delta_ms` and return the new time.
    pub fn advance(&self, delta_ms: f64) -> f64 {
        let t = self.now.get() + delta_ms.max(0.0);
        self.now.set(t);
        t
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}
