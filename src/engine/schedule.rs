use crate::trace::class::{RootSpawn, TraceClass};

#[derive(Clone, Copy, Debug, PartialEq)]
/// Fixed-period ticker that owns one class's root spawning roll.
///
/// Tickers are polled with the host's current time instead of owning a timer. Like a
/// repeating host timer, a late poll fires once: missed periods are coalesced and the schedule
/// restarts one period after the poll.
pub struct IntervalTicker {
    class: TraceClass,
    period_ms: f64,
    chance: f64,
    next_due: f64,
}

impl IntervalTicker {
    /// First fire is one period after `now`.
    pub fn new(class: TraceClass, spawn: RootSpawn, now: f64) -> Self {
        Self {
            class,
            period_ms: spawn.period_ms,
            chance: spawn.chance,
            next_due: now + spawn.period_ms,
        }
    }

    pub fn class(&self) -> TraceClass {
        self.class
    }

    pub fn period_ms(&self) -> f64 {
        self.period_ms
    }

    /// Probability that one fire requests a root spawn.
    pub fn chance(&self) -> f64 {
        self.chance
    }

    pub fn next_due(&self) -> f64 {
        self.next_due
    }

    /// Whether a period elapsed up to `now`; advances the schedule past it.
    ///
    /// After a gap longer than one period the schedule is re-anchored to `now`, so a host
    /// stall yields a single fire instead of a burst.
    pub fn poll(&mut self, now: f64) -> bool {
        if now < self.next_due {
            return false;
        }
        if now - self.next_due >= self.period_ms {
            self.next_due = now + self.period_ms;
        } else {
            self.next_due += self.period_ms;
        }
        true
    }
}
