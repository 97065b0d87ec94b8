use std::time::{Duration, Instant};

pub const DEFAULT_THROTTLE_MS: u64 = 150;

/// Trailing-edge coalescing gate for remote dispatches.
///
/// The first `arm` starts a window; further arms inside the window change
/// nothing, so whatever request state is current when the window elapses
/// is what gets dispatched. `should_fire`/`mark_fired` are polled by the
/// owner rather than driven by a timer thread.
#[derive(Debug)]
pub struct ThrottleGate {
    interval: Duration,
    /// Instant at or after which the pending dispatch is due.
    deadline: Option<Instant>,
}

impl Default for ThrottleGate {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_THROTTLE_MS))
    }
}

impl ThrottleGate {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            deadline: None,
        }
    }

    pub fn arm(&mut self) {
        self.arm_at(Instant::now());
    }

    /// Starts a window ending `interval` after `now`, unless one is
    /// already open.
    pub fn arm_at(&mut self, now: Instant) {
        if self.deadline.is_none() {
            self.deadline = Some(now + self.interval);
        }
    }

    /// Makes the pending dispatch due immediately, window or not.
    pub fn arm_immediate(&mut self) {
        self.deadline = Some(Instant::now());
    }

    pub fn should_fire(&self) -> bool {
        self.should_fire_at(Instant::now())
    }

    pub fn should_fire_at(&self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) => now >= deadline,
            None => false,
        }
    }

    pub fn mark_fired(&mut self) {
        self.deadline = None;
    }

    pub fn has_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn set_interval(&mut self, interval: Duration) {
        self.set_interval_at(interval, Instant::now());
    }

    /// Changes the interval. A pending dispatch is kept but re-timed to
    /// come due `interval` after `now`.
    pub fn set_interval_at(&mut self, interval: Duration, now: Instant) {
        self.interval = interval;
        if self.deadline.is_some() {
            self.deadline = Some(now + interval);
        }
    }
}

#[cfg(test)]
#[path = "throttle_tests.rs"]
mod throttle_tests;
