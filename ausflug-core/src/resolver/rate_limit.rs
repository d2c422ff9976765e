use std::{
    thread,
    time::{Duration, Instant},
};

/// Spaces consecutive calls by a minimum delay.
#[derive(Debug)]
pub struct RateLimiter {
    min_delay: Duration,
    last_call: Option<Instant>,
}

impl RateLimiter {
    pub const fn new(min_delay: Duration) -> Self {
        Self {
            min_delay,
            last_call: None,
        }
    }

    /// Blocks until `min_delay` has passed since the previous call.
    pub fn wait(&mut self) {
        if let Some(remaining) = self.remaining(Instant::now()) {
            log::trace!("Waiting {remaining:?} before next request");
            thread::sleep(remaining);
        }
        self.last_call = Some(Instant::now());
    }

    fn remaining(&self, now: Instant) -> Option<Duration> {
        let elapsed = now.saturating_duration_since(self.last_call?);
        self.min_delay
            .checked_sub(elapsed)
            .filter(|remaining| !remaining.is_zero())
    }
}
