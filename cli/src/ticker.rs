use web_time::{Duration, Instant};

/// Turns wall-clock time into whole one-second ticks, carrying the remainder over.
#[derive(Clone, Debug)]
pub struct Ticker {
    last: Instant,
    carried: Duration,
}

impl Ticker {
    pub fn new(now: Instant) -> Self {
        Self {
            last: now,
            carried: Duration::ZERO,
        }
    }

    pub fn reset(&mut self, now: Instant) {
        *self = Self::new(now);
    }

    /// Number of full seconds elapsed since the previous call.
    pub fn advance(&mut self, now: Instant) -> u64 {
        self.carried += now.saturating_duration_since(self.last);
        self.last = now;
        let ticks = self.carried.as_secs();
        self.carried -= Duration::from_secs(ticks);
        ticks
    }
}
