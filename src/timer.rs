use std::time::Duration;

/// Periodic deadline timer polled from the frame loop.
///
/// At most one schedule exists at a time: arming an armed timer keeps the
/// current schedule. Each deadline is derived from the previous one, so late
/// polls catch up instead of drifting.
#[derive(Debug, Clone)]
pub struct IntervalTimer {
    interval: Duration,
    next_due: Option<Duration>,
}

impl IntervalTimer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_due: None,
        }
    }

    /// When the next firing is due, if armed
    pub fn next_due(&self) -> Option<Duration> {
        self.next_due
    }

    /// Schedule the first firing one interval after `now`.
    /// Returns false if the timer was already armed.
    pub fn arm(&mut self, now: Duration) -> bool {
        if self.next_due.is_some() {
            return false;
        }
        self.next_due = Some(now + self.interval);
        true
    }

    /// Cancel any pending firing. Returns false if nothing was armed.
    pub fn disarm(&mut self) -> bool {
        self.next_due.take().is_some()
    }

    /// Pop a single due firing, if any, advancing the schedule by one interval.
    pub fn poll(&mut self, now: Duration) -> bool {
        match self.next_due {
            Some(due) if due <= now && !self.interval.is_zero() => {
                self.next_due = Some(due + self.interval);
                true
            }
            _ => false,
        }
    }

    /// Number of firings due at `now`; consumes them.
    pub fn drain(&mut self, now: Duration) -> u64 {
        let mut fired = 0;
        while self.poll(now) {
            fired += 1;
        }
        fired
    }
}
