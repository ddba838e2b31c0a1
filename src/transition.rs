use std::time::Duration;

/// Eased change of a displayed number from one value to another
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericTransition {
    from: f64,
    to: f64,
    started: Duration,
    duration: Duration,
}

impl NumericTransition {
    /// A transition that has already settled on `value`
    pub fn settled(value: f64) -> Self {
        Self {
            from: value,
            to: value,
            started: Duration::ZERO,
            duration: Duration::ZERO,
        }
    }

    /// Head for `to`, starting from whatever is on screen at `now`
    pub fn retarget(&mut self, to: f64, now: Duration, duration: Duration) {
        self.from = self.value_at(now);
        self.to = to;
        self.started = now;
        self.duration = duration;
    }

    pub fn value_at(&self, now: Duration) -> f64 {
        let p = smoothstep(self.progress(now));
        self.from + (self.to - self.from) * p
    }

    fn progress(&self, now: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_sub(self.started).as_secs_f64();
        (elapsed / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }
}

impl Default for NumericTransition {
    fn default() -> Self {
        Self::settled(0.0)
    }
}

fn smoothstep(x: f64) -> f64 {
    x * x * (3.0 - 2.0 * x)
}
