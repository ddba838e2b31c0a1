use std::time::Duration;

use tracing::{debug, info};

use crate::timer::IntervalTimer;

pub const DEFAULT_STEP: f64 = 0.1;
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Stopped,
    Running,
}

/// Simulated ride distance: a run/stop flag plus an accumulator that grows by
/// a fixed step on every timer tick while running.
#[derive(Debug, Clone)]
pub struct Odometer {
    state: RunState,
    distance: f64,
    step: f64,
    ticks: u64,
    timer: IntervalTimer,
}

impl Odometer {
    pub fn new(step: f64, interval: Duration) -> Self {
        Self {
            state: RunState::Stopped,
            distance: 0.0,
            step,
            ticks: 0,
            timer: IntervalTimer::new(interval),
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Stopped -> Running, arming the tick timer. No-op when already running.
    pub fn start(&mut self, now: Duration) -> bool {
        if self.is_running() {
            return false;
        }
        self.state = RunState::Running;
        self.timer.arm(now);
        info!(
            distance = self.distance,
            next_tick = ?self.timer.next_due(),
            "ride started"
        );
        true
    }

    /// Running -> Stopped, disarming the tick timer. No-op when already stopped.
    pub fn stop(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.state = RunState::Stopped;
        self.timer.disarm();
        info!(distance = self.distance, "ride stopped");
        true
    }

    /// Alternate between start and stop; returns the new state
    pub fn toggle(&mut self, now: Duration) -> RunState {
        match self.state {
            RunState::Stopped => self.start(now),
            RunState::Running => self.stop(),
        };
        self.state
    }

    pub fn on_tick(&mut self) {
        self.distance += self.step;
        self.ticks += 1;
        debug!(distance = self.distance, ticks = self.ticks, "tick");
    }

    /// Fire every tick that has come due by `now`, oldest first.
    pub fn advance(&mut self, now: Duration) -> u64 {
        if !self.is_running() {
            return 0;
        }
        let fired = self.timer.drain(now);
        for _ in 0..fired {
            self.on_tick();
        }
        fired
    }
}

impl Default for Odometer {
    fn default() -> Self {
        Self::new(DEFAULT_STEP, DEFAULT_TICK_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: f64) -> Duration {
        Duration::from_secs_f64(s)
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn starts_stopped_at_zero() {
        let odo = Odometer::default();
        assert_eq!(odo.state(), RunState::Stopped);
        assert_eq!(odo.distance(), 0.0);
    }

    #[test]
    fn n_intervals_accrue_n_steps() {
        let mut odo = Odometer::default();
        odo.start(secs(0.0));
        for n in 1..=20u64 {
            odo.advance(secs(n as f64));
            assert_close(odo.distance(), n as f64 * 0.1);
        }
    }

    #[test]
    fn nothing_accrues_before_first_interval() {
        let mut odo = Odometer::default();
        odo.start(secs(0.0));
        assert_eq!(odo.advance(secs(0.999)), 0);
        assert_eq!(odo.distance(), 0.0);
    }

    #[test]
    fn stop_start_resume_scenario() {
        let mut odo = Odometer::default();
        odo.start(secs(0.0));
        assert_eq!(odo.advance(secs(5.0)), 5);
        assert_close(odo.distance(), 0.5);

        odo.stop();
        assert_eq!(odo.advance(secs(60.0)), 0);
        assert_close(odo.distance(), 0.5);

        odo.start(secs(60.0));
        assert_eq!(odo.advance(secs(63.0)), 3);
        assert_close(odo.distance(), 0.8);
    }

    #[test]
    fn double_stop_is_noop() {
        let mut odo = Odometer::default();
        odo.start(secs(0.0));
        odo.advance(secs(2.0));

        assert!(odo.stop());
        let after_first = (odo.state(), odo.distance());
        assert!(!odo.stop());
        assert_eq!((odo.state(), odo.distance()), after_first);
    }

    #[test]
    fn double_start_keeps_one_tick_source() {
        let mut odo = Odometer::default();
        assert!(odo.start(secs(0.0)));
        assert!(!odo.start(secs(0.5)));

        // One timer: exactly one tick per interval, anchored at the first start
        assert_eq!(odo.advance(secs(1.0)), 1);
        assert_eq!(odo.advance(secs(1.4)), 0);
        assert_eq!(odo.advance(secs(2.0)), 1);
    }

    #[test]
    fn toggle_alternates() {
        let mut odo = Odometer::default();
        assert_eq!(odo.toggle(secs(0.0)), RunState::Running);
        assert_eq!(odo.toggle(secs(1.0)), RunState::Stopped);
        assert_eq!(odo.toggle(secs(2.0)), RunState::Running);
    }

    #[test]
    fn distance_never_decreases_while_running() {
        let mut odo = Odometer::new(0.25, Duration::from_millis(250));
        odo.start(secs(0.0));
        let mut last = odo.distance();
        for frame in 0..200 {
            odo.advance(secs(frame as f64 * 0.033));
            assert!(odo.distance() >= last);
            last = odo.distance();
        }
    }

    #[test]
    fn custom_step_and_interval() {
        let mut odo = Odometer::new(0.5, Duration::from_millis(500));
        odo.start(secs(0.0));
        assert_eq!(odo.advance(secs(2.0)), 4);
        assert_close(odo.distance(), 2.0);
    }
}
