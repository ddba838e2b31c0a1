use std::time::Duration;

pub const DEFAULT_WHEEL_PERIOD: Duration = Duration::from_secs(2);

/// Spoke glyphs for successive clockwise 45 degree turns. A spoke pattern
/// repeats every 180 degrees, so four frames cover a revolution twice.
const SPOKES: [char; 4] = ['|', '/', '─', '\\'];

/// Linear, endlessly repeating wheel rotation while the ride is running
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelSpin {
    period: Duration,
    spinning_since: Option<Duration>,
}

impl WheelSpin {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            spinning_since: None,
        }
    }

    pub fn is_spinning(&self) -> bool {
        self.spinning_since.is_some()
    }

    pub fn spin(&mut self, now: Duration) {
        if self.spinning_since.is_none() {
            self.spinning_since = Some(now);
        }
    }

    pub fn rest(&mut self) {
        self.spinning_since = None;
    }

    /// Rotation in degrees, in `(-360, 0]`. Negative is counter-clockwise.
    pub fn angle(&self, now: Duration) -> f64 {
        let Some(since) = self.spinning_since else {
            return 0.0;
        };
        if self.period.is_zero() {
            return 0.0;
        }
        let turns = now.saturating_sub(since).as_secs_f64() / self.period.as_secs_f64();
        let angle = -360.0 * turns.fract();
        // -0.0 and tiny negatives at a full turn read as rest
        if angle > -1e-9 {
            0.0
        } else {
            angle
        }
    }

    /// Spoke glyph for the current angle
    pub fn glyph(&self, now: Duration) -> char {
        spoke_for(self.angle(now))
    }
}

impl Default for WheelSpin {
    fn default() -> Self {
        Self::new(DEFAULT_WHEEL_PERIOD)
    }
}

pub fn spoke_for(angle: f64) -> char {
    // Counter-clockwise turns walk the frames backwards
    let steps = (-angle / 45.0).floor() as i64;
    SPOKES[(-steps).rem_euclid(SPOKES.len() as i64) as usize]
}
