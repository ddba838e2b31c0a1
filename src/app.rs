use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use crate::clock::Clock;
use crate::config::Config;
use crate::error::ConfigError;
use crate::odometer::{Odometer, RunState};
use crate::scene::Scene;
use crate::transition::NumericTransition;
use crate::wheel::WheelSpin;

pub const START_LABEL: &str = "Let's go!";
pub const STOP_LABEL: &str = "Stop";

/// What the event loop should do after a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Redraw,
    Ignored,
    Quit,
}

/// The ride screen: counter, wheels and backdrop, all timed off one clock
#[derive(Debug)]
pub struct App<C: Clock> {
    pub config: Config,
    pub odometer: Odometer,
    pub wheels: WheelSpin,
    pub display: NumericTransition,
    pub scene: Scene,
    clock: C,
    frame_time: Duration,
}

impl<C: Clock> App<C> {
    pub fn new(config: Config, clock: C) -> Result<Self, ConfigError> {
        config.validate()?;
        let scene = Scene::new(&config)?;
        let frame_time = clock.now();

        Ok(Self {
            odometer: Odometer::new(config.distance_step, config.tick_interval()),
            wheels: WheelSpin::new(config.wheel_period()),
            display: NumericTransition::default(),
            scene,
            clock,
            frame_time,
            config,
        })
    }

    /// Clock sample the current frame is drawn at
    pub fn frame_time(&self) -> Duration {
        self.frame_time
    }

    pub fn is_running(&self) -> bool {
        self.odometer.is_running()
    }

    /// The single user action: start when stopped, stop when running
    pub fn toggle(&mut self) -> RunState {
        let now = self.clock.now();
        self.frame_time = now;
        let state = self.odometer.toggle(now);
        match state {
            RunState::Running => self.wheels.spin(now),
            RunState::Stopped => self.wheels.rest(),
        }
        state
    }

    /// Sample the clock and fire any ticks that came due. Returns ticks fired.
    pub fn on_frame(&mut self) -> u64 {
        let now = self.clock.now();
        self.frame_time = now;
        let fired = self.odometer.advance(now);
        if fired > 0 {
            self.display
                .retarget(self.odometer.distance(), now, self.config.transition());
            debug!(fired, distance = self.odometer.distance(), "distance updated");
        }
        fired
    }

    pub fn on_key(&mut self, key: KeyEvent) -> KeyOutcome {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => KeyOutcome::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                KeyOutcome::Quit
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.toggle();
                KeyOutcome::Redraw
            }
            _ => KeyOutcome::Ignored,
        }
    }

    pub fn button_label(&self) -> &'static str {
        if self.is_running() {
            STOP_LABEL
        } else {
            START_LABEL
        }
    }

    /// Distance as currently shown, mid-transition included
    pub fn distance_text(&self) -> String {
        format!("{:.1}", self.display.value_at(self.frame_time))
    }

    pub fn unit(&self) -> &str {
        &self.config.unit
    }

    /// Scroll time for the backdrop bands
    pub fn scroll_time(&self) -> f64 {
        self.frame_time.as_secs_f64()
    }
}
