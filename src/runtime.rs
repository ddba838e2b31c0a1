//! Terminal input and frame pacing for the ride loop.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind};
use tracing::{debug, warn};

use crate::clock::Clock;

/// What the ride loop reacts to
#[derive(Clone, Debug)]
pub enum RideEvent {
    Key(KeyEvent),
    Resize,
    /// The next animation frame is due
    Frame,
}

/// Anything that can hand the loop input events
pub trait RideEventSource {
    /// Block for up to `timeout` waiting for an event.
    /// A zero timeout only picks up an event that is already queued.
    fn recv_timeout(&self, timeout: Duration) -> Result<RideEvent, RecvTimeoutError>;
}

/// Events delivered over a channel, fed by the terminal or by a test
pub struct ChannelSource {
    rx: Receiver<RideEvent>,
}

impl ChannelSource {
    pub fn new(rx: Receiver<RideEvent>) -> Self {
        Self { rx }
    }

    /// Forward key presses and resizes from a terminal reader thread
    pub fn terminal() -> Self {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || loop {
            let event = match event::read() {
                // Releases and repeats would toggle the ride more than once
                Ok(CtEvent::Key(key)) if key.kind == KeyEventKind::Press => RideEvent::Key(key),
                Ok(CtEvent::Resize(_, _)) => RideEvent::Resize,
                Ok(_) => continue,
                Err(err) => {
                    warn!(%err, "terminal event reader stopped");
                    break;
                }
            };
            if tx.send(event).is_err() {
                break;
            }
        });

        Self::new(rx)
    }
}

impl RideEventSource for ChannelSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<RideEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Interleaves input with frames that fall due on a fixed cadence.
///
/// Frame deadlines are read off the clock, not off the wait, so a burst of
/// keys never pushes the next frame back. When the loop runs behind, frames
/// and queued events alternate, and deadlines that were missed entirely are
/// dropped rather than replayed.
pub struct Runner<E, C> {
    events: E,
    clock: C,
    frame_interval: Duration,
    next_frame: Duration,
    just_framed: bool,
}

impl<E: RideEventSource, C: Clock> Runner<E, C> {
    pub fn new(events: E, clock: C, frame_interval: Duration) -> Self {
        let next_frame = clock.now() + frame_interval;
        Self {
            events,
            clock,
            frame_interval,
            next_frame,
            just_framed: false,
        }
    }

    /// The next input event, or `Frame` once the frame deadline has passed
    pub fn step(&mut self) -> RideEvent {
        let now = self.clock.now();

        if now >= self.next_frame {
            if !self.just_framed {
                return self.frame(now);
            }
            // Still overdue right after a frame: give queued input a turn
            return match self.events.recv_timeout(Duration::ZERO) {
                Ok(event) => self.deliver(event),
                Err(_) => self.frame(now),
            };
        }

        let wait = self.next_frame - now;
        match self.events.recv_timeout(wait) {
            Ok(event) => self.deliver(event),
            Err(RecvTimeoutError::Timeout) => self.frame(self.clock.now()),
            Err(RecvTimeoutError::Disconnected) => {
                thread::sleep(wait);
                self.frame(self.clock.now())
            }
        }
    }

    fn deliver(&mut self, event: RideEvent) -> RideEvent {
        self.just_framed = false;
        event
    }

    fn frame(&mut self, now: Duration) -> RideEvent {
        self.next_frame += self.frame_interval;
        if self.next_frame <= now {
            debug!(behind = ?(now - self.next_frame), "frame deadlines missed");
            self.next_frame = now + self.frame_interval;
        }
        self.just_framed = true;
        RideEvent::Frame
    }
}
