use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use pedalscape::app::{App, KeyOutcome};
use pedalscape::clock::ManualClock;
use pedalscape::config::Config;
use pedalscape::runtime::{ChannelSource, RideEvent, Runner};
use ratatui::{backend::TestBackend, Terminal};

fn enter() -> RideEvent {
    RideEvent::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE))
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

// Headless ride using the internal runtime + App without a TTY.
// The clock is advanced by hand so no test waits on real seconds.
#[test]
fn headless_ride_start_stop_resume() {
    let clock = ManualClock::new();
    let mut app = App::new(Config::default(), &clock).unwrap();

    let (tx, rx) = mpsc::channel();
    let mut runner = Runner::new(ChannelSource::new(rx), &clock, Duration::from_millis(1));

    // start at t=0, let five seconds pass frame by frame
    tx.send(enter()).unwrap();
    for _ in 0..150u32 {
        if let RideEvent::Key(key) = runner.step() {
            assert_eq!(app.on_key(key), KeyOutcome::Redraw);
        }
        app.on_frame();
        clock.advance(Duration::from_millis(34));
    }
    // 150 frames * 34ms = 5.1s
    assert!(app.is_running());
    assert_close(app.odometer.distance(), 0.5);

    // stop and let a long time pass
    tx.send(enter()).unwrap();
    for _ in 0..10u32 {
        if let RideEvent::Key(key) = runner.step() {
            app.on_key(key);
        }
        app.on_frame();
        clock.advance(Duration::from_secs(7));
    }
    assert!(!app.is_running());
    assert_close(app.odometer.distance(), 0.5);

    // resume for three more intervals
    tx.send(enter()).unwrap();
    if let RideEvent::Key(key) = runner.step() {
        app.on_key(key);
    }
    clock.advance(Duration::from_millis(3050));
    app.on_frame();
    assert_close(app.odometer.distance(), 0.8);
}

#[test]
fn headless_quit_key_stops_loop() {
    let clock = ManualClock::new();
    let mut app = App::new(Config::default(), &clock).unwrap();

    let (tx, rx) = mpsc::channel();
    tx.send(RideEvent::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)))
        .unwrap();
    let mut runner = Runner::new(ChannelSource::new(rx), &clock, Duration::from_millis(1));

    let mut steps = 0;
    loop {
        steps += 1;
        if let RideEvent::Key(key) = runner.step() {
            if app.on_key(key) == KeyOutcome::Quit {
                break;
            }
        }
        assert!(steps < 10, "quit key was not seen");
    }
    assert_eq!(steps, 1);
}

#[test]
fn headless_frames_render_to_test_backend() {
    let clock = ManualClock::new();
    let mut app = App::new(Config::default(), &clock).unwrap();
    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();

    terminal.draw(|f| f.render_widget(&app, f.area())).unwrap();
    let idle: String = terminal
        .backend()
        .buffer()
        .content
        .iter()
        .map(|c| c.symbol())
        .collect();
    assert!(idle.contains("Let's go!"));

    app.toggle();
    clock.advance(Duration::from_secs(2));
    app.on_frame();
    terminal.draw(|f| f.render_widget(&app, f.area())).unwrap();
    let running: String = terminal
        .backend()
        .buffer()
        .content
        .iter()
        .map(|c| c.symbol())
        .collect();
    assert!(running.contains("Stop"));
    assert!(running.contains("km"));
}

#[test]
fn headless_slow_frames_catch_up_ticks() {
    // A stalled frame loop still credits every elapsed interval
    let clock = ManualClock::new();
    let mut app = App::new(Config::default(), &clock).unwrap();
    app.toggle();

    clock.advance(Duration::from_millis(4200));
    assert_eq!(app.on_frame(), 4);
    assert_close(app.odometer.distance(), 0.4);
}
