use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use pedalscape::{
    app::{App, KeyOutcome},
    app_dirs::AppDirs,
    clock::{Clock, SystemClock},
    config::{Config, ConfigStore, FileConfigStore},
    runtime::{ChannelSource, RideEvent, RideEventSource, Runner},
    scroll::ScrollDirection,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    fs::{self, OpenOptions},
    io::{self, stdin},
    path::PathBuf,
    sync::{Arc, Mutex},
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// animated biker tui with an endless parallax ride and a distance counter
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "An animated biker riding through endlessly scrolling parallax mountains. Press enter to start or stop the ride; the distance counter grows on every tick while you ride."
)]
pub struct Cli {
    /// distance added on every tick
    #[clap(short = 's', long)]
    step: Option<f64>,

    /// milliseconds between distance ticks
    #[clap(short = 'i', long)]
    tick_ms: Option<u64>,

    /// unit label shown after the distance
    #[clap(short = 'u', long)]
    unit: Option<String>,

    /// animation frames per second
    #[clap(long)]
    fps: Option<u32>,

    /// direction of the top mountain band
    #[clap(long, value_enum)]
    top_direction: Option<ScrollDirection>,

    /// direction of the bottom mountain band
    #[clap(long, value_enum)]
    bottom_direction: Option<ScrollDirection>,

    /// direction of the middle mountain band
    #[clap(long, value_enum)]
    middle_direction: Option<ScrollDirection>,

    /// config file to read settings from
    #[clap(short = 'c', long)]
    config: Option<PathBuf>,

    /// write the effective settings back to the config file
    #[clap(long)]
    save_config: bool,
}

impl Cli {
    /// Layer command line overrides on top of the stored config
    fn apply(&self, mut config: Config) -> Config {
        if let Some(step) = self.step {
            config.distance_step = step;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_interval_ms = tick_ms;
        }
        if let Some(unit) = &self.unit {
            config.unit = unit.clone();
        }
        if let Some(fps) = self.fps {
            config.frames_per_second = fps;
        }
        if let Some(direction) = self.top_direction {
            config.top_band.direction = direction;
        }
        if let Some(direction) = self.bottom_direction {
            config.bottom_band.direction = direction;
        }
        if let Some(direction) = self.middle_direction {
            config.middle_band.direction = direction;
        }
        config
    }

    fn config_store(&self) -> FileConfigStore {
        self.config
            .as_ref()
            .map(FileConfigStore::with_path)
            .unwrap_or_default()
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging();

    let store = cli.config_store();
    let config = cli.apply(store.load());
    if let Err(err) = config.validate() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::ValueValidation, err).exit();
    }

    if cli.save_config {
        store.save(&config)?;
        info!(path = %store.path().display(), "config saved");
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let clock = Arc::new(SystemClock::new());
    let frame_interval = config.frame_interval();
    let mut app = App::new(config, Arc::clone(&clock))?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        ?frame_interval,
        "starting pedalscape"
    );

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut runner = Runner::new(ChannelSource::terminal(), clock, frame_interval);
    let result = start_tui(&mut terminal, &mut app, &mut runner);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen,)?;
    terminal.show_cursor()?;

    info!(distance = app.odometer.distance(), "bye");
    result
}

/// Log to a file; the terminal itself belongs to the alternate screen
fn init_logging() {
    let Some(path) = AppDirs::log_path() else {
        return;
    };
    if let Some(parent) = path.parent() {
        if fs::create_dir_all(parent).is_err() {
            return;
        }
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
}

fn start_tui<B: Backend, C: Clock, E: RideEventSource, K: Clock>(
    terminal: &mut Terminal<B>,
    app: &mut App<C>,
    runner: &mut Runner<E, K>,
) -> Result<(), Box<dyn Error>> {
    terminal.draw(|f| f.render_widget(&*app, f.area()))?;

    loop {
        match runner.step() {
            RideEvent::Frame | RideEvent::Resize => {}
            RideEvent::Key(key) => match app.on_key(key) {
                KeyOutcome::Quit => break,
                KeyOutcome::Ignored => continue,
                KeyOutcome::Redraw => {}
            },
        }

        app.on_frame();
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;
    }

    Ok(())
}
