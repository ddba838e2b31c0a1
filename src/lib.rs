// Library surface for the binary, headless runs and integration tests.
pub mod app;
pub mod app_dirs;
pub mod clock;
pub mod config;
pub mod error;
pub mod odometer;
pub mod runtime;
pub mod scene;
pub mod scroll;
pub mod timer;
pub mod transition;
pub mod ui;
pub mod wheel;

pub use app::App;
pub use error::ConfigError;
