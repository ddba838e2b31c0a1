use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::ConfigError;
use crate::scroll::ScrollDirection;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BandSettings {
    /// Cells per second
    pub speed: f64,
    pub direction: ScrollDirection,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub distance_step: f64,
    pub tick_interval_ms: u64,
    pub unit: String,
    pub frames_per_second: u32,
    pub wheel_period_ms: u64,
    pub transition_ms: u64,
    pub top_band: BandSettings,
    pub bottom_band: BandSettings,
    pub middle_band: BandSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            distance_step: 0.1,
            tick_interval_ms: 1000,
            unit: "km".to_string(),
            frames_per_second: 30,
            wheel_period_ms: 2000,
            transition_ms: 350,
            top_band: BandSettings {
                speed: 10.0,
                direction: ScrollDirection::Leading,
            },
            bottom_band: BandSettings {
                speed: 3.0,
                direction: ScrollDirection::Trailing,
            },
            middle_band: BandSettings {
                speed: 1.5,
                direction: ScrollDirection::Leading,
            },
        }
    }
}

impl Config {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.frames_per_second.max(1)
    }

    pub fn wheel_period(&self) -> Duration {
        Duration::from_millis(self.wheel_period_ms)
    }

    pub fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }

    /// Reject settings the screen cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.distance_step.is_finite() && self.distance_step >= 0.0) {
            return Err(ConfigError::InvalidStep(self.distance_step));
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        if self.frames_per_second == 0 {
            return Err(ConfigError::ZeroFrameRate);
        }
        if self.wheel_period_ms == 0 {
            return Err(ConfigError::ZeroWheelPeriod);
        }
        for band in [&self.top_band, &self.bottom_band, &self.middle_band] {
            if !(band.speed.is_finite() && band.speed > 0.0) {
                return Err(ConfigError::InvalidSpeed(band.speed));
            }
        }
        Ok(())
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> Result<(), ConfigError>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "pedalscape") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("pedalscape_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) => {
                debug!(path = %self.path.display(), %err, "no config file, using defaults");
                return Config::default();
            }
        };
        match serde_json::from_slice::<Config>(&bytes) {
            Ok(cfg) => cfg,
            Err(err) => {
                warn!(path = %self.path.display(), %err, "unreadable config, using defaults");
                Config::default()
            }
        }
    }

    fn save(&self, cfg: &Config) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}
