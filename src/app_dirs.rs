use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    /// Where the tracing log goes while the terminal is in the alternate screen
    pub fn log_path() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            let state_dir = PathBuf::from(home)
                .join(".local")
                .join("state")
                .join("pedalscape");
            Some(state_dir.join("pedalscape.log"))
        } else {
            ProjectDirs::from("", "", "pedalscape")
                .map(|proj_dirs| proj_dirs.data_local_dir().join("pedalscape.log"))
        }
    }
}
