/// Configuration errors.
///
/// Everything here is an authoring mistake caught when the screen is built,
/// never a condition the running animation has to recover from.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("tile width must be positive and finite, got {0}")]
    InvalidTileWidth(f64),

    #[error("scroll speed must be positive and finite, got {0}")]
    InvalidSpeed(f64),

    #[error("distance step must be non-negative and finite, got {0}")]
    InvalidStep(f64),

    #[error("tick interval must be non-zero")]
    ZeroTickInterval,

    #[error("frame rate must be non-zero")]
    ZeroFrameRate,

    #[error("wheel period must be non-zero")]
    ZeroWheelPeriod,

    #[error("failed to access config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode config: {0}")]
    Json(#[from] serde_json::Error),
}
