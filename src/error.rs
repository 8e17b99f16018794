use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} must be within {min}..={max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
    #[error("snap-out radius ({snap_out}px) must exceed snap-in radius ({snap_in}px)")]
    SnapHysteresis { snap_in: f32, snap_out: f32 },
    #[error("outbound stride must be at least 1")]
    ZeroStride,
    #[error("invalid value {value:?} for environment variable {key}")]
    Env { key: String, value: String },
}

#[derive(Debug, Error)]
pub enum TrackingError {
    #[error("expected 21 hand landmarks, got {0}")]
    LandmarkCount(usize),
    #[error("hand tracking unavailable: {0}")]
    SourceUnavailable(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
