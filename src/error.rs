use thiserror::Error;

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Problems reading or validating a [`TrainConfig`](crate::train::TrainConfig).
///
/// Only configuration goes through `Result`; shape mismatches and allocation
/// failures inside the numeric core are panics.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config i/o failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("config is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("epsilon must be finite and positive, got {0}")]
    InvalidEpsilon(f32),

    #[error("learning rate must be finite and positive, got {0}")]
    InvalidLearningRate(f32),
}
