use thiserror::Error;
use wp_event::EventError;
use wp_spatial::SpatialError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("routing error: {0}")]
    Spatial(#[from] SpatialError),

    #[error("event sink error: {0}")]
    Sink(#[from] EventError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("scenario parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type SimResult<T> = Result<T, SimError>;
