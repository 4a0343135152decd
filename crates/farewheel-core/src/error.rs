use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Carousel needs at least one item")]
    EmptyCarousel,

    #[error("Place not found: {0}")]
    UnknownPlace(String),

    #[error("Point ({lat:.4}, {lng:.4}) is outside the service area")]
    OutOfBounds { lat: f64, lng: f64 },

    #[error("Invalid trip: {0}")]
    InvalidTrip(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;
