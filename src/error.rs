use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShowFinderError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Request to {url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("Unsupported location: {0}")]
    UnsupportedLocation(String),
}

pub type Result<T> = std::result::Result<T, ShowFinderError>;
