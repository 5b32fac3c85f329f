use thiserror::Error;

#[derive(Error, Debug)]
pub enum LaneError {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Unknown unit: {0}")]
    UnknownUnit(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LaneError>;
